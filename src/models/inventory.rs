// ============================================================================
// INVENTORY MODELS - Lotes de bodega
// ============================================================================

use serde::{Deserialize, Serialize};

/// Lote de inventario. Disponible hasta que Oficina lo factura (RESERVED).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lot {
    pub id: u32,
    pub date: String,
    pub item: String,
    pub category: String,
    pub qty: u32,
    #[serde(default = "default_lot_status")]
    pub status: String,
    #[serde(default)]
    pub user: String,
    /// El hash real lo escribe el backend al aprobar la factura.
    /// Aquí solo se muestra; mientras tanto queda "PENDING".
    #[serde(default = "default_hash")]
    pub hash: String,
}

fn default_lot_status() -> String {
    "AVAILABLE".to_string()
}

fn default_hash() -> String {
    "PENDING".to_string()
}

/// Cuerpo de POST /inventory. El backend exige el campo `type`
/// (movimiento de inventario); el formulario lo fija en "Entrada".
#[derive(Debug, Clone, Serialize)]
pub struct LotCreate {
    pub date: String,
    pub item: String,
    pub category: String,
    #[serde(rename = "type")]
    pub movement_type: String,
    pub qty: u32,
}

impl LotCreate {
    pub fn entrada(date: String, item: String, category: String, qty: u32) -> Self {
        Self {
            date,
            item,
            category,
            movement_type: "Entrada".to_string(),
            qty,
        }
    }
}
