// ============================================================================
// INVOICE MODELS - Facturas y aprobación
// ============================================================================

use serde::{Deserialize, Serialize};

/// Factura emitida por Oficina sobre un lote. Estados:
/// PENDING_APPROVAL -> APPROVED | REJECTED (decisión del admin).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: u32,
    pub inventory_id: u32,
    pub date: String,
    pub client: String,
    pub total: f64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub user: String,
    // Snapshot del lote facturado (el backend lo adjunta para no re-consultar)
    #[serde(default)]
    pub lot: Option<String>,
    #[serde(default)]
    pub lot_category: Option<String>,
    #[serde(default)]
    pub lot_qty: Option<u32>,
    #[serde(default)]
    pub hash: Option<String>,
}

impl Invoice {
    pub fn is_pending(&self) -> bool {
        self.status == "PENDING_APPROVAL"
    }
}

/// Cuerpo de POST /invoices
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceCreate {
    pub inventory_id: u32,
    pub date: String,
    pub client: String,
    pub total: f64,
}

/// Respuesta de POST /admin/invoices/{id}/approve: el backend devuelve el
/// hash recién encadenado para mostrarlo en el toast.
#[derive(Debug, Clone, Deserialize)]
pub struct ApproveResponse {
    #[serde(default)]
    pub hash: String,
}
