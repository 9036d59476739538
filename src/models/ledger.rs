// ============================================================================
// LEDGER MODELS - Registro de auditoría encadenado
// ============================================================================

use serde::{Deserialize, Serialize};

/// Entrada del ledger append-only. El encadenamiento (hash / prev_hash)
/// lo calcula el backend; el front-end solo lo muestra.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: u32,
    pub timestamp: String,
    pub actor: String,
    pub action: String,
    pub tx_id: String,
    pub prev_hash: String,
    pub hash: String,
}

/// Respuesta de GET /ledger/verify
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyResponse {
    pub ok: bool,
    #[serde(default)]
    pub message: String,
}
