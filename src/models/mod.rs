// ============================================================================
// MODELS - Estructuras compartidas con el backend
// ============================================================================

pub mod auth;
pub mod inventory;
pub mod invoice;
pub mod ledger;

pub use auth::{CurrentUser, LoginRequest, LoginResponse, Role};
pub use inventory::{Lot, LotCreate};
pub use invoice::{ApproveResponse, Invoice, InvoiceCreate};
pub use ledger::{LedgerEntry, VerifyResponse};
