// ============================================================================
// STATE MODULE - Estado global de la aplicación
// ============================================================================

pub mod app_state;

pub use app_state::{AppState, SubView, TopView};
