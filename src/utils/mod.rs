// ============================================================================
// UTILS - Storage y formato de presentación
// ============================================================================

pub mod format;
pub mod storage;
