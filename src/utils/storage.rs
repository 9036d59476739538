// ============================================================================
// STORAGE - Helpers de localStorage
// ============================================================================

use web_sys::{window, Storage};

pub fn get_local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

/// Leer un valor plano; None si no existe o no hay storage
pub fn get_string(key: &str) -> Option<String> {
    get_local_storage()?.get_item(key).ok()?
}

pub fn set_string(key: &str, value: &str) -> Result<(), String> {
    let storage = get_local_storage().ok_or("No se pudo acceder a localStorage")?;
    storage
        .set_item(key, value)
        .map_err(|_| "Error guardando en localStorage".to_string())
}

pub fn remove(key: &str) -> Result<(), String> {
    let storage = get_local_storage().ok_or("No se pudo acceder a localStorage")?;
    storage
        .remove_item(key)
        .map_err(|_| "Error eliminando de localStorage".to_string())
}
