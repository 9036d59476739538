// ============================================================================
// SESSION STORE - Sesión persistida (rol + token en localStorage)
// ============================================================================
// Única fuente de verdad para reconstruir la sesión: el dispatcher no lee
// storage por su cuenta ni mantiene copias redundantes del rol.
// ============================================================================

use crate::models::{CurrentUser, Role};
use crate::state::AppState;
use crate::utils::storage;

/// Claves de localStorage. Siempre se escriben y borran juntas: una sesión
/// parcial (solo rol o solo token) se trata como ausente.
pub const ROLE_KEY: &str = "nexus_role";
pub const TOKEN_KEY: &str = "nexus_token";

/// Decidir si un par (rol, token) crudo constituye una sesión válida.
/// Pura, sin storage ni DOM: testeable directamente.
pub fn user_from_parts(role: Option<&str>, token: Option<&str>) -> Option<CurrentUser> {
    let role = Role::parse(role?)?;
    let token = token?.trim();
    if token.is_empty() {
        return None;
    }
    Some(CurrentUser::from_role(role))
}

pub struct SessionStore;

impl SessionStore {
    /// Cargar la sesión persistida en el estado. Sin llamadas de red.
    /// Si storage está vacío o el rol no se reconoce, no toca nada
    /// (la app se queda en login). El fallo es silencioso.
    pub fn load(state: &AppState) {
        let role = storage::get_string(ROLE_KEY);
        let token = storage::get_string(TOKEN_KEY);

        if let Some(user) = user_from_parts(role.as_deref(), token.as_deref()) {
            log::info!("💾 [SESSION] Sesión encontrada en storage, restaurando ({})", user.role);
            state.set_user(user);
        }
    }

    /// Persistir una sesión nueva y poblar el estado. Pisa cualquier
    /// sesión anterior.
    pub fn set(state: &AppState, role: &str, token: &str) {
        let normalized = role.trim().to_lowercase();

        if let Err(e) = storage::set_string(ROLE_KEY, &normalized) {
            log::error!("❌ [SESSION] Error guardando rol: {}", e);
        }
        if let Err(e) = storage::set_string(TOKEN_KEY, token) {
            log::error!("❌ [SESSION] Error guardando token: {}", e);
        }

        // El nombre sale del lookup estático; si el rol viniera desconocido
        // desde el backend, se muestra la clave cruda.
        let user = match Role::parse(&normalized) {
            Some(r) => CurrentUser::from_role(r),
            None => {
                log::warn!("⚠️ [SESSION] Rol desconocido del backend: {}", normalized);
                return;
            }
        };

        state.set_user(user);
        log::info!("✅ [SESSION] Sesión persistida");
    }

    /// Borrar ambas claves y resetear el estado a login
    pub fn clear(state: &AppState) {
        let _ = storage::remove(ROLE_KEY);
        let _ = storage::remove(TOKEN_KEY);
        state.clear_session();
        log::info!("👋 [SESSION] Sesión limpiada");
    }

    /// Token persistido (para el header Authorization)
    pub fn token() -> Option<String> {
        let token = storage::get_string(TOKEN_KEY)?;
        let trimmed = token.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_pairs_build_a_user() {
        for (role, expected) in [
            ("bodega", "Juan Pérez"),
            ("oficina", "Ana López"),
            ("admin", "Carlos Master"),
        ] {
            let user = user_from_parts(Some(role), Some("t1")).unwrap();
            assert_eq!(user.name, expected);
        }
    }

    #[test]
    fn partial_sessions_are_absent() {
        assert!(user_from_parts(None, Some("t1")).is_none());
        assert!(user_from_parts(Some("bodega"), None).is_none());
        assert!(user_from_parts(Some("bodega"), Some("   ")).is_none());
    }

    #[test]
    fn unknown_role_is_absent() {
        assert!(user_from_parts(Some("gerente"), Some("t1")).is_none());
    }

    #[test]
    fn role_is_parsed_case_insensitive() {
        let user = user_from_parts(Some("ADMIN"), Some("mock-admin")).unwrap();
        assert_eq!(user.role, Role::Admin);
    }
}
