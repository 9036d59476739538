// ============================================================================
// AUTH MODELS - Roles, usuario actual y cuerpos de login
// ============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// Roles reales del sistema. El backend siempre responde uno de estos tres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Bodega,
    Oficina,
    Admin,
}

impl Role {
    /// Parsear un rol desde texto (case-insensitive). Cualquier otro valor
    /// se trata como sesión ausente.
    pub fn parse(raw: &str) -> Option<Role> {
        match raw.trim().to_lowercase().as_str() {
            "bodega" => Some(Role::Bodega),
            "oficina" => Some(Role::Oficina),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Clave canónica (lo que se persiste y se manda al backend)
    pub fn key(&self) -> &'static str {
        match self {
            Role::Bodega => "bodega",
            Role::Oficina => "oficina",
            Role::Admin => "admin",
        }
    }

    /// Nombre "bonito" para la demo (lookup estático de roles)
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Bodega => "Juan Pérez",
            Role::Oficina => "Ana López",
            Role::Admin => "Carlos Master",
        }
    }

    /// Etiqueta genérica por rol, fallback cuando no aplica el nombre demo
    pub fn generic_label(&self) -> &'static str {
        match self {
            Role::Bodega => "Empleado Bodega",
            Role::Oficina => "Empleado Oficina",
            Role::Admin => "Administrador",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Usuario autenticado. Derivado de la sesión persistida, nunca se guarda
/// directamente: se reconstruye en cada arranque.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser {
    pub name: String,
    pub role: Role,
}

impl CurrentUser {
    pub fn from_role(role: Role) -> Self {
        Self {
            name: role.display_name().to_string(),
            role,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub role: String,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_roles_case_insensitive() {
        assert_eq!(Role::parse("bodega"), Some(Role::Bodega));
        assert_eq!(Role::parse("OFICINA"), Some(Role::Oficina));
        assert_eq!(Role::parse("  Admin "), Some(Role::Admin));
    }

    #[test]
    fn parse_unknown_role_is_none() {
        assert_eq!(Role::parse(""), None);
        assert_eq!(Role::parse("gerente"), None);
    }

    #[test]
    fn display_names_from_static_lookup() {
        assert_eq!(Role::Bodega.display_name(), "Juan Pérez");
        assert_eq!(Role::Oficina.display_name(), "Ana López");
        assert_eq!(Role::Admin.display_name(), "Carlos Master");
    }

    #[test]
    fn current_user_derives_name_from_role() {
        let user = CurrentUser::from_role(Role::Oficina);
        assert_eq!(user.name, "Ana López");
        assert_eq!(user.role, Role::Oficina);
    }
}
