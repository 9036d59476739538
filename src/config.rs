// ============================================================================
// CONFIG - Configuración en tiempo de compilación
// ============================================================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Prefijo de la API real (proxy del frontend)
    pub api_base: String,
    /// true = dataset mock en memoria, sin red
    pub use_mock: bool,
    pub environment: String,
    pub enable_logging: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: "/api".to_string(),
            use_mock: true,
            environment: "development".to_string(),
            enable_logging: true,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de
    /// compilación (build.rs promueve .env a rustc-env).
    pub fn from_env() -> Self {
        Self {
            api_base: option_env!("API_BASE").unwrap_or("/api").to_string(),
            use_mock: option_env!("USE_MOCK")
                .unwrap_or("true")
                .parse()
                .unwrap_or(true),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development")
                .to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true")
                .parse()
                .unwrap_or(true),
        }
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
