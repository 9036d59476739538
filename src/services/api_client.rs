// ============================================================================
// API CLIENT - Un contrato, dos implementaciones (HTTP real / mock)
// ============================================================================
// La implementación se elige UNA vez al arranque según CONFIG.use_mock;
// el dispatcher y las vistas no saben cuál está activa.
// ============================================================================

use thiserror::Error;

use crate::models::{
    ApproveResponse, Invoice, InvoiceCreate, LedgerEntry, LoginResponse, Lot, LotCreate,
    VerifyResponse,
};
use crate::services::http_api::HttpApi;
use crate::services::mock_api::MockApi;

/// Error único que ve el caller, con mensaje legible. Tres clases:
/// transporte caído, status no-2xx (con o sin cuerpo útil) y cuerpo
/// indescifrable.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Red/proxy inalcanzable: el mensaje lo dice explícitamente para que
    /// la UI pueda orientar al usuario a revisar conectividad.
    #[error("Sin conexión con la API: {0}")]
    Network(String),
    /// Status no-2xx. El mensaje sale del campo detail/message del cuerpo,
    /// o del fallback genérico "HTTP <status>".
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("Error interpretando respuesta: {0}")]
    Parse(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Gateway de API. Clonar es barato en ambas variantes.
#[derive(Clone)]
pub enum ApiClient {
    Http(HttpApi),
    Mock(MockApi),
}

impl ApiClient {
    /// Construir el cliente según configuración (decisión única de arranque)
    pub fn from_config() -> Self {
        if crate::config::CONFIG.use_mock {
            log::info!("🧪 [API] Modo mock activo (dataset en memoria)");
            ApiClient::Mock(MockApi::new())
        } else {
            log::info!("🌐 [API] Modo real: {}", crate::config::CONFIG.api_base);
            ApiClient::Http(HttpApi::new())
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResponse> {
        match self {
            ApiClient::Http(api) => api.login(username, password).await,
            ApiClient::Mock(api) => api.login(username, password).await,
        }
    }

    /// Probe de /health: distingue "API caída" de "credenciales malas"
    pub async fn health(&self) -> ApiResult<()> {
        match self {
            ApiClient::Http(api) => api.health().await,
            ApiClient::Mock(api) => api.health().await,
        }
    }

    pub async fn get_inventory(&self) -> ApiResult<Vec<Lot>> {
        match self {
            ApiClient::Http(api) => api.get_inventory().await,
            ApiClient::Mock(api) => api.get_inventory().await,
        }
    }

    pub async fn create_inventory(&self, body: &LotCreate) -> ApiResult<()> {
        match self {
            ApiClient::Http(api) => api.create_inventory(body).await,
            ApiClient::Mock(api) => api.create_inventory(body).await,
        }
    }

    /// Lotes no atados aún a una factura pendiente/aprobada
    pub async fn get_available_lots(&self) -> ApiResult<Vec<Lot>> {
        match self {
            ApiClient::Http(api) => api.get_available_lots().await,
            ApiClient::Mock(api) => api.get_available_lots().await,
        }
    }

    pub async fn get_invoices(&self) -> ApiResult<Vec<Invoice>> {
        match self {
            ApiClient::Http(api) => api.get_invoices().await,
            ApiClient::Mock(api) => api.get_invoices().await,
        }
    }

    pub async fn create_invoice(&self, body: &InvoiceCreate) -> ApiResult<()> {
        match self {
            ApiClient::Http(api) => api.create_invoice(body).await,
            ApiClient::Mock(api) => api.create_invoice(body).await,
        }
    }

    pub async fn get_pending_approvals(&self) -> ApiResult<Vec<Invoice>> {
        match self {
            ApiClient::Http(api) => api.get_pending_approvals().await,
            ApiClient::Mock(api) => api.get_pending_approvals().await,
        }
    }

    pub async fn approve_invoice(&self, id: u32) -> ApiResult<ApproveResponse> {
        match self {
            ApiClient::Http(api) => api.approve_invoice(id).await,
            ApiClient::Mock(api) => api.approve_invoice(id).await,
        }
    }

    pub async fn reject_invoice(&self, id: u32) -> ApiResult<()> {
        match self {
            ApiClient::Http(api) => api.reject_invoice(id).await,
            ApiClient::Mock(api) => api.reject_invoice(id).await,
        }
    }

    pub async fn get_ledger(&self) -> ApiResult<Vec<LedgerEntry>> {
        match self {
            ApiClient::Http(api) => api.get_ledger().await,
            ApiClient::Mock(api) => api.get_ledger().await,
        }
    }

    pub async fn verify_chain(&self) -> ApiResult<VerifyResponse> {
        match self {
            ApiClient::Http(api) => api.verify_chain().await,
            ApiClient::Mock(api) => api.verify_chain().await,
        }
    }
}
