pub mod api_client;
pub mod http_api;
pub mod mock_api;
pub mod session_store;

pub use api_client::{ApiClient, ApiError, ApiResult};
pub use session_store::SessionStore;
