// ============================================================================
// HTTP API - Implementación real del gateway (gloo-net)
// ============================================================================
// Un único primitivo request() por el que pasan todas las llamadas: agrega
// el header Bearer, decodifica por content-type y normaliza errores.
// ============================================================================

use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::models::{
    ApproveResponse, Invoice, InvoiceCreate, LedgerEntry, LoginRequest, LoginResponse, Lot,
    LotCreate, VerifyResponse,
};
use crate::services::api_client::{ApiError, ApiResult};
use crate::services::session_store::SessionStore;

#[derive(Debug, Clone, Copy)]
enum Method {
    Get,
    Post,
}

#[derive(Clone)]
pub struct HttpApi {
    base_url: String,
}

impl HttpApi {
    pub fn new() -> Self {
        Self {
            base_url: crate::config::CONFIG.api_base.clone(),
        }
    }

    /// Primitivo único de request. `auth` agrega el Bearer si hay token.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        auth: bool,
    ) -> ApiResult<Value> {
        let url = format!("{}{}", self.base_url, path);

        let mut builder: RequestBuilder = match method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
        };

        if auth {
            if let Some(token) = SessionStore::token() {
                builder = builder.header("Authorization", &format!("Bearer {}", token));
            }
        }

        let request = match body {
            Some(value) => builder
                .json(value)
                .map_err(|e| ApiError::Parse(e.to_string()))?,
            None => builder
                .build()
                .map_err(|e| ApiError::Parse(e.to_string()))?,
        };

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .unwrap_or_default();

        // Decodificar por content-type; texto plano se envuelve en
        // {"message": ...} para que el extractor de errores lo encuentre.
        let data: Option<Value> = if content_type.contains("application/json") {
            response.json::<Value>().await.ok()
        } else {
            match response.text().await {
                Ok(text) if !text.is_empty() => Some(json!({ "message": text })),
                _ => None,
            }
        };

        if !response.ok() {
            let message = error_message(status, data.as_ref());
            log::error!("❌ [API] {} {} -> HTTP {}: {}", method_name(method), path, status, message);
            return Err(ApiError::Http { status, message });
        }

        data.ok_or_else(|| ApiError::Parse("Respuesta vacía del backend".to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, auth: bool) -> ApiResult<T> {
        let value = self.request(Method::Get, path, None, auth).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &Value,
        auth: bool,
    ) -> ApiResult<T> {
        let value = self.request(Method::Post, path, Some(body), auth).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Parse(e.to_string()))
    }

    pub async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResponse> {
        log::info!("🔐 [API] Login de usuario: {}", username);
        let body = serde_json::to_value(LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        })
        .map_err(|e| ApiError::Parse(e.to_string()))?;
        self.post_json("/auth/login", &body, false).await
    }

    pub async fn health(&self) -> ApiResult<()> {
        self.request(Method::Get, "/health", None, false).await?;
        Ok(())
    }

    pub async fn get_inventory(&self) -> ApiResult<Vec<Lot>> {
        self.get_json("/inventory", true).await
    }

    pub async fn create_inventory(&self, body: &LotCreate) -> ApiResult<()> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Parse(e.to_string()))?;
        self.request(Method::Post, "/inventory", Some(&value), true)
            .await?;
        Ok(())
    }

    pub async fn get_available_lots(&self) -> ApiResult<Vec<Lot>> {
        self.get_json("/lots/available", true).await
    }

    pub async fn get_invoices(&self) -> ApiResult<Vec<Invoice>> {
        self.get_json("/invoices", true).await
    }

    pub async fn create_invoice(&self, body: &InvoiceCreate) -> ApiResult<()> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Parse(e.to_string()))?;
        self.request(Method::Post, "/invoices", Some(&value), true)
            .await?;
        Ok(())
    }

    pub async fn get_pending_approvals(&self) -> ApiResult<Vec<Invoice>> {
        self.get_json("/admin/pending", true).await
    }

    pub async fn approve_invoice(&self, id: u32) -> ApiResult<ApproveResponse> {
        let path = format!("/admin/invoices/{}/approve", id);
        let value = self.request(Method::Post, &path, None, true).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Parse(e.to_string()))
    }

    pub async fn reject_invoice(&self, id: u32) -> ApiResult<()> {
        let path = format!("/admin/invoices/{}/reject", id);
        self.request(Method::Post, &path, None, true).await?;
        Ok(())
    }

    pub async fn get_ledger(&self) -> ApiResult<Vec<LedgerEntry>> {
        self.get_json("/ledger", true).await
    }

    pub async fn verify_chain(&self) -> ApiResult<VerifyResponse> {
        self.get_json("/ledger/verify", true).await
    }
}

fn method_name(method: Method) -> &'static str {
    match method {
        Method::Get => "GET",
        Method::Post => "POST",
    }
}

/// Extraer el mensaje de error de un cuerpo convencional (detail | message),
/// con fallback genérico "HTTP <status>".
pub(crate) fn error_message(status: u16, body: Option<&Value>) -> String {
    body.and_then(|v| v.get("detail").or_else(|| v.get("message")))
        .and_then(|m| m.as_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("HTTP {}", status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_from_detail_field() {
        let body = json!({ "detail": "Token expirado" });
        assert_eq!(error_message(401, Some(&body)), "Token expirado");
    }

    #[test]
    fn message_from_message_field() {
        let body = json!({ "message": "No autorizado para este recurso" });
        assert_eq!(error_message(403, Some(&body)), "No autorizado para este recurso");
    }

    #[test]
    fn detail_wins_over_message() {
        let body = json!({ "detail": "a", "message": "b" });
        assert_eq!(error_message(400, Some(&body)), "a");
    }

    #[test]
    fn fallback_is_generic_http_status() {
        assert_eq!(error_message(502, None), "HTTP 502");
        // Cuerpo presente pero sin campo convencional
        let body = json!({ "error_code": 17 });
        assert_eq!(error_message(500, Some(&body)), "HTTP 500");
    }

    #[test]
    fn network_error_message_mentions_connectivity() {
        let err = ApiError::Network("fetch failed".to_string());
        assert!(err.to_string().contains("Sin conexión con la API"));
    }
}
