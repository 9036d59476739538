// ============================================================================
// APP - Dispatcher de vistas (máquina de render)
// ============================================================================
// Un solo pase de render decide qué se ve: login si no hay sesión, el
// dashboard con la sub-vista resuelta si la hay. Ningún error del pase se
// propaga: termina en el panel recuperable con Reintentar / Forzar cierre.
// No hay patching incremental: cada pase reemplaza el root completo.
// ============================================================================

use thiserror::Error;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{self, append_child, set_inner_html, ElementBuilder};
use crate::models::Role;
use crate::services::{ApiClient, ApiError, SessionStore};
use crate::state::{AppState, SubView, TopView};
use crate::utils::format::escape_html;
use crate::views::{dashboard, login, ViewRegistry};
use crate::{apply_intent, Intent};

const ROOT_ID: &str = "app";

/// Fallo de un pase de render. Nunca sale del dispatcher: se convierte en
/// el panel de error recuperable.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("Error de DOM: {0}")]
    Dom(String),
}

impl From<JsValue> for RenderError {
    fn from(value: JsValue) -> Self {
        RenderError::Dom(format!("{:?}", value))
    }
}

/// Resolver la sub-vista a mostrar: se conserva la activa si el rol tiene
/// derecho a ella, si no se resetea al default del rol. Idempotente.
pub fn resolve_sub_view(role: Role, active: Option<SubView>) -> SubView {
    match active {
        Some(view) if view.allowed_for(role) => view,
        _ => SubView::default_for(role),
    }
}

pub struct App {
    state: AppState,
    api: ApiClient,
    registry: ViewRegistry,
}

impl App {
    pub fn new() -> Self {
        Self {
            state: AppState::new(),
            api: ApiClient::from_config(),
            registry: ViewRegistry::full(),
        }
    }

    /// Pase de render completo. Cualquier RenderError cae al panel
    /// recuperable; si ni siquiera ese se puede pintar, solo queda el log.
    pub async fn render(&self) {
        if let Err(err) = self.render_pass().await {
            log::error!("❌ [APP] Error de render: {}", err);
            if let Err(e) = self.render_error_panel(&err) {
                log::error!("❌ [APP] No se pudo pintar el panel de error: {:?}", e);
            }
        }
    }

    async fn render_pass(&self) -> Result<(), RenderError> {
        let root = dom::get_element_by_id(ROOT_ID)
            .ok_or_else(|| RenderError::Dom(format!("No existe el elemento #{}", ROOT_ID)))?;

        // Paso 1: reconstrucción silenciosa de sesión (solo storage, sin red)
        if self.state.current_user().is_none() {
            SessionStore::load(&self.state);
        }

        // Paso 2: sin sesión -> login y nada más (cero fetches)
        let user = match (self.state.top_view(), self.state.current_user()) {
            (TopView::Dashboard, Some(user)) => user,
            _ => {
                let screen = login::render()?;
                mount(&root, &screen)?;
                login::bind(&self.state, &self.api)?;
                return Ok(());
            }
        };

        // Paso 3: sub-vista activa validada contra el rol
        let sub = resolve_sub_view(user.role, self.state.active_view());
        self.state.set_active_view(sub);

        match self.registry.get(sub) {
            // Paso 4: módulo ausente -> placeholder estático, sin bind de vista
            None => {
                log::warn!("⚠️ [APP] Sub-vista {:?} sin módulo, render degradado", sub);
                let placeholder = degraded_placeholder(sub)?;
                let shell = dashboard::render(&user, sub, placeholder)?;
                mount(&root, &shell)?;
                dashboard::bind(&self.state)?;
            }
            Some(module) => {
                let content = (module.render)(self.state.clone(), self.api.clone()).await?;
                let shell = dashboard::render(&user, sub, content)?;
                mount(&root, &shell)?;
                // Paso 6: bind recién con el DOM nuevo montado
                dashboard::bind(&self.state)?;
                (module.bind)(&self.state, &self.api)?;
            }
        }

        Ok(())
    }

    /// Paso 5: panel de error recuperable. Estático, sin fetches, con las
    /// dos salidas: reintentar el pase o invalidar la sesión.
    fn render_error_panel(&self, err: &RenderError) -> Result<(), JsValue> {
        let root = match dom::get_element_by_id(ROOT_ID) {
            Some(el) => el,
            None => return Ok(()),
        };

        let panel = ElementBuilder::new("div")?
            .class("error-panel")
            .html(&format!(
                "<div class=\"error-card\">\
                   <h2>Algo salió mal</h2>\
                   <p class=\"error-detail\">{}</p>\
                   <div class=\"error-actions\">\
                     <button id=\"retry-btn\" class=\"btn btn-primary\">Reintentar</button>\
                     <button id=\"force-logout-btn\" class=\"btn btn-secondary\">Forzar cierre de sesión</button>\
                   </div>\
                 </div>",
                escape_html(&err.to_string())
            ))
            .build();

        mount(&root, &panel)?;

        dom::on_click_id("retry-btn", |_| apply_intent(Intent::Rerender))?;

        let state = self.state.clone();
        dom::on_click_id("force-logout-btn", move |_| {
            SessionStore::clear(&state);
            apply_intent(Intent::Rerender);
        })?;

        Ok(())
    }
}

/// Reemplazar el contenido del root (borra listeners viejos junto con los
/// elementos)
fn mount(root: &Element, content: &Element) -> Result<(), JsValue> {
    set_inner_html(root, "");
    append_child(root, content)
}

fn degraded_placeholder(sub: SubView) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("degraded-panel")
        .html(&format!(
            "<h2>Vista no disponible</h2>\
             <p>La sección <span class=\"mono\">{:?}</span> no está cargada en esta build. \
                El resto del panel sigue operativo.</p>",
            sub
        ))
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_defaults_by_role_when_nothing_active() {
        assert_eq!(resolve_sub_view(Role::Bodega, None), SubView::Inventory);
        assert_eq!(resolve_sub_view(Role::Oficina, None), SubView::Invoices);
        assert_eq!(resolve_sub_view(Role::Admin, None), SubView::Admin);
    }

    #[test]
    fn resolve_keeps_an_allowed_active_view() {
        assert_eq!(
            resolve_sub_view(Role::Admin, Some(SubView::Ledger)),
            SubView::Ledger
        );
        assert_eq!(
            resolve_sub_view(Role::Bodega, Some(SubView::Inventory)),
            SubView::Inventory
        );
    }

    #[test]
    fn resolve_resets_a_foreign_active_view() {
        // Sub-vista de otro rol colada en el estado: vuelve al default
        assert_eq!(
            resolve_sub_view(Role::Bodega, Some(SubView::Admin)),
            SubView::Inventory
        );
        assert_eq!(
            resolve_sub_view(Role::Oficina, Some(SubView::Ledger)),
            SubView::Invoices
        );
    }

    #[test]
    fn resolve_is_idempotent() {
        for role in [Role::Bodega, Role::Oficina, Role::Admin] {
            for active in [
                None,
                Some(SubView::Inventory),
                Some(SubView::Invoices),
                Some(SubView::Admin),
                Some(SubView::Ledger),
            ] {
                let once = resolve_sub_view(role, active);
                assert_eq!(resolve_sub_view(role, Some(once)), once);
            }
        }
    }

    #[test]
    fn api_errors_read_well_in_the_panel() {
        let err = RenderError::from(ApiError::Http {
            status: 500,
            message: "Fallo interno".to_string(),
        });
        assert_eq!(err.to_string(), "Fallo interno");

        let err = RenderError::from(ApiError::Network("timeout".to_string()));
        assert!(err.to_string().contains("Sin conexión"));
    }
}
