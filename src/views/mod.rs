// ============================================================================
// VIEWS - Registro de sub-vistas del dashboard
// ============================================================================
// Cada sub-vista expone render (markup desde estado + datos fetcheados) y
// bind (wiring de handlers por id, defensivo). El dispatcher consulta el
// registro con el enum cerrado; un slot vacío dispara el placeholder
// degradado en lugar de romper el render.
// ============================================================================

pub mod admin;
pub mod dashboard;
pub mod inventory;
pub mod invoices;
pub mod ledger;
pub mod login;
pub mod modal;
pub mod toast;

use std::future::Future;
use std::pin::Pin;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::app::RenderError;
use crate::services::ApiClient;
use crate::state::{AppState, SubView};

/// Future local (single-thread, sin Send) que produce el contenido de una
/// sub-vista.
pub type RenderFut = Pin<Box<dyn Future<Output = Result<Element, RenderError>>>>;

/// Par render/bind de una sub-vista
pub struct SubViewModule {
    pub render: fn(AppState, ApiClient) -> RenderFut,
    pub bind: fn(&AppState, &ApiClient) -> Result<(), JsValue>,
}

/// Mapa cerrado SubView -> módulo. Los slots son Option para poder armar
/// registros incompletos en tests (camino degradado).
pub struct ViewRegistry {
    inventory: Option<SubViewModule>,
    invoices: Option<SubViewModule>,
    admin: Option<SubViewModule>,
    ledger: Option<SubViewModule>,
}

impl ViewRegistry {
    /// Wiring de producción: todas las sub-vistas presentes
    pub fn full() -> Self {
        Self {
            inventory: Some(inventory::module()),
            invoices: Some(invoices::module()),
            admin: Some(admin::module()),
            ledger: Some(ledger::module()),
        }
    }

    /// Registro sin módulos (solo tests del camino degradado)
    #[cfg(test)]
    pub fn empty() -> Self {
        Self {
            inventory: None,
            invoices: None,
            admin: None,
            ledger: None,
        }
    }

    pub fn get(&self, view: SubView) -> Option<&SubViewModule> {
        match view {
            SubView::Inventory => self.inventory.as_ref(),
            SubView::Invoices => self.invoices.as_ref(),
            SubView::Admin => self.admin.as_ref(),
            SubView::Ledger => self.ledger.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_registry_has_every_sub_view() {
        let registry = ViewRegistry::full();
        for view in [
            SubView::Inventory,
            SubView::Invoices,
            SubView::Admin,
            SubView::Ledger,
        ] {
            assert!(registry.get(view).is_some());
        }
    }

    #[test]
    fn empty_registry_selects_the_degraded_path() {
        let registry = ViewRegistry::empty();
        assert!(registry.get(SubView::Admin).is_none());
    }
}
