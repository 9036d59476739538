// ============================================================================
// MODAL - Overlay único reutilizable
// ============================================================================
// Hay a lo sumo UN modal abierto: open() pisa el anterior. Vive fuera del
// root de la app, así que un re-render del dashboard no lo cierra; los
// handlers que re-renderizan llaman close() explícitamente.
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{self, on_click_id, ElementBuilder};
use crate::utils::format::escape_html;

const OVERLAY_ID: &str = "app-modal-overlay";

/// Abrir un modal con título y cuerpo ya construido. El botón de cierre
/// viene incluido.
pub fn open(title: &str, body: Element) -> Result<(), JsValue> {
    close();

    let document_body = dom::document()
        .and_then(|d| d.body())
        .ok_or_else(|| JsValue::from_str("No body"))?;

    let header = ElementBuilder::new("div")?
        .class("modal-header")
        .html(&format!(
            "<h2>{}</h2><button id=\"modal-close-btn\" class=\"modal-close\">✕</button>",
            escape_html(title)
        ))
        .build();

    let panel = ElementBuilder::new("div")?
        .class("modal-panel")
        .child(header)?
        .child(body)?
        .build();

    let overlay = ElementBuilder::new("div")?
        .id(OVERLAY_ID)?
        .class("modal-overlay")
        .child(panel)?
        .build();

    document_body.append_child(&overlay)?;
    on_click_id("modal-close-btn", |_| close())?;
    Ok(())
}

/// Cerrar el modal si hay uno abierto
pub fn close() {
    if let Some(overlay) = dom::get_element_by_id(OVERLAY_ID) {
        overlay.remove();
    }
}

/// Modal de confirmación destructiva: mensaje + botones Cancelar/Confirmar.
/// `on_confirm` corre después de cerrar el modal.
pub fn confirm(title: &str, message: &str, on_confirm: Rc<dyn Fn()>) -> Result<(), JsValue> {
    let body = ElementBuilder::new("div")?
        .class("modal-body")
        .html(&format!(
            "<p class=\"modal-message\">{}</p>\
             <div class=\"modal-actions\">\
               <button id=\"modal-cancel-btn\" class=\"btn btn-secondary\">Cancelar</button>\
               <button id=\"modal-confirm-btn\" class=\"btn btn-danger\">Confirmar</button>\
             </div>",
            escape_html(message)
        ))
        .build();

    open(title, body)?;

    on_click_id("modal-cancel-btn", |_| close())?;
    on_click_id("modal-confirm-btn", move |_| {
        close();
        on_confirm();
    })?;
    Ok(())
}

/// Mostrar un hash completo (las tablas lo truncan)
pub fn show_hash(hash: &str) -> Result<(), JsValue> {
    let body = ElementBuilder::new("div")?
        .class("modal-body")
        .html(&format!(
            "<p class=\"modal-message\">Hash de integridad registrado en el ledger:</p>\
             <code class=\"hash-full\">{}</code>",
            escape_html(hash)
        ))
        .build();
    open("Hash de transacción", body)
}
