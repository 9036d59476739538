// ============================================================================
// EVENT HANDLING - Registro de listeners
// ============================================================================
// GESTIÓN DE MEMORY LEAKS:
// - Para listeners en elementos del DOM: cuando el elemento se destruye
//   (p.ej. con set_inner_html("")), el navegador limpia los listeners
//   asociados, por lo que closure.forget() es seguro.
// - Los listeners globales (window/document) solo se registran UNA VEZ al
//   inicio de la app.
// ============================================================================

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, MouseEvent};

/// Click handler sobre un elemento
pub fn on_click<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(MouseEvent)>);
    element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Click handler sobre un elemento buscado por ID. Si no existe (DOM ya
/// re-renderizado) no hace nada: nunca lanza por elemento ausente.
pub fn on_click_id<F>(id: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    match crate::dom::get_element_by_id(id) {
        Some(el) => on_click(&el, handler),
        None => Ok(()),
    }
}

/// Submit handler para formularios
pub fn on_submit<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    element.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Submit handler sobre un formulario buscado por ID (check defensivo)
pub fn on_submit_id<F>(id: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    match crate::dom::get_element_by_id(id) {
        Some(el) => on_submit(&el, handler),
        None => Ok(()),
    }
}
