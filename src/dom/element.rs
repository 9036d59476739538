// ============================================================================
// ELEMENT HELPERS - Funciones básicas para manipular DOM
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, Window};

/// Obtener window global
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Obtener document
pub fn document() -> Option<Document> {
    window()?.document()
}

/// Obtener elemento por ID
pub fn get_element_by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

/// Obtener un input por ID (ya casteado)
pub fn get_input_by_id(id: &str) -> Option<HtmlInputElement> {
    get_element_by_id(id)?.dyn_into::<HtmlInputElement>().ok()
}

/// Leer el value de un input por ID; cadena vacía si no existe
pub fn input_value(id: &str) -> String {
    get_input_by_id(id).map(|i| i.value()).unwrap_or_default()
}

/// Crear elemento
pub fn create_element(tag: &str) -> Result<Element, JsValue> {
    document()
        .ok_or_else(|| JsValue::from_str("No document"))
        .and_then(|doc| doc.create_element(tag))
}

/// Establecer class name (reemplaza todas las clases)
pub fn set_class_name(element: &Element, class: &str) {
    element.set_class_name(class);
}

/// Agregar clase
pub fn add_class(element: &Element, class: &str) -> Result<(), JsValue> {
    element
        .dyn_ref::<HtmlElement>()
        .ok_or_else(|| JsValue::from_str("Element is not an HtmlElement"))?
        .class_list()
        .add_1(class)
}

/// Remover clase
pub fn remove_class(element: &Element, class: &str) -> Result<(), JsValue> {
    element
        .dyn_ref::<HtmlElement>()
        .ok_or_else(|| JsValue::from_str("Element is not an HtmlElement"))?
        .class_list()
        .remove_1(class)
}

/// Establecer text content
pub fn set_text_content(element: &Element, text: &str) {
    element.set_text_content(Some(text));
}

/// Establecer inner HTML
pub fn set_inner_html(element: &Element, html: &str) {
    element.set_inner_html(html);
}

/// Agregar hijo
pub fn append_child(parent: &Element, child: &Element) -> Result<(), JsValue> {
    parent.append_child(child).map(|_| ())
}

/// Establecer atributo
pub fn set_attribute(element: &Element, name: &str, value: &str) -> Result<(), JsValue> {
    element.set_attribute(name, value)
}

/// Habilitar/deshabilitar un botón por ID (check defensivo: si el elemento
/// ya no existe tras un re-render, no pasa nada)
pub fn set_disabled(id: &str, disabled: bool) {
    if let Some(el) = get_element_by_id(id) {
        if disabled {
            let _ = el.set_attribute("disabled", "true");
        } else {
            let _ = el.remove_attribute("disabled");
        }
    }
}
