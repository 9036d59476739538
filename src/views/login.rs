// ============================================================================
// LOGIN VIEW - Formulario de credenciales
// ============================================================================
// Único punto de entrada a la sesión. Al fallar el login se hace un probe a
// /health para distinguir "credenciales malas" de "API caída" y dar el
// mensaje correcto.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{self, on_submit_id, ElementBuilder};
use crate::services::{ApiClient, SessionStore};
use crate::state::AppState;
use crate::views::toast;
use crate::{apply_intent, Intent};

pub fn render() -> Result<Element, JsValue> {
    let markup = "\
        <div class=\"login-card\">\
          <div class=\"login-logo\">🍫</div>\
          <h2 class=\"login-title\">AgroCacao S.A.</h2>\
          <p class=\"login-subtitle\">Ingresa tus credenciales para acceder</p>\
          <form id=\"loginForm\" class=\"login-form\">\
            <label class=\"field-label\">Usuario</label>\
            <input type=\"text\" id=\"username\" class=\"field-input\" \
                   placeholder=\"bodega | oficina | admin\" required>\
            <label class=\"field-label\">Contraseña</label>\
            <input type=\"password\" id=\"password\" class=\"field-input\" \
                   placeholder=\"(vacía si aplica)\">\
            <button id=\"btnLogin\" type=\"submit\" class=\"btn btn-primary btn-block\">\
              Iniciar Sesión\
            </button>\
          </form>\
          <p class=\"login-hint\">Usuarios: <code>bodega</code>, <code>oficina</code>, <code>admin</code></p>\
        </div>";

    Ok(ElementBuilder::new("div")?
        .class("login-screen")
        .html(markup)
        .build())
}

pub fn bind(state: &AppState, api: &ApiClient) -> Result<(), JsValue> {
    let state = state.clone();
    let api = api.clone();

    on_submit_id("loginForm", move |event| {
        event.prevent_default();

        let username = dom::input_value("username").trim().to_lowercase();
        let password = dom::input_value("password");

        // Limpiar el highlight de un intento anterior
        if let Some(input) = dom::get_element_by_id("username") {
            let _ = dom::remove_class(&input, "field-error");
        }

        let state = state.clone();
        let api = api.clone();
        spawn_local(async move {
            dom::set_disabled("btnLogin", true);

            match api.login(&username, &password).await {
                Ok(res) => {
                    SessionStore::set(&state, &res.role, &res.token);
                    if let Some(user) = state.current_user() {
                        toast::success(&format!("Bienvenido, {}", user.name));
                    }
                    apply_intent(Intent::Rerender);
                }
                Err(err) => {
                    // El probe decide qué mensaje mostrar: si /health tampoco
                    // responde, el problema es conectividad, no credenciales.
                    match api.health().await {
                        Ok(()) => toast::error(&err.to_string()),
                        Err(_) => toast::error(
                            "API no disponible. Prueba /api/health y revisa el proxy del frontend.",
                        ),
                    }
                    if let Some(input) = dom::get_element_by_id("username") {
                        let _ = dom::add_class(&input, "field-error");
                    }
                    dom::set_disabled("btnLogin", false);
                }
            }
        });
    })
}
