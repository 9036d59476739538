// ============================================================================
// AGROCACAO FRONTEND - SPA EN RUST PURO (WASM)
// ============================================================================
// Arquitectura:
// - Views: funciones que renderizan DOM (render) y wirean handlers (bind)
// - Services: sesión persistida + gateway de API (HTTP real o mock)
// - State: Rc<RefCell> detrás de operaciones con nombre
// - Models: estructuras compartidas con el backend
// - App: dispatcher de vistas (un pase de render por intent)
// ============================================================================

pub mod app;
pub mod config;
pub mod dom;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod views;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use wasm_logger::Config;

use crate::app::App;

// Instancia única de App, viva durante toda la sesión de página
thread_local! {
    static APP: RefCell<Option<Rc<App>>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    if config::CONFIG.is_logging_enabled() {
        wasm_logger::init(Config::default());
    }
    log::info!(
        "🚀 AgroCacao Frontend - Rust puro ({})",
        config::CONFIG.environment
    );

    let app = Rc::new(App::new());
    APP.with(|cell| {
        *cell.borrow_mut() = Some(app);
    });

    // Primer pase: reconstruye la sesión desde storage y pinta login o
    // dashboard según corresponda.
    rerender_app();
    Ok(())
}

/// Resultado de un handler: o no pasó nada visible, o hay que re-renderizar.
/// No hay variantes intermedias: el render siempre es completo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    None,
    Rerender,
}

/// Único punto de re-entrada al dispatcher. Los handlers nunca llaman al
/// render directamente: entregan un Intent y este driver decide.
pub fn apply_intent(intent: Intent) {
    match intent {
        Intent::None => {}
        Intent::Rerender => rerender_app(),
    }
}

/// Re-render completo de la app (asíncrono, en la task queue local)
pub fn rerender_app() {
    let app = APP.with(|cell| cell.borrow().clone());
    match app {
        Some(app) => {
            spawn_local(async move {
                app.render().await;
            });
        }
        None => log::warn!("⚠️ [RERENDER] App no está inicializada"),
    }
}

/// Re-render invocable desde JavaScript (debug / integración)
#[wasm_bindgen]
pub fn rerender_app_wasm() {
    rerender_app();
}
