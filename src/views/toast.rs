// ============================================================================
// TOAST - Notificaciones efímeras
// ============================================================================
// Fire-and-forget: el toast se agrega al body y un Timeout lo remueve solo.
// No participa del ciclo de render; un re-render no lo mata.
// ============================================================================

use gloo_timers::callback::Timeout;

use crate::dom::{self, ElementBuilder};
use crate::utils::format::escape_html;

const DISMISS_MS: u32 = 3200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    fn class(self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
            ToastKind::Info => "toast toast-info",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            ToastKind::Success => "✓",
            ToastKind::Error => "✕",
            ToastKind::Info => "ℹ",
        }
    }
}

/// Mostrar un toast. Si el DOM no está disponible solo queda el log.
pub fn show(message: &str, kind: ToastKind) {
    log::info!("🔔 [TOAST] {}", message);

    let body = match dom::document().and_then(|d| d.body()) {
        Some(b) => b,
        None => return,
    };

    let toast = match ElementBuilder::new("div") {
        Ok(builder) => builder
            .class(kind.class())
            .html(&format!(
                "<span class=\"toast-icon\">{}</span><span>{}</span>",
                kind.icon(),
                escape_html(message)
            ))
            .build(),
        Err(e) => {
            log::error!("❌ [TOAST] No se pudo crear el elemento: {:?}", e);
            return;
        }
    };

    if body.append_child(&toast).is_err() {
        return;
    }

    // El Timeout se olvida a propósito: dispara una vez y el closure muere
    // con el elemento.
    Timeout::new(DISMISS_MS, move || {
        toast.remove();
    })
    .forget();
}

pub fn success(message: &str) {
    show(message, ToastKind::Success);
}

pub fn error(message: &str) {
    show(message, ToastKind::Error);
}

pub fn info(message: &str) {
    show(message, ToastKind::Info);
}
