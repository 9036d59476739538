// ============================================================================
// DASHBOARD SHELL - Sidebar + badge de usuario + contenedor de sub-vista
// ============================================================================
// El shell no decide qué sub-vista mostrar (eso es del dispatcher); solo
// pinta la navegación permitida para el rol y hospeda el contenido que le
// pasan ya renderizado.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::dom::{append_child, on_click, on_click_id, ElementBuilder};
use crate::models::{CurrentUser, Role};
use crate::services::SessionStore;
use crate::state::{AppState, SubView};
use crate::utils::format::escape_html;
use crate::views::toast;
use crate::{apply_intent, Intent};

/// Clave estable de cada sub-vista para el atributo data-view
fn view_key(view: SubView) -> &'static str {
    match view {
        SubView::Inventory => "inventory",
        SubView::Invoices => "invoices",
        SubView::Admin => "admin",
        SubView::Ledger => "ledger",
    }
}

fn view_from_key(key: &str) -> Option<SubView> {
    match key {
        "inventory" => Some(SubView::Inventory),
        "invoices" => Some(SubView::Invoices),
        "admin" => Some(SubView::Admin),
        "ledger" => Some(SubView::Ledger),
        _ => None,
    }
}

/// Entradas de navegación del rol, en el orden del sidebar
fn nav_items(role: Role) -> Vec<(SubView, &'static str)> {
    match role {
        Role::Bodega => vec![(SubView::Inventory, "Lotes / Inventario")],
        Role::Oficina => vec![(SubView::Invoices, "Facturación")],
        Role::Admin => vec![
            (SubView::Admin, "Pendientes de aprobación"),
            (SubView::Ledger, "Auditoría / Ledger"),
        ],
    }
}

fn nav_section_title(role: Role) -> &'static str {
    match role {
        Role::Admin => "Admin",
        _ => "Principal",
    }
}

/// Renderizar el shell completo alrededor de `content` (la sub-vista activa
/// ya materializada, o el placeholder degradado).
pub fn render(user: &CurrentUser, active: SubView, content: Element) -> Result<Element, JsValue> {
    let mut nav_html = format!(
        "<div class=\"nav-section-title\">{}</div>",
        nav_section_title(user.role)
    );
    for (view, label) in nav_items(user.role) {
        let active_class = if view == active { " active" } else { "" };
        nav_html.push_str(&format!(
            "<button class=\"nav-btn{}\" data-view=\"{}\">{}</button>",
            active_class,
            view_key(view),
            label
        ));
    }

    let initial = user.name.chars().next().unwrap_or('?');
    let sidebar = ElementBuilder::new("aside")?
        .class("sidebar")
        .html(&format!(
            "<div class=\"sidebar-brand\">🍫 AgroCacao S.A.</div>\
             <nav id=\"sidebar-nav\" class=\"sidebar-nav\">{nav}</nav>\
             <div class=\"sidebar-footer\">\
               <div class=\"user-badge\">\
                 <div class=\"user-avatar\">{initial}</div>\
                 <div class=\"user-meta\">\
                   <p class=\"user-name\">{name}</p>\
                   <p class=\"user-role\">{role}</p>\
                 </div>\
               </div>\
               <button id=\"btnLogout\" class=\"btn-logout\">Cerrar Sesión</button>\
             </div>",
            nav = nav_html,
            initial = initial,
            name = escape_html(&user.name),
            role = user.role.generic_label(),
        ))
        .build();

    let main = ElementBuilder::new("main")?
        .class("dashboard-main")
        .child(content)?
        .build();

    let shell = ElementBuilder::new("div")?
        .class("dashboard-shell")
        .child(sidebar)?
        .build();
    append_child(&shell, &main)?;
    Ok(shell)
}

/// Wiring del shell: navegación por delegación sobre el <nav> y logout.
pub fn bind(state: &AppState) -> Result<(), JsValue> {
    if let Some(nav) = crate::dom::get_element_by_id("sidebar-nav") {
        let state_nav = state.clone();
        on_click(&nav, move |event| {
            let target = match event.target().and_then(|t| t.dyn_into::<Element>().ok()) {
                Some(el) => el,
                None => return,
            };
            let button = match target.closest("[data-view]").ok().flatten() {
                Some(el) => el,
                None => return,
            };
            let view = button
                .get_attribute("data-view")
                .as_deref()
                .and_then(view_from_key);
            if let Some(view) = view {
                log::info!("🧭 [NAV] Cambiando a sub-vista {:?}", view);
                state_nav.set_active_view(view);
                apply_intent(Intent::Rerender);
            }
        })?;
    }

    let state_logout = state.clone();
    on_click_id("btnLogout", move |_| {
        SessionStore::clear(&state_logout);
        toast::info("Sesión cerrada");
        apply_intent(Intent::Rerender);
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_is_role_gated() {
        let bodega: Vec<SubView> = nav_items(Role::Bodega).into_iter().map(|(v, _)| v).collect();
        assert_eq!(bodega, vec![SubView::Inventory]);

        let admin: Vec<SubView> = nav_items(Role::Admin).into_iter().map(|(v, _)| v).collect();
        assert_eq!(admin, vec![SubView::Admin, SubView::Ledger]);
    }

    #[test]
    fn view_keys_round_trip() {
        for view in [
            SubView::Inventory,
            SubView::Invoices,
            SubView::Admin,
            SubView::Ledger,
        ] {
            assert_eq!(view_from_key(view_key(view)), Some(view));
        }
        assert_eq!(view_from_key("reports"), None);
    }
}
