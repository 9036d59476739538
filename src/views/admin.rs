// ============================================================================
// ADMIN VIEW - Facturas pendientes de aprobación
// ============================================================================
// Aprobar escribe el bloque en el ledger y estampa el hash en la factura;
// rechazar libera el lote. En ambos casos se re-renderiza completo, así la
// factura decidida desaparece de la tabla (datos frescos, sin caché local).
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::app::RenderError;
use crate::dom::{self, on_click, on_click_id, ElementBuilder};
use crate::models::Invoice;
use crate::services::ApiClient;
use crate::state::{AppState, SubView};
use crate::utils::format::{escape_html, money_usd, trunc_hash};
use crate::views::{modal, toast, RenderFut, SubViewModule};
use crate::{apply_intent, Intent};

pub fn module() -> SubViewModule {
    SubViewModule {
        render: render_entry,
        bind,
    }
}

fn render_entry(_state: AppState, api: ApiClient) -> RenderFut {
    Box::pin(async move { render(api).await })
}

async fn render(api: ApiClient) -> Result<Element, RenderError> {
    let rows = api.get_pending_approvals().await?;
    log::info!("👑 [ADMIN] {} facturas pendientes", rows.len());

    let body = if rows.is_empty() {
        "<tr><td class=\"table-empty\" colspan=\"8\">No hay facturas pendientes.</td></tr>"
            .to_string()
    } else {
        rows.iter().map(pending_row).collect::<String>()
    };

    let markup = format!(
        "<div class=\"view-header\">\
           <div>\
             <h1 class=\"view-title\">Pendientes de aprobación</h1>\
             <p class=\"view-subtitle\">El blockchain se registra únicamente cuando el admin aprueba.</p>\
           </div>\
           <div class=\"view-actions\">\
             <button id=\"btnGoLedger\" class=\"btn btn-dark\">Ver Ledger</button>\
           </div>\
         </div>\
         <div id=\"pending-card\" class=\"card\">\
           <table class=\"data-table\">\
             <thead><tr>\
               <th>Fecha</th><th>Factura</th><th>Cliente</th><th>Lote</th>\
               <th class=\"num\">Total</th><th>Creada por</th><th>Estado</th>\
               <th class=\"num\">Acciones</th>\
             </tr></thead>\
             <tbody>{body}</tbody>\
           </table>\
         </div>"
    );

    Ok(ElementBuilder::new("div")?
        .class("view-admin")
        .html(&markup)
        .build())
}

fn pending_row(invoice: &Invoice) -> String {
    format!(
        "<tr>\
           <td>{date}</td>\
           <td class=\"strong\">#{id}</td>\
           <td>{client}</td>\
           <td>\
             <div class=\"strong\">{lot}</div>\
             <div class=\"muted\">{category} • Cant: <span class=\"mono\">{qty}</span></div>\
           </td>\
           <td class=\"num mono money\">{total}</td>\
           <td>{user}</td>\
           <td><span class=\"badge badge-warning\">PENDING_APPROVAL</span></td>\
           <td class=\"num\">\
             <button class=\"btn btn-ghost-danger btn-sm\" data-reject-id=\"{id}\">Rechazar</button>\
             <button class=\"btn btn-primary btn-sm\" data-approve-id=\"{id}\">Aprobar</button>\
           </td>\
         </tr>",
        date = escape_html(&invoice.date),
        id = invoice.id,
        client = escape_html(&invoice.client),
        lot = escape_html(invoice.lot.as_deref().unwrap_or("—")),
        category = escape_html(invoice.lot_category.as_deref().unwrap_or("")),
        qty = invoice
            .lot_qty
            .map(|q| q.to_string())
            .unwrap_or_else(|| "-".to_string()),
        total = money_usd(invoice.total),
        user = escape_html(&invoice.user),
    )
}

fn bind(state: &AppState, api: &ApiClient) -> Result<(), JsValue> {
    // Atajo al ledger
    let state_ledger = state.clone();
    on_click_id("btnGoLedger", move |_| {
        state_ledger.set_active_view(SubView::Ledger);
        apply_intent(Intent::Rerender);
    })?;

    // Aprobar / rechazar por delegación sobre la tabla
    if let Some(card) = dom::get_element_by_id("pending-card") {
        let api = api.clone();
        on_click(&card, move |event| {
            let target = match event.target().and_then(|t| t.dyn_into::<Element>().ok()) {
                Some(el) => el,
                None => return,
            };

            if let Ok(Some(button)) = target.closest("[data-approve-id]") {
                if let Some(id) = attr_id(&button, "data-approve-id") {
                    approve(api.clone(), id);
                    return;
                }
            }

            if let Ok(Some(button)) = target.closest("[data-reject-id]") {
                if let Some(id) = attr_id(&button, "data-reject-id") {
                    reject(api.clone(), id);
                }
            }
        })?;
    }

    Ok(())
}

fn attr_id(element: &Element, name: &str) -> Option<u32> {
    element.get_attribute(name)?.parse().ok()
}

fn approve(api: ApiClient, id: u32) {
    log::info!("✅ [ADMIN] Aprobando factura {}", id);
    spawn_local(async move {
        match api.approve_invoice(id).await {
            Ok(res) => {
                toast::success(&format!("Aprobada. Hash: {}", trunc_hash(&res.hash)));
                apply_intent(Intent::Rerender);
            }
            Err(err) => toast::error(&err.to_string()),
        }
    });
}

fn reject(api: ApiClient, id: u32) {
    let result = modal::confirm(
        "¿Rechazar factura?",
        "La factura quedará REJECTED y el lote vuelve a AVAILABLE (aparecerá de nuevo en bodega).",
        Rc::new(move || {
            let api = api.clone();
            log::info!("🚫 [ADMIN] Rechazando factura {}", id);
            spawn_local(async move {
                match api.reject_invoice(id).await {
                    Ok(()) => {
                        toast::info("Factura rechazada. Lote liberado.");
                        apply_intent(Intent::Rerender);
                    }
                    Err(err) => toast::error(&err.to_string()),
                }
            });
        }),
    );
    if let Err(e) = result {
        log::error!("❌ [ADMIN] Error abriendo confirmación: {:?}", e);
    }
}
