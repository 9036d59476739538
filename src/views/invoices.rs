// ============================================================================
// INVOICES VIEW (oficina) - Lotes disponibles + facturas emitidas
// ============================================================================
// Facturar reserva el lote y deja la factura en PENDING_APPROVAL; el hash
// real aparece recién cuando el admin aprueba. Los listeners de las tablas
// van por delegación sobre el contenedor (las filas cambian en cada render).
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::app::RenderError;
use crate::dom::{self, on_click, on_click_id, on_submit_id, ElementBuilder};
use crate::models::{Invoice, InvoiceCreate, Lot};
use crate::services::ApiClient;
use crate::state::AppState;
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
    let lots = api.get_available_lots().await?;
    let invoices = api.get_invoices().await?;
    log::info!(
        "🧾 [INVOICES] {} lotes disponibles, {} facturas",
        lots.len(),
        invoices.len()
    );

    let lots_body = if lots.is_empty() {
        "<tr><td class=\"table-empty\" colspan=\"6\">No hay lotes disponibles para facturar.</td></tr>"
            .to_string()
    } else {
        lots.iter().map(lot_row).collect::<String>()
    };

    let inv_body = if invoices.is_empty() {
        "<tr><td class=\"table-empty\" colspan=\"7\">Sin facturas todavía.</td></tr>".to_string()
    } else {
        invoices.iter().map(invoice_row).collect::<String>()
    };

    let markup = format!(
        "<div class=\"view-header\">\
           <div>\
             <h1 class=\"view-title\">Facturación</h1>\
             <p class=\"view-subtitle\">Selecciona un lote disponible para emitir factura. \
                El hash real se genera cuando el admin aprueba.</p>\
           </div>\
           <div class=\"view-actions\">\
             <button id=\"facDelete\" class=\"btn btn-ghost-danger\">Anular</button>\
           </div>\
         </div>\
         <div id=\"available-lots-card\" class=\"card\">\
           <div class=\"card-header\">\
             <h2>Lotes disponibles</h2>\
             <p>Elige un lote para completar los datos y enviar la factura a aprobación.</p>\
           </div>\
           <table class=\"data-table\">\
             <thead><tr>\
               <th>Fecha</th><th>Lote</th><th>Categoría</th>\
               <th class=\"num\">Cantidad</th><th>Estado</th><th class=\"num\">Acción</th>\
             </tr></thead>\
             <tbody>{lots_body}</tbody>\
           </table>\
         </div>\
         <div id=\"my-invoices-card\" class=\"card\">\
           <div class=\"card-header\">\
             <h2>Mis facturas</h2>\
             <p>Estado: PENDING_APPROVAL → APPROVED/REJECTED.</p>\
           </div>\
           <table class=\"data-table\">\
             <thead><tr>\
               <th>Fecha</th><th>Cliente</th><th>Lote</th><th class=\"num\">Total</th>\
               <th>Estado</th><th>Emisor</th><th>Hash</th>\
             </tr></thead>\
             <tbody>{inv_body}</tbody>\
           </table>\
         </div>"
    );

    Ok(ElementBuilder::new("div")?
        .class("view-invoices")
        .html(&markup)
        .build())
}

fn lot_row(lot: &Lot) -> String {
    format!(
        "<tr>\
           <td>{date}</td>\
           <td class=\"strong\">{item}</td>\
           <td>{category}</td>\
           <td class=\"num mono\">{qty}</td>\
           <td><span class=\"badge badge-neutral\">{status}</span></td>\
           <td class=\"num\">\
             <button class=\"btn btn-primary btn-sm\" \
                     data-lot-id=\"{id}\" data-lot-item=\"{item}\" \
                     data-lot-category=\"{category}\" data-lot-qty=\"{qty}\">\
               Facturar\
             </button>\
           </td>\
         </tr>",
        date = escape_html(&lot.date),
        item = escape_html(&lot.item),
        category = escape_html(&lot.category),
        qty = lot.qty,
        status = escape_html(&lot.status),
        id = lot.id,
    )
}

fn invoice_row(invoice: &Invoice) -> String {
    let hash_cell = match invoice.hash.as_deref().filter(|h| *h != "PENDING") {
        Some(hash) => format!(
            "<button class=\"chip mono chip-action\" data-hash=\"{full}\">{short}</button>",
            full = escape_html(hash),
            short = escape_html(&trunc_hash(hash)),
        ),
        None => "<span class=\"chip mono\">PENDING</span>".to_string(),
    };

    format!(
        "<tr>\
           <td>{date}</td>\
           <td class=\"strong\">{client}</td>\
           <td>{lot}</td>\
           <td class=\"num mono money\">{total}</td>\
           <td><span class=\"badge {badge}\">{status}</span></td>\
           <td>{user}</td>\
           <td>{hash_cell}</td>\
         </tr>",
        date = escape_html(&invoice.date),
        client = escape_html(&invoice.client),
        lot = escape_html(invoice.lot.as_deref().unwrap_or("-")),
        total = money_usd(invoice.total),
        badge = status_badge(&invoice.status),
        status = escape_html(&invoice.status),
        user = escape_html(&invoice.user),
    )
}

fn status_badge(status: &str) -> &'static str {
    match status {
        "APPROVED" => "badge-success",
        "REJECTED" => "badge-danger",
        _ => "badge-warning",
    }
}

/// Validar y armar el cuerpo de emisión de factura
fn parse_invoice_form(
    inventory_id: u32,
    date: &str,
    client: &str,
    total_raw: &str,
) -> Result<InvoiceCreate, &'static str> {
    let client = client.trim();
    let total: f64 = total_raw.trim().parse().map_err(|_| "Total inválido")?;

    if date.is_empty() || client.is_empty() {
        return Err("Completa todos los campos.");
    }
    if !total.is_finite() || total <= 0.0 {
        return Err("El total debe ser mayor a 0.");
    }

    Ok(InvoiceCreate {
        inventory_id,
        date: date.to_string(),
        client: client.to_string(),
        total,
    })
}

fn today() -> String {
    let d = js_sys::Date::new_0();
    format!(
        "{:04}-{:02}-{:02}",
        d.get_full_year(),
        d.get_month() + 1,
        d.get_date()
    )
}

fn bind(_state: &AppState, api: &ApiClient) -> Result<(), JsValue> {
    // Anular queda como stub: en trazabilidad se registra la anulación como
    // un bloque nuevo, no se borra la factura
    on_click_id("facDelete", |_| {
        let result = modal::confirm(
            "¿Anular factura?",
            "No recomendado borrar: lo ideal es anular y registrar auditoría (nuevo bloque).",
            std::rc::Rc::new(|| {
                toast::info("Acción no implementada (mejor: anulación/auditoría).")
            }),
        );
        if let Err(e) = result {
            log::error!("❌ [INVOICES] Error abriendo confirmación: {:?}", e);
        }
    })?;

    // Delegación: Facturar sobre la tabla de lotes
    if let Some(card) = dom::get_element_by_id("available-lots-card") {
        let api = api.clone();
        on_click(&card, move |event| {
            let target = match event.target().and_then(|t| t.dyn_into::<Element>().ok()) {
                Some(el) => el,
                None => return,
            };
            let button = match target.closest("[data-lot-id]").ok().flatten() {
                Some(el) => el,
                None => return,
            };
            let lot_id = button
                .get_attribute("data-lot-id")
                .and_then(|v| v.parse::<u32>().ok());
            if let Some(lot_id) = lot_id {
                let item = button.get_attribute("data-lot-item").unwrap_or_default();
                let category = button
                    .get_attribute("data-lot-category")
                    .unwrap_or_default();
                let qty = button.get_attribute("data-lot-qty").unwrap_or_default();
                if let Err(e) = open_invoice_modal(&api, lot_id, &item, &category, &qty) {
                    log::error!("❌ [INVOICES] Error abriendo modal de factura: {:?}", e);
                }
            }
        })?;
    }

    // Delegación: chips de hash sobre la tabla de facturas
    if let Some(card) = dom::get_element_by_id("my-invoices-card") {
        on_click(&card, move |event| {
            let target = match event.target().and_then(|t| t.dyn_into::<Element>().ok()) {
                Some(el) => el,
                None => return,
            };
            if let Ok(Some(chip)) = target.closest("[data-hash]") {
                if let Some(hash) = chip.get_attribute("data-hash") {
                    if let Err(e) = modal::show_hash(&hash) {
                        log::error!("❌ [INVOICES] Error mostrando hash: {:?}", e);
                    }
                }
            }
        })?;
    }

    Ok(())
}

fn open_invoice_modal(
    api: &ApiClient,
    lot_id: u32,
    item: &str,
    category: &str,
    qty: &str,
) -> Result<(), JsValue> {
    let body = ElementBuilder::new("div")?
        .class("modal-body")
        .html(&format!(
            "<div class=\"lot-summary\">\
               <div class=\"field-label\">Lote seleccionado</div>\
               <div class=\"strong\">{item}</div>\
               <div class=\"muted\">{category} • Cantidad: <span class=\"mono\">{qty}</span></div>\
             </div>\
             <form id=\"facForm\" class=\"modal-form\">\
               <label class=\"field-label\">Fecha</label>\
               <input id=\"facDate\" type=\"date\" value=\"{today}\" class=\"field-input\" required>\
               <label class=\"field-label\">Cliente</label>\
               <input id=\"facClient\" class=\"field-input\" placeholder=\"Ej: Comprador Local\" required>\
               <label class=\"field-label\">Total (USD)</label>\
               <input id=\"facTotal\" type=\"number\" step=\"0.01\" min=\"0.01\" class=\"field-input\" placeholder=\"Ej: 120.50\" required>\
               <div class=\"modal-actions\">\
                 <button type=\"button\" id=\"facCancel\" class=\"btn btn-secondary\">Cancelar</button>\
                 <button type=\"submit\" id=\"facSave\" class=\"btn btn-primary\">Enviar a aprobación</button>\
               </div>\
             </form>\
             <p class=\"modal-note\">Nota: el hash real se genera cuando el administrador aprueba.</p>",
            item = escape_html(item),
            category = escape_html(category),
            qty = escape_html(qty),
            today = today(),
        ))
        .build();

    modal::open("Emitir factura (desde lote)", body)?;

    on_click_id("facCancel", |_| modal::close())?;

    let api = api.clone();
    on_submit_id("facForm", move |event| {
        event.prevent_default();

        let payload = parse_invoice_form(
            lot_id,
            &dom::input_value("facDate"),
            &dom::input_value("facClient"),
            &dom::input_value("facTotal"),
        );
        let payload = match payload {
            Ok(p) => p,
            Err(msg) => {
                toast::error(msg);
                return;
            }
        };

        let api = api.clone();
        spawn_local(async move {
            dom::set_disabled("facSave", true);
            match api.create_invoice(&payload).await {
                Ok(()) => {
                    modal::close();
                    toast::success("Factura enviada a aprobación.");
                    apply_intent(Intent::Rerender);
                }
                Err(err) => {
                    // Sin cambios locales: el lote sigue como estaba en el server
                    toast::error(&err.to_string());
                    dom::set_disabled("facSave", false);
                }
            }
        });
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invoice_form_requires_client_and_date() {
        assert!(parse_invoice_form(1, "", "Cliente", "10.0").is_err());
        assert!(parse_invoice_form(1, "2023-11-01", "   ", "10.0").is_err());
    }

    #[test]
    fn invoice_form_rejects_non_positive_total() {
        assert!(parse_invoice_form(1, "2023-11-01", "Cliente", "0").is_err());
        assert!(parse_invoice_form(1, "2023-11-01", "Cliente", "-5").is_err());
        assert!(parse_invoice_form(1, "2023-11-01", "Cliente", "mucho").is_err());
    }

    #[test]
    fn invoice_form_builds_the_payload() {
        let payload = parse_invoice_form(7, "2023-11-01", " Comprador Local ", "120.50").unwrap();
        assert_eq!(payload.inventory_id, 7);
        assert_eq!(payload.client, "Comprador Local");
        assert!((payload.total - 120.5).abs() < f64::EPSILON);
    }

    #[test]
    fn badge_classes_by_status() {
        assert_eq!(status_badge("APPROVED"), "badge-success");
        assert_eq!(status_badge("REJECTED"), "badge-danger");
        assert_eq!(status_badge("PENDING_APPROVAL"), "badge-warning");
    }
}
