// ============================================================================
// INVENTORY VIEW (bodega) - Tabla de lotes + alta de lote
// ============================================================================
// Los lotes no llevan hash real: la columna blockchain queda en PENDING
// hasta que el admin aprueba una factura. Borrar es un stub a propósito:
// en trazabilidad se anula con un registro nuevo, no se borra.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::app::RenderError;
use crate::dom::{self, on_click_id, on_submit_id, ElementBuilder};
use crate::models::{Lot, LotCreate};
use crate::services::ApiClient;
use crate::state::AppState;
use crate::utils::format::escape_html;
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
    let rows = api.get_inventory().await?;
    log::info!("📦 [INVENTORY] {} lotes cargados", rows.len());

    let body = if rows.is_empty() {
        "<tr><td class=\"table-empty\" colspan=\"7\">Sin lotes disponibles todavía.</td></tr>"
            .to_string()
    } else {
        rows.iter().map(lot_row).collect::<String>()
    };

    let markup = format!(
        "<div class=\"view-header\">\
           <div>\
             <h1 class=\"view-title\">Lotes (Bodega)</h1>\
             <p class=\"view-subtitle\">Ingreso y control de lotes disponibles. \
                Cuando Oficina crea una factura, el lote se reserva.</p>\
           </div>\
           <div class=\"view-actions\">\
             <button id=\"invDelete\" class=\"btn btn-ghost-danger\">Borrar</button>\
             <button id=\"invAdd\" class=\"btn btn-primary\">Ingresar Lote</button>\
           </div>\
         </div>\
         <div class=\"card\">\
           <table class=\"data-table\">\
             <thead><tr>\
               <th>Fecha</th><th>Lote</th><th>Categoría</th><th class=\"num\">Cant.</th>\
               <th>Estado</th><th>Usuario</th><th>Blockchain</th>\
             </tr></thead>\
             <tbody>{body}</tbody>\
           </table>\
         </div>"
    );

    Ok(ElementBuilder::new("div")?
        .class("view-inventory")
        .html(&markup)
        .build())
}

fn lot_row(lot: &Lot) -> String {
    format!(
        "<tr>\
           <td>{date}</td>\
           <td class=\"strong\">{item}</td>\
           <td><span class=\"chip\">{category}</span></td>\
           <td class=\"num mono\">{qty}</td>\
           <td><span class=\"badge {badge}\">{status}</span></td>\
           <td>{user}</td>\
           <td><span class=\"chip mono\">{hash}</span></td>\
         </tr>",
        date = escape_html(&lot.date),
        item = escape_html(&lot.item),
        category = escape_html(&lot.category),
        qty = lot.qty,
        badge = status_badge(&lot.status),
        status = escape_html(&lot.status),
        user = escape_html(&lot.user),
        hash = escape_html(&lot.hash),
    )
}

fn status_badge(status: &str) -> &'static str {
    match status {
        "AVAILABLE" => "badge-success",
        "RESERVED" => "badge-warning",
        _ => "badge-neutral",
    }
}

/// Validar y armar el cuerpo de alta de lote. El backend rechaza con 422
/// cualquier campo vacío o cantidad no positiva; mejor cortarlo acá.
fn parse_lot_form(
    date: &str,
    item: &str,
    category: &str,
    qty_raw: &str,
) -> Result<LotCreate, &'static str> {
    let item = item.trim();
    let category = category.trim();
    let qty: u32 = qty_raw.trim().parse().map_err(|_| "Cantidad inválida")?;

    if date.is_empty() || item.is_empty() || category.is_empty() || qty == 0 {
        return Err("Completa todos los campos (cantidad > 0).");
    }

    Ok(LotCreate::entrada(
        date.to_string(),
        item.to_string(),
        category.to_string(),
        qty,
    ))
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
    let api_add = api.clone();
    on_click_id("invAdd", move |_| {
        if let Err(e) = open_lot_modal(&api_add) {
            log::error!("❌ [INVENTORY] Error abriendo modal de lote: {:?}", e);
        }
    })?;

    on_click_id("invDelete", |_| {
        let result = modal::confirm(
            "¿Borrar lote?",
            "No recomendado: en trazabilidad se anula con un nuevo registro (auditoría).",
            std::rc::Rc::new(|| {
                toast::info("Acción no implementada (mejor: anulación/auditoría).")
            }),
        );
        if let Err(e) = result {
            log::error!("❌ [INVENTORY] Error abriendo confirmación: {:?}", e);
        }
    })?;

    Ok(())
}

fn open_lot_modal(api: &ApiClient) -> Result<(), JsValue> {
    let form = ElementBuilder::new("div")?
        .class("modal-body")
        .html(&format!(
            "<form id=\"invForm\" class=\"modal-form\">\
               <label class=\"field-label\">Fecha</label>\
               <input id=\"invDate\" type=\"date\" value=\"{today}\" class=\"field-input\" required>\
               <label class=\"field-label\">Lote</label>\
               <input id=\"invItem\" class=\"field-input\" placeholder=\"Ej: Lote-CCN51-0003\" required>\
               <label class=\"field-label\">Categoría</label>\
               <input id=\"invCategory\" class=\"field-input\" placeholder=\"Ej: Cacao CCN-51\" required>\
               <label class=\"field-label\">Cantidad</label>\
               <input id=\"invQty\" type=\"number\" min=\"1\" step=\"1\" class=\"field-input\" placeholder=\"Ej: 10\" required>\
               <div class=\"modal-actions\">\
                 <button type=\"button\" id=\"invCancel\" class=\"btn btn-secondary\">Cancelar</button>\
                 <button type=\"submit\" id=\"invSave\" class=\"btn btn-primary\">Guardar</button>\
               </div>\
             </form>\
             <p class=\"modal-note\">Nota: el lote queda disponible. El blockchain se \
                registra cuando el admin aprueba la factura.</p>",
            today = today()
        ))
        .build();

    modal::open("Ingresar Lote", form)?;

    on_click_id("invCancel", |_| modal::close())?;

    let api = api.clone();
    on_submit_id("invForm", move |event| {
        event.prevent_default();

        let payload = parse_lot_form(
            &dom::input_value("invDate"),
            &dom::input_value("invItem"),
            &dom::input_value("invCategory"),
            &dom::input_value("invQty"),
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
            dom::set_disabled("invSave", true);
            match api.create_inventory(&payload).await {
                Ok(()) => {
                    modal::close();
                    toast::success("Lote ingresado y disponible.");
                    apply_intent(Intent::Rerender);
                }
                Err(err) => {
                    toast::error(&err.to_string());
                    dom::set_disabled("invSave", false);
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
    fn lot_form_requires_all_fields() {
        assert!(parse_lot_form("", "Lote-1", "Cacao", "5").is_err());
        assert!(parse_lot_form("2023-11-01", "  ", "Cacao", "5").is_err());
        assert!(parse_lot_form("2023-11-01", "Lote-1", "", "5").is_err());
    }

    #[test]
    fn lot_form_rejects_non_positive_qty() {
        assert!(parse_lot_form("2023-11-01", "Lote-1", "Cacao", "0").is_err());
        assert!(parse_lot_form("2023-11-01", "Lote-1", "Cacao", "-3").is_err());
        assert!(parse_lot_form("2023-11-01", "Lote-1", "Cacao", "diez").is_err());
    }

    #[test]
    fn lot_form_builds_an_entrada() {
        let payload = parse_lot_form("2023-11-01", " Lote-1 ", "Cacao CCN-51", "10").unwrap();
        assert_eq!(payload.item, "Lote-1");
        assert_eq!(payload.qty, 10);
        assert_eq!(payload.movement_type, "Entrada");
    }

    #[test]
    fn badge_classes_by_status() {
        assert_eq!(status_badge("AVAILABLE"), "badge-success");
        assert_eq!(status_badge("RESERVED"), "badge-warning");
        assert_eq!(status_badge("SOLD"), "badge-neutral");
    }
}
