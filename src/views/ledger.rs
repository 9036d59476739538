// ============================================================================
// LEDGER VIEW - Auditoría encadenada (hash + prev_hash)
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::app::RenderError;
use crate::dom::{self, on_click_id, ElementBuilder};
use crate::models::LedgerEntry;
use crate::services::ApiClient;
use crate::state::AppState;
use crate::utils::format::{escape_html, trunc_hash};
use crate::views::{toast, RenderFut, SubViewModule};

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
    let rows = api.get_ledger().await?;
    log::info!("🔗 [LEDGER] {} bloques", rows.len());

    let body = rows.iter().map(ledger_row).collect::<String>();

    let markup = format!(
        "<div class=\"view-header\">\
           <div>\
             <h1 class=\"view-title\">Auditoría / Ledger</h1>\
             <p class=\"view-subtitle\">Registro encadenado de acciones (hash + prev_hash).</p>\
           </div>\
           <div class=\"view-actions\">\
             <button id=\"verify-btn\" class=\"btn btn-dark\">VERIFICAR CADENA</button>\
           </div>\
         </div>\
         <div class=\"card card-terminal\">\
           <div class=\"terminal-header\">Ledger Stream</div>\
           <table class=\"data-table mono\">\
             <thead><tr>\
               <th>Timestamp</th><th>Actor</th><th>Action</th>\
               <th>Tx_ID</th><th>Prev_Hash</th><th>Current_Hash</th>\
             </tr></thead>\
             <tbody>{body}</tbody>\
           </table>\
           <div class=\"terminal-footer\">END OF LEDGER • {blocks} BLOCKS</div>\
         </div>",
        blocks = rows.len()
    );

    Ok(ElementBuilder::new("div")?
        .class("view-ledger")
        .html(&markup)
        .build())
}

fn ledger_row(entry: &LedgerEntry) -> String {
    format!(
        "<tr>\
           <td class=\"ts\">{timestamp}</td>\
           <td class=\"actor\">{actor}</td>\
           <td class=\"strong\">{action}</td>\
           <td class=\"muted\">{tx_id}</td>\
           <td class=\"muted\" title=\"{prev_full}\">{prev}</td>\
           <td class=\"hash\" title=\"{hash_full}\">{hash}</td>\
         </tr>",
        timestamp = escape_html(&entry.timestamp),
        actor = escape_html(&entry.actor),
        action = escape_html(&entry.action),
        tx_id = escape_html(&entry.tx_id),
        prev_full = escape_html(&entry.prev_hash),
        prev = escape_html(&trunc_hash(&entry.prev_hash)),
        hash_full = escape_html(&entry.hash),
        hash = escape_html(&trunc_hash(&entry.hash)),
    )
}

fn bind(_state: &AppState, api: &ApiClient) -> Result<(), JsValue> {
    let api = api.clone();
    on_click_id("verify-btn", move |_| {
        let api = api.clone();
        spawn_local(async move {
            dom::set_disabled("verify-btn", true);
            match api.verify_chain().await {
                Ok(res) if res.ok => toast::success(&res.message),
                Ok(res) => toast::error(&res.message),
                Err(err) => toast::error(&err.to_string()),
            }
            dom::set_disabled("verify-btn", false);
        });
    })
}
