// ============================================================================
// MOCK API - Implementación en memoria del gateway (sin red)
// ============================================================================
// Dataset demo compartido vía Rc<RefCell>. Las operaciones son transiciones
// de estado síncronas envueltas en async para que el caller no distinga el
// modo. Los hashes son derivados solo para mostrar (DefaultHasher); el
// encadenamiento real vive en el backend.
// ============================================================================

use std::cell::RefCell;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::models::{
    ApproveResponse, Invoice, InvoiceCreate, LedgerEntry, LoginResponse, Lot, LotCreate, Role,
    VerifyResponse,
};
use crate::services::api_client::{ApiError, ApiResult};

/// Dataset mutable del modo mock
pub struct MockData {
    lots: Vec<Lot>,
    invoices: Vec<Invoice>,
    ledger: Vec<LedgerEntry>,
    next_lot_id: u32,
    next_invoice_id: u32,
    next_tx: u32,
}

impl MockData {
    /// Dataset demo inicial: dos lotes de cacao, dos facturas pendientes y
    /// el bloque génesis del ledger.
    pub fn seed() -> Self {
        let lots = vec![
            Lot {
                id: 1,
                date: "2023-10-24".to_string(),
                item: "Lote-CCN51-0001".to_string(),
                category: "Cacao CCN-51".to_string(),
                qty: 50,
                status: "AVAILABLE".to_string(),
                user: "bodega".to_string(),
                hash: "PENDING".to_string(),
            },
            Lot {
                id: 2,
                date: "2023-10-25".to_string(),
                item: "Lote-CCN51-0002".to_string(),
                category: "Cacao CCN-51".to_string(),
                qty: 12,
                status: "AVAILABLE".to_string(),
                user: "bodega".to_string(),
                hash: "PENDING".to_string(),
            },
        ];

        let invoices = vec![
            Invoice {
                id: 101,
                inventory_id: 1,
                date: "2023-10-26".to_string(),
                client: "Comprador Local".to_string(),
                total: 4500.0,
                status: "PENDING_APPROVAL".to_string(),
                user: "oficina".to_string(),
                lot: Some("Lote-CCN51-0001".to_string()),
                lot_category: Some("Cacao CCN-51".to_string()),
                lot_qty: Some(50),
                hash: None,
            },
            Invoice {
                id: 102,
                inventory_id: 2,
                date: "2023-10-27".to_string(),
                client: "Consumidor Final".to_string(),
                total: 120.5,
                status: "PENDING_APPROVAL".to_string(),
                user: "oficina".to_string(),
                lot: Some("Lote-CCN51-0002".to_string()),
                lot_category: Some("Cacao CCN-51".to_string()),
                lot_qty: Some(12),
                hash: None,
            },
        ];

        let ledger = vec![LedgerEntry {
            id: 1,
            timestamp: "2023-10-24 08:30:00".to_string(),
            actor: "system".to_string(),
            action: "INIT_GENESIS".to_string(),
            tx_id: "TX_0000".to_string(),
            prev_hash: "0000000000000000".to_string(),
            hash: "INIT_HASH_GENESIS_BLOCK_SECURE".to_string(),
        }];

        Self {
            lots,
            invoices,
            ledger,
            next_lot_id: 3,
            next_invoice_id: 103,
            next_tx: 1,
        }
    }

    pub fn login(&self, username: &str) -> ApiResult<LoginResponse> {
        match Role::parse(username) {
            Some(role) => Ok(LoginResponse {
                role: role.key().to_string(),
                token: format!("mock-{}", role.key()),
            }),
            None => Err(ApiError::Http {
                status: 401,
                message: "Usuario o contraseña incorrectos".to_string(),
            }),
        }
    }

    pub fn inventory(&self) -> Vec<Lot> {
        self.lots.clone()
    }

    pub fn create_lot(&mut self, body: &LotCreate) {
        let lot = Lot {
            id: self.next_lot_id,
            date: body.date.clone(),
            item: body.item.clone(),
            category: body.category.clone(),
            qty: body.qty,
            status: "AVAILABLE".to_string(),
            user: "bodega".to_string(),
            hash: "PENDING".to_string(),
        };
        self.next_lot_id += 1;
        self.lots.push(lot);
    }

    pub fn available_lots(&self) -> Vec<Lot> {
        self.lots
            .iter()
            .filter(|l| l.status == "AVAILABLE")
            .cloned()
            .collect()
    }

    pub fn invoices(&self) -> Vec<Invoice> {
        self.invoices.clone()
    }

    pub fn create_invoice(&mut self, body: &InvoiceCreate) -> ApiResult<()> {
        let lot = self
            .lots
            .iter_mut()
            .find(|l| l.id == body.inventory_id && l.status == "AVAILABLE")
            .ok_or_else(|| ApiError::Http {
                status: 409,
                message: "El lote ya no está disponible".to_string(),
            })?;

        lot.status = "RESERVED".to_string();

        let invoice = Invoice {
            id: self.next_invoice_id,
            inventory_id: lot.id,
            date: body.date.clone(),
            client: body.client.clone(),
            total: body.total,
            status: "PENDING_APPROVAL".to_string(),
            user: "oficina".to_string(),
            lot: Some(lot.item.clone()),
            lot_category: Some(lot.category.clone()),
            lot_qty: Some(lot.qty),
            hash: None,
        };
        self.next_invoice_id += 1;
        self.invoices.push(invoice);
        Ok(())
    }

    pub fn pending_approvals(&self) -> Vec<Invoice> {
        self.invoices
            .iter()
            .filter(|i| i.is_pending())
            .cloned()
            .collect()
    }

    pub fn approve_invoice(&mut self, id: u32) -> ApiResult<ApproveResponse> {
        let prev_hash = self.last_hash();
        let tx_id = self.next_tx_id();
        let hash = derive_hash(&prev_hash, &tx_id, "APPROVE_INVOICE");

        let invoice = self.find_pending_mut(id)?;
        invoice.status = "APPROVED".to_string();
        invoice.hash = Some(hash.clone());

        self.append_ledger("admin", "APPROVE_INVOICE", tx_id, prev_hash, hash.clone());
        Ok(ApproveResponse { hash })
    }

    pub fn reject_invoice(&mut self, id: u32) -> ApiResult<()> {
        let prev_hash = self.last_hash();
        let tx_id = self.next_tx_id();
        let hash = derive_hash(&prev_hash, &tx_id, "REJECT_INVOICE");

        let inventory_id = {
            let invoice = self.find_pending_mut(id)?;
            invoice.status = "REJECTED".to_string();
            invoice.inventory_id
        };

        // El lote vuelve a estar disponible para facturar
        if let Some(lot) = self.lots.iter_mut().find(|l| l.id == inventory_id) {
            lot.status = "AVAILABLE".to_string();
        }

        self.append_ledger("admin", "REJECT_INVOICE", tx_id, prev_hash, hash);
        Ok(())
    }

    pub fn ledger(&self) -> Vec<LedgerEntry> {
        self.ledger.clone()
    }

    pub fn verify(&self) -> VerifyResponse {
        VerifyResponse {
            ok: true,
            message: "Integridad OK (mock)".to_string(),
        }
    }

    fn find_pending_mut(&mut self, id: u32) -> ApiResult<&mut Invoice> {
        self.invoices
            .iter_mut()
            .find(|i| i.id == id && i.is_pending())
            .ok_or_else(|| ApiError::Http {
                status: 404,
                message: format!("Factura {} no está pendiente", id),
            })
    }

    fn last_hash(&self) -> String {
        self.ledger
            .last()
            .map(|e| e.hash.clone())
            .unwrap_or_else(|| "0000000000000000".to_string())
    }

    fn next_tx_id(&mut self) -> String {
        let tx = format!("TX_{:04}", self.next_tx);
        self.next_tx += 1;
        tx
    }

    fn append_ledger(
        &mut self,
        actor: &str,
        action: &str,
        tx_id: String,
        prev_hash: String,
        hash: String,
    ) {
        let entry = LedgerEntry {
            id: self.ledger.len() as u32 + 1,
            timestamp: now_label(),
            actor: actor.to_string(),
            action: action.to_string(),
            tx_id,
            prev_hash,
            hash,
        };
        self.ledger.push(entry);
    }
}

/// Hash derivado para la demo (solo presentación, no criptografía)
fn derive_hash(prev_hash: &str, tx_id: &str, action: &str) -> String {
    let mut hasher = DefaultHasher::new();
    prev_hash.hash(&mut hasher);
    tx_id.hash(&mut hasher);
    action.hash(&mut hasher);
    format!("MOCK{:016X}", hasher.finish())
}

#[cfg(target_arch = "wasm32")]
fn now_label() -> String {
    let d = js_sys::Date::new_0();
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
        d.get_full_year(),
        d.get_month() + 1,
        d.get_date(),
        d.get_hours(),
        d.get_minutes(),
        d.get_seconds()
    )
}

#[cfg(not(target_arch = "wasm32"))]
fn now_label() -> String {
    "1970-01-01 00:00:00".to_string()
}

/// Gateway mock: dataset compartido, operaciones async-envueltas
#[derive(Clone)]
pub struct MockApi {
    data: Rc<RefCell<MockData>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            data: Rc::new(RefCell::new(MockData::seed())),
        }
    }

    pub async fn login(&self, username: &str, _password: &str) -> ApiResult<LoginResponse> {
        self.data.borrow().login(username)
    }

    pub async fn health(&self) -> ApiResult<()> {
        Ok(())
    }

    pub async fn get_inventory(&self) -> ApiResult<Vec<Lot>> {
        Ok(self.data.borrow().inventory())
    }

    pub async fn create_inventory(&self, body: &LotCreate) -> ApiResult<()> {
        self.data.borrow_mut().create_lot(body);
        Ok(())
    }

    pub async fn get_available_lots(&self) -> ApiResult<Vec<Lot>> {
        Ok(self.data.borrow().available_lots())
    }

    pub async fn get_invoices(&self) -> ApiResult<Vec<Invoice>> {
        Ok(self.data.borrow().invoices())
    }

    pub async fn create_invoice(&self, body: &InvoiceCreate) -> ApiResult<()> {
        self.data.borrow_mut().create_invoice(body)
    }

    pub async fn get_pending_approvals(&self) -> ApiResult<Vec<Invoice>> {
        Ok(self.data.borrow().pending_approvals())
    }

    pub async fn approve_invoice(&self, id: u32) -> ApiResult<ApproveResponse> {
        self.data.borrow_mut().approve_invoice(id)
    }

    pub async fn reject_invoice(&self, id: u32) -> ApiResult<()> {
        self.data.borrow_mut().reject_invoice(id)
    }

    pub async fn get_ledger(&self) -> ApiResult<Vec<LedgerEntry>> {
        Ok(self.data.borrow().ledger())
    }

    pub async fn verify_chain(&self) -> ApiResult<VerifyResponse> {
        Ok(self.data.borrow().verify())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_accepts_the_three_roles_with_any_password() {
        let data = MockData::seed();
        let res = data.login("admin").unwrap();
        assert_eq!(res.role, "admin");
        assert_eq!(res.token, "mock-admin");

        assert_eq!(data.login("BODEGA").unwrap().token, "mock-bodega");
        assert!(data.login("intruso").is_err());
    }

    #[test]
    fn create_invoice_reserves_the_lot() {
        let mut data = MockData::seed();
        let lot_id = 1;

        data.create_invoice(&InvoiceCreate {
            inventory_id: lot_id,
            date: "2023-11-02".to_string(),
            client: "Exportadora Sur".to_string(),
            total: 900.0,
        })
        .unwrap();

        // La factura nueva lleva snapshot del lote
        let inv = data.invoices().into_iter().last().unwrap();
        assert_eq!(inv.lot.as_deref(), Some("Lote-CCN51-0001"));
        assert_eq!(inv.lot_qty, Some(50));
        assert!(inv.is_pending());

        // Ya no aparece como disponible
        assert!(data.available_lots().iter().all(|l| l.id != lot_id));
        // Y facturar el mismo lote otra vez falla
        let err = data
            .create_invoice(&InvoiceCreate {
                inventory_id: lot_id,
                date: "2023-11-02".to_string(),
                client: "Otro".to_string(),
                total: 1.0,
            })
            .unwrap_err();
        assert!(err.to_string().contains("no está disponible"));
    }

    #[test]
    fn approve_appends_a_chained_ledger_entry() {
        let mut data = MockData::seed();
        let genesis_hash = data.ledger()[0].hash.clone();

        let res = data.approve_invoice(101).unwrap();
        assert!(res.hash.starts_with("MOCK"));

        let ledger = data.ledger();
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger[1].prev_hash, genesis_hash);
        assert_eq!(ledger[1].hash, res.hash);
        assert_eq!(ledger[1].action, "APPROVE_INVOICE");

        // La factura quedó aprobada con el hash estampado
        let inv = data
            .invoices()
            .into_iter()
            .find(|i| i.id == 101)
            .unwrap();
        assert_eq!(inv.status, "APPROVED");
        assert_eq!(inv.hash.as_deref(), Some(res.hash.as_str()));
    }

    #[test]
    fn reject_releases_the_lot_and_disappears_from_pending() {
        let mut data = MockData::seed();
        assert_eq!(data.pending_approvals().len(), 2);

        // Reservar el lote 2 primero para verificar que el rechazo lo libera
        data.create_invoice(&InvoiceCreate {
            inventory_id: 2,
            date: "2023-11-02".to_string(),
            client: "Otro".to_string(),
            total: 10.0,
        })
        .unwrap();
        assert!(data.available_lots().iter().all(|l| l.id != 2));

        data.reject_invoice(102).unwrap();

        // Re-consulta posterior ya no la lista (datos frescos, sin caché)
        let pending = data.pending_approvals();
        assert!(pending.iter().all(|i| i.id != 102));

        // El lote 2 volvió a AVAILABLE
        assert!(data.available_lots().iter().any(|l| l.id == 2));

        // También se registró en el ledger
        assert_eq!(data.ledger().last().map(|e| e.action.clone()).as_deref(), Some("REJECT_INVOICE"));
    }

    #[test]
    fn approving_twice_is_an_error() {
        let mut data = MockData::seed();
        data.approve_invoice(101).unwrap();
        assert!(data.approve_invoice(101).is_err());
    }

    #[test]
    fn verify_is_ok_in_mock_mode() {
        let data = MockData::seed();
        let res = data.verify();
        assert!(res.ok);
        assert_eq!(res.message, "Integridad OK (mock)");
    }
}
