// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================
// Todas las mutaciones pasan por operaciones con nombre (set_user,
// set_active_view, clear_session); las vistas nunca asignan campos
// directamente. Esto permite testear las transiciones sin DOM.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::{CurrentUser, Role};

/// Vista de nivel superior: login o dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopView {
    Login,
    Dashboard,
}

/// Sub-vistas del dashboard. Enum cerrado: el dispatcher lo usa
/// exhaustivamente, no hay lookup por string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubView {
    Inventory,
    Invoices,
    Admin,
    Ledger,
}

impl SubView {
    /// Sub-vista por defecto al entrar al dashboard. El admin entra a
    /// pendientes de aprobación, nunca directo al ledger.
    pub fn default_for(role: Role) -> SubView {
        match role {
            Role::Bodega => SubView::Inventory,
            Role::Oficina => SubView::Invoices,
            Role::Admin => SubView::Admin,
        }
    }

    /// Sub-vistas a las que el rol tiene derecho. El gating es por rol:
    /// una vista no permitida nunca se auto-selecciona.
    pub fn allowed_for(self, role: Role) -> bool {
        match role {
            Role::Bodega => self == SubView::Inventory,
            Role::Oficina => self == SubView::Invoices,
            Role::Admin => matches!(self, SubView::Admin | SubView::Ledger),
        }
    }
}

/// Estado global de la aplicación. Clonar es barato (Rc compartidos).
#[derive(Clone)]
pub struct AppState {
    current_user: Rc<RefCell<Option<CurrentUser>>>,
    top_view: Rc<RefCell<TopView>>,
    active_view: Rc<RefCell<Option<SubView>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            current_user: Rc::new(RefCell::new(None)),
            top_view: Rc::new(RefCell::new(TopView::Login)),
            active_view: Rc::new(RefCell::new(None)),
        }
    }

    /// Establecer usuario autenticado y pasar al dashboard
    pub fn set_user(&self, user: CurrentUser) {
        *self.current_user.borrow_mut() = Some(user);
        *self.top_view.borrow_mut() = TopView::Dashboard;
    }

    pub fn current_user(&self) -> Option<CurrentUser> {
        self.current_user.borrow().clone()
    }

    pub fn top_view(&self) -> TopView {
        *self.top_view.borrow()
    }

    /// Cambiar la sub-vista activa del dashboard
    pub fn set_active_view(&self, view: SubView) {
        *self.active_view.borrow_mut() = Some(view);
    }

    pub fn active_view(&self) -> Option<SubView> {
        *self.active_view.borrow()
    }

    /// Reset completo a {login, sin sub-vista}. Lo invoca el session store
    /// en logout o invalidación forzada.
    pub fn clear_session(&self) {
        *self.current_user.borrow_mut() = None;
        *self.top_view.borrow_mut() = TopView::Login;
        *self.active_view.borrow_mut() = None;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sub_view_is_role_correct() {
        assert_eq!(SubView::default_for(Role::Bodega), SubView::Inventory);
        assert_eq!(SubView::default_for(Role::Oficina), SubView::Invoices);
        // Admin entra a pendientes, nunca al ledger
        assert_eq!(SubView::default_for(Role::Admin), SubView::Admin);
    }

    #[test]
    fn entitlement_is_role_gated() {
        assert!(SubView::Inventory.allowed_for(Role::Bodega));
        assert!(!SubView::Invoices.allowed_for(Role::Bodega));
        assert!(!SubView::Ledger.allowed_for(Role::Oficina));
        assert!(SubView::Admin.allowed_for(Role::Admin));
        assert!(SubView::Ledger.allowed_for(Role::Admin));
        assert!(!SubView::Inventory.allowed_for(Role::Admin));
    }

    #[test]
    fn set_user_moves_to_dashboard() {
        let state = AppState::new();
        assert_eq!(state.top_view(), TopView::Login);

        state.set_user(CurrentUser::from_role(Role::Bodega));
        assert_eq!(state.top_view(), TopView::Dashboard);
        assert_eq!(state.current_user().map(|u| u.role), Some(Role::Bodega));
    }

    #[test]
    fn clear_session_resets_everything() {
        let state = AppState::new();
        state.set_user(CurrentUser::from_role(Role::Admin));
        state.set_active_view(SubView::Ledger);

        state.clear_session();
        assert!(state.current_user().is_none());
        assert_eq!(state.top_view(), TopView::Login);
        assert_eq!(state.active_view(), None);
    }
}
