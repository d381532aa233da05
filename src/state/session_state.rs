// ============================================================================
// SESSION STORE - Dona única da sessão autenticada
// ============================================================================
// Estado compartilhado via Rc<RefCell> (modelo cooperativo de thread única).
// Escrita SOMENTE por aqui; os demais componentes recebem um clone e leem
// snapshots imutáveis. Login/logout persistem a sessão inteira sob uma
// única chave do localStorage, então recarregar a página não força novo
// login.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::{Role, Session};
use crate::utils::constants::AUTH_STORAGE_KEY;
use crate::utils::storage::{load_from_storage, remove_from_storage, save_to_storage};

#[derive(Clone, Default)]
pub struct SessionStore {
    current: Rc<RefCell<Option<Session>>>,
}

impl SessionStore {
    /// Store vazio, sem tocar o storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lifecycle de init: carrega a sessão persistida, ou começa vazio.
    pub fn init() -> Self {
        let restored: Option<Session> = load_from_storage(AUTH_STORAGE_KEY);
        if let Some(ref session) = restored {
            log::info!(
                "🔑 Sessão restaurada do storage: {} ({})",
                session.username.as_deref().unwrap_or("?"),
                session.role.as_str()
            );
        }
        Self {
            current: Rc::new(RefCell::new(restored)),
        }
    }

    /// Snapshot da sessão atual.
    pub fn current(&self) -> Option<Session> {
        self.current.borrow().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.borrow().is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.current.borrow().as_ref().map(|s| s.role)
    }

    pub fn token(&self) -> Option<String> {
        self.current.borrow().as_ref().map(|s| s.access_token.clone())
    }

    /// Substitui a sessão por inteiro e persiste. Usado no login e também
    /// para virar `must_change_password` após troca de senha, sem novo
    /// login.
    pub fn replace(&self, session: Session) {
        if let Err(e) = save_to_storage(AUTH_STORAGE_KEY, &session) {
            log::error!("❌ Erro persistindo sessão: {}", e);
        }
        *self.current.borrow_mut() = Some(session);
    }

    /// Lifecycle de teardown: apaga storage e estado.
    pub fn clear(&self) {
        if let Err(e) = remove_from_storage(AUTH_STORAGE_KEY) {
            log::warn!("⚠️ Erro limpando sessão do storage: {}", e);
        }
        *self.current.borrow_mut() = None;
    }
}
