// ============================================================================
// ADMIN VIEWMODEL - Contas, lojas e vínculo cliente→loja (ADMIN)
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::ApiResult;
use crate::models::{sort_stores_by_name, AdminUser, CreateStoreInput, CreateUserInput, Store};
use crate::services::ApiClient;

pub struct AdminViewModel {
    api: ApiClient,
    pub users: Rc<RefCell<Vec<AdminUser>>>,
    pub stores: Rc<RefCell<Vec<Store>>>,
}

impl AdminViewModel {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            users: Rc::new(RefCell::new(Vec::new())),
            stores: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Usuários e lojas são leituras independentes: disparadas juntas e
    /// cada uma atualiza sua fatia.
    pub async fn load(&self) -> ApiResult<()> {
        let (users, stores) = futures::join!(self.api.admin_list_users(), self.api.admin_list_stores());
        *self.users.borrow_mut() = users?;
        let mut stores = stores?;
        sort_stores_by_name(&mut stores);
        *self.stores.borrow_mut() = stores;
        Ok(())
    }

    pub async fn create_user(&self, input: &CreateUserInput) -> ApiResult<AdminUser> {
        let created = self.api.admin_create_user(input).await?;
        log::info!("👤 Usuário criado: {}", created.username);
        self.load().await?;
        Ok(created)
    }

    pub async fn create_store(&self, input: &CreateStoreInput) -> ApiResult<Store> {
        let created = self.api.admin_create_store(input).await?;
        log::info!("🏪 Loja criada: {}", created.name);
        self.load().await?;
        Ok(created)
    }

    pub async fn grant_store(&self, client_id: &str, store_id: &str) -> ApiResult<()> {
        self.api.admin_grant_store(client_id, store_id).await?;
        log::info!("🔓 Acesso liberado: cliente {} → loja {}", client_id, store_id);
        Ok(())
    }
}
