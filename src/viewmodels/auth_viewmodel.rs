// ============================================================================
// AUTH VIEWMODEL - Login, logout e troca de senha
// ============================================================================

use crate::error::ApiResult;
use crate::models::Session;
use crate::services::ApiClient;
use crate::state::SessionStore;

pub struct AuthViewModel {
    api: ApiClient,
    session: SessionStore,
}

impl AuthViewModel {
    pub fn new(api: ApiClient, session: SessionStore) -> Self {
        Self { api, session }
    }

    /// Autentica e substitui a sessão por inteiro (persistida pelo store).
    /// O username digitado é carimbado na sessão antes de guardar.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<Session> {
        let username = username.trim();
        let mut session = self.api.login(username, password).await?;
        session.username = Some(username.to_string());
        self.session.replace(session.clone());
        log::info!("✅ Login realizado: {} ({})", username, session.role.as_str());
        Ok(session)
    }

    /// Apaga sessão e persistência; sem chamada de rede.
    pub fn logout(&self) {
        log::info!("👋 Logout");
        self.session.clear();
    }

    /// Troca a senha e vira `must_change_password` na sessão corrente via
    /// replace, sem reautenticar.
    pub async fn change_password(&self, old_password: &str, new_password: &str) -> ApiResult<()> {
        self.api.change_password(old_password, new_password).await?;
        if let Some(session) = self.session.current() {
            self.session.replace(session.with_password_changed());
        }
        log::info!("🔒 Senha alterada com sucesso");
        Ok(())
    }
}
