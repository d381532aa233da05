// ============================================================================
// API CLIENT - Ponto único de comunicação HTTP (stateless)
// ============================================================================
// Sem lógica de negócio: só monta requests, anexa credenciais e normaliza
// erros. Toda chamada de saída passa por aqui.
//   - Authorization: Bearer <token> quando existe sessão
//   - Content-Type: application/json quando há corpo
//   - não-2xx vira erro com a mensagem de `detail`/`message` do corpo,
//     ou "HTTP <status>" como fallback
// ============================================================================

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::models::{
    AdminUser, ChangePasswordRequest, CreateStoreInput, CreateUserInput, LoginRequest, Network,
    NewTicket, Session, Store, Ticket, TicketDetail, TicketQuery, TicketUpdate,
};
use crate::state::SessionStore;
use crate::utils::constants::BACKEND_URL;

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(session: SessionStore) -> Self {
        Self::with_base_url(BACKEND_URL, session)
    }

    pub fn with_base_url(base_url: impl Into<String>, session: SessionStore) -> Self {
        Self {
            base_url: base_url.into(),
            session,
        }
    }

    // ------------------------------------------------------------------
    // Plumbing
    // ------------------------------------------------------------------

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.header("Accept", "application/json");
        match self.session.token() {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .authed(Request::get(&url))
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("Falha de rede: {}", e)))?;
        decode_response(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .authed(Request::post(&url))
            .json(body)
            .map_err(|e| ApiError::Transport(format!("Erro serializando request: {}", e)))?
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("Falha de rede: {}", e)))?;
        decode_response(response).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .authed(Request::post(&url))
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("Falha de rede: {}", e)))?;
        decode_response(response).await
    }

    // ------------------------------------------------------------------
    // Autenticação
    // ------------------------------------------------------------------

    /// POST /auth/login. Recusa de credencial vira `ApiError::Auth` com a
    /// mensagem do servidor, sem retry automático.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<Session> {
        log::info!("🔐 Autenticando usuário: {}", username);
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.post_json::<_, Session>("/auth/login", &body)
            .await
            .map_err(login_error)
    }

    /// POST /auth/change-password.
    pub async fn change_password(&self, old_password: &str, new_password: &str) -> ApiResult<()> {
        let body = ChangePasswordRequest {
            old_password: old_password.to_string(),
            new_password: new_password.to_string(),
        };
        let _ack: serde_json::Value = self.post_json("/auth/change-password", &body).await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Listagens
    // ------------------------------------------------------------------

    pub async fn list_networks(&self) -> ApiResult<Vec<Network>> {
        self.get_json("/networks/").await
    }

    pub async fn list_stores(&self, network_id: Option<&str>) -> ApiResult<Vec<Store>> {
        let path = match network_id {
            Some(id) => format!("/stores/?network_id={}", id),
            None => "/stores/".to_string(),
        };
        self.get_json(&path).await
    }

    /// GET /tickets/ com as dimensões opcionais do filtro. O servidor ainda
    /// escopa pela identidade/perfil do chamador.
    pub async fn list_tickets(&self, query: &TicketQuery) -> ApiResult<Vec<Ticket>> {
        let path = format!("/tickets/{}", query.to_query_string());
        self.get_json(&path).await
    }

    /// GET /tickets/{id}: ticket + histórico completo.
    pub async fn get_ticket(&self, ticket_id: &str) -> ApiResult<TicketDetail> {
        self.get_json(&format!("/tickets/{}", ticket_id)).await
    }

    // ------------------------------------------------------------------
    // Ciclo de vida
    // ------------------------------------------------------------------

    pub async fn create_ticket(&self, input: &NewTicket) -> ApiResult<Ticket> {
        log::info!("🎫 Abrindo chamado para loja: {}", input.store_id);
        self.post_json("/tickets/", input).await
    }

    /// `username` ausente = o servidor atribui ao próprio chamador.
    pub async fn assign_ticket(&self, ticket_id: &str, username: Option<&str>) -> ApiResult<Ticket> {
        let body = match username {
            Some(u) => serde_json::json!({ "username": u }),
            None => serde_json::json!({}),
        };
        self.post_json(&format!("/tickets/{}/assign", ticket_id), &body)
            .await
    }

    pub async fn start_ticket(&self, ticket_id: &str) -> ApiResult<Ticket> {
        self.post_empty(&format!("/tickets/{}/start", ticket_id))
            .await
    }

    pub async fn pend_ticket(&self, ticket_id: &str, message: Option<&str>) -> ApiResult<Ticket> {
        let body = serde_json::json!({ "message": message.unwrap_or("") });
        self.post_json(&format!("/tickets/{}/pend", ticket_id), &body)
            .await
    }

    pub async fn comment_ticket(&self, ticket_id: &str, message: &str) -> ApiResult<TicketUpdate> {
        let body = serde_json::json!({ "message": message });
        self.post_json(&format!("/tickets/{}/comment", ticket_id), &body)
            .await
    }

    /// `parecer` já validado como não vazio pelo viewmodel.
    pub async fn close_ticket(&self, ticket_id: &str, parecer: &str) -> ApiResult<Ticket> {
        let body = serde_json::json!({ "parecer": parecer });
        self.post_json(&format!("/tickets/{}/close", ticket_id), &body)
            .await
    }

    // ------------------------------------------------------------------
    // Administração (ADMIN)
    // ------------------------------------------------------------------

    pub async fn admin_list_users(&self) -> ApiResult<Vec<AdminUser>> {
        self.get_json("/admin/users").await
    }

    pub async fn admin_create_user(&self, input: &CreateUserInput) -> ApiResult<AdminUser> {
        self.post_json("/admin/users", input).await
    }

    pub async fn admin_list_stores(&self) -> ApiResult<Vec<Store>> {
        self.get_json("/admin/stores").await
    }

    pub async fn admin_create_store(&self, input: &CreateStoreInput) -> ApiResult<Store> {
        self.post_json("/admin/stores", input).await
    }

    /// Libera a visibilidade de uma loja para um cliente.
    pub async fn admin_grant_store(&self, client_id: &str, store_id: &str) -> ApiResult<()> {
        let _ack: serde_json::Value = self
            .post_empty(&format!("/admin/clients/{}/stores/{}", client_id, store_id))
            .await?;
        Ok(())
    }
}

/// Decodifica a resposta: corpo lido como texto, interpretado como JSON.
/// Em falha de parse do corpo esperado, o texto cru é devolvido no erro.
async fn decode_response<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Transport(format!("Falha lendo resposta: {}", e)))?;

    if !(200..300).contains(&status) {
        return Err(error_from_status(status, &text));
    }

    // corpo vazio equivale a null (endpoints de ack não devolvem JSON)
    if text.is_empty() {
        return serde_json::from_str("null")
            .map_err(|_| ApiError::Transport("Resposta vazia do servidor".into()));
    }
    serde_json::from_str(&text).map_err(|_| ApiError::Transport(text))
}

/// Só recusa de credencial (400/401/403) vira erro de autenticação; um
/// backend fora do ar durante o login continua sendo erro de servidor.
fn login_error(err: ApiError) -> ApiError {
    match err {
        ApiError::Server { status, message } if matches!(status, 400 | 401 | 403) => {
            ApiError::Auth(message)
        }
        other => other,
    }
}

/// Normalização de erro não-2xx: mensagem vem de `detail` ou `message` do
/// corpo, com fallback "HTTP <status>". Pura para poder ser testada.
pub(crate) fn error_from_status(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["detail", "message"].iter().find_map(|key| {
                value
                    .get(*key)
                    .and_then(|m| m.as_str())
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            })
        })
        .unwrap_or_else(|| format!("HTTP {}", status));
    ApiError::Server { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn erro_usa_campo_detail_do_corpo() {
        let err = error_from_status(403, r#"{"detail":"Acesso negado"}"#);
        assert_eq!(
            err,
            ApiError::Server {
                status: 403,
                message: "Acesso negado".into()
            }
        );
    }

    #[test]
    fn erro_cai_para_message_quando_nao_ha_detail() {
        let err = error_from_status(400, r#"{"message":"Parecer é obrigatório"}"#);
        assert_eq!(err.to_string(), "Parecer é obrigatório");
    }

    #[test]
    fn detail_tem_prioridade_sobre_message() {
        let err = error_from_status(422, r#"{"detail":"a","message":"b"}"#);
        assert_eq!(err.to_string(), "a");
    }

    #[test]
    fn corpo_nao_json_vira_http_status() {
        assert_eq!(
            error_from_status(502, "<html>Bad Gateway</html>").to_string(),
            "HTTP 502"
        );
        assert_eq!(error_from_status(500, "").to_string(), "HTTP 500");
        // detail nulo ou vazio também cai no fallback
        assert_eq!(
            error_from_status(404, r#"{"detail":null}"#).to_string(),
            "HTTP 404"
        );
        assert_eq!(
            error_from_status(404, r#"{"detail":""}"#).to_string(),
            "HTTP 404"
        );
    }

    #[test]
    fn recusa_de_credencial_vira_erro_de_autenticacao() {
        let err = login_error(ApiError::Server {
            status: 401,
            message: "Credenciais inválidas".into(),
        });
        assert_eq!(err, ApiError::Auth("Credenciais inválidas".into()));
    }

    #[test]
    fn falha_de_servidor_no_login_nao_vira_erro_de_credencial() {
        let indisponivel = ApiError::Server {
            status: 502,
            message: "HTTP 502".into(),
        };
        assert_eq!(login_error(indisponivel.clone()), indisponivel);

        let rede = ApiError::Transport("Falha de rede: timeout".into());
        assert_eq!(login_error(rede.clone()), rede);
    }
}
