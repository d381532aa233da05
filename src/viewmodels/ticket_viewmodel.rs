// ============================================================================
// TICKET VIEWMODEL - Transições do ciclo de vida de um chamado
// ============================================================================
// Cada transição: valida localmente (predicado de estado + campos
// obrigatórios, SEM ida à rede em caso de rejeição), dispara o POST e em
// seguida RECARREGA o ticket + histórico da fonte autoritativa — a resposta
// imediata da transição não basta, outros atores podem ter anexado updates.
// ============================================================================

use crate::error::{ApiError, ApiResult};
use crate::models::{Ticket, TicketDetail};
use crate::services::ApiClient;

pub struct TicketViewModel {
    api: ApiClient,
}

impl TicketViewModel {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Ticket + histórico, na ordem devolvida pelo servidor (o cliente
    /// nunca reordena).
    pub async fn load(&self, ticket_id: &str) -> ApiResult<TicketDetail> {
        self.api.get_ticket(ticket_id).await
    }

    /// Atribui o ticket; `username` ausente = o próprio chamador.
    /// Reatribuição sobrescreve `assigned_to` sem erro.
    pub async fn assign(&self, ticket: &Ticket, username: Option<&str>) -> ApiResult<TicketDetail> {
        if !ticket.status.can_assign() {
            return Err(ApiError::Validation(
                "Ticket não pode ser atribuído neste estado.".into(),
            ));
        }
        self.api.assign_ticket(&ticket.id, username).await?;
        log::info!("📌 Ticket {} atribuído", ticket.id);
        self.load(&ticket.id).await
    }

    pub async fn start(&self, ticket: &Ticket) -> ApiResult<TicketDetail> {
        if !ticket.status.can_start() {
            return Err(ApiError::Validation(
                "Atendimento só inicia de ticket atribuído ou pendente.".into(),
            ));
        }
        self.api.start_ticket(&ticket.id).await?;
        log::info!("▶️ Atendimento iniciado: {}", ticket.id);
        self.load(&ticket.id).await
    }

    /// Pendencia o ticket; mensagem é opcional (obrigatória só no close).
    pub async fn pend(&self, ticket: &Ticket, message: Option<&str>) -> ApiResult<TicketDetail> {
        if !ticket.status.can_pend() {
            return Err(ApiError::Validation("Ticket já concluído.".into()));
        }
        self.api.pend_ticket(&ticket.id, message).await?;
        log::info!("⏸️ Ticket {} pendenciado", ticket.id);
        self.load(&ticket.id).await
    }

    /// Comentário não altera o status. Mensagem vazia é rejeitada antes de
    /// qualquer chamada, evitando ida inútil à rede.
    pub async fn comment(&self, ticket: &Ticket, message: &str) -> ApiResult<TicketDetail> {
        if !ticket.status.can_comment() {
            return Err(ApiError::Validation("Ticket já concluído.".into()));
        }
        let message = match non_empty(message) {
            Some(m) => m,
            None => return Err(ApiError::Validation("Digite um comentário.".into())),
        };
        self.api.comment_ticket(&ticket.id, message).await?;
        self.load(&ticket.id).await
    }

    /// Conclui o ticket (estado terminal). Parecer é obrigatório: vazio ou
    /// só espaços é rejeitado localmente, sem request.
    pub async fn close(&self, ticket: &Ticket, parecer: &str) -> ApiResult<TicketDetail> {
        if !ticket.status.can_close() {
            return Err(ApiError::Validation("Ticket já concluído.".into()));
        }
        let parecer = match non_empty(parecer) {
            Some(p) => p,
            None => {
                return Err(ApiError::Validation(
                    "Parecer é obrigatório para concluir.".into(),
                ))
            }
        };
        self.api.close_ticket(&ticket.id, parecer).await?;
        log::info!("✅ Ticket {} concluído", ticket.id);
        self.load(&ticket.id).await
    }
}

fn non_empty(input: &str) -> Option<&str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
