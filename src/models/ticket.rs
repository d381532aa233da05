// ============================================================================
// TICKET - Modelo principal + máquina de estados do ciclo de vida
// ============================================================================
// Grafo de transições:
//   ABERTO → ATRIBUIDO → EM_ATENDIMENTO ⇄ PENDENTE
// CONCLUIDO é alcançável de qualquer estado não terminal e é TERMINAL.
// Os predicados abaixo são a fonte única de validade de transição no
// cliente; o servidor continua sendo a autoridade final.
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Aberto,
    Atribuido,
    EmAtendimento,
    Pendente,
    Concluido,
}

impl TicketStatus {
    /// Nome de fio (igual ao backend), usado também como query param.
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Aberto => "ABERTO",
            TicketStatus::Atribuido => "ATRIBUIDO",
            TicketStatus::EmAtendimento => "EM_ATENDIMENTO",
            TicketStatus::Pendente => "PENDENTE",
            TicketStatus::Concluido => "CONCLUIDO",
        }
    }

    /// Rótulo acentuado para exibição.
    pub fn label(&self) -> &'static str {
        match self {
            TicketStatus::Aberto => "ABERTO",
            TicketStatus::Atribuido => "ATRIBUÍDO",
            TicketStatus::EmAtendimento => "EM ATENDIMENTO",
            TicketStatus::Pendente => "PENDENTE",
            TicketStatus::Concluido => "CONCLUÍDO",
        }
    }

    /// CONCLUIDO é terminal: nenhuma transição posterior é aceita.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TicketStatus::Concluido)
    }

    /// Atribuir é legal de ABERTO ou ATRIBUIDO (reatribuição é idempotente:
    /// sobrescreve `assigned_to` sem erro).
    pub fn can_assign(&self) -> bool {
        matches!(self, TicketStatus::Aberto | TicketStatus::Atribuido)
    }

    /// Iniciar atendimento é legal de ATRIBUIDO ou PENDENTE.
    pub fn can_start(&self) -> bool {
        matches!(self, TicketStatus::Atribuido | TicketStatus::Pendente)
    }

    /// Pendenciar é legal de qualquer estado aberto.
    pub fn can_pend(&self) -> bool {
        !self.is_terminal()
    }

    /// Comentar não altera o status; bloqueado apenas em ticket concluído
    /// (política única para ticket terminal, ver DESIGN.md).
    pub fn can_comment(&self) -> bool {
        !self.is_terminal()
    }

    /// Concluir é legal de qualquer estado não terminal.
    pub fn can_close(&self) -> bool {
        !self.is_terminal()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketType {
    Reparo,
    Instalacao,
    Servico,
    VisitaTecnica,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TicketPriority {
    Normal,
    Urgente,
}

/// Um chamado de serviço de campo vinculado a uma loja.
/// Nunca é mutado diretamente: todo avanço passa pelas transições do
/// ciclo de vida (viewmodels::ticket_viewmodel).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    pub store_id: String,
    /// Campo denormalizado de conveniência; pode estar ausente
    #[serde(default)]
    pub store_name: Option<String>,
    pub requester_name: String,
    pub local: String,
    pub problem: String,
    #[serde(rename = "type")]
    pub ticket_type: TicketType,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Registro de histórico append-only: um por transição e por comentário.
/// Nunca é editado, removido ou reordenado pelo cliente — a ordem é a
/// devolvida pelo servidor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TicketUpdate {
    pub id: String,
    pub ticket_id: String,
    pub action: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub actor: Option<String>,
}

impl TicketUpdate {
    /// Timestamp interpretado, para formatação na UI. `None` quando o
    /// servidor não enviou ou o formato não é RFC 3339.
    pub fn parsed_created_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.created_at.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Payload de criação: todo ticket nasce ABERTO no servidor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewTicket {
    pub store_id: String,
    pub requester_name: String,
    pub local: String,
    pub problem: String,
    #[serde(rename = "type")]
    pub ticket_type: TicketType,
    pub priority: TicketPriority,
}

/// Resposta de GET /tickets/{id}: o ticket e seu histórico.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TicketDetail {
    pub ticket: Ticket,
    #[serde(default)]
    pub updates: Vec<TicketUpdate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concluido_e_terminal_para_todas_as_transicoes() {
        let s = TicketStatus::Concluido;
        assert!(s.is_terminal());
        assert!(!s.can_assign());
        assert!(!s.can_start());
        assert!(!s.can_pend());
        assert!(!s.can_comment());
        assert!(!s.can_close());
    }

    #[test]
    fn atribuir_e_legal_de_aberto_e_de_atribuido() {
        assert!(TicketStatus::Aberto.can_assign());
        // reatribuição idempotente: continua legal já atribuído
        assert!(TicketStatus::Atribuido.can_assign());
        assert!(!TicketStatus::EmAtendimento.can_assign());
        assert!(!TicketStatus::Pendente.can_assign());
    }

    #[test]
    fn iniciar_e_legal_de_atribuido_e_de_pendente() {
        assert!(TicketStatus::Atribuido.can_start());
        assert!(TicketStatus::Pendente.can_start());
        assert!(!TicketStatus::Aberto.can_start());
        assert!(!TicketStatus::EmAtendimento.can_start());
    }

    #[test]
    fn concluir_e_legal_de_qualquer_estado_nao_terminal() {
        for s in [
            TicketStatus::Aberto,
            TicketStatus::Atribuido,
            TicketStatus::EmAtendimento,
            TicketStatus::Pendente,
        ] {
            assert!(s.can_close(), "deveria poder concluir de {:?}", s);
            assert!(s.can_pend());
            assert!(s.can_comment());
        }
    }

    #[test]
    fn status_serializa_com_nomes_do_backend() {
        assert_eq!(
            serde_json::to_string(&TicketStatus::EmAtendimento).unwrap(),
            "\"EM_ATENDIMENTO\""
        );
        assert_eq!(
            serde_json::from_str::<TicketType>("\"VISITA_TECNICA\"").unwrap(),
            TicketType::VisitaTecnica
        );
        assert_eq!(
            serde_json::to_string(&TicketPriority::Urgente).unwrap(),
            "\"URGENTE\""
        );
    }

    #[test]
    fn ticket_desserializa_payload_do_backend() {
        let json = r#"{
            "id": "t1",
            "store_id": "S1",
            "requester_name": "Ana",
            "local": "Caixa 2",
            "problem": "Impressora não liga",
            "type": "REPARO",
            "priority": "URGENTE",
            "status": "ABERTO"
        }"#;
        let t: Ticket = serde_json::from_str(json).unwrap();
        assert_eq!(t.status, TicketStatus::Aberto);
        assert_eq!(t.ticket_type, TicketType::Reparo);
        assert!(t.assigned_to.is_none());
        assert!(t.store_name.is_none());
    }

    #[test]
    fn update_interpreta_timestamp_rfc3339() {
        let u = TicketUpdate {
            id: "u1".into(),
            ticket_id: "t1".into(),
            action: "close".into(),
            message: Some("Trocado cabo de força.".into()),
            created_at: Some("2024-05-10T14:30:00-03:00".into()),
            actor: Some("tec1".into()),
        };
        let parsed = u.parsed_created_at().unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-05-10T17:30:00+00:00");

        let sem_data = TicketUpdate {
            created_at: None,
            ..u
        };
        assert!(sem_data.parsed_created_at().is_none());
    }
}
