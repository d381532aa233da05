// ============================================================================
// FILTRO DE LISTAGEM - Composição de query + política "ocultar concluídos"
// ============================================================================
// Três dimensões opcionais (status, rede, loja) vão para o servidor como
// query params; a ocultação de concluídos é um pós-filtro LOCAL, aplicado
// depois da resposta, e só quando não há filtro explícito de status.
// ============================================================================

use crate::models::auth::Role;
use crate::models::ticket::{Ticket, TicketStatus};

/// Parâmetros enviados a GET /tickets/.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TicketQuery {
    pub status: Option<TicketStatus>,
    pub network_id: Option<String>,
    pub store_id: Option<String>,
    pub mine: bool,
}

impl TicketQuery {
    /// Monta a query string (com `?`), ou vazio quando não há filtro.
    /// Valores vindos de dados (ids) são percent-encoded.
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<String> = Vec::new();
        if let Some(status) = self.status {
            pairs.push(format!("status={}", status.as_str()));
        }
        if let Some(ref network_id) = self.network_id {
            pairs.push(format!("network_id={}", urlencoding::encode(network_id)));
        }
        if let Some(ref store_id) = self.store_id {
            pairs.push(format!("store_id={}", urlencoding::encode(store_id)));
        }
        if self.mine {
            pairs.push("mine=true".to_string());
        }
        if pairs.is_empty() {
            String::new()
        } else {
            format!("?{}", pairs.join("&"))
        }
    }
}

/// Protocolo last-request-wins para respostas fora de ordem: cada disparo de
/// leitura recebe um número crescente e a resposta só é aplicada se nenhum
/// disparo mais novo a superou nesse meio tempo.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestSequence {
    latest: u64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra um novo disparo e devolve seu número.
    pub fn begin(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    /// `false` quando a resposta pertence a um disparo já superado.
    pub fn is_current(&self, seq: u64) -> bool {
        self.latest == seq
    }
}

/// Estado do filtro da tela de listagem.
///
/// O default de "ocultar concluídos" é calculado UMA única vez por sessão,
/// na primeira observação do perfil: `true` para ADMIN, irrelevante (e não
/// oferecido) para os demais. Depois de inicializado, o toggle do usuário é
/// autoritativo e nunca é sobrescrito por observações posteriores do perfil.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TicketListFilter {
    pub status: Option<TicketStatus>,
    pub network_id: Option<String>,
    pub store_id: Option<String>,
    hide_concluded: bool,
    hide_initialized: bool,
}

impl TicketListFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Primeira observação do perfil inicializa o default; as seguintes são
    /// ignoradas.
    pub fn observe_role(&mut self, role: Role) {
        if self.hide_initialized {
            return;
        }
        self.hide_concluded = role == Role::Admin;
        self.hide_initialized = true;
    }

    pub fn hide_concluded(&self) -> bool {
        self.hide_concluded
    }

    /// Toggle manual do usuário: vale a partir daqui, inclusive sobre
    /// observações futuras do perfil.
    pub fn set_hide_concluded(&mut self, hide: bool) {
        self.hide_concluded = hide;
        self.hide_initialized = true;
    }

    /// Trocar de rede limpa a loja selecionada (a lista de lojas é
    /// recarregada com o escopo da nova rede).
    pub fn select_network(&mut self, network_id: Option<String>) {
        self.network_id = network_id;
        self.store_id = None;
    }

    pub fn select_store(&mut self, store_id: Option<String>) {
        self.store_id = store_id;
    }

    pub fn select_status(&mut self, status: Option<TicketStatus>) {
        self.status = status;
    }

    pub fn query(&self) -> TicketQuery {
        TicketQuery {
            status: self.status,
            network_id: self.network_id.clone(),
            store_id: self.store_id.clone(),
            mine: false,
        }
    }

    /// Pós-filtro local sobre a resposta do servidor. Preserva a ordem
    /// recebida. Filtro explícito de status sempre vence o toggle.
    pub fn apply(&self, tickets: Vec<Ticket>) -> Vec<Ticket> {
        if self.hide_concluded && self.status.is_none() {
            tickets
                .into_iter()
                .filter(|t| t.status != TicketStatus::Concluido)
                .collect()
        } else {
            tickets
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ticket::{TicketPriority, TicketType};

    fn ticket(id: &str, status: TicketStatus) -> Ticket {
        Ticket {
            id: id.into(),
            store_id: "S1".into(),
            store_name: None,
            requester_name: "Ana".into(),
            local: "Caixa 2".into(),
            problem: "Impressora não liga".into(),
            ticket_type: TicketType::Reparo,
            priority: TicketPriority::Normal,
            status,
            assigned_to: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn query_string_vazia_sem_filtros() {
        assert_eq!(TicketQuery::default().to_query_string(), "");
    }

    #[test]
    fn query_string_compoe_as_dimensoes() {
        let q = TicketQuery {
            status: Some(TicketStatus::Pendente),
            network_id: Some("N1".into()),
            store_id: Some("S9".into()),
            mine: true,
        };
        assert_eq!(
            q.to_query_string(),
            "?status=PENDENTE&network_id=N1&store_id=S9&mine=true"
        );
    }

    #[test]
    fn query_string_encoda_ids_com_caracteres_reservados() {
        let q = TicketQuery {
            status: None,
            network_id: Some("rede matriz&filial".into()),
            store_id: Some("loja=1".into()),
            mine: false,
        };
        assert_eq!(
            q.to_query_string(),
            "?network_id=rede%20matriz%26filial&store_id=loja%3D1"
        );
    }

    #[test]
    fn resposta_de_disparo_superado_e_descartada() {
        let mut seq = RequestSequence::new();
        let primeiro = seq.begin();
        let segundo = seq.begin();

        // a resposta lenta do primeiro disparo chega depois: descartada
        assert!(!seq.is_current(primeiro));
        // a do disparo mais recente vence
        assert!(seq.is_current(segundo));

        // um terceiro disparo supera o segundo, mesmo sem resposta ainda
        let terceiro = seq.begin();
        assert!(!seq.is_current(segundo));
        assert!(seq.is_current(terceiro));
    }

    #[test]
    fn default_ocultar_inicializa_true_para_admin_uma_unica_vez() {
        let mut f = TicketListFilter::new();
        f.observe_role(Role::Admin);
        assert!(f.hide_concluded());

        // usuário desmarca; observação posterior do perfil não reseta
        f.set_hide_concluded(false);
        f.observe_role(Role::Admin);
        assert!(!f.hide_concluded());
    }

    #[test]
    fn perfil_nao_admin_inicializa_sem_ocultar() {
        let mut f = TicketListFilter::new();
        f.observe_role(Role::Client);
        assert!(!f.hide_concluded());

        // já inicializado: um admin observado depois não liga o toggle
        f.observe_role(Role::Admin);
        assert!(!f.hide_concluded());
    }

    #[test]
    fn oculta_concluidos_apenas_sem_filtro_de_status() {
        let mut f = TicketListFilter::new();
        f.observe_role(Role::Admin);

        let lista = vec![
            ticket("a", TicketStatus::Aberto),
            ticket("b", TicketStatus::Concluido),
            ticket("c", TicketStatus::Pendente),
        ];

        let visiveis = f.apply(lista.clone());
        let ids: Vec<&str> = visiveis.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);

        // filtro explícito de status vence o toggle
        f.select_status(Some(TicketStatus::Concluido));
        assert_eq!(f.apply(lista.clone()).len(), 3);

        // toggle desligado: lista integral
        f.select_status(None);
        f.set_hide_concluded(false);
        assert_eq!(f.apply(lista).len(), 3);
    }

    #[test]
    fn pos_filtro_preserva_a_ordem_do_servidor() {
        let mut f = TicketListFilter::new();
        f.observe_role(Role::Admin);
        let lista = vec![
            ticket("3", TicketStatus::Pendente),
            ticket("1", TicketStatus::Concluido),
            ticket("2", TicketStatus::Aberto),
        ];
        let ids: Vec<String> = f.apply(lista).into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["3", "2"]);
    }

    #[test]
    fn trocar_de_rede_limpa_a_loja_selecionada() {
        let mut f = TicketListFilter::new();
        f.select_network(Some("N1".into()));
        f.select_store(Some("S1".into()));

        f.select_network(Some("N2".into()));
        assert_eq!(f.network_id.as_deref(), Some("N2"));
        assert!(f.store_id.is_none());

        // limpar a rede também limpa a loja
        f.select_store(Some("S2".into()));
        f.select_network(None);
        assert!(f.store_id.is_none());
    }
}
