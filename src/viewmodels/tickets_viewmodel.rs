// ============================================================================
// TICKETS VIEWMODEL - Listagem com filtros (rede / loja / status)
// ============================================================================
// Cada mudança de filtro dispara uma nova listagem; não há cancelamento de
// request em andamento. Para a resposta lenta não sobrescrever a mais nova,
// toda listagem carrega um número de sequência monotônico e respostas
// obsoletas são descartadas (a última requisição vence). Ver DESIGN.md.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::ApiResult;
use crate::models::{
    allows, sort_networks_by_name, sort_stores_by_name, Capability, Network, NewTicket,
    RequestSequence, Store, Ticket, TicketListFilter, TicketStatus,
};
use crate::services::ApiClient;
use crate::state::SessionStore;

#[derive(Clone)]
pub struct TicketsViewModel {
    api: ApiClient,
    session: SessionStore,
    pub filter: Rc<RefCell<TicketListFilter>>,
    pub networks: Rc<RefCell<Vec<Network>>>,
    pub stores: Rc<RefCell<Vec<Store>>>,
    pub tickets: Rc<RefCell<Vec<Ticket>>>,
    pub loading: Rc<RefCell<bool>>,
    list_seq: Rc<RefCell<RequestSequence>>,
    store_seq: Rc<RefCell<RequestSequence>>,
}

impl TicketsViewModel {
    pub fn new(api: ApiClient, session: SessionStore) -> Self {
        let mut filter = TicketListFilter::new();
        // o default de "ocultar concluídos" é fixado na primeira observação
        // do perfil (sessão restaurada do storage já conta)
        if let Some(role) = session.role() {
            filter.observe_role(role);
        }
        Self {
            api,
            session,
            filter: Rc::new(RefCell::new(filter)),
            networks: Rc::new(RefCell::new(Vec::new())),
            stores: Rc::new(RefCell::new(Vec::new())),
            tickets: Rc::new(RefCell::new(Vec::new())),
            loading: Rc::new(RefCell::new(false)),
            list_seq: Rc::new(RefCell::new(RequestSequence::new())),
            store_seq: Rc::new(RefCell::new(RequestSequence::new())),
        }
    }

    /// Chamar após um login dentro da mesma instância. Inicializa o default
    /// do toggle apenas se ainda não foi inicializado.
    pub fn observe_session_role(&self) {
        if let Some(role) = self.session.role() {
            self.filter.borrow_mut().observe_role(role);
        }
    }

    /// O toggle "ocultar concluídos" só é oferecido a ADMIN.
    pub fn offers_hide_concluded(&self) -> bool {
        self.session
            .role()
            .map(|role| allows(role, Capability::HideResolvedToggle))
            .unwrap_or(false)
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.session
            .role()
            .map(|role| allows(role, capability))
            .unwrap_or(false)
    }

    // ------------------------------------------------------------------
    // Cargas
    // ------------------------------------------------------------------

    /// Dispara a carga inicial em background, no modelo cooperativo de
    /// thread única. Erros viram log; as fatias ficam como estavam.
    pub fn spawn_refresh(&self) {
        let vm = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = vm.refresh_all().await {
                log::error!("❌ Erro na carga inicial da listagem: {}", e);
            }
        });
    }

    /// Carga inicial: leituras independentes disparadas em paralelo, cada
    /// uma atualiza sua própria fatia de estado.
    pub async fn refresh_all(&self) -> ApiResult<()> {
        let (networks, stores, tickets) = futures::join!(
            self.load_networks(),
            self.load_stores(),
            self.load_tickets()
        );
        networks.and(stores).and(tickets)
    }

    pub async fn load_networks(&self) -> ApiResult<()> {
        let mut list = self.api.list_networks().await?;
        sort_networks_by_name(&mut list);
        *self.networks.borrow_mut() = list;
        Ok(())
    }

    /// Lojas escopadas pela rede selecionada (ou todas). Mesmo protocolo
    /// last-request-wins da listagem: a resposta lenta de uma rede anterior
    /// não sobrescreve as lojas da rede atual.
    pub async fn load_stores(&self) -> ApiResult<()> {
        let seq = self.store_seq.borrow_mut().begin();
        let network_id = self.filter.borrow().network_id.clone();
        let result = self.api.list_stores(network_id.as_deref()).await;

        if !self.store_seq.borrow().is_current(seq) {
            log::debug!("🕓 Resposta de lojas obsoleta descartada (seq {})", seq);
            return Ok(());
        }

        let mut list = result?;
        sort_stores_by_name(&mut list);
        *self.stores.borrow_mut() = list;
        Ok(())
    }

    pub async fn load_tickets(&self) -> ApiResult<()> {
        let seq = self.list_seq.borrow_mut().begin();
        let query = self.filter.borrow().query();

        *self.loading.borrow_mut() = true;
        let result = self.api.list_tickets(&query).await;

        // resposta de uma requisição já superada: descarta
        if !self.list_seq.borrow().is_current(seq) {
            log::debug!("🕓 Resposta de listagem obsoleta descartada (seq {})", seq);
            return Ok(());
        }
        *self.loading.borrow_mut() = false;

        let list = result?;
        let visible = self.filter.borrow().apply(list);
        log::info!("📋 {} tickets carregados", visible.len());
        *self.tickets.borrow_mut() = visible;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Filtros
    // ------------------------------------------------------------------

    /// Trocar de rede limpa a loja, recarrega as lojas no novo escopo e
    /// relança a listagem de tickets. O filtro já mudou, então a listagem
    /// é recarregada mesmo que a carga de lojas falhe.
    pub async fn select_network(&self, network_id: Option<String>) -> ApiResult<()> {
        self.filter.borrow_mut().select_network(network_id);
        let stores = self.load_stores().await;
        let tickets = self.load_tickets().await;
        stores.and(tickets)
    }

    pub async fn select_store(&self, store_id: Option<String>) -> ApiResult<()> {
        self.filter.borrow_mut().select_store(store_id);
        self.load_tickets().await
    }

    pub async fn select_status(&self, status: Option<TicketStatus>) -> ApiResult<()> {
        self.filter.borrow_mut().select_status(status);
        self.load_tickets().await
    }

    pub async fn set_hide_concluded(&self, hide: bool) -> ApiResult<()> {
        self.filter.borrow_mut().set_hide_concluded(hide);
        self.load_tickets().await
    }

    // ------------------------------------------------------------------
    // Criação
    // ------------------------------------------------------------------

    /// Abre um chamado (nasce ABERTO no servidor) e recarrega a listagem.
    pub async fn create_ticket(&self, input: &NewTicket) -> ApiResult<Ticket> {
        let created = self.api.create_ticket(input).await?;
        self.load_tickets().await?;
        Ok(created)
    }
}
