// ============================================================================
// RIOAUTOCOM TECH - Núcleo do cliente de chamados (Rust/WASM, MVVM)
// ============================================================================
// - Models: formas de dados compartilhadas com o backend + lógica pura
//   (máquina de estados, permissões, filtro de listagem)
// - Services: SOMENTE comunicação HTTP (gateway único com credenciais)
// - State: sessão compartilhada com escritor único (Rc<RefCell>)
// - ViewModels: orquestram services + state e devolvem valores
// A camada de views (DOM) vive fora deste crate e consome os viewmodels.
// ============================================================================

use wasm_bindgen::prelude::wasm_bindgen;

pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;

pub use error::{ApiError, ApiResult};
pub use services::ApiClient;
pub use state::SessionStore;
pub use viewmodels::{AdminViewModel, AuthViewModel, TicketViewModel, TicketsViewModel};

/// Raiz de composição: um SessionStore compartilhado injetado no gateway e
/// em todos os viewmodels — nada de estado global ambiente.
pub struct AppContext {
    pub session: SessionStore,
    pub api: ApiClient,
    pub auth: AuthViewModel,
    pub tickets: TicketsViewModel,
    pub ticket: TicketViewModel,
    pub admin: AdminViewModel,
}

impl AppContext {
    /// Monta o contexto restaurando a sessão persistida (se houver).
    pub fn new() -> Self {
        let session = SessionStore::init();
        let api = ApiClient::new(session.clone());
        Self {
            auth: AuthViewModel::new(api.clone(), session.clone()),
            tickets: TicketsViewModel::new(api.clone(), session.clone()),
            ticket: TicketViewModel::new(api.clone()),
            admin: AdminViewModel::new(api.clone()),
            api,
            session,
        }
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Inicializa logging e panic hook. Chamar uma única vez no bootstrap da UI.
#[wasm_bindgen]
pub fn init() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("🚀 RioAutocom tech — cliente inicializado");
}
