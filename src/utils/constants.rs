/// URL base do backend
/// Configurada em tempo de compilação:
/// - Produção: https://rioautocom-tech-backend.onrender.com (padrão)
/// - Outro ambiente: via env var BACKEND_URL (ver build.rs)
pub const BACKEND_URL: &str = match option_env!("BACKEND_URL") {
    Some(url) => url,
    None => "https://rioautocom-tech-backend.onrender.com",
};

/// Chave única de persistência da sessão no localStorage.
/// A sessão inteira é gravada/removida por inteiro sob esta chave.
pub const AUTH_STORAGE_KEY: &str = "rioautocom_auth_v1";
