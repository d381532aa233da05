// ============================================================================
// ERROS - Taxonomia única de falhas do cliente
// ============================================================================
// Todo erro carrega a mensagem pronta para a notificação da UI; a camada de
// views só chama `to_string()`.
// ============================================================================

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ApiError {
    /// Pré-condição local violada; nenhuma requisição foi enviada.
    #[error("{0}")]
    Validation(String),

    /// Credenciais recusadas no login.
    #[error("{0}")]
    Auth(String),

    /// Resposta não-2xx do servidor, já normalizada.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Falha de rede ou resposta ilegível.
    #[error("{0}")]
    Transport(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_expoe_somente_a_mensagem() {
        let err = ApiError::Server {
            status: 403,
            message: "Acesso negado".into(),
        };
        assert_eq!(err.to_string(), "Acesso negado");
        assert_eq!(
            ApiError::Validation("Digite um comentário.".into()).to_string(),
            "Digite um comentário."
        );
    }
}
