use serde::{Deserialize, Serialize};

/// Perfil do usuário autenticado. Define o que a UI oferece
/// (ver models::permissions); o servidor é sempre a autoridade final.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Tech,
    Client,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Tech => "TECH",
            Role::Client => "CLIENT",
        }
    }
}

/// Sessão autenticada, como devolvida por POST /auth/login.
/// Não há expiração local: a validade é decidida pelo servidor na próxima
/// chamada. `username` é carimbado pelo cliente após o login.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub role: Role,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub must_change_password: bool,
}

impl Session {
    /// Sessão após troca de senha bem-sucedida: só o flag muda, token e
    /// identidade seguem válidos (sem reautenticação).
    pub fn with_password_changed(mut self) -> Self {
        self.must_change_password = false;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_usa_nomes_do_backend() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        assert_eq!(
            serde_json::from_str::<Role>("\"CLIENT\"").unwrap(),
            Role::Client
        );
    }

    #[test]
    fn sessao_sem_flag_de_troca_de_senha_assume_false() {
        let s: Session =
            serde_json::from_str(r#"{"access_token":"t1","role":"TECH"}"#).unwrap();
        assert_eq!(s.role, Role::Tech);
        assert!(!s.must_change_password);
        assert!(s.username.is_none());
    }

    #[test]
    fn troca_de_senha_vira_o_flag_preservando_o_resto() {
        let antes = Session {
            access_token: "t1".into(),
            role: Role::Tech,
            username: Some("tec1".into()),
            must_change_password: true,
        };
        let depois = antes.clone().with_password_changed();
        assert!(!depois.must_change_password);
        assert_eq!(depois.access_token, antes.access_token);
        assert_eq!(depois.role, antes.role);
        assert_eq!(depois.username, antes.username);
    }
}
