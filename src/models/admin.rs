use serde::{Deserialize, Serialize};

use crate::models::auth::Role;

/// Conta de usuário como listada em GET /admin/users.
/// Registros administrativos são tipados de ponta a ponta; nada de mapas
/// soltos de JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: String,
    pub username: String,
    pub role: Role,
}

/// Payload de POST /admin/users.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreateUserInput {
    pub username: String,
    pub role: Role,
    pub password: String,
    pub must_change_password: bool,
}

/// Payload de POST /admin/stores.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreateStoreInput {
    pub name: String,
    pub cnpj: String,
}
