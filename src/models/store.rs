use serde::{Deserialize, Serialize};

/// Loja atendida; tickets referenciam lojas via `store_id`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: String,
    pub name: String,
    pub cnpj: String,
}

/// Rede de lojas; usada apenas para escopar listagens.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub id: String,
    pub name: String,
}

/// Ordenação por nome, sem diferenciar maiúsculas (estabilidade de exibição;
/// puramente cosmética).
pub fn sort_stores_by_name(stores: &mut [Store]) {
    stores.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
}

pub fn sort_networks_by_name(networks: &mut [Network]) {
    networks.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
}
