// ============================================================================
// PERMISSÕES - Tabela de capacidades por perfil
// ============================================================================
// Espelho CONSULTIVO das regras do servidor: decide o que a UI mostra e
// habilita. A checagem autoritativa acontece no backend; qualquer chamada
// pode falhar com erro de autorização mesmo que a tabela tenha liberado.
// ============================================================================

use crate::models::auth::Role;

/// Ações que a interface pode oferecer a um usuário.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    CreateTicket,
    AssignTicket,
    StartTicket,
    PendTicket,
    CommentTicket,
    CloseTicket,
    ViewTickets,
    AdminPanel,
    HideResolvedToggle,
}

/// Mapeamento puro (perfil, ação) -> permitido.
pub fn allows(role: Role, capability: Capability) -> bool {
    use Capability::*;
    match role {
        // Admin: todas as ações de ciclo de vida, administração e o
        // filtro "ocultar concluídos"
        Role::Admin => true,
        Role::Tech => matches!(
            capability,
            AssignTicket | StartTicket | PendTicket | CommentTicket | CloseTicket | ViewTickets
        ),
        Role::Client => matches!(capability, CreateTicket | CommentTicket | ViewTickets),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_pode_tudo() {
        for cap in [
            Capability::CreateTicket,
            Capability::AssignTicket,
            Capability::CloseTicket,
            Capability::AdminPanel,
            Capability::HideResolvedToggle,
        ] {
            assert!(allows(Role::Admin, cap));
        }
    }

    #[test]
    fn tech_gerencia_atendimento_mas_nao_administra() {
        assert!(allows(Role::Tech, Capability::AssignTicket));
        assert!(allows(Role::Tech, Capability::StartTicket));
        assert!(allows(Role::Tech, Capability::PendTicket));
        assert!(allows(Role::Tech, Capability::CloseTicket));
        assert!(!allows(Role::Tech, Capability::AdminPanel));
        assert!(!allows(Role::Tech, Capability::HideResolvedToggle));
        assert!(!allows(Role::Tech, Capability::CreateTicket));
    }

    #[test]
    fn client_abre_chamado_e_comenta() {
        assert!(allows(Role::Client, Capability::CreateTicket));
        assert!(allows(Role::Client, Capability::CommentTicket));
        assert!(allows(Role::Client, Capability::ViewTickets));
        assert!(!allows(Role::Client, Capability::AssignTicket));
        assert!(!allows(Role::Client, Capability::CloseTicket));
        assert!(!allows(Role::Client, Capability::HideResolvedToggle));
    }
}
