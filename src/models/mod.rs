pub mod admin;
pub mod auth;
pub mod permissions;
pub mod query;
pub mod store;
pub mod ticket;

pub use admin::{AdminUser, CreateStoreInput, CreateUserInput};
pub use auth::{ChangePasswordRequest, LoginRequest, Role, Session};
pub use permissions::{allows, Capability};
pub use query::{RequestSequence, TicketListFilter, TicketQuery};
pub use store::{sort_networks_by_name, sort_stores_by_name, Network, Store};
pub use ticket::{
    NewTicket, Ticket, TicketDetail, TicketPriority, TicketStatus, TicketType, TicketUpdate,
};
