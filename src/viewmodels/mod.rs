pub mod admin_viewmodel;
pub mod auth_viewmodel;
pub mod ticket_viewmodel;
pub mod tickets_viewmodel;

pub use admin_viewmodel::AdminViewModel;
pub use auth_viewmodel::AuthViewModel;
pub use ticket_viewmodel::TicketViewModel;
pub use tickets_viewmodel::TicketsViewModel;
