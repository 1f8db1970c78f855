//! Repositories over the shop tables, plus request-body validation shared by the handlers.

mod orders;
mod products;
mod users;
pub mod validation;

pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use users::{NewUser, UserRepository};
