//! Product aggregate and catalog events.

mod events;
mod handlers;
#[allow(clippy::module_inception)]
mod product;
mod service;

pub use events::{ProductCreated, ProductCreatedData};
pub use handlers::NotifyProductCreatedHandler;
pub use product::Product;
pub use service::ProductService;
