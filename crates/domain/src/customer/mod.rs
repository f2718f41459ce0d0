//! Customer aggregate, its address value object and events.

mod address;
#[allow(clippy::module_inception)]
mod customer;
mod events;
mod handlers;

pub use address::Address;
pub use customer::Customer;
pub use events::{CustomerAddressChanged, CustomerAddressChangedData, CustomerCreated, CustomerCreatedData};
pub use handlers::{LogAddressChangedHandler, LogCustomerCreatedHandler};
