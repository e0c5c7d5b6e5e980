pub mod amount;
pub mod cart;
pub mod catalog;
pub mod csv;
pub mod invoice;
pub mod model;
pub mod order;
pub mod payment;
pub mod pricing;
pub mod store;

pub use amount::{Amount, Rate};
pub use cart::Cart;
pub use catalog::Catalog;
pub use invoice::{Invoice, InvoiceDetails, InvoiceNumber, InvoiceSequence};
pub use model::{Customer, CustomerId, Ebook, OrderId, StoreEvent, ValidationError};
pub use order::Order;
pub use payment::{Payment, PaymentStatus};
pub use pricing::PricingPolicy;
pub use store::Storefront;
