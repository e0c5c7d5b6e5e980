//! Error types for storefront events.

use thiserror::Error;

use crate::model::{CustomerId, OrderId, ValidationError};

/// Top-level error returned by [`Storefront::apply`](super::Storefront::apply).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("item rejected: {0}")]
    Item(#[from] ItemError),

    #[error("checkout failed: {0}")]
    Checkout(#[from] CheckoutError),

    #[error("customer {0} is already registered")]
    DuplicateCustomer(CustomerId),
}

/// Error while adding an ebook to an order.
#[derive(Debug, Error)]
pub enum ItemError {
    #[error("customer {0} not found")]
    UnknownCustomer(CustomerId),
    #[error("ebook '{0}' is not in the catalog")]
    EbookNotFound(String),
    #[error("order {0} belongs to customer {1}, not {2}")]
    CustomerMismatch(OrderId, CustomerId, CustomerId),
}

/// Error while invoicing and paying an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("order {0} not found")]
    OrderNotFound(OrderId),
    #[error("order {0} belongs to customer {1}, not {2}")]
    CustomerMismatch(OrderId, CustomerId, CustomerId),
    #[error("invalid payment: {0}")]
    InvalidPayment(#[from] ValidationError),
}
