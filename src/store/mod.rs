//! Storefront engine.
//!
//! The storefront owns the catalog, the registered customers and every open
//! order. It applies `StoreEvent`s one at a time: adding catalog ebooks to
//! orders, and checking orders out into invoices settled by a payment.
//! Also supports async stream of events.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use chrono::{NaiveDate, Utc};
use tokio_stream::{Stream, StreamExt};
use tracing::info;

use crate::Amount;
use crate::catalog::Catalog;
use crate::invoice::InvoiceSequence;
use crate::model::{Customer, CustomerId, OrderId, StoreEvent};
use crate::order::Order;
use crate::payment::{Payment, PaymentStatus};
use crate::pricing::PricingPolicy;

mod state;
pub use state::{OpenOrder, Receipt};

mod error;
pub use error::{CheckoutError, ItemError, StoreError};

/// The storefront engine.
pub struct Storefront {
    catalog: Catalog,
    customers: HashMap<CustomerId, Customer>,
    orders: HashMap<OrderId, OpenOrder>,
    invoices: InvoiceSequence,
    receipts: Vec<Receipt>,
    policy: PricingPolicy,
    order_date: NaiveDate,
}

/// Public API
impl Storefront {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_policy(catalog, PricingPolicy::default())
    }

    pub fn with_policy(catalog: Catalog, policy: PricingPolicy) -> Self {
        Self {
            catalog,
            customers: HashMap::new(),
            orders: HashMap::new(),
            invoices: InvoiceSequence::new(),
            receipts: Vec::new(),
            policy,
            order_date: Utc::now().date_naive(),
        }
    }

    /// Date stamped on orders opened from now on.
    pub fn set_order_date(&mut self, date: NaiveDate) {
        self.order_date = date;
    }

    pub fn register_customer(
        &mut self,
        id: CustomerId,
        customer: Customer,
    ) -> Result<(), StoreError> {
        match self.customers.entry(id) {
            Entry::Occupied(_) => Err(StoreError::DuplicateCustomer(id)),
            Entry::Vacant(entry) => {
                entry.insert(customer);
                Ok(())
            }
        }
    }

    /// Run the storefront with the given event stream
    pub async fn run(&mut self, mut stream: impl Stream<Item = StoreEvent> + Unpin) {
        while let Some(event) = stream.next().await {
            // a rejected event must not stop the run; it is logged by `apply`
            let _ = self.apply(event);
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    pub fn customer(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.get(&id)
    }

    pub fn customer_mut(&mut self, id: CustomerId) -> Option<&mut Customer> {
        self.customers.get_mut(&id)
    }

    /// An order that has not been successfully checked out yet.
    pub fn open_order(&self, id: OrderId) -> Option<&Order> {
        self.orders.get(&id).map(|open| &open.order)
    }

    /// Every checkout attempted so far, in order.
    pub fn receipts(&self) -> &[Receipt] {
        &self.receipts
    }

    /// Apply a single event on top of the current storefront state
    pub fn apply(&mut self, event: StoreEvent) -> Result<(), StoreError> {
        match event {
            StoreEvent::AddItem {
                customer,
                order,
                title,
            } => {
                let result = self.add_item(customer, order, &title);
                Self::log_result("item", customer, order, None, &result);
                result?;
            }
            StoreEvent::Checkout {
                customer,
                order,
                method,
                amount,
            } => {
                let result = self.checkout(customer, order, method, amount);
                Self::log_result("checkout", customer, order, Some(amount), &result);
                result?;
            }
        }
        Ok(())
    }
}

/// Private API
impl Storefront {
    /// Small helper to log `apply` results
    fn log_result<T, E: std::fmt::Display>(
        event: &str,
        customer: CustomerId,
        order: OrderId,
        amount: Option<Amount>,
        result: &Result<T, E>,
    ) {
        match (result, amount) {
            (Ok(_), Some(amt)) => {
                info!(customer, order, amount = %amt, "{event} applied");
            }
            (Ok(_), None) => {
                info!(customer, order, "{event} applied");
            }
            (Err(e), Some(amt)) => {
                info!(customer, order, amount = %amt, reason = %e, "{event} skipped");
            }
            (Err(e), None) => {
                info!(customer, order, reason = %e, "{event} skipped");
            }
        }
    }

    /// Apply a `StoreEvent::AddItem`:
    /// - Ensure the customer is registered
    /// - Look the ebook up in the catalog
    /// - Open the order for this customer, or check an open one is theirs
    /// - Add a copy of the ebook to the order
    fn add_item(
        &mut self,
        customer: CustomerId,
        order: OrderId,
        title: &str,
    ) -> Result<(), ItemError> {
        let buyer = self
            .customers
            .get(&customer)
            .ok_or(ItemError::UnknownCustomer(customer))?;

        let ebook = self
            .catalog
            .find(title)
            .ok_or_else(|| ItemError::EbookNotFound(title.to_string()))?
            .clone();

        let open = match self.orders.entry(order) {
            Entry::Occupied(entry) => {
                let open = entry.into_mut();
                if open.customer != customer {
                    return Err(ItemError::CustomerMismatch(order, open.customer, customer));
                }
                open
            }
            Entry::Vacant(entry) => entry.insert(OpenOrder {
                customer,
                order: Order::new(buyer.clone(), self.order_date),
            }),
        };

        open.order.add_item(ebook);

        Ok(())
    }

    /// Apply a `StoreEvent::Checkout`:
    /// - Find the open order and validate ownership
    /// - Validate the payment
    /// - Issue an invoice with the customer's current loyalty status
    /// - Process the payment against the invoice total
    /// - Close the order once the payment completes; a failed payment
    ///   leaves it open for another attempt
    fn checkout(
        &mut self,
        customer: CustomerId,
        order: OrderId,
        method: String,
        amount: Amount,
    ) -> Result<PaymentStatus, CheckoutError> {
        let open = self
            .orders
            .get_mut(&order)
            .ok_or(CheckoutError::OrderNotFound(order))?;

        if open.customer != customer {
            return Err(CheckoutError::CustomerMismatch(
                order,
                open.customer,
                customer,
            ));
        }

        let mut payment = Payment::new(method, amount)?;

        // loyalty may have changed since the order was opened
        if let Some(current) = self.customers.get(&customer) {
            *open.order.customer_mut() = current.clone();
        }

        let invoice = open
            .order
            .generate_invoice_with(self.invoices.next_number(), &self.policy);
        let status = payment.process(invoice.total());

        info!(
            customer,
            order,
            invoice = %invoice.number(),
            total = %invoice.total(),
            status = %status,
            "invoice issued"
        );

        if status == PaymentStatus::Completed {
            self.orders.remove(&order);
        }

        self.receipts.push(Receipt {
            customer,
            order,
            invoice,
            payment,
        });

        Ok(status)
    }
}
