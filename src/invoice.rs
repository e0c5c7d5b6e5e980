//! Invoices: the priced, immutable snapshot of an order.

use std::fmt;

use serde::Serialize;

use crate::amount::Amount;
use crate::order::Order;
use crate::pricing::PricingPolicy;

/// Invoice identifier, displayed as `INV-000042`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InvoiceNumber(u64);

impl InvoiceNumber {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for InvoiceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "INV-{:06}", self.0)
    }
}

/// Issues strictly increasing invoice numbers, starting at 1.
#[derive(Debug, Default)]
pub struct InvoiceSequence {
    last: u64,
}

impl InvoiceSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_number(&mut self) -> InvoiceNumber {
        self.last += 1;
        InvoiceNumber(self.last)
    }
}

/// A priced invoice.
///
/// Pricing, given the order total `T`:
/// - `discount = T * loyalty rate` (loyalty members only)
/// - `vat = (T - discount) * vat rate`
/// - `total = T - discount + vat`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invoice {
    number: InvoiceNumber,
    items: Vec<(String, Amount)>,
    subtotal: Amount,
    discount: Amount,
    vat: Amount,
    total: Amount,
}

impl Invoice {
    /// Price `order` as it stands now.
    pub fn from_order(order: &Order, number: InvoiceNumber, policy: &PricingPolicy) -> Self {
        let subtotal = order.total_amount();
        let discount = subtotal.apply(policy.loyalty_rate(order.customer()));
        let discounted = subtotal - discount;
        let vat = discounted.apply(policy.vat);
        let items = order
            .items()
            .iter()
            .map(|ebook| (ebook.title().to_string(), ebook.price()))
            .collect();

        Self {
            number,
            items,
            subtotal,
            discount,
            vat,
            total: discounted + vat,
        }
    }

    pub fn number(&self) -> InvoiceNumber {
        self.number
    }

    /// `(title, price)` per ordered ebook, in order.
    pub fn items(&self) -> &[(String, Amount)] {
        &self.items
    }

    pub fn subtotal(&self) -> Amount {
        self.subtotal
    }

    pub fn discount(&self) -> Amount {
        self.discount
    }

    pub fn discounted_total(&self) -> Amount {
        self.subtotal - self.discount
    }

    pub fn vat(&self) -> Amount {
        self.vat
    }

    /// Amount due: discounted total plus VAT.
    pub fn total(&self) -> Amount {
        self.total
    }

    pub fn details(&self) -> InvoiceDetails<'_> {
        InvoiceDetails {
            invoice_number: self.number.to_string(),
            items: &self.items,
            vat: self.vat,
            total: self.total,
        }
    }
}

/// Externally visible shape of an invoice.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDetails<'a> {
    pub invoice_number: String,
    pub items: &'a [(String, Amount)],
    pub vat: Amount,
    pub total: Amount,
}
