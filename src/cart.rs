//! Shopping cart with loyalty and bulk discounts.

use crate::amount::{Amount, Rate};
use crate::model::{Customer, Ebook};
use crate::pricing::PricingPolicy;

/// Items a customer intends to buy.
///
/// The subtotal is kept in step with the items. A discount is stored as a
/// rate and the discounted total derived from the subtotal, so applying the
/// same discount twice has no further effect. Any change to the items drops
/// the applied discount.
#[derive(Debug, Default, Clone)]
pub struct Cart {
    items: Vec<Ebook>,
    subtotal: Amount,
    discount: Option<Rate>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&mut self, ebook: Ebook) {
        self.subtotal += ebook.price();
        self.items.push(ebook);
        self.discount = None;
    }

    /// Remove the first item with this title.
    pub fn remove_item(&mut self, title: &str) -> Option<Ebook> {
        let idx = self.items.iter().position(|ebook| ebook.title() == title)?;
        let ebook = self.items.remove(idx);
        self.subtotal -= ebook.price();
        self.discount = None;
        Some(ebook)
    }

    pub fn apply_discount(&mut self, customer: &Customer) -> Amount {
        self.apply_discount_with(customer, &PricingPolicy::default())
    }

    /// Record the discount `customer` earns on the current items and return
    /// the discounted total.
    pub fn apply_discount_with(&mut self, customer: &Customer, policy: &PricingPolicy) -> Amount {
        self.discount = Some(policy.cart_rate(customer, self.items.len()));
        self.total()
    }

    pub fn items(&self) -> &[Ebook] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of item prices before any discount.
    pub fn subtotal(&self) -> Amount {
        self.subtotal
    }

    pub fn discount(&self) -> Option<Rate> {
        self.discount
    }

    /// Subtotal less the applied discount, if any.
    pub fn total(&self) -> Amount {
        match self.discount {
            Some(rate) => self.subtotal.discounted_by(rate),
            None => self.subtotal,
        }
    }
}
