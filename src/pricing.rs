//! Discount and VAT rates applied by carts and invoices.

use crate::amount::Rate;
use crate::model::Customer;

/// The rates used when pricing carts and invoices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingPolicy {
    /// Taken off for loyalty members, in carts and on invoices.
    pub loyalty_discount: Rate,
    /// Cart-only discount once the cart holds `bulk_threshold` items.
    pub bulk_discount: Rate,
    pub bulk_threshold: usize,
    /// VAT charged on the discounted invoice total.
    pub vat: Rate,
}

impl PricingPolicy {
    pub const STANDARD: PricingPolicy = PricingPolicy {
        loyalty_discount: Rate::from_bps(1000),
        bulk_discount: Rate::from_bps(2000),
        bulk_threshold: 5,
        vat: Rate::from_bps(800),
    };

    pub fn loyalty_rate(&self, customer: &Customer) -> Rate {
        if customer.is_loyalty_member {
            self.loyalty_discount
        } else {
            Rate::ZERO
        }
    }

    /// Loyalty plus bulk discount for a cart of `item_count` items.
    pub fn cart_rate(&self, customer: &Customer, item_count: usize) -> Rate {
        let bulk = if item_count >= self.bulk_threshold {
            self.bulk_discount
        } else {
            Rate::ZERO
        };
        self.loyalty_rate(customer) + bulk
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self::STANDARD
    }
}
