use chrono::NaiveDate;

use crate::amount::Amount;
use crate::invoice::{Invoice, InvoiceNumber};
use crate::model::{Customer, Ebook};
use crate::pricing::PricingPolicy;

/// Ebooks bought by one customer.
///
/// Orders stay open after invoicing: adding items and invoicing again yields
/// a new, independently priced invoice.
#[derive(Debug, Clone)]
pub struct Order {
    customer: Customer,
    order_date: NaiveDate,
    items: Vec<Ebook>,
    total_amount: Amount,
}

impl Order {
    pub fn new(customer: Customer, order_date: NaiveDate) -> Self {
        Self {
            customer,
            order_date,
            items: Vec::new(),
            total_amount: Amount::ZERO,
        }
    }

    pub fn add_item(&mut self, ebook: Ebook) {
        self.total_amount += ebook.price();
        self.items.push(ebook);
    }

    pub fn generate_invoice(&self, number: InvoiceNumber) -> Invoice {
        self.generate_invoice_with(number, &PricingPolicy::default())
    }

    pub fn generate_invoice_with(&self, number: InvoiceNumber, policy: &PricingPolicy) -> Invoice {
        Invoice::from_order(self, number, policy)
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn customer_mut(&mut self) -> &mut Customer {
        &mut self.customer
    }

    pub fn order_date(&self) -> NaiveDate {
        self.order_date
    }

    pub fn items(&self) -> &[Ebook] {
        &self.items
    }

    /// Sum of item prices, before discount and VAT.
    pub fn total_amount(&self) -> Amount {
        self.total_amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::InvoiceSequence;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, 7).unwrap()
    }

    fn ebook(title: &str, price: i64) -> Ebook {
        Ebook::new(title, "Author C", date(), "Security", Amount::from_units(price)).unwrap()
    }

    #[test]
    fn new_order_is_empty() {
        let order = Order::new(Customer::new("Carol", "c"), date());
        assert!(order.items().is_empty());
        assert_eq!(order.total_amount(), Amount::ZERO);
        assert_eq!(order.order_date(), date());
        assert_eq!(order.customer().name, "Carol");
    }

    #[test]
    fn add_item_accumulates_total() {
        let mut order = Order::new(Customer::new("Carol", "c"), date());
        order.add_item(ebook("A", 70));
        order.add_item(ebook("B", 50));

        assert_eq!(order.items().len(), 2);
        assert_eq!(order.total_amount(), Amount::from_units(120));
    }

    #[test]
    fn oversized_prices_never_reach_the_order() {
        let pricey = Ebook::new("Pricey", "A", date(), "G", Amount::from_float(9.0e14));
        assert!(pricey.is_err());

        // the largest accepted price still sums and invoices without overflow
        let mut order = Order::new(Customer::new("Carol", "c"), date());
        for _ in 0..2 {
            order.add_item(Ebook::new("Max", "A", date(), "G", Amount::MAX).unwrap());
        }
        assert_eq!(order.total_amount(), Amount::MAX + Amount::MAX);
        let invoice = order.generate_invoice(InvoiceSequence::new().next_number());
        assert!(invoice.total() > order.total_amount());
    }

    #[test]
    fn reinvoicing_produces_independent_invoices() {
        let mut sequence = InvoiceSequence::new();
        let mut order = Order::new(Customer::loyalty_member("Carol", "c"), date());
        order.add_item(ebook("Cybersecurity", 120));

        let first = order.generate_invoice(sequence.next_number());
        order.add_item(ebook("Networks", 30));
        let second = order.generate_invoice(sequence.next_number());

        assert_ne!(first.number(), second.number());
        assert_eq!(first.total(), Amount::from_float(116.64));
        assert_eq!(first.items().len(), 1);
        // 150 - 15 = 135, + 10.80 VAT
        assert_eq!(second.total(), Amount::from_float(145.8));
        assert_eq!(second.items().len(), 2);
    }

    #[test]
    fn invoice_reads_loyalty_at_invoice_time() {
        let mut sequence = InvoiceSequence::new();
        let mut order = Order::new(Customer::new("Carol", "c"), date());
        order.add_item(ebook("Cybersecurity", 120));

        let before = order.generate_invoice(sequence.next_number());
        order.customer_mut().set_loyalty_member(true);
        let after = order.generate_invoice(sequence.next_number());

        assert_eq!(before.total(), Amount::from_float(129.6));
        assert_eq!(after.total(), Amount::from_float(116.64));
    }
}
