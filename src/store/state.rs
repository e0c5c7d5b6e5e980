use crate::Amount;
use crate::invoice::Invoice;
use crate::model::{CustomerId, OrderId};
use crate::order::Order;
use crate::payment::{Payment, PaymentStatus};

/// An order still accepting items, tagged with the customer who opened it.
#[derive(Debug)]
pub struct OpenOrder {
    pub customer: CustomerId,
    pub order: Order,
}

/// An issued invoice together with the payment made against it.
#[derive(Debug, Clone)]
pub struct Receipt {
    pub customer: CustomerId,
    pub order: OrderId,
    pub invoice: Invoice,
    pub payment: Payment,
}

impl Receipt {
    pub fn status(&self) -> PaymentStatus {
        self.payment.status()
    }

    /// How much the payment exceeds the invoice total; negative when short.
    pub fn change(&self) -> Amount {
        self.payment.amount_paid() - self.invoice.total()
    }

    pub fn is_settled(&self) -> bool {
        self.status() == PaymentStatus::Completed
    }
}
