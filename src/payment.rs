//! Settling invoices.

use crate::Amount;
use crate::model::ValidationError;

/// Outcome of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentStatus {
    /// Not processed yet.
    #[default]
    Pending,
    Completed,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Completed when the amount paid covers the amount required, failed otherwise.
pub fn process(amount_paid: Amount, total_required: Amount) -> PaymentStatus {
    if amount_paid >= total_required {
        PaymentStatus::Completed
    } else {
        PaymentStatus::Failed
    }
}

/// A payment tendered with some method, e.g. "Credit Card".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    method: String,
    amount_paid: Amount,
    status: PaymentStatus,
}

impl Payment {
    pub fn new(method: impl Into<String>, amount_paid: Amount) -> Result<Self, ValidationError> {
        if amount_paid.is_negative() {
            return Err(ValidationError::NegativeAmount(amount_paid));
        }
        if amount_paid > Amount::MAX {
            return Err(ValidationError::AmountTooLarge(amount_paid));
        }
        Ok(Self {
            method: method.into(),
            amount_paid,
            status: PaymentStatus::Pending,
        })
    }

    /// Settle against `total_required`. Reprocessing overwrites the status.
    pub fn process(&mut self, total_required: Amount) -> PaymentStatus {
        self.status = process(self.amount_paid, total_required);
        self.status
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn amount_paid(&self) -> Amount {
        self.amount_paid
    }

    pub fn status(&self) -> PaymentStatus {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_amount_completes() {
        assert_eq!(
            process(Amount::from_units(100), Amount::from_units(100)),
            PaymentStatus::Completed
        );
    }

    #[test]
    fn overpayment_completes() {
        assert_eq!(
            process(Amount::from_float(130.0), Amount::from_float(129.6)),
            PaymentStatus::Completed
        );
    }

    #[test]
    fn underpayment_fails() {
        assert_eq!(
            process(Amount::from_float(99.99), Amount::from_units(100)),
            PaymentStatus::Failed
        );
    }

    #[test]
    fn new_payment_is_pending() {
        let payment = Payment::new("Credit Card", Amount::from_units(100)).unwrap();
        assert_eq!(payment.status(), PaymentStatus::Pending);
        assert_eq!(payment.method(), "Credit Card");
        assert_eq!(payment.amount_paid(), Amount::from_units(100));
    }

    #[test]
    fn process_records_status() {
        let mut payment = Payment::new("Credit Card", Amount::from_units(100)).unwrap();
        assert_eq!(payment.process(Amount::from_units(100)), PaymentStatus::Completed);
        assert_eq!(payment.status(), PaymentStatus::Completed);

        assert_eq!(payment.process(Amount::from_units(101)), PaymentStatus::Failed);
        assert_eq!(payment.status(), PaymentStatus::Failed);
    }

    #[test]
    fn negative_payment_is_rejected() {
        let result = Payment::new("Cash", Amount::from_units(-1));
        assert_eq!(
            result,
            Err(ValidationError::NegativeAmount(Amount::from_units(-1)))
        );
    }

    #[test]
    fn oversized_payment_is_rejected() {
        let too_large = Amount::MAX + Amount::from_scaled(1);
        assert_eq!(
            Payment::new("Cash", too_large),
            Err(ValidationError::AmountTooLarge(too_large))
        );
    }

    #[test]
    fn status_display() {
        assert_eq!(PaymentStatus::Completed.to_string(), "completed");
        assert_eq!(PaymentStatus::default(), PaymentStatus::Pending);
    }
}
