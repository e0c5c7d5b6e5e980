//! Core domain types for the storefront.

use chrono::NaiveDate;
use thiserror::Error;

use crate::Amount;

/// Customer identifier.
pub type CustomerId = u32;

/// Order identifier.
pub type OrderId = u32;

/// Rejected field values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("price of '{title}' must not be negative, got {price}")]
    NegativePrice { title: String, price: Amount },
    #[error("price of '{title}' exceeds {max}, got {price}", max = Amount::MAX)]
    PriceTooLarge { title: String, price: Amount },
    #[error("amount must not be negative, got {0}")]
    NegativeAmount(Amount),
    #[error("amount exceeds {max}, got {0}", max = Amount::MAX)]
    AmountTooLarge(Amount),
    #[error("'{0}' is not a valid amount")]
    InvalidNumber(String),
}

/// An e-book listed in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ebook {
    title: String,
    author: String,
    publication_date: NaiveDate,
    genre: String,
    price: Amount,
}

impl Ebook {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        publication_date: NaiveDate,
        genre: impl Into<String>,
        price: Amount,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        validate_title(&title)?;
        validate_price(&title, price)?;
        Ok(Self {
            title,
            author: author.into(),
            publication_date,
            genre: genre.into(),
            price,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn publication_date(&self) -> NaiveDate {
        self.publication_date
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn price(&self) -> Amount {
        self.price
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), ValidationError> {
        let title = title.into();
        validate_title(&title)?;
        self.title = title;
        Ok(())
    }

    pub fn set_author(&mut self, author: impl Into<String>) {
        self.author = author.into();
    }

    pub fn set_publication_date(&mut self, date: NaiveDate) {
        self.publication_date = date;
    }

    pub fn set_genre(&mut self, genre: impl Into<String>) {
        self.genre = genre.into();
    }

    pub fn set_price(&mut self, price: Amount) -> Result<(), ValidationError> {
        validate_price(&self.title, price)?;
        self.price = price;
        Ok(())
    }
}

impl std::fmt::Display for Ebook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} by {}, Genre: {}, Price: {}",
            self.title, self.author, self.genre, self.price
        )
    }
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(())
}

fn validate_price(title: &str, price: Amount) -> Result<(), ValidationError> {
    if price.is_negative() {
        return Err(ValidationError::NegativePrice {
            title: title.to_string(),
            price,
        });
    }
    if price > Amount::MAX {
        return Err(ValidationError::PriceTooLarge {
            title: title.to_string(),
            price,
        });
    }
    Ok(())
}

/// A store customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub name: String,
    pub contact_info: String,
    pub is_loyalty_member: bool,
}

impl Customer {
    pub fn new(name: impl Into<String>, contact_info: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contact_info: contact_info.into(),
            is_loyalty_member: false,
        }
    }

    pub fn loyalty_member(name: impl Into<String>, contact_info: impl Into<String>) -> Self {
        Self {
            is_loyalty_member: true,
            ..Self::new(name, contact_info)
        }
    }

    pub fn set_loyalty_member(&mut self, status: bool) {
        self.is_loyalty_member = status;
    }
}

/// An event representing the possible inputs of the storefront.
#[derive(Debug, Clone)]
pub enum StoreEvent {
    /// Add a catalog ebook to an order, opening the order if needed.
    AddItem {
        customer: CustomerId,
        order: OrderId,
        title: String,
    },
    /// Invoice an order and settle it with a payment; a completed payment
    /// closes the order.
    Checkout {
        customer: CustomerId,
        order: OrderId,
        method: String,
        amount: Amount,
    },
}
