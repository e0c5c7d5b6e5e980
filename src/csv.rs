use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::Amount;
use crate::model::{Customer, CustomerId, Ebook, OrderId, StoreEvent, ValidationError};
use crate::store::Receipt;

/// Errors that can occur when reading or writing csv files
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("cannot open {path}: {source}")]
    Open { path: String, source: csv::Error },

    #[error("line {line}: failed to parse row: {source}")]
    Parse { line: usize, source: csv::Error },

    #[error("line {line}: unrecognized event type '{event_type}'")]
    UnrecognizedType { line: usize, event_type: String },

    #[error("line {line}: {event_type} missing {field}")]
    MissingField {
        line: usize,
        event_type: String,
        field: &'static str,
    },

    #[error("line {line}: {source}")]
    Invalid {
        line: usize,
        source: ValidationError,
    },

    #[error("failed to write receipts: {0}")]
    Write(#[from] csv::Error),
}

#[derive(Debug, Deserialize)]
struct EbookRow {
    title: String,
    author: String,
    published: NaiveDate,
    genre: String,
    price: f64,
}

#[derive(Debug, Deserialize)]
struct CustomerRow {
    customer: CustomerId,
    name: String,
    contact: String,
    loyalty: bool,
}

#[derive(Debug, Deserialize)]
struct EventRow {
    r#type: String,
    customer: CustomerId,
    order: OrderId,
    title: Option<String>,
    method: Option<String>,
    amount: Option<f64>,
}

#[derive(Debug, Serialize)]
struct ReceiptRow<'a> {
    invoice: String,
    customer: CustomerId,
    order: OrderId,
    items: usize,
    vat: String,
    total: String,
    paid: String,
    status: &'a str,
}

fn open(path: &Path) -> Result<csv::Reader<File>, CsvError> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| CsvError::Open {
            path: path.display().to_string(),
            source,
        })
}

/// Deserialize each row, tagging errors with their 1-indexed line (header is line 1)
fn rows<T: serde::de::DeserializeOwned>(
    reader: csv::Reader<File>,
) -> impl Iterator<Item = (usize, Result<T, CsvError>)> {
    reader
        .into_deserialize::<T>()
        .enumerate()
        .map(|(idx, result)| {
            let line = idx + 2;
            (line, result.map_err(|source| CsvError::Parse { line, source }))
        })
}

/// Read catalog ebooks: `title,author,published,genre,price`
pub fn read_catalog(
    path: impl AsRef<Path>,
) -> Result<impl Iterator<Item = Result<Ebook, CsvError>>, CsvError> {
    let reader = open(path.as_ref())?;
    Ok(rows::<EbookRow>(reader).map(|(line, row)| {
        let row = row?;
        let price = parse_amount(line, row.price)?;
        Ebook::new(row.title, row.author, row.published, row.genre, price)
            .map_err(|source| CsvError::Invalid { line, source })
    }))
}

/// Read customers: `customer,name,contact,loyalty`
pub fn read_customers(
    path: impl AsRef<Path>,
) -> Result<impl Iterator<Item = Result<(CustomerId, Customer), CsvError>>, CsvError> {
    let reader = open(path.as_ref())?;
    Ok(rows::<CustomerRow>(reader).map(|(_, row)| {
        let row = row?;
        let mut customer = Customer::new(row.name, row.contact);
        customer.set_loyalty_member(row.loyalty);
        Ok((row.customer, customer))
    }))
}

/// Read storefront events: `type,customer,order,title,method,amount`
pub fn read_events(
    path: impl AsRef<Path>,
) -> Result<impl Iterator<Item = Result<StoreEvent, CsvError>>, CsvError> {
    let reader = open(path.as_ref())?;
    Ok(rows::<EventRow>(reader).map(|(line, row)| {
        let row = row?;
        let missing = |field| CsvError::MissingField {
            line,
            event_type: row.r#type.clone(),
            field,
        };
        match row.r#type.as_str() {
            "item" => {
                let title = non_empty(row.title.clone()).ok_or_else(|| missing("title"))?;
                Ok(StoreEvent::AddItem {
                    customer: row.customer,
                    order: row.order,
                    title,
                })
            }
            "checkout" => {
                let method = non_empty(row.method.clone()).ok_or_else(|| missing("method"))?;
                let amount = row.amount.ok_or_else(|| missing("amount"))?;
                Ok(StoreEvent::Checkout {
                    customer: row.customer,
                    order: row.order,
                    method,
                    amount: parse_amount(line, amount)?,
                })
            }
            other => Err(CsvError::UnrecognizedType {
                line,
                event_type: other.to_string(),
            }),
        }
    }))
}

fn parse_amount(line: usize, value: f64) -> Result<Amount, CsvError> {
    Amount::try_from_float(value).ok_or_else(|| CsvError::Invalid {
        line,
        source: ValidationError::InvalidNumber(value.to_string()),
    })
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}

/// Write receipts in csv format: `invoice,customer,order,items,vat,total,paid,status`
pub fn write_receipts<'a>(
    writer: impl io::Write,
    receipts: impl IntoIterator<Item = &'a Receipt>,
) -> Result<(), CsvError> {
    let mut writer = csv::Writer::from_writer(writer);

    for receipt in receipts {
        let row = ReceiptRow {
            invoice: receipt.invoice.number().to_string(),
            customer: receipt.customer,
            order: receipt.order,
            items: receipt.invoice.items().len(),
            vat: receipt.invoice.vat().to_string(),
            total: receipt.invoice.total().to_string(),
            paid: receipt.payment.amount_paid().to_string(),
            status: receipt.status().as_str(),
        };
        writer.serialize(&row)?;
    }

    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}
