//! Invoice domain types and intake form validation.
//!
//! Form input is untyped text. [`CreateInvoiceForm::validate`] turns it into a
//! [`NewInvoice`] or into the full list of field problems; it never panics and
//! never stops at the first bad field.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use invoice_dashboard_core::{AmountError, Cents, CustomerId, InvoiceId, InvoiceStatus};

/// Raw intake form as submitted by the browser.
///
/// Every field is optional at this stage so that a missing field is reported
/// as a validation message rather than an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CreateInvoiceForm {
    #[serde(rename = "customerId", default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// A validated invoice ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvoice {
    pub id: InvoiceId,
    pub customer_id: CustomerId,
    pub amount: Cents,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

/// An invoice as listed in the fixture data.
///
/// Fixture invoices carry no ID; the database generates one on insert.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InvoiceFixture {
    pub customer_id: CustomerId,
    pub amount: Cents,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

/// Form fields of the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvoiceField {
    CustomerId,
    Amount,
    Status,
}

impl InvoiceField {
    /// Name of the field in the submitted form.
    #[must_use]
    pub const fn form_name(&self) -> &'static str {
        match self {
            Self::CustomerId => "customerId",
            Self::Amount => "amount",
            Self::Status => "status",
        }
    }
}

/// A single problem with one intake form field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("Please select a customer.")]
    MissingCustomer,
    #[error("{0:?} is not a valid customer id.")]
    InvalidCustomer(String),
    #[error("Please enter an amount.")]
    MissingAmount,
    #[error("{0:?} is not a number.")]
    InvalidAmount(String),
    #[error("Please enter an amount of $0.00 or more.")]
    NegativeAmount,
    #[error("Please enter an amount of at most {max}.")]
    AmountTooLarge { max: String },
    #[error("Please select an invoice status.")]
    MissingStatus,
    #[error("{0:?} is not a valid status (pending or paid).")]
    InvalidStatus(String),
}

impl FieldError {
    /// The form field this error belongs to.
    #[must_use]
    pub const fn field(&self) -> InvoiceField {
        match self {
            Self::MissingCustomer | Self::InvalidCustomer(_) => InvoiceField::CustomerId,
            Self::MissingAmount
            | Self::InvalidAmount(_)
            | Self::NegativeAmount
            | Self::AmountTooLarge { .. } => InvoiceField::Amount,
            Self::MissingStatus | Self::InvalidStatus(_) => InvoiceField::Status,
        }
    }
}

impl From<AmountError> for FieldError {
    fn from(err: AmountError) -> Self {
        match err {
            AmountError::Negative => Self::NegativeAmount,
            AmountError::TooLarge { max } => Self::AmountTooLarge { max },
        }
    }
}

/// Every problem found in one submission, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    /// The error for `field`, if any.
    #[must_use]
    pub fn get(&self, field: InvoiceField) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field() == field)
    }

    /// User-facing message for `field`, if any.
    #[must_use]
    pub fn message(&self, field: InvoiceField) -> Option<String> {
        self.get(field).map(ToString::to_string)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {err}", err.field().form_name())?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

impl CreateInvoiceForm {
    /// Validate and coerce the form into a [`NewInvoice`] dated `today`.
    ///
    /// A fresh invoice ID is generated on success.
    ///
    /// # Errors
    ///
    /// Returns every field problem found.
    pub fn validate(&self, today: NaiveDate) -> Result<NewInvoice, FieldErrors> {
        let mut errors = Vec::new();

        let customer_id = parse_customer_id(self.customer_id.as_deref())
            .map_err(|e| errors.push(e))
            .ok();
        let amount = parse_amount(self.amount.as_deref())
            .map_err(|e| errors.push(e))
            .ok();
        let status = parse_status(self.status.as_deref())
            .map_err(|e| errors.push(e))
            .ok();

        match (customer_id, amount, status) {
            (Some(customer_id), Some(amount), Some(status)) => Ok(NewInvoice {
                id: InvoiceId::generate(),
                customer_id,
                amount,
                status,
                date: today,
            }),
            _ => Err(FieldErrors(errors)),
        }
    }
}

fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_customer_id(raw: Option<&str>) -> Result<CustomerId, FieldError> {
    let raw = present(raw).ok_or(FieldError::MissingCustomer)?;
    raw.parse()
        .map_err(|_| FieldError::InvalidCustomer(raw.to_owned()))
}

/// Coerce decimal text (plain or scientific notation) into cents.
fn parse_amount(raw: Option<&str>) -> Result<Cents, FieldError> {
    let raw = present(raw).ok_or(FieldError::MissingAmount)?;
    let amount = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| FieldError::InvalidAmount(raw.to_owned()))?;
    Ok(Cents::from_decimal(amount)?)
}

fn parse_status(raw: Option<&str>) -> Result<InvoiceStatus, FieldError> {
    let raw = raw.filter(|s| !s.is_empty()).ok_or(FieldError::MissingStatus)?;
    raw.parse()
        .map_err(|_| FieldError::InvalidStatus(raw.to_owned()))
}

/// One row of the invoices listing.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct InvoiceSummary {
    pub id: InvoiceId,
    pub customer_id: CustomerId,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub amount: Cents,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}
