//! Domain types for the dashboard.
//!
//! These types represent validated domain objects separate from form input.

pub mod customer;
pub mod invoice;
pub mod revenue;
pub mod user;

pub use customer::Customer;
pub use invoice::{CreateInvoiceForm, FieldError, FieldErrors, InvoiceField, InvoiceFixture, InvoiceSummary, NewInvoice};
pub use revenue::Revenue;
pub use user::{NewUser, UserFixture};
