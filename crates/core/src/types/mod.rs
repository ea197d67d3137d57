//! Core types for the invoice dashboard.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod money;
pub mod status;

pub use id::*;
pub use money::{AmountError, Cents};
pub use status::{InvoiceStatus, InvoiceStatusError};
