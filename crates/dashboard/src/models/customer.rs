//! Customer domain type.

use serde::{Deserialize, Serialize};

use invoice_dashboard_core::CustomerId;

/// A customer invoices are billed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    /// Path or URL of the customer's avatar.
    pub image_url: String,
}
