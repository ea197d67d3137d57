//! Monthly revenue.

use serde::{Deserialize, Serialize};

/// Revenue for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revenue {
    /// Short month code, unique per row (e.g. `Jan`).
    pub month: String,
    /// Whole-dollar revenue for the month.
    pub revenue: i32,
}

impl Revenue {
    /// Longest month code the `revenue.month` column accepts.
    pub const MAX_MONTH_LEN: usize = 4;
}
