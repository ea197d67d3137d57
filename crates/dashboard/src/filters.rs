//! Custom Askama template filters.

use std::fmt::Display;

/// CSS class for an invoice status badge.
///
/// Usage in templates: `{{ invoice.status|status_class }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn status_class(status: impl Display, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(match status.to_string().as_str() {
        "paid" => "badge badge-paid",
        "pending" => "badge badge-pending",
        _ => "badge",
    })
}
