//! Invoice listing and intake route handlers.

use askama::Template;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use tracing::{info, instrument, warn};

use invoice_dashboard_core::InvoiceStatus;

use crate::db::InvoiceRepository;
use crate::error::AppError;
use crate::filters;
use crate::models::{CreateInvoiceForm, Customer, FieldErrors, InvoiceField, InvoiceSummary};
use crate::state::AppState;

use super::{INVOICES_PATH, render};

// =============================================================================
// View Types
// =============================================================================

/// Invoice row for templates.
#[derive(Debug, Clone)]
pub struct InvoiceRow {
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub amount: String,
    pub status: InvoiceStatus,
    pub date: String,
}

impl From<&InvoiceSummary> for InvoiceRow {
    fn from(invoice: &InvoiceSummary) -> Self {
        Self {
            name: invoice.name.clone(),
            email: invoice.email.clone(),
            image_url: invoice.image_url.clone(),
            amount: invoice.amount.to_string(),
            status: invoice.status,
            date: invoice.date.format("%b %-d, %Y").to_string(),
        }
    }
}

/// Customer choice in the intake form.
#[derive(Debug, Clone)]
pub struct CustomerOption {
    pub id: String,
    pub name: String,
    pub selected: bool,
}

// =============================================================================
// Templates
// =============================================================================

/// Invoices listing page.
#[derive(Template)]
#[template(path = "invoices/index.html")]
pub struct InvoicesIndexTemplate {
    pub current_path: String,
    pub invoices: Vec<InvoiceRow>,
}

/// Invoice intake form.
#[derive(Template)]
#[template(path = "invoices/create.html")]
pub struct InvoiceCreateTemplate {
    pub current_path: String,
    pub customers: Vec<CustomerOption>,
    pub has_selection: bool,
    pub statuses: [InvoiceStatus; 2],
    pub amount: String,
    pub status: String,
    pub customer_error: Option<String>,
    pub amount_error: Option<String>,
    pub status_error: Option<String>,
}

impl InvoiceCreateTemplate {
    /// Build the form, echoing back `form` and its `errors` if re-rendering.
    #[must_use]
    pub fn new(customers: &[Customer], form: &CreateInvoiceForm, errors: &FieldErrors) -> Self {
        let selected = form.customer_id.as_deref().map(str::trim).unwrap_or_default();
        let customers = customers
            .iter()
            .map(|c| {
                let id = c.id.to_string();
                CustomerOption {
                    selected: !selected.is_empty() && id.eq_ignore_ascii_case(selected),
                    id,
                    name: c.name.clone(),
                }
            })
            .collect::<Vec<_>>();

        Self {
            current_path: INVOICES_PATH.to_string(),
            has_selection: customers.iter().any(|c| c.selected),
            customers,
            statuses: InvoiceStatus::ALL,
            amount: form.amount.clone().unwrap_or_default(),
            status: form.status.clone().unwrap_or_default(),
            customer_error: errors.message(InvoiceField::CustomerId),
            amount_error: errors.message(InvoiceField::Amount),
            status_error: errors.message(InvoiceField::Status),
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Invoices listing, newest first.
#[instrument(skip_all)]
pub async fn index(State(state): State<AppState>) -> Result<Response, AppError> {
    let invoices = state.cache().invoices(state.pool()).await?;

    let template = InvoicesIndexTemplate {
        current_path: INVOICES_PATH.to_string(),
        invoices: invoices.iter().map(InvoiceRow::from).collect(),
    };
    Ok(render(&template).into_response())
}

/// Empty intake form.
#[instrument(skip_all)]
pub async fn new(State(state): State<AppState>) -> Result<Response, AppError> {
    let customers = state.cache().customers(state.pool()).await?;

    let template = InvoiceCreateTemplate::new(
        &customers,
        &CreateInvoiceForm::default(),
        &FieldErrors::default(),
    );
    Ok(render(&template).into_response())
}

/// Validate and store one invoice, then redirect to the listing.
///
/// Invalid input re-renders the form with `422 Unprocessable Entity` and
/// never reaches the invoices table.
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<CreateInvoiceForm>,
) -> Result<Response, AppError> {
    let today = Utc::now().date_naive();

    let errors = match form.validate(today) {
        Ok(invoice) => {
            InvoiceRepository::new(state.pool()).create(&invoice).await?;
            state.cache().invalidate_invoices().await;
            return Ok(Redirect::to(INVOICES_PATH).into_response());
        }
        Err(errors) => errors,
    };

    info!(%errors, "Invoice rejected");

    let customers = match state.cache().customers(state.pool()).await {
        Ok(customers) => customers.to_vec(),
        Err(e) => {
            warn!(?e, "Failed to fetch customers");
            Vec::new()
        }
    };

    let template = InvoiceCreateTemplate::new(&customers, &form, &errors);
    Ok((StatusCode::UNPROCESSABLE_ENTITY, render(&template)).into_response())
}
