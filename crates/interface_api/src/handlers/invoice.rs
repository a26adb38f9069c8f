//! Invoice handlers
//!
//! Creation assigns `code` and `created_at` on the server; the filtered
//! listing runs the same predicates twice, once windowed for the page and
//! once unbounded for the statistics, so the report always describes the
//! full filtered set.

use axum::{
    extract::{Extension, Query, State},
    Json,
};
use chrono::Utc;
use tracing::info;
use validator::Validate;

use core_kernel::{InvoiceId, Page, DEFAULT_PAGE_SIZE};
use domain_invoicing::{aggregate, Invoice, InvoiceFilter, LineItem};

use crate::auth::Claims;
use crate::dto::invoice::{
    CreateInvoiceRequest, FilterInvoicesResponse, FilterQuery, InvoiceResponse,
    UpdateInvoiceRequest,
};
use crate::dto::{DeleteResponse, IdListQuery};
use crate::error::ApiError;
use crate::AppState;

/// Creates an invoice with a server-assigned code and timestamp
pub async fn create_invoice(
    State(state): State<AppState>,
    Json(request): Json<CreateInvoiceRequest>,
) -> Result<Json<InvoiceResponse>, ApiError> {
    request.validate()?;

    let items: Vec<LineItem> = request.items.into_iter().map(LineItem::from).collect();

    let now = Utc::now();
    let code = state.code_gen.next_code(now).await?;
    let invoice = Invoice::create(code, now, items, request.note)?;

    state.invoices.insert(&invoice).await?;

    info!(invoice_id = %invoice.id, code = %invoice.code, "Invoice created");

    Ok(Json(InvoiceResponse::from(invoice)))
}

/// Replaces an invoice's items and note; `code` and `created_at` stay put
pub async fn update_invoice(
    State(state): State<AppState>,
    Json(request): Json<UpdateInvoiceRequest>,
) -> Result<Json<InvoiceResponse>, ApiError> {
    request.validate()?;

    let items: Vec<LineItem> = request.items.into_iter().map(LineItem::from).collect();
    domain_invoicing::validate_items(&items)?;

    state
        .invoices
        .replace_contents(request.id, &items, request.note.as_deref())
        .await?;

    let invoice = state
        .invoices
        .get(request.id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("invoice {}", request.id)))?;

    Ok(Json(InvoiceResponse::from(invoice)))
}

/// Bulk delete; admin only, idempotent over missing ids
pub async fn delete_invoices(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<IdListQuery>,
) -> Result<Json<DeleteResponse>, ApiError> {
    if !claims.role.is_admin() {
        return Err(ApiError::Forbidden("admin role required".to_string()));
    }

    let ids: Vec<InvoiceId> = query.parse_ids()?;
    let deleted = state.invoices.delete_many(&ids).await?;

    info!(requested = ids.len(), deleted, "Invoices deleted");

    Ok(Json(DeleteResponse { deleted }))
}

/// Filtered, paginated listing with aggregated statistics
pub async fn filter_invoices(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<FilterInvoicesResponse>, ApiError> {
    let mut filter = InvoiceFilter::all();

    // from/to come as a pair or not at all; a lone endpoint is a caller bug
    match (query.from.as_deref(), query.to.as_deref()) {
        (Some(from), Some(to)) => {
            let from = state.tz.parse_day(from)?;
            let to = state.tz.parse_day(to)?;
            let (start, end) = state.tz.day_range(from, to)?;
            filter = filter.with_date_range(start, end);
        }
        (None, None) => {}
        _ => {
            return Err(ApiError::InvalidInput(
                "from and to must be supplied together".to_string(),
            ));
        }
    }

    if let Some(code) = query.code.filter(|c| !c.is_empty()) {
        filter = filter.with_code_substring(code);
    }

    let page = Page::new(
        query.page.unwrap_or(1),
        query.limit.unwrap_or(DEFAULT_PAGE_SIZE),
    );

    let (window, total) = state.invoices.list(&filter, page).await?;

    // Statistics cover the whole filtered set, not just this window
    let (everything, _) = state.invoices.list(&filter, Page::all()).await?;
    let report = aggregate(&everything);

    Ok(Json(FilterInvoicesResponse {
        invoices: window.into_iter().map(InvoiceResponse::from).collect(),
        page: page.number,
        limit: page.size,
        total,
        total_amount: report.total_revenue,
        product_stats: report.per_product,
    }))
}
