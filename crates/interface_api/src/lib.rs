//! HTTP API Layer
//!
//! This crate provides the REST API for the storefront system using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for each resource
//! - **Middleware**: Authentication, authorization, tracing, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! Handlers talk to storage through the domain ports held in [`AppState`],
//! so the same router runs against PostgreSQL in production and against the
//! in-memory adapters in tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use core_kernel::{SettingsStore, StoreTimezone, UserStore};
use domain_catalog::ProductStore;
use domain_invoicing::{CodeGenerator, InvoiceStore};

use crate::config::ApiConfig;
use crate::handlers::{auth as auth_handlers, health, invoice, product, settings};
use crate::middleware::{audit_middleware, auth_middleware};

/// Application state shared across handlers
///
/// Stores are trait objects injected at construction; no global handles.
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductStore>,
    pub invoices: Arc<dyn InvoiceStore>,
    pub users: Arc<dyn UserStore>,
    pub settings: Arc<dyn SettingsStore>,
    pub code_gen: CodeGenerator,
    pub tz: StoreTimezone,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Shared application state with stores and configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/login", post(auth_handlers::login));

    // Product routes
    let product_routes = Router::new()
        .route("/", get(product::list_products))
        .route("/", post(product::create_product))
        .route("/", put(product::update_product))
        .route("/", delete(product::delete_products));

    // Invoice routes
    let invoice_routes = Router::new()
        .route("/", post(invoice::create_invoice))
        .route("/", put(invoice::update_invoice))
        .route("/", delete(invoice::delete_invoices))
        .route("/filter", get(invoice::filter_invoices));

    // Settings routes
    let settings_routes = Router::new()
        .route("/", get(settings::get_settings))
        .route("/", put(settings::update_settings));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/products", product_routes)
        .nest("/invoices", invoice_routes)
        .nest("/settings", settings_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            audit_middleware,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
