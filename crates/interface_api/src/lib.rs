//! HTTP API Layer
//!
//! The REST API for the dental practice management system, built on Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers per resource (patients, teeth, x-rays,
//!   recommendations, treatments, dashboard, intake)
//! - **Services**: Execution of workflow effects (document rendering,
//!   notification dispatch)
//! - **Intake**: Parsers for the three programmatic request shapes
//! - **Middleware**: JWT auth, API-key intake auth, audit logging
//! - **DTOs**: Request/Response data transfer objects
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, Dependencies};
//!
//! let app = create_router(pool, config, dependencies);
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod intake;
pub mod middleware;
pub mod services;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_claims::ClaimsWorkflow;
use domain_imaging::AbscessClassifier;
use infra_db::{
    PatientRepository, RecommendationRepository, ToothRepository, TreatmentRepository,
    XrayRepository,
};
use infra_documents::ClaimDocumentRenderer;
use infra_notify::Notifier;

use crate::config::ApiConfig;
use crate::handlers::{
    auth as auth_handler, dashboard, health, intake as intake_handler, patients, recommendations,
    treatments,
};
use crate::middleware::{audit_middleware, auth_middleware, intake_auth_middleware};

/// Injected collaborators the handlers depend on
pub struct Dependencies {
    pub classifier: Arc<dyn AbscessClassifier>,
    pub notifier: Arc<dyn Notifier>,
    pub workflow: ClaimsWorkflow,
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: ApiConfig,
    pub classifier: Arc<dyn AbscessClassifier>,
    pub notifier: Arc<dyn Notifier>,
    pub renderer: ClaimDocumentRenderer,
    pub workflow: ClaimsWorkflow,
}

impl AppState {
    pub fn patients(&self) -> PatientRepository {
        PatientRepository::new(self.pool.clone())
    }

    pub fn teeth(&self) -> ToothRepository {
        ToothRepository::new(self.pool.clone())
    }

    pub fn xrays(&self) -> XrayRepository {
        XrayRepository::new(self.pool.clone())
    }

    pub fn recommendations(&self) -> RecommendationRepository {
        RecommendationRepository::new(self.pool.clone())
    }

    pub fn treatments(&self) -> TreatmentRepository {
        TreatmentRepository::new(self.pool.clone())
    }
}

/// Creates the main API router
pub fn create_router(pool: PgPool, config: ApiConfig, dependencies: Dependencies) -> Router {
    let state = AppState {
        pool,
        config,
        classifier: dependencies.classifier,
        notifier: dependencies.notifier,
        renderer: ClaimDocumentRenderer::new(),
        workflow: dependencies.workflow,
    };

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/auth/token", post(auth_handler::issue_token));

    // Patient routes, including teeth, x-rays, and classification
    let patient_routes = Router::new()
        .route("/", post(patients::create_patient))
        .route("/", get(patients::list_patients))
        .route("/:id", get(patients::get_patient))
        .route("/:id/teeth", post(patients::create_tooth_record))
        .route("/:id/teeth", get(patients::list_tooth_records))
        .route("/:id/xrays", post(patients::upload_xray))
        .route("/:id/xrays", get(patients::list_xrays))
        .route("/:id/xrays/latest/classify", get(patients::classify_latest_xray));

    // Crown recommendation routes
    let recommendation_routes = Router::new()
        .route("/", post(recommendations::create_recommendation))
        .route("/", get(recommendations::list_recommendations))
        .route("/:id", get(recommendations::get_recommendation))
        .route("/:id/submit", post(recommendations::submit_recommendation))
        .route("/:id/document", get(recommendations::download_document));

    // Treatment routes
    let treatment_routes = Router::new()
        .route("/", post(treatments::create_treatment))
        .route("/", get(treatments::list_treatments))
        .route("/:id", get(treatments::get_treatment))
        .route("/:id/submit", post(treatments::submit_treatment))
        .route("/:id/document", get(treatments::download_document));

    // Protected clinic routes (staff JWT)
    let api_routes = Router::new()
        .nest("/patients", patient_routes)
        .nest("/recommendations", recommendation_routes)
        .nest("/treatments", treatment_routes)
        .route("/dashboard", get(dashboard::dashboard))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            audit_middleware,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Programmatic intake (static API key)
    let intake_routes = Router::new()
        .route("/treatments", post(intake_handler::create_treatment))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            audit_middleware,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            intake_auth_middleware,
        ));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .nest("/intake", intake_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
