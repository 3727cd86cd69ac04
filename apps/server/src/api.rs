//! HTTP API surface: lead endpoints, health check, and router assembly.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    middleware,
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use leadhub_core::leads::{LeadWithOwner, NewLead};

use crate::{
    auth,
    config::Config,
    error::ApiResult,
    main_lib::AppState,
    realtime::ws_handler,
};

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Request body for lead creation. Fields are optional at the wire level so
/// a missing field surfaces as a validation error rather than a rejected
/// body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateLeadRequest {
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    notes: Option<String>,
    owner_clerk_id: Option<String>,
    owner_email: Option<String>,
}

impl From<CreateLeadRequest> for NewLead {
    fn from(request: CreateLeadRequest) -> Self {
        NewLead {
            name: request.name.unwrap_or_default(),
            email: request.email.unwrap_or_default(),
            phone: request.phone,
            notes: request.notes,
            owner_clerk_id: request.owner_clerk_id.unwrap_or_default(),
            owner_email: request.owner_email,
        }
    }
}

async fn list_leads(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<LeadWithOwner>>> {
    let leads = state.lead_service.get_leads()?;
    Ok(Json(leads))
}

async fn create_lead(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateLeadRequest>,
) -> ApiResult<(StatusCode, Json<LeadWithOwner>)> {
    let lead = state.lead_service.create_lead(request.into()).await?;
    Ok((StatusCode::CREATED, Json(lead)))
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|origin| origin == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .filter_map(|origin| HeaderValue::from_str(origin).ok())
            .collect::<Vec<_>>();
        CorsLayer::new().allow_origin(origins)
    };

    let api_routes = Router::new()
        .route("/api/leads", get(list_leads).post(create_lead))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_identity,
        ));

    Router::new()
        .merge(api_routes)
        .route("/ws", any(ws_handler))
        .route("/health", get(health))
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
