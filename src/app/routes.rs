//! Route handlers for the index page and the three conversion endpoints.

use crate::app::csrf::{CSRF_HEADER, CSRF_HEADER_ALT};
use crate::app::page;
use crate::app::AppState;
use crate::core::converter;
use crate::domain::model::{ConversionPayload, ConversionRequest, ConversionResult};
use crate::domain::units::Measure;
use crate::utils::error::ConverterError;
use axum::{
    extract::{rejection::JsonRejection, Request, State},
    middleware::{self, Next},
    response::{Html, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Builds the full application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(PageRoutes::routes(state.clone()))
        .merge(ConversionRoutes::routes(state))
        .layer(TraceLayer::new_for_http())
}

pub struct PageRoutes;

impl PageRoutes {
    pub fn routes(state: Arc<AppState>) -> Router {
        Router::new()
            .route("/", get(Self::handle_index).post(Self::handle_index))
            .with_state(state)
    }

    async fn handle_index(State(state): State<Arc<AppState>>) -> Html<String> {
        Html(page::render_index(&state.csrf.issue()))
    }
}

pub struct ConversionRoutes;

impl ConversionRoutes {
    pub fn routes(state: Arc<AppState>) -> Router {
        Router::new()
            .route(Measure::Length.endpoint(), post(Self::handle_length))
            .route(Measure::Weight.endpoint(), post(Self::handle_weight))
            .route(Measure::Temperature.endpoint(), post(Self::handle_temperature))
            .route_layer(middleware::from_fn_with_state(state.clone(), require_csrf))
            .with_state(state)
    }

    async fn handle_length(
        payload: Result<Json<ConversionPayload>, JsonRejection>,
    ) -> Result<Json<ConversionResult>, ConverterError> {
        Self::handle_conversion(Measure::Length, payload)
    }

    async fn handle_weight(
        payload: Result<Json<ConversionPayload>, JsonRejection>,
    ) -> Result<Json<ConversionResult>, ConverterError> {
        Self::handle_conversion(Measure::Weight, payload)
    }

    async fn handle_temperature(
        payload: Result<Json<ConversionPayload>, JsonRejection>,
    ) -> Result<Json<ConversionResult>, ConverterError> {
        Self::handle_conversion(Measure::Temperature, payload)
    }

    fn handle_conversion(
        measure: Measure,
        payload: Result<Json<ConversionPayload>, JsonRejection>,
    ) -> Result<Json<ConversionResult>, ConverterError> {
        let Json(payload) = payload?;
        let request = ConversionRequest::try_from(payload)?;
        let result = converter::convert(measure, &request)?;
        Ok(Json(result))
    }
}

/// Checks the CSRF header when enforcement is enabled.
async fn require_csrf(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, ConverterError> {
    if state.csrf.is_enforced() {
        let token = request
            .headers()
            .get(CSRF_HEADER)
            .or_else(|| request.headers().get(CSRF_HEADER_ALT))
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ConverterError::csrf("missing CSRF token header"))?;
        state.csrf.verify(token)?;
    }
    Ok(next.run(request).await)
}
