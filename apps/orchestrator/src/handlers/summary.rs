// [apps/orchestrator/src/handlers/summary.rs]
/*!
 * =================================================================
 * APARATO: DAILY SUMMARY HANDLER (V4.1 - AUDIT READ)
 * CLASIFICACIÓN: API ADAPTER LAYER (ESTRATO L4)
 * RESPONSABILIDAD: LECTURA AGREGADA DEL RASTRO DE AUDITORÍA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. READ-ONLY DISCIPLINE: Agregación pura sobre 'dispatch_logs';
 *    el handler jamás muta el Ledger.
 * 2. BOUNDED WINDOW: Cotas inclusivas opcionales YYYY-MM-DD; el
 *    formato inválido colapsa en 400 semántico.
 * =================================================================
 */

use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, instrument};

/// Cotas opcionales de la ventana del resumen.
#[derive(Debug, Deserialize)]
pub struct SummaryWindowQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

pub struct SummaryHandler;

impl SummaryHandler {
    /**
     * Endpoint: GET /api/v1/dispatch/summary?start_date&end_date
     *
     * Retorna `[{date, count}]` agrupado por día ascendente.
     */
    #[instrument(skip(application_state))]
    pub async fn handle_daily_summary(
        State(application_state): State<AppState>,
        Query(window_query): Query<SummaryWindowQuery>,
    ) -> impl IntoResponse {
        let start_bound = match parse_window_bound(window_query.start_date.as_deref()) {
            Ok(bound) => bound,
            Err(rejection) => return rejection,
        };
        let end_bound = match parse_window_bound(window_query.end_date.as_deref()) {
            Ok(bound) => bound,
            Err(rejection) => return rejection,
        };

        match application_state
            .dispatch_log_repository
            .daily_summary(start_bound, end_bound)
            .await
        {
            Ok(summary_rows) => (StatusCode::OK, Json(summary_rows)).into_response(),
            Err(store_fault) => {
                error!("❌ [SUMMARY_FAULT]: Audit aggregation rejected: {}", store_fault);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// Parsea una cota YYYY-MM-DD; vacía o ausente significa sin cota.
fn parse_window_bound(
    raw_bound: Option<&str>,
) -> Result<Option<NaiveDate>, axum::response::Response> {
    match raw_bound {
        None => Ok(None),
        Some(raw_text) if raw_text.trim().is_empty() => Ok(None),
        Some(raw_text) => NaiveDate::parse_from_str(raw_text.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "invalid date format, expected YYYY-MM-DD" })),
                )
                    .into_response()
            }),
    }
}
