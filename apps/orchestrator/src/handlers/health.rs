// [apps/orchestrator/src/handlers/health.rs]
/*!
 * =================================================================
 * APARATO: HEALTH PROBE HANDLER (V4.1 - PERIMETER SENTINEL)
 * CLASIFICACIÓN: API ADAPTER LAYER (ESTRATO L4)
 * RESPONSABILIDAD: SONDA DE SALUD DE LOS ESTRATOS DE INFRAESTRUCTURA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. LATENCY EVIDENCE: Cada servicio reporta su latencia de sonda en
 *    milisegundos; el veredicto global degrada con el primer fallo.
 * 2. DUAL STATUS: 200 'ok' con todos los estratos nominales;
 *    503 'degraded' ante cualquier colapso parcial.
 * =================================================================
 */

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::time::Instant;
use tracing::instrument;

pub struct HealthHandler;

impl HealthHandler {
    /**
     * Endpoint: GET /api/v1/health
     *
     * Sondea el Ledger y el ledger de cola, reportando latencias,
     * profundidad de cola y uptime del proceso.
     */
    #[instrument(skip(application_state))]
    pub async fn handle_health_probe(
        State(application_state): State<AppState>,
    ) -> impl IntoResponse {
        let mut all_nominal = true;

        // 1. SONDA DEL LEDGER AUTORITATIVO
        let store_probe_start = Instant::now();
        let store_report = match Self::probe_store(&application_state).await {
            Ok(()) => json!({
                "status": "ok",
                "latency_ms": probe_latency_millis(store_probe_start),
            }),
            Err(probe_fault) => {
                all_nominal = false;
                json!({ "status": format!("error: {}", probe_fault) })
            }
        };

        // 2. SONDA DEL LEDGER DE COLA
        let queue_probe_start = Instant::now();
        let queue_report = match application_state.queue_repository.pending_depth().await {
            Ok(pending_depth) => json!({
                "status": "ok",
                "latency_ms": probe_latency_millis(queue_probe_start),
                "depth": pending_depth,
            }),
            Err(probe_fault) => {
                all_nominal = false;
                json!({ "status": format!("error: {}", probe_fault) })
            }
        };

        let verdict_code = if all_nominal {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };

        (
            verdict_code,
            Json(json!({
                "status": if all_nominal { "ok" } else { "degraded" },
                "uptime_seconds": application_state.boot_instant.elapsed().as_secs(),
                "services": {
                    "store": store_report,
                    "queue": queue_report,
                },
            })),
        )
            .into_response()
    }

    async fn probe_store(application_state: &AppState) -> Result<(), String> {
        let ledger_connection = application_state
            .store_client
            .get_connection()
            .map_err(|link_fault| link_fault.to_string())?;

        ledger_connection
            .query("SELECT 1", ())
            .await
            .map(|_| ())
            .map_err(|probe_fault| probe_fault.to_string())
    }
}

fn probe_latency_millis(probe_start: Instant) -> f64 {
    (probe_start.elapsed().as_secs_f64() * 1000.0 * 100.0).round() / 100.0
}
