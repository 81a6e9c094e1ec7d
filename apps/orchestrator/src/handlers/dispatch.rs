// [apps/orchestrator/src/handlers/dispatch.rs]
/*!
 * =================================================================
 * APARATO: DISPATCH TRIGGER HANDLER (V4.2 - DIRECT PATH)
 * CLASIFICACIÓN: API ADAPTER LAYER (ESTRATO L4)
 * RESPONSABILIDAD: DISPARADOR DIRECTO DEL PIPELINE DE DESPACHO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. SCHEMA GATE: El payload completo se valida (estado reconocido,
 *    parámetros casteables) antes de tocar el ledger de cola.
 * 2. ENQUEUE ONLY: El disparador no upserta la solicitud; un boleto
 *    hacia un id desconocido resuelve como desenlace nulo no
 *    reintetable en el trabajador.
 * 3. 202 DOCTRINE: La respuesta entrega el 'task_id' del boleto — el
 *    arbitraje ocurre de forma asíncrona.
 * =================================================================
 */

use crate::state::AppState;
use arbiter_core_typecast::{cast_condition_map, KeyTypeRegistry};
use arbiter_domain_models::RequestStatus;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, instrument};
use uuid::Uuid;

/// Carga útil del disparador directo (esquema completo de solicitud).
#[derive(Debug, Deserialize)]
pub struct DispatchIngressPayload {
    pub id: String,
    pub parent_id: Option<String>,
    pub status: String,
    pub params: serde_json::Map<String, serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct DispatchTriggerHandler;

impl DispatchTriggerHandler {
    /**
     * Endpoint: POST /api/v1/dispatch
     *
     * Valida el esquema del payload y enfila el boleto de despacho.
     * Responde 202 con el identificador estable del intento.
     */
    #[instrument(skip(application_state, ingress_payload))]
    pub async fn handle_dispatch_trigger(
        State(application_state): State<AppState>,
        Json(ingress_payload): Json<DispatchIngressPayload>,
    ) -> impl IntoResponse {
        // 1. VALIDACIÓN DE ESTADO RECONOCIDO
        if RequestStatus::from_label(&ingress_payload.status).is_none() {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": format!("unknown status '{}'", ingress_payload.status)
                })),
            )
                .into_response();
        }

        // 2. VALIDACIÓN DE CASTEABILIDAD DE PARÁMETROS (C1)
        let registry_records = match application_state.key_data_type_repository.fetch_all().await {
            Ok(records) => records,
            Err(store_fault) => {
                error!("❌ [TRIGGER_FAULT]: Type registry unreachable: {}", store_fault);
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        };
        let registry = KeyTypeRegistry::from_records(registry_records);

        if let Err(validation_fault) = cast_condition_map(&ingress_payload.params, &registry) {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": validation_fault.to_string() })),
            )
                .into_response();
        }

        // 3. ENFILADO DEL BOLETO
        let task_id = Uuid::new_v4();
        if let Err(queue_fault) = application_state
            .queue_repository
            .enqueue(task_id, &ingress_payload.id)
            .await
        {
            error!("❌ [TRIGGER_FAULT]: Ticket enqueue rejected: {}", queue_fault);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }

        info!("🎯 [TRIGGER]: Dispatch ticket [{}] accepted for request [{}].", task_id, ingress_payload.id);

        (StatusCode::ACCEPTED, Json(json!({ "task_id": task_id }))).into_response()
    }
}
