// [apps/orchestrator/src/handlers/requests.rs]
/*!
 * =================================================================
 * APARATO: REQUEST INTAKE HANDLER (V4.3 - VALIDATED INGRESS)
 * CLASIFICACIÓN: API ADAPTER LAYER (ESTRATO L4)
 * RESPONSABILIDAD: INGESTA VALIDADA, ENFILADO Y SEÑAL DE INGRESO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. CAST AT THE GATE: Los parámetros crudos cruzan la frontera C1
 *    exactamente una vez; la solicitud persiste ya tipada.
 * 2. SIGNAL ON SUCCESS: La persistencia consumada enfila el boleto y
 *    emite 'new_request' — la señal jamás precede al Ledger.
 * 3. SEMANTIC 400: Todo fallo de validación retorna la clave ofensora
 *    en el cuerpo, listo para el operador.
 * =================================================================
 */

use crate::state::AppState;
use arbiter_core_typecast::{cast_condition_map, KeyTypeRegistry};
use arbiter_domain_models::{HubFrame, Request, RequestStatus};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, instrument};
use uuid::Uuid;

/// Carga útil de ingesta de una solicitud nueva.
#[derive(Debug, Deserialize)]
pub struct RequestIntakePayload {
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Condiciones crudas `{key: {value, operator, height}}`.
    #[serde(default)]
    pub params: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub text: Option<String>,
}

pub struct RequestIntakeHandler;

impl RequestIntakeHandler {
    /**
     * Endpoint: POST /api/v1/requests
     *
     * Valida y castea los parámetros, persiste la solicitud en estado
     * inicial, enfila el boleto de despacho y emite la señal de ingreso.
     */
    #[instrument(skip(application_state, intake_payload))]
    pub async fn handle_request_intake(
        State(application_state): State<AppState>,
        Json(intake_payload): Json<RequestIntakePayload>,
    ) -> impl IntoResponse {
        // 1. INSTANTÁNEA DEL REGISTRO DE TIPOS
        let registry_records = match application_state.key_data_type_repository.fetch_all().await {
            Ok(records) => records,
            Err(store_fault) => {
                error!("❌ [INTAKE_FAULT]: Type registry unreachable: {}", store_fault);
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        };
        let registry = KeyTypeRegistry::from_records(registry_records);

        // 2. FRONTERA DE CASTEO (C1)
        let validated_conditions = match cast_condition_map(&intake_payload.params, &registry) {
            Ok(conditions) => conditions,
            Err(validation_fault) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": validation_fault.to_string() })),
                )
                    .into_response();
            }
        };

        // 3. PERSISTENCIA EN ESTADO INICIAL
        let ingress_instant = Utc::now();
        let request = Request {
            id: Uuid::new_v4().to_string(),
            parent_id: intake_payload.parent_id,
            user_id: None,
            params: validated_conditions,
            text: intake_payload.text,
            status: RequestStatus::Processed,
            created_at: ingress_instant,
            updated_at: ingress_instant,
        };

        if let Err(store_fault) = application_state.request_repository.insert(&request).await {
            error!("❌ [INTAKE_FAULT]: Request persistence rejected: {}", store_fault);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }

        // 4. ENFILADO DEL BOLETO DE DESPACHO
        let task_id = Uuid::new_v4();
        if let Err(queue_fault) = application_state
            .queue_repository
            .enqueue(task_id, &request.id)
            .await
        {
            error!("❌ [INTAKE_FAULT]: Ticket enqueue rejected: {}", queue_fault);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }

        // 5. SEÑAL DE INGRESO (best-effort, posterior al Ledger)
        application_state.broadcast_hub.publish(HubFrame::NewRequest {
            id: request.id.clone(),
            status: request.status,
            timestamp: ingress_instant,
        });

        info!("📥 [INTAKE]: Request [{}] persisted and enqueued as ticket [{}].", request.id, task_id);

        (
            StatusCode::CREATED,
            Json(json!({
                "id": request.id,
                "status": request.status,
                "task_id": task_id,
            })),
        )
            .into_response()
    }
}
