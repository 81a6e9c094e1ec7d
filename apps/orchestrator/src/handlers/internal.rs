// [apps/orchestrator/src/handlers/internal.rs]
/*!
 * =================================================================
 * APARATO: INTERNAL BROADCAST GATEWAY (V4.1 - WORKER INGRESS)
 * CLASIFICACIÓN: API ADAPTER LAYER (ESTRATO L4)
 * RESPONSABILIDAD: INGESTA DE TRAMAS DESDE PROCESOS TRABAJADORES
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. TAGGED ROUTING: La trama entrante porta su discriminante 'type';
 *    el hub la enruta a su canal sin inspección adicional.
 * 2. ALWAYS 202: La difusión es best-effort por contrato — el gateway
 *    acepta la trama aun sin suscriptores vivos.
 * =================================================================
 */

use crate::state::AppState;
use arbiter_domain_models::HubFrame;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::{debug, instrument};

pub struct InternalGatewayHandler;

impl InternalGatewayHandler {
    /**
     * Endpoint: POST /api/v1/internal/broadcast
     *
     * Recibe una trama tipada de un proceso trabajador y la difunde en
     * su canal nominal.
     */
    #[instrument(skip(application_state, ingress_frame))]
    pub async fn handle_broadcast_ingress(
        State(application_state): State<AppState>,
        Json(ingress_frame): Json<HubFrame>,
    ) -> impl IntoResponse {
        debug!("📨 [GATEWAY]: Frame received for channel '{}'.", ingress_frame.channel().group_name());

        application_state.broadcast_hub.publish(ingress_frame);

        StatusCode::ACCEPTED
    }
}
