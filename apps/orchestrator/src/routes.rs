// [apps/orchestrator/src/routes.rs]
/*!
 * =================================================================
 * APARATO: DISPATCH ROUTING MATRIX (V4.2 - GATEWAY TOPOLOGY)
 * CLASIFICACIÓN: API ADAPTER LAYER (ESTRATO L3)
 * RESPONSABILIDAD: TOPOLOGÍA DE RED DE LA SUPERFICIE DE MANDO
 *
 * VISION HIPER-HOLÍSTICA:
 * La topología soporta tres estratos:
 * 1. REST Táctico (intake, trigger, resumen, salud).
 * 2. Gateway interno (tramas desde procesos trabajadores).
 * 3. WebSockets (observadores en tiempo real).
 * =================================================================
 */

use crate::handlers::{
    dispatch::DispatchTriggerHandler, health::HealthHandler, internal::InternalGatewayHandler,
    requests::RequestIntakeHandler, stream, summary::SummaryHandler,
};
use crate::state::AppState;
use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn create_dispatch_router(application_shared_state: AppState) -> Router {
    // Escudo de Red: CORS para paneles de operación y herramientas Ops.
    let network_security_shield = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    // ESTRATO TÁCTICO: Superficie REST del despacho.
    let dispatch_api_stratum = Router::new()
        // Ingesta validada de solicitudes
        .route("/requests", post(RequestIntakeHandler::handle_request_intake))
        // Disparador directo (202 + task_id)
        .route("/dispatch", post(DispatchTriggerHandler::handle_dispatch_trigger))
        // Resumen de auditoría por día
        .route("/dispatch/summary", get(SummaryHandler::handle_daily_summary))
        // Sonda de salud perimetral
        .route("/health", get(HealthHandler::handle_health_probe))
        // Gateway interno de difusión (procesos trabajadores)
        .route("/internal/broadcast", post(InternalGatewayHandler::handle_broadcast_ingress));

    // ESTRATO DE OBSERVACIÓN: Canales WebSocket del hub.
    Router::new()
        .nest("/api/v1", dispatch_api_stratum)
        .route("/ws/newRequest", get(stream::join_new_requests_stream))
        .route("/ws/dispatched", get(stream::join_dispatched_stream))
        .layer(network_security_shield)
        .layer(TraceLayer::new_for_http())
        .with_state(application_shared_state)
}
