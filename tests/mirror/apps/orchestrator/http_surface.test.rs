// [tests/mirror/apps/orchestrator/http_surface.test.rs]
/*!
 * =================================================================
 * APARATO: CERTIFICADOR DE LA SUPERFICIE HTTP (V1.2 - FULL ROUTER)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L4-MIRROR
 * RESPONSABILIDAD: AUDITORÍA ONESHOT DEL ROUTER COMPLETO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. FULL TOPOLOGY: Cada ráfaga atraviesa la matriz de rutas real
 *    (CORS, trazado y extractores incluidos) contra Ledger volátil.
 * 2. SEMANTIC VERDICTS: 201/202 en las rutas de ingesta, 400 ante
 *    validación rechazada, 200 en la sonda de salud.
 * =================================================================
 */

use arbiter_domain_models::{KeyDataType, ParamKind};
use arbiter_infra_db::StoreClient;
use arbiter_orchestrator::prelude::*;
use axum::body::Body;
use axum::http::{Request as HttpRequest, StatusCode};
use serde_json::json;
use tower::ServiceExt;

/// Forja el estado maestro sobre un Ledger volátil nominado.
async fn forge_state(memory_anchor_name: &str) -> AppState {
    let store_client = StoreClient::connect(
        &format!("file:{}?mode=memory&cache=shared", memory_anchor_name),
        None,
    )
    .await
    .expect("CRITICAL_FAULT: Failed to anchor in-memory ledger.");

    let application_state = AppState::new(store_client);

    for (key_name, key_kind) in [("region", ParamKind::String), ("score", ParamKind::Integer)] {
        application_state
            .key_data_type_repository
            .upsert(&KeyDataType {
                name: key_name.to_string(),
                type_of: key_kind,
            })
            .await
            .expect("STORE_FAULT: Registry seeding rejected.");
    }

    application_state
}

fn json_post(uri: &str, payload: serde_json::Value) -> HttpRequest<Body> {
    HttpRequest::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("HARNESS_FAULT: Request assembly collapsed.")
}

/**
 * CERTIFICACIÓN: Intake validado — 201 con boleto enfilado; 400 ante
 * operador fuera del conjunto cerrado.
 */
#[tokio::test]
async fn certify_request_intake_surface() {
    println!("\n🌐 [PROVING_GROUNDS]: Auditing HTTP command surface...");

    let application_state = forge_state("mem_http_intake").await;
    let dispatch_router = create_dispatch_router(application_state.clone());

    let valid_ingress = json_post(
        "/api/v1/requests",
        json!({
            "params": {
                "region": { "value": "NW", "operator": "EQ", "height": 2 },
                "score": { "value": "100", "operator": "GTE" }
            },
            "text": "perimeter survey"
        }),
    );
    let intake_verdict = dispatch_router.clone().oneshot(valid_ingress).await.unwrap();
    assert_eq!(intake_verdict.status(), StatusCode::CREATED);

    // Evidencia del Ledger: el boleto quedó enfilado.
    assert_eq!(
        application_state.queue_repository.pending_depth().await.unwrap(),
        1
    );

    let rejected_ingress = json_post(
        "/api/v1/requests",
        json!({
            "params": { "region": { "value": "NW", "operator": "BETWEEN" } }
        }),
    );
    let rejection_verdict = dispatch_router.clone().oneshot(rejected_ingress).await.unwrap();
    assert_eq!(rejection_verdict.status(), StatusCode::BAD_REQUEST);

    // El rechazo no enfila boletos.
    assert_eq!(
        application_state.queue_repository.pending_depth().await.unwrap(),
        1
    );

    println!("   ✅ [VERDICT]: Intake surface certified.");
}

/**
 * CERTIFICACIÓN: Disparador directo — 202 con task_id; 400 ante estado
 * desconocido.
 */
#[tokio::test]
async fn certify_dispatch_trigger_surface() {
    let application_state = forge_state("mem_http_trigger").await;
    let dispatch_router = create_dispatch_router(application_state.clone());

    let valid_trigger = json_post(
        "/api/v1/dispatch",
        json!({
            "id": "request-77",
            "parent_id": null,
            "status": "processed",
            "params": { "region": { "value": "NW", "operator": "EQ" } },
            "created_at": "2024-03-01T10:00:00Z",
            "updated_at": "2024-03-01T10:00:00Z"
        }),
    );
    let trigger_verdict = dispatch_router.clone().oneshot(valid_trigger).await.unwrap();
    assert_eq!(trigger_verdict.status(), StatusCode::ACCEPTED);
    assert_eq!(
        application_state.queue_repository.pending_depth().await.unwrap(),
        1
    );

    let unknown_status_trigger = json_post(
        "/api/v1/dispatch",
        json!({
            "id": "request-78",
            "parent_id": null,
            "status": "galloping",
            "params": {},
            "created_at": "2024-03-01T10:00:00Z",
            "updated_at": "2024-03-01T10:00:00Z"
        }),
    );
    let status_rejection = dispatch_router.clone().oneshot(unknown_status_trigger).await.unwrap();
    assert_eq!(status_rejection.status(), StatusCode::BAD_REQUEST);
}

/**
 * CERTIFICACIÓN: Sonda de salud, resumen acotado y gateway interno.
 */
#[tokio::test]
async fn certify_observation_surface() {
    let application_state = forge_state("mem_http_observe").await;
    let dispatch_router = create_dispatch_router(application_state);

    // Sonda de salud nominal sobre Ledger vivo.
    let health_probe = HttpRequest::builder()
        .method("GET")
        .uri("/api/v1/health")
        .body(Body::empty())
        .unwrap();
    let health_verdict = dispatch_router.clone().oneshot(health_probe).await.unwrap();
    assert_eq!(health_verdict.status(), StatusCode::OK);

    // Resumen con cota malformada: 400 semántico.
    let malformed_summary = HttpRequest::builder()
        .method("GET")
        .uri("/api/v1/dispatch/summary?start_date=01-03-2024")
        .body(Body::empty())
        .unwrap();
    let summary_rejection = dispatch_router.clone().oneshot(malformed_summary).await.unwrap();
    assert_eq!(summary_rejection.status(), StatusCode::BAD_REQUEST);

    // Resumen vacío bien formado: 200.
    let empty_summary = HttpRequest::builder()
        .method("GET")
        .uri("/api/v1/dispatch/summary?start_date=2024-03-01&end_date=2024-03-31")
        .body(Body::empty())
        .unwrap();
    let summary_verdict = dispatch_router.clone().oneshot(empty_summary).await.unwrap();
    assert_eq!(summary_verdict.status(), StatusCode::OK);

    // Gateway interno: la trama tipada siempre es aceptada (best-effort).
    let worker_frame = json_post(
        "/api/v1/internal/broadcast",
        json!({
            "type": "request_dispatched",
            "request_id": "request-77",
            "user": "user-a",
            "timestamp": "2024-03-01T10:05:00Z"
        }),
    );
    let gateway_verdict = dispatch_router.clone().oneshot(worker_frame).await.unwrap();
    assert_eq!(gateway_verdict.status(), StatusCode::ACCEPTED);
}
