// [tests/mirror/libs/infra/db_libsql/daily_aggregation.test.rs]
/*!
 * =================================================================
 * APARATO: CERTIFICADOR DE AGREGACIONES (V1.1 - CANONICAL FILTER)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L3-MIRROR
 * RESPONSABILIDAD: AUDITORÍA DEL CONTADOR DIARIO Y RESUMEN DE RASTRO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. CANONICAL FILTER: Sólo 'accept' desde la medianoche UTC alimenta
 *    el contador; 'processed' y días anteriores quedan fuera.
 * 2. BOUNDED SUMMARY: Las cotas inclusivas del resumen recortan la
 *    ventana sin alterar el orden ascendente.
 * =================================================================
 */

use arbiter_domain_models::{DispatchLog, Request, RequestStatus};
use arbiter_infra_db::repositories::{DispatchLogRepository, RequestRepository};
use arbiter_infra_db::StoreClient;
use chrono::{Duration, TimeZone, Utc};
use std::collections::BTreeMap;
use uuid::Uuid;

fn bare_request(
    identifier: &str,
    assignee: Option<&str>,
    status: RequestStatus,
    created_at: chrono::DateTime<Utc>,
) -> Request {
    Request {
        id: identifier.to_string(),
        parent_id: None,
        user_id: assignee.map(str::to_string),
        params: BTreeMap::new(),
        text: None,
        status,
        created_at,
        updated_at: created_at,
    }
}

/**
 * CERTIFICACIÓN: La agregación del contador diario honra el filtro
 * canónico (accept + medianoche UTC + asignatario presente).
 */
#[tokio::test]
async fn certify_daily_accept_aggregation() {
    println!("\n📊 [PROVING_GROUNDS]: Auditing daily counter aggregation...");

    let store_client = StoreClient::connect("file:mem_daily_counts?mode=memory&cache=shared", None)
        .await
        .expect("CRITICAL_FAULT: Failed to anchor in-memory ledger.");
    let request_repository = RequestRepository::new(store_client);

    let now_instant = Utc::now();
    let stale_instant = now_instant - Duration::days(2);

    // Dentro de la ventana: dos accept de A, uno de B.
    for (request_identifier, assignee) in [("a1", "user-a"), ("a2", "user-a"), ("b1", "user-b")] {
        request_repository
            .insert(&bare_request(request_identifier, Some(assignee), RequestStatus::Accept, now_instant))
            .await
            .unwrap();
    }

    // Fuera del filtro: accept envejecido, processed de hoy, accept huérfano.
    request_repository
        .insert(&bare_request("old", Some("user-a"), RequestStatus::Accept, stale_instant))
        .await
        .unwrap();
    request_repository
        .insert(&bare_request("wip", Some("user-b"), RequestStatus::Processed, now_instant))
        .await
        .unwrap();
    request_repository
        .insert(&bare_request("orphan", None, RequestStatus::Accept, now_instant))
        .await
        .unwrap();

    let today_midnight = Utc
        .from_utc_datetime(&now_instant.date_naive().and_hms_opt(0, 0, 0).unwrap());

    let daily_counts = request_repository
        .daily_accept_counts(today_midnight)
        .await
        .expect("STORE_FAULT: Aggregation rejected.");

    assert_eq!(daily_counts.get("user-a"), Some(&2));
    assert_eq!(daily_counts.get("user-b"), Some(&1));
    assert_eq!(daily_counts.len(), 2);

    println!("   ✅ [VERDICT]: Canonical aggregation certified.");
}

/**
 * CERTIFICACIÓN: El resumen por día agrupa ascendente y respeta las
 * cotas inclusivas opcionales.
 */
#[tokio::test]
async fn certify_dispatch_log_daily_summary() {
    let store_client = StoreClient::connect("file:mem_daily_summary?mode=memory&cache=shared", None)
        .await
        .expect("CRITICAL_FAULT: Failed to anchor in-memory ledger.");
    let dispatch_log_repository = DispatchLogRepository::new(store_client);

    let first_day = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
    let second_day = Utc.with_ymd_and_hms(2024, 3, 2, 9, 0, 0).unwrap();

    for (request_identifier, sealed_day) in [
        ("request-1", first_day),
        ("request-2", first_day),
        ("request-3", second_day),
    ] {
        dispatch_log_repository
            .insert(&DispatchLog {
                request_id: request_identifier.to_string(),
                task_id: Uuid::new_v4(),
                parent_id: None,
                request_created_at: sealed_day,
                request_updated_at: sealed_day,
            })
            .await
            .unwrap();
    }

    // Ventana completa: dos días en orden ascendente.
    let full_summary = dispatch_log_repository.daily_summary(None, None).await.unwrap();
    assert_eq!(full_summary.len(), 2);
    assert_eq!(full_summary[0].date, first_day.date_naive());
    assert_eq!(full_summary[0].count, 2);
    assert_eq!(full_summary[1].date, second_day.date_naive());
    assert_eq!(full_summary[1].count, 1);

    // Cota inferior inclusiva: sólo el segundo día sobrevive.
    let bounded_summary = dispatch_log_repository
        .daily_summary(Some(second_day.date_naive()), None)
        .await
        .unwrap();
    assert_eq!(bounded_summary.len(), 1);
    assert_eq!(bounded_summary[0].count, 1);

    // Conteo por solicitud (evidencia de idempotencia aguas arriba).
    assert_eq!(
        dispatch_log_repository.count_for_request("request-1").await.unwrap(),
        1
    );
}
