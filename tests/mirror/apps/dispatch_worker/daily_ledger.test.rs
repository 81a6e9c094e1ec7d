// [tests/mirror/apps/dispatch_worker/daily_ledger.test.rs]
/*!
 * =================================================================
 * APARATO: CERTIFICADOR DEL CONTADOR DIARIO (V1.1 - RECONCILIATION)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L1-WORKER-MIRROR
 * RESPONSABILIDAD: AUDITORÍA DEL CACHÉ DE CARGA Y SU RECONCILIACIÓN
 *
 * # Mathematical Proof (Store Authority):
 * El incremento local es optimista; el refresco forzado reimpone la
 * verdad del Ledger. El caché converge a la agregación canónica en
 * cada frontera de reconciliación.
 * =================================================================
 */

use arbiter_dispatch_worker::prelude::DailyLoadLedger;
use arbiter_domain_models::{Request, RequestStatus};
use arbiter_infra_db::repositories::RequestRepository;
use arbiter_infra_db::StoreClient;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;

async fn seed_accepted(request_repository: &RequestRepository, assignee: &str, count: usize) {
    let now_instant = Utc::now();
    for sequence in 0..count {
        request_repository
            .insert(&Request {
                id: format!("accepted-{}-{}", assignee, sequence),
                parent_id: None,
                user_id: Some(assignee.to_string()),
                params: BTreeMap::new(),
                text: None,
                status: RequestStatus::Accept,
                created_at: now_instant,
                updated_at: now_instant,
            })
            .await
            .unwrap();
    }
}

/**
 * CERTIFICACIÓN: Instantánea, incremento local y reconciliación forzada.
 */
#[tokio::test]
async fn certify_snapshot_increment_and_reconciliation() {
    println!("\n🧮 [PROVING_GROUNDS]: Auditing daily load ledger...");

    let store_client = StoreClient::connect("file:mem_daily_ledger?mode=memory&cache=shared", None)
        .await
        .expect("CRITICAL_FAULT: Failed to anchor in-memory ledger.");
    let request_repository = Arc::new(RequestRepository::new(store_client));
    let daily_ledger = DailyLoadLedger::new(Arc::clone(&request_repository));

    seed_accepted(&request_repository, "user-a", 2).await;

    // 1. PRIMERA INSTANTÁNEA: hidrata desde el Ledger.
    let initial_snapshot = daily_ledger.snapshot(false).await.unwrap();
    assert_eq!(initial_snapshot.get("user-a"), Some(&2));

    // 2. INCREMENTO LOCAL: visible de inmediato dentro del proceso.
    daily_ledger.increment("user-a");
    daily_ledger.increment("user-c");
    assert_eq!(daily_ledger.cached_count_for("user-a"), 3);
    assert_eq!(daily_ledger.cached_count_for("user-c"), 1);

    // 3. CACHÉ FRESCO: dentro de la cadencia sirve el mapa incrementado.
    let cached_snapshot = daily_ledger.snapshot(false).await.unwrap();
    assert_eq!(cached_snapshot.get("user-a"), Some(&3));

    // 4. RECONCILIACIÓN FORZADA: la verdad del Ledger sobreescribe todo
    // incremento optimista (user-c jamás existió en el store).
    let reconciled_snapshot = daily_ledger.snapshot(true).await.unwrap();
    assert_eq!(reconciled_snapshot.get("user-a"), Some(&2));
    assert_eq!(reconciled_snapshot.get("user-c"), None);
    assert_eq!(daily_ledger.cached_count_for("user-c"), 0);

    println!("   ✅ [VERDICT]: Reconciliation authority certified.");
}
