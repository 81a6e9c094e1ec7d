// [tests/mirror/apps/dispatch_worker/dispatch_pipeline.test.rs]
/*!
 * =================================================================
 * APARATO: CERTIFICADOR DEL PIPELINE DE ARBITRAJE (V1.3 - E2E)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L1-WORKER-MIRROR
 * RESPONSABILIDAD: AUDITORÍA EXTREMO A EXTREMO SOBRE LEDGER VOLÁTIL
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. SCENARIO PARITY: Cubre match exacto bajo cuota, exclusión por
 *    cuota consumada, rescate fallback y flota vacía.
 * 2. IDEMPOTENT REPLAY: La redistribución del mismo boleto no produce
 *    segunda entrada de auditoría ni segundo incremento.
 * =================================================================
 */

use arbiter_dispatch_worker::prelude::*;
use arbiter_core_scoring::DispatchPolicy;
use arbiter_domain_models::{
    Condition, DispatchTicket, Operator, Request, RequestStatus, User, Value,
};
use arbiter_infra_db::repositories::{
    DispatchLogRepository, RequestRepository, UserRepository,
};
use arbiter_infra_db::StoreClient;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

struct ArbitrationHarness {
    request_repository: Arc<RequestRepository>,
    user_repository: Arc<UserRepository>,
    dispatch_log_repository: Arc<DispatchLogRepository>,
    daily_ledger: Arc<DailyLoadLedger>,
    pipeline: DispatchPipeline,
}

/// Forja el arnés completo sobre un Ledger volátil nominado.
async fn forge_harness(memory_anchor_name: &str) -> ArbitrationHarness {
    let store_client = StoreClient::connect(
        &format!("file:{}?mode=memory&cache=shared", memory_anchor_name),
        None,
    )
    .await
    .expect("CRITICAL_FAULT: Failed to anchor in-memory ledger.");

    let request_repository = Arc::new(RequestRepository::new(store_client.clone()));
    let user_repository = Arc::new(UserRepository::new(store_client.clone()));
    let dispatch_log_repository = Arc::new(DispatchLogRepository::new(store_client));
    let daily_ledger = Arc::new(DailyLoadLedger::new(Arc::clone(&request_repository)));

    let pipeline = DispatchPipeline::new(
        Arc::clone(&request_repository),
        Arc::clone(&user_repository),
        Arc::clone(&dispatch_log_repository),
        Arc::clone(&daily_ledger),
        None, // Sin uplink de difusión: el despacho debe consumarse mudo.
        0.7,
        DispatchPolicy::ScoreLoadMixture,
    );

    ArbitrationHarness {
        request_repository,
        user_repository,
        dispatch_log_repository,
        daily_ledger,
        pipeline,
    }
}

fn executor(identifier: &str, region: &str, quota: Option<u32>) -> User {
    User {
        id: identifier.to_string(),
        username: format!("executor-{}", identifier),
        password: "sealed-material".into(),
        email: None,
        first_name: None,
        last_name: None,
        params: BTreeMap::from([("region".to_string(), Value::String(region.into()))]),
        max_daily_requests: quota,
    }
}

fn region_request(identifier: &str, region: &str) -> Request {
    let ingress_instant = Utc::now();
    Request {
        id: identifier.to_string(),
        parent_id: None,
        user_id: None,
        params: BTreeMap::from([(
            "region".to_string(),
            Condition::new(Value::String(region.into()), Operator::Eq, 1.0),
        )]),
        text: None,
        status: RequestStatus::Processed,
        created_at: ingress_instant,
        updated_at: ingress_instant,
    }
}

/// Siembra 'count' solicitudes aceptadas hoy sobre el asignatario.
async fn seed_accepted_load(
    request_repository: &RequestRepository,
    assignee: &str,
    count: usize,
) {
    let now_instant = Utc::now();
    for sequence in 0..count {
        let accepted = Request {
            id: format!("accepted-{}-{}", assignee, sequence),
            parent_id: None,
            user_id: Some(assignee.to_string()),
            params: BTreeMap::new(),
            text: None,
            status: RequestStatus::Accept,
            created_at: now_instant,
            updated_at: now_instant,
        };
        request_repository.insert(&accepted).await.unwrap();
    }
}

fn ticket_for(request_identifier: &str) -> DispatchTicket {
    DispatchTicket {
        task_id: Uuid::new_v4(),
        request_id: request_identifier.to_string(),
        attempt_count: 1,
    }
}

/**
 * CERTIFICACIÓN: Match exacto bajo cuota — gana el ejecutor menos
 * cargado; la réplica queda absorbida sin segunda auditoría.
 */
#[tokio::test]
async fn certify_exact_match_under_quota_with_idempotent_replay() {
    println!("\n⚖️  [PROVING_GROUNDS]: Auditing arbitration pipeline E2E...");

    let harness = forge_harness("mem_pipeline_s1").await;

    harness.user_repository.insert(&executor("user-a", "NW", Some(10))).await.unwrap();
    harness.user_repository.insert(&executor("user-b", "NW", Some(10))).await.unwrap();
    seed_accepted_load(&harness.request_repository, "user-a", 2).await;
    seed_accepted_load(&harness.request_repository, "user-b", 5).await;

    harness.request_repository.insert(&region_request("request-1", "NW")).await.unwrap();

    let dispatch_ticket = ticket_for("request-1");
    let outcome = harness.pipeline.dispatch(&dispatch_ticket).await.unwrap();
    assert_eq!(outcome, DispatchOutcome::Assigned("user-a".into()));

    // Invariante: el contador cacheado del ganador creció dentro del proceso.
    assert_eq!(harness.daily_ledger.cached_count_for("user-a"), 3);

    // Evidencia del Ledger: asignación sellada + una entrada de auditoría.
    let sealed_request = harness.request_repository.find_by_id("request-1").await.unwrap().unwrap();
    assert_eq!(sealed_request.user_id.as_deref(), Some("user-a"));
    assert_eq!(
        harness.dispatch_log_repository.count_for_request("request-1").await.unwrap(),
        1
    );

    // Réplica del mismo boleto: absorbida, sin segunda auditoría ni contador.
    let replay_outcome = harness.pipeline.dispatch(&dispatch_ticket).await.unwrap();
    assert_eq!(replay_outcome, DispatchOutcome::AlreadyAssigned);
    assert_eq!(
        harness.dispatch_log_repository.count_for_request("request-1").await.unwrap(),
        1
    );
    assert_eq!(harness.daily_ledger.cached_count_for("user-a"), 3);

    println!("   ✅ [VERDICT]: Arbitration and idempotent replay certified.");
}

/**
 * CERTIFICACIÓN: La cuota consumada excluye al mejor candidato; el
 * arbitraje recae en el siguiente elegible.
 */
#[tokio::test]
async fn certify_quota_exclusion() {
    let harness = forge_harness("mem_pipeline_s2").await;

    harness.user_repository.insert(&executor("user-a", "NW", Some(10))).await.unwrap();
    harness.user_repository.insert(&executor("user-b", "NW", Some(10))).await.unwrap();
    seed_accepted_load(&harness.request_repository, "user-a", 10).await;
    seed_accepted_load(&harness.request_repository, "user-b", 5).await;

    harness.request_repository.insert(&region_request("request-2", "NW")).await.unwrap();

    let outcome = harness.pipeline.dispatch(&ticket_for("request-2")).await.unwrap();
    assert_eq!(outcome, DispatchOutcome::Assigned("user-b".into()));
}

/**
 * CERTIFICACIÓN: Sin candidato sobre el umbral, el ejecutor bajo cuota
 * menos cargado es rescatado como fallback.
 */
#[tokio::test]
async fn certify_fallback_rescue() {
    let harness = forge_harness("mem_pipeline_s4").await;

    // Ambos declaran 'tier' con valores que no satisfacen la condición:
    // el peso acumula, la fracción queda en cero y toda la flota cae
    // bajo el umbral (fallback genuino, no idoneidad vacua).
    let mut silver_executor = executor("user-a", "NW", Some(10));
    silver_executor
        .params
        .insert("tier".to_string(), Value::String("silver".into()));
    let mut bronze_executor = executor("user-b", "SE", Some(10));
    bronze_executor
        .params
        .insert("tier".to_string(), Value::String("bronze".into()));

    harness.user_repository.insert(&silver_executor).await.unwrap();
    harness.user_repository.insert(&bronze_executor).await.unwrap();
    seed_accepted_load(&harness.request_repository, "user-a", 4).await;
    seed_accepted_load(&harness.request_repository, "user-b", 1).await;

    let ingress_instant = Utc::now();
    let unmatchable_request = Request {
        id: "request-3".into(),
        parent_id: None,
        user_id: None,
        params: BTreeMap::from([(
            "tier".to_string(),
            Condition::new(Value::String("gold".into()), Operator::Eq, 1.0),
        )]),
        text: None,
        status: RequestStatus::Processed,
        created_at: ingress_instant,
        updated_at: ingress_instant,
    };
    harness.request_repository.insert(&unmatchable_request).await.unwrap();

    let outcome = harness.pipeline.dispatch(&ticket_for("request-3")).await.unwrap();
    assert_eq!(outcome, DispatchOutcome::Assigned("user-b".into()));
}

/**
 * CERTIFICACIÓN: Flota completa con cuota consumada — desenlace nulo
 * tipado, jamás un error.
 */
#[tokio::test]
async fn certify_no_candidates_null_outcome() {
    let harness = forge_harness("mem_pipeline_empty").await;

    harness.user_repository.insert(&executor("user-a", "NW", Some(2))).await.unwrap();
    seed_accepted_load(&harness.request_repository, "user-a", 2).await;

    harness.request_repository.insert(&region_request("request-4", "NW")).await.unwrap();

    let outcome = harness.pipeline.dispatch(&ticket_for("request-4")).await.unwrap();
    assert_eq!(outcome, DispatchOutcome::NoCandidates);

    // Boleto hacia una solicitud fantasma: desenlace nulo no reintetable.
    let ghost_outcome = harness.pipeline.dispatch(&ticket_for("request-ghost")).await.unwrap();
    assert_eq!(ghost_outcome, DispatchOutcome::RequestNotFound);
}
