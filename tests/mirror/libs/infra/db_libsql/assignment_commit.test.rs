// [tests/mirror/libs/infra/db_libsql/assignment_commit.test.rs]
/*!
 * =================================================================
 * APARATO: CERTIFICADOR DEL SELLADO CAS (V1.1 - LINEARIZATION POINT)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L3-MIRROR
 * RESPONSABILIDAD: AUDITORÍA DEL COMMIT COMPARE-AND-SET
 *
 * # Mathematical Proof (At-Most-One Assignment):
 * Dos sellados en serie sobre la misma solicitud: el primero
 * transiciona NULL -> id, el segundo observa la guardia falsa y
 * retorna cero filas. La asignación es at-most-one por construcción.
 * =================================================================
 */

use arbiter_domain_models::{Condition, Operator, Request, RequestStatus, User, Value};
use arbiter_infra_db::repositories::{RequestRepository, UserRepository};
use arbiter_infra_db::StoreClient;
use chrono::Utc;
use std::collections::BTreeMap;

fn sample_user(identifier: &str) -> User {
    User {
        id: identifier.to_string(),
        username: format!("executor-{}", identifier),
        password: "sealed-material".into(),
        email: None,
        first_name: None,
        last_name: None,
        params: BTreeMap::from([("region".to_string(), Value::String("NW".into()))]),
        max_daily_requests: Some(10),
    }
}

fn sample_request(identifier: &str) -> Request {
    let ingress_instant = Utc::now();
    Request {
        id: identifier.to_string(),
        parent_id: Some("request-origin".into()),
        user_id: None,
        params: BTreeMap::from([(
            "region".to_string(),
            Condition::new(Value::String("NW".into()), Operator::Eq, 1.0),
        )]),
        text: Some("perimeter survey".into()),
        status: RequestStatus::Processed,
        created_at: ingress_instant,
        updated_at: ingress_instant,
    }
}

/**
 * CERTIFICACIÓN: El CAS sella una única vez y la réplica retorna falso
 * sin alterar al asignatario original.
 */
#[tokio::test]
async fn certify_compare_and_set_sealing() {
    println!("\n🔏 [PROVING_GROUNDS]: Auditing CAS assignment sealing...");

    let store_client = StoreClient::connect("file:mem_cas_sealing?mode=memory&cache=shared", None)
        .await
        .expect("CRITICAL_FAULT: Failed to anchor in-memory ledger.");

    let user_repository = UserRepository::new(store_client.clone());
    let request_repository = RequestRepository::new(store_client);

    user_repository.insert(&sample_user("user-a")).await.unwrap();
    user_repository.insert(&sample_user("user-b")).await.unwrap();
    request_repository.insert(&sample_request("request-1")).await.unwrap();

    // 1. PRIMER SELLADO: consuma la asignación.
    let first_seal = request_repository
        .seal_assignment("request-1", "user-a", Utc::now())
        .await
        .expect("STORE_FAULT: Sealing rejected.");
    assert!(first_seal);

    // 2. RÉPLICA: la guardia absorbe el segundo sellado.
    let replayed_seal = request_repository
        .seal_assignment("request-1", "user-b", Utc::now())
        .await
        .expect("STORE_FAULT: Replay sealing rejected.");
    assert!(!replayed_seal);

    // 3. VERDAD DEL LEDGER: el asignatario original permanece.
    let sealed_request = request_repository
        .find_by_id("request-1")
        .await
        .unwrap()
        .expect("STORE_FAULT: Request vanished after sealing.");
    assert_eq!(sealed_request.user_id.as_deref(), Some("user-a"));
    assert!(sealed_request.is_assigned());

    // 4. ROUNDTRIP DE CONDICIONES: el mapa tipado sobrevive al Ledger.
    let region_condition = &sealed_request.params["region"];
    assert_eq!(region_condition.operator, Operator::Eq);
    assert_eq!(region_condition.value, Value::String("NW".into()));

    println!("   ✅ [VERDICT]: CAS sealing certified.");
}

/**
 * CERTIFICACIÓN: El sellado hacia una solicitud inexistente afecta
 * cero filas (desenlace lógico aguas arriba).
 */
#[tokio::test]
async fn certify_sealing_unknown_request_is_inert() {
    let store_client = StoreClient::connect("file:mem_cas_unknown?mode=memory&cache=shared", None)
        .await
        .expect("CRITICAL_FAULT: Failed to anchor in-memory ledger.");
    let request_repository = RequestRepository::new(store_client);

    let sealed = request_repository
        .seal_assignment("request-ghost", "user-a", Utc::now())
        .await
        .expect("STORE_FAULT: Sealing rejected.");
    assert!(!sealed);

    let hydrated = request_repository.find_by_id("request-ghost").await.unwrap();
    assert!(hydrated.is_none());
}
