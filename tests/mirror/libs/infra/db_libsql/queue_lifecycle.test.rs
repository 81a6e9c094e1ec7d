// [tests/mirror/libs/infra/db_libsql/queue_lifecycle.test.rs]
/*!
 * =================================================================
 * APARATO: CERTIFICADOR DEL LEDGER DE COLA (V1.2 - AT-LEAST-ONCE)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L3-MIRROR
 * RESPONSABILIDAD: AUDITORÍA DEL CICLO QUEUED -> LEASED -> ACK/RETRY
 *
 * # Mathematical Proof (Lease Exclusivity):
 * El test certifica que el ledger actúa como semáforo atómico: un
 * boleto arrendado con lease vigente es invisible para reclamos
 * posteriores, y un lease expirado lo redeliverea en orden FIFO.
 * =================================================================
 */

use arbiter_infra_db::repositories::QueueRepository;
use arbiter_infra_db::StoreClient;
use chrono::Duration;
use uuid::Uuid;

/**
 * CERTIFICACIÓN: Ciclo completo del boleto — FIFO, arrendamiento,
 * ack tardío y reprogramación con backoff.
 */
#[tokio::test]
async fn certify_queue_ticket_lifecycle() {
    println!("\n🗄️  [PROVING_GROUNDS]: Auditing queue ledger lifecycle...");

    let store_client = StoreClient::connect("file:mem_queue_lifecycle?mode=memory&cache=shared", None)
        .await
        .expect("CRITICAL_FAULT: Failed to anchor in-memory ledger.");
    let queue_repository = QueueRepository::new(store_client);

    let first_ticket_id = Uuid::new_v4();
    let second_ticket_id = Uuid::new_v4();

    queue_repository
        .enqueue(first_ticket_id, "request-alpha")
        .await
        .expect("QUEUE_FAULT: First enqueue rejected.");
    queue_repository
        .enqueue(second_ticket_id, "request-beta")
        .await
        .expect("QUEUE_FAULT: Second enqueue rejected.");

    // 1. FIFO: el primer boleto enfilado es el primero reclamado.
    let first_claim = queue_repository
        .claim_next(Duration::seconds(600))
        .await
        .expect("QUEUE_FAULT: Claim cycle rejected.")
        .expect("QUEUE_FAULT: Eligible ticket not delivered.");

    assert_eq!(first_claim.task_id, first_ticket_id);
    assert_eq!(first_claim.request_id, "request-alpha");
    assert_eq!(first_claim.attempt_count, 1);

    // 2. EXCLUSIVIDAD: el boleto arrendado es invisible; entrega el siguiente.
    let second_claim = queue_repository
        .claim_next(Duration::seconds(600))
        .await
        .expect("QUEUE_FAULT: Claim cycle rejected.")
        .expect("QUEUE_FAULT: Second ticket not delivered.");
    assert_eq!(second_claim.task_id, second_ticket_id);

    // 3. VACÍO: sin boletos elegibles, el reclamo retorna None.
    let exhausted_claim = queue_repository
        .claim_next(Duration::seconds(600))
        .await
        .expect("QUEUE_FAULT: Claim cycle rejected.");
    assert!(exhausted_claim.is_none());

    // 4. ACK TARDÍO: consumir el primero reduce la profundidad.
    queue_repository
        .acknowledge(first_ticket_id)
        .await
        .expect("QUEUE_FAULT: Acknowledge rejected.");
    assert_eq!(queue_repository.pending_depth().await.unwrap(), 1);

    // 5. RETRY: la reprogramación inmediata lo vuelve elegible con intento 2.
    queue_repository
        .schedule_retry(second_ticket_id, Duration::seconds(0))
        .await
        .expect("QUEUE_FAULT: Retry scheduling rejected.");

    let retried_claim = queue_repository
        .claim_next(Duration::seconds(600))
        .await
        .expect("QUEUE_FAULT: Claim cycle rejected.")
        .expect("QUEUE_FAULT: Retried ticket not delivered.");
    assert_eq!(retried_claim.task_id, second_ticket_id);
    assert_eq!(retried_claim.attempt_count, 2);

    println!("   ✅ [VERDICT]: Queue lifecycle certified.");
}

/**
 * CERTIFICACIÓN: Un arrendamiento expirado redeliverea el boleto
 * (trabajador perdido) incrementando el conteo de intentos.
 */
#[tokio::test]
async fn certify_expired_lease_redelivery() {
    let store_client = StoreClient::connect("file:mem_queue_redelivery?mode=memory&cache=shared", None)
        .await
        .expect("CRITICAL_FAULT: Failed to anchor in-memory ledger.");
    let queue_repository = QueueRepository::new(store_client);

    let ticket_id = Uuid::new_v4();
    queue_repository
        .enqueue(ticket_id, "request-gamma")
        .await
        .expect("QUEUE_FAULT: Enqueue rejected.");

    // Arrendamiento de ventana nula: expira en el mismo instante.
    let initial_claim = queue_repository
        .claim_next(Duration::seconds(0))
        .await
        .expect("QUEUE_FAULT: Claim cycle rejected.")
        .expect("QUEUE_FAULT: Ticket not delivered.");
    assert_eq!(initial_claim.attempt_count, 1);

    // El lease vencido vuelve el boleto elegible sin intervención.
    let redelivered_claim = queue_repository
        .claim_next(Duration::seconds(600))
        .await
        .expect("QUEUE_FAULT: Claim cycle rejected.")
        .expect("QUEUE_FAULT: Expired lease not redelivered.");
    assert_eq!(redelivered_claim.task_id, ticket_id);
    assert_eq!(redelivered_claim.attempt_count, 2);
}
