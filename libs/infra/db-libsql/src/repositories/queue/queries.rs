// [libs/infra/db-libsql/src/repositories/queue/queries.rs]
/*!
 * =================================================================
 * APARATO: QUEUE LEDGER SQL STORE (V3.2 - AT-LEAST-ONCE SQL)
 * CLASIFICACIÓN: INFRASTRUCTURE SQL (ESTRATO L3)
 * RESPONSABILIDAD: SENTENCIAS ATÓMICAS DEL LEDGER DE COLA
 *
 * # Mathematical Proof (Lease Exclusivity):
 * El reclamo usa guardias de estado dentro de una transacción: un
 * boleto es elegible si está 'queued' y vencido su backoff, o 'leased'
 * con arrendamiento expirado (redelivery). La transición de propiedad
 * es una operación indivisible — dos trabajadores jamás arriendan el
 * mismo boleto vigente.
 * =================================================================
 */

// --- ESTRATO DE INGESTA ---

/// Inscribe un boleto recién enfilado con su carga útil de cable.
pub const ENQUEUE_TICKET: &str = r#"
    INSERT INTO dispatch_queue (
        task_id, request_id, payload, status,
        attempt_count, next_attempt_at, created_at
    ) VALUES (?1, ?2, ?3, 'queued', 0, ?4, ?4)
"#;

// --- ESTRATO DE RECLAMO (FIFO + REDELIVERY) ---

/// Localiza el boleto elegible más antiguo: en espera con backoff
/// vencido, o arrendado con lease expirado (trabajador perdido).
pub const FIND_CLAIMABLE_TICKET: &str = r#"
    SELECT task_id, payload, attempt_count
    FROM dispatch_queue
    WHERE (status = 'queued' AND next_attempt_at <= ?1)
       OR (status = 'leased' AND leased_until IS NOT NULL AND leased_until <= ?1)
    ORDER BY created_at ASC
    LIMIT 1
"#;

/// Transfiere la propiedad del boleto estampando el arrendamiento.
pub const LEASE_TICKET: &str = r#"
    UPDATE dispatch_queue
    SET status = 'leased',
        leased_until = ?1,
        attempt_count = attempt_count + 1
    WHERE task_id = ?2
"#;

// --- ESTRATO DE RESOLUCIÓN ---

/// Consume el boleto tras la finalización del manejador (ack tardío).
pub const ACKNOWLEDGE_TICKET: &str = r#"
    DELETE FROM dispatch_queue WHERE task_id = ?1
"#;

/// Devuelve el boleto a la espera con backoff programado.
pub const SCHEDULE_RETRY: &str = r#"
    UPDATE dispatch_queue
    SET status = 'queued',
        next_attempt_at = ?1,
        leased_until = NULL
    WHERE task_id = ?2
"#;

// --- ESTRATO DE OBSERVABILIDAD ---

/// Profundidad total del ledger (boletos vivos en cualquier estado).
pub const PENDING_DEPTH: &str = r#"
    SELECT COUNT(*) FROM dispatch_queue
"#;
