// [libs/infra/db-libsql/src/repositories/queue/mod.rs]
/*!
 * =================================================================
 * APARATO: QUEUE LEDGER REPOSITORY (V3.3 - LEASE GUARD)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: ENTREGA AL-MENOS-UNA-VEZ DE BOLETOS DE DESPACHO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. PREFETCH DISCIPLINE: Un boleto por reclamo — distribución justa
 *    entre trabajadores, sin acaparamiento.
 * 2. LATE ACK: El boleto sólo se consume tras la finalización del
 *    manejador; la pérdida del trabajador expira el arrendamiento y
 *    el boleto vuelve a ser reclamable.
 * 3. WIRE PARITY: La carga útil persiste como `{"id": request_id}` y
 *    se rehidrata en el reclamo — el contrato exacto del cable.
 * =================================================================
 */

pub mod queries;

use self::queries as sql_registry;
use crate::errors::StoreError;
use crate::StoreClient;
use arbiter_domain_models::{DispatchTicket, TicketPayload};
use chrono::{Duration, Utc};
use libsql::params;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/**
 * Repositorio de autoridad única sobre el ledger 'dispatch_queue'.
 */
pub struct QueueRepository {
    store_client: StoreClient,
}

impl QueueRepository {
    #[must_use]
    pub fn new(store_client: StoreClient) -> Self {
        Self { store_client }
    }

    /**
     * Enfila un boleto de despacho con entrega inmediata.
     *
     * # Errors:
     * - `StoreError::QueryError`: Colisión de 'task_id' o fallo del motor.
     */
    #[instrument(skip(self))]
    pub async fn enqueue(&self, task_id: Uuid, request_id: &str) -> Result<(), StoreError> {
        let ledger_connection = self.store_client.get_connection()?;

        let wire_payload = serde_json::to_string(&TicketPayload {
            id: request_id.to_string(),
        })
        .map_err(|encode_fault| StoreError::MappingError(encode_fault.to_string()))?;

        ledger_connection
            .execute(
                sql_registry::ENQUEUE_TICKET,
                params![
                    task_id.to_string(),
                    request_id,
                    wire_payload,
                    Utc::now().to_rfc3339(),
                ],
            )
            .await?;

        debug!("📨 [QUEUE]: Ticket [{}] enqueued for request [{}].", task_id, request_id);
        Ok(())
    }

    /**
     * Reclama el boleto elegible más antiguo bajo bloqueo transaccional.
     * Prioriza redeliveries (arrendamientos expirados) por antigüedad FIFO.
     *
     * # Errors:
     * - `StoreError::TransactionError`: Colapso del sellado atómico.
     * - `StoreError::MappingError`: Carga útil de cable corrupta.
     */
    #[instrument(skip(self))]
    pub async fn claim_next(
        &self,
        visibility_timeout: Duration,
    ) -> Result<Option<DispatchTicket>, StoreError> {
        let ledger_connection = self.store_client.get_connection()?;
        let now_instant = Utc::now();

        let claim_transaction = ledger_connection
            .transaction()
            .await
            .map_err(|_| StoreError::TransactionError)?;

        let mut claimable_rows = claim_transaction
            .query(
                sql_registry::FIND_CLAIMABLE_TICKET,
                params![now_instant.to_rfc3339()],
            )
            .await?;

        let Some(ticket_row) = claimable_rows.next().await? else {
            claim_transaction
                .commit()
                .await
                .map_err(|_| StoreError::TransactionError)?;
            return Ok(None);
        };

        let ticket_identifier: String = ticket_row.get(0)?;
        let wire_payload: String = ticket_row.get(1)?;
        let previous_attempts: i64 = ticket_row.get(2)?;

        let lease_horizon = now_instant + visibility_timeout;
        claim_transaction
            .execute(
                sql_registry::LEASE_TICKET,
                params![lease_horizon.to_rfc3339(), ticket_identifier.clone()],
            )
            .await?;

        claim_transaction
            .commit()
            .await
            .map_err(|_| StoreError::TransactionError)?;

        let payload: TicketPayload = serde_json::from_str(&wire_payload).map_err(|decode_fault| {
            StoreError::MappingError(format!(
                "ticket '{}' carries corrupt payload: {}",
                ticket_identifier, decode_fault
            ))
        })?;

        let task_id = Uuid::parse_str(&ticket_identifier).map_err(|parse_fault| {
            StoreError::MappingError(format!(
                "ticket identifier '{}' rejected: {}",
                ticket_identifier, parse_fault
            ))
        })?;

        let claimed_ticket = DispatchTicket {
            task_id,
            request_id: payload.id,
            attempt_count: (previous_attempts.max(0) as u32) + 1,
        };

        if claimed_ticket.attempt_count > 1 {
            info!("♻️  [QUEUE]: Ticket [{}] redelivered (attempt {}).",
                claimed_ticket.task_id, claimed_ticket.attempt_count);
        }

        Ok(Some(claimed_ticket))
    }

    /**
     * Consume el boleto tras la finalización del manejador (ack tardío).
     */
    #[instrument(skip(self))]
    pub async fn acknowledge(&self, task_id: Uuid) -> Result<(), StoreError> {
        let ledger_connection = self.store_client.get_connection()?;
        ledger_connection
            .execute(sql_registry::ACKNOWLEDGE_TICKET, params![task_id.to_string()])
            .await?;
        Ok(())
    }

    /**
     * Devuelve el boleto a la espera con el backoff indicado.
     */
    #[instrument(skip(self))]
    pub async fn schedule_retry(
        &self,
        task_id: Uuid,
        retry_delay: Duration,
    ) -> Result<(), StoreError> {
        let ledger_connection = self.store_client.get_connection()?;
        let next_attempt_instant = Utc::now() + retry_delay;

        ledger_connection
            .execute(
                sql_registry::SCHEDULE_RETRY,
                params![next_attempt_instant.to_rfc3339(), task_id.to_string()],
            )
            .await?;

        debug!("⏲️  [QUEUE]: Ticket [{}] rescheduled (+{}s).", task_id, retry_delay.num_seconds());
        Ok(())
    }

    /**
     * Profundidad viva del ledger, consumida por el endpoint de salud.
     */
    #[instrument(skip(self))]
    pub async fn pending_depth(&self) -> Result<u64, StoreError> {
        let ledger_connection = self.store_client.get_connection()?;

        let mut depth_rows = ledger_connection
            .query(sql_registry::PENDING_DEPTH, ())
            .await?;

        let depth = match depth_rows.next().await? {
            Some(depth_row) => depth_row.get::<i64>(0)?.max(0) as u64,
            None => 0,
        };

        Ok(depth)
    }
}
