// [apps/dispatch-worker/src/engine.rs]
/*!
 * =================================================================
 * APARATO: QUEUE CONSUMPTION ENGINE (V4.3 - LATE ACK DOCTRINE)
 * CLASIFICACIÓN: WORKER EXECUTION LAYER (ESTRATO L1-WORKER)
 * RESPONSABILIDAD: BUCLE DE RECLAMO, LÍMITE BLANDO Y RESOLUCIÓN
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. LATE ACK: El boleto se consume sólo tras la finalización del
 *    pipeline; todo desenlace lógico consume, todo fallo transitorio
 *    reprograma con backoff acotado.
 * 2. SOFT TIME LIMIT: El timeout aborta antes del sellado; la fase de
 *    consumación corre desprendida y es inmune a la cancelación. La
 *    réplica posterior queda absorbida por la guardia idempotente.
 * 3. CRASH SAFETY: Si el propio ack/retry colapsa, el arrendamiento
 *    expira y el ledger redeliverea — el boleto jamás se pierde.
 * =================================================================
 */

use arbiter_infra_db::repositories::QueueRepository;
use arbiter_domain_models::DispatchTicket;
use chrono::Duration as ChronoDuration;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{error, info, instrument, warn};

use crate::pipeline::{DispatchOutcome, DispatchPipeline};

/// Techo absoluto del backoff de reintento transitorio.
const MAX_RETRY_BACKOFF_SECONDS: i64 = 300;

/// Directivas operativas del motor de consumo.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Ventana de visibilidad del arrendamiento por reclamo.
    pub visibility_timeout_seconds: i64,
    /// Límite blando de ejecución de un despacho.
    pub soft_time_limit_seconds: u64,
    /// Backoff base de reintento transitorio (escala por intento).
    pub retry_backoff_seconds: i64,
    /// Pausa del bucle ante ledger vacío.
    pub poll_interval_millis: u64,
    /// Cadencia legada de reintento ante flota sin candidatos;
    /// None consume el boleto con desenlace nulo (doctrina vigente).
    pub no_candidates_retry_seconds: Option<i64>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            visibility_timeout_seconds: 600,
            soft_time_limit_seconds: 30,
            retry_backoff_seconds: 300,
            poll_interval_millis: 1000,
            no_candidates_retry_seconds: None,
        }
    }
}

/**
 * Motor de consumo del ledger de cola. Un boleto a la vez (prefetch 1);
 * dentro del proceso, cada despacho corre a término antes del siguiente.
 */
pub struct DispatchEngine {
    queue_repository: Arc<QueueRepository>,
    pipeline: Arc<DispatchPipeline>,
    is_operational_signal: Arc<AtomicBool>,
    settings: EngineSettings,
}

impl DispatchEngine {
    #[must_use]
    pub fn new(
        queue_repository: Arc<QueueRepository>,
        pipeline: Arc<DispatchPipeline>,
        is_operational_signal: Arc<AtomicBool>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            queue_repository,
            pipeline,
            is_operational_signal,
            settings,
        }
    }

    /**
     * Bucle principal de consumo. Retorna al recibir la señal de
     * terminación ordenada del shell.
     */
    #[instrument(skip(self))]
    pub async fn ignite(&self) {
        info!("🚀 [ENGINE]: Queue consumption ignition (visibility {}s, soft limit {}s).",
            self.settings.visibility_timeout_seconds, self.settings.soft_time_limit_seconds);

        let visibility_window = ChronoDuration::seconds(self.settings.visibility_timeout_seconds);
        let idle_pause = Duration::from_millis(self.settings.poll_interval_millis);

        while self.is_operational_signal.load(Ordering::SeqCst) {
            match self.queue_repository.claim_next(visibility_window).await {
                Ok(Some(claimed_ticket)) => {
                    self.process_ticket(claimed_ticket).await;
                }
                Ok(None) => {
                    sleep(idle_pause).await;
                }
                Err(claim_fault) => {
                    error!("⚠️ [ENGINE]: Claim cycle rejected by ledger: {}", claim_fault);
                    sleep(idle_pause).await;
                }
            }
        }

        info!("🛑 [ENGINE]: Termination signal honored. Consumption loop sealed.");
    }

    /**
     * Resuelve un boleto reclamado: pipeline bajo límite blando,
     * ack tardío o reprogramación con backoff acotado.
     */
    #[instrument(skip(self, ticket), fields(task_id = %ticket.task_id, attempt = ticket.attempt_count))]
    async fn process_ticket(&self, ticket: DispatchTicket) {
        let soft_limit = Duration::from_secs(self.settings.soft_time_limit_seconds);
        let dispatch_verdict = timeout(soft_limit, self.pipeline.dispatch(&ticket)).await;

        match dispatch_verdict {
            Ok(Ok(DispatchOutcome::Assigned(winner_identifier))) => {
                info!("✅ [ENGINE]: Ticket [{}] resolved -> executor [{}].", ticket.task_id, winner_identifier);
                self.acknowledge_ticket(&ticket).await;
            }
            Ok(Ok(DispatchOutcome::AlreadyAssigned)) => {
                info!("♻️  [ENGINE]: Ticket [{}] replay absorbed by idempotent guard.", ticket.task_id);
                self.acknowledge_ticket(&ticket).await;
            }
            Ok(Ok(DispatchOutcome::RequestNotFound)) => {
                // Desenlace no reintetable: el boleto se consume con rastro.
                error!("🕳️  [ENGINE]: Ticket [{}] references unknown request [{}].", ticket.task_id, ticket.request_id);
                self.acknowledge_ticket(&ticket).await;
            }
            Ok(Ok(DispatchOutcome::NoCandidates)) => match self.settings.no_candidates_retry_seconds {
                // Doctrina legada: reintento perpetuo a cadencia fija.
                Some(legacy_cadence_seconds) => {
                    warn!("⏳ [ENGINE]: No candidates for ticket [{}]; legacy retry in {}s.",
                        ticket.task_id, legacy_cadence_seconds);
                    self.reschedule_ticket(&ticket, ChronoDuration::seconds(legacy_cadence_seconds))
                        .await;
                }
                // Doctrina vigente: desenlace nulo, boleto consumado.
                None => {
                    warn!("🕳️  [ENGINE]: No candidates for ticket [{}]; null outcome recorded.", ticket.task_id);
                    self.acknowledge_ticket(&ticket).await;
                }
            },
            Ok(Err(transient_fault)) => {
                let backoff_window = self.bounded_backoff(ticket.attempt_count);
                error!("⚠️ [ENGINE]: Ticket [{}] hit transient fault ({}); retry in {}s.",
                    ticket.task_id, transient_fault, backoff_window.num_seconds());
                self.reschedule_ticket(&ticket, backoff_window).await;
            }
            Err(_elapsed) => {
                // El límite blando cancela antes del sellado; si la fase
                // guardada ya corría, la réplica será absorbida.
                let backoff_window = self.bounded_backoff(ticket.attempt_count);
                warn!("⏱️  [ENGINE]: Ticket [{}] exceeded soft time limit; retry in {}s.",
                    ticket.task_id, backoff_window.num_seconds());
                self.reschedule_ticket(&ticket, backoff_window).await;
            }
        }
    }

    /// Backoff lineal por intento, sellado por el techo absoluto.
    fn bounded_backoff(&self, attempt_count: u32) -> ChronoDuration {
        let scaled_seconds = self
            .settings
            .retry_backoff_seconds
            .saturating_mul(i64::from(attempt_count.max(1)));
        ChronoDuration::seconds(scaled_seconds.min(MAX_RETRY_BACKOFF_SECONDS))
    }

    async fn acknowledge_ticket(&self, ticket: &DispatchTicket) {
        if let Err(ack_fault) = self.queue_repository.acknowledge(ticket.task_id).await {
            // El arrendamiento expirará y el ledger redeliverará; la
            // réplica queda absorbida por la guardia idempotente.
            error!("⚠️ [ENGINE]: Ack rejected for ticket [{}]: {}", ticket.task_id, ack_fault);
        }
    }

    async fn reschedule_ticket(&self, ticket: &DispatchTicket, backoff_window: ChronoDuration) {
        if let Err(retry_fault) = self
            .queue_repository
            .schedule_retry(ticket.task_id, backoff_window)
            .await
        {
            error!("⚠️ [ENGINE]: Retry scheduling rejected for ticket [{}]: {}", ticket.task_id, retry_fault);
        }
    }
}
