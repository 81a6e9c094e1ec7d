// [apps/dispatch-worker/src/pipeline.rs]
/*!
 * =================================================================
 * APARATO: ARBITRATION PIPELINE (V4.4 - GUARDED SEALING)
 * CLASIFICACIÓN: WORKER EXECUTION LAYER (ESTRATO L1-WORKER)
 * RESPONSABILIDAD: ORQUESTACIÓN COMPLETA DE UN DESPACHO AISLADO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. LOGICAL VS TRANSIENT: Solicitud inexistente, réplica absorbida y
 *    flota sin candidatos son DESENLACES tipados (no reintetables);
 *    sólo los fallos de infraestructura viajan como Err (reintetables).
 * 2. GUARDED SEALING: La secuencia sellado -> auditoría -> contador ->
 *    difusión corre en una tarea desprendida: la cancelación por
 *    límite blando jamás la abandona entre el commit y el log.
 * 3. BEST-EFFORT BROADCAST: Un intento de difusión; el fallo se traga
 *    con rastro — la consumación del despacho no depende del hub.
 *
 * # Mathematical Proof (Idempotent Replay):
 * Toda réplica del mismo boleto observa una de dos verdades: la
 * guardia previa ('user_id' ya sellado) o el CAS con cero filas. En
 * ambos casos el desenlace es 'AlreadyAssigned' sin segunda entrada
 * de auditoría — el invariante de cardinalidad del rastro se preserva.
 * =================================================================
 */

use arbiter_core_scoring::{select_winner, CandidateInfo, DispatchPolicy, UserScorer};
use arbiter_domain_models::{DispatchLog, DispatchTicket, HubFrame, Request};
use arbiter_infra_db::repositories::{DispatchLogRepository, RequestRepository, UserRepository};
use arbiter_infra_db::StoreError;
use arbiter_infra_hub_client::HubClient;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::counters::DailyLoadLedger;

/// Desenlaces tipados de un intento de despacho. Ninguno es reintetable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// El arbitraje selló la solicitud sobre el ejecutor indicado.
    Assigned(String),
    /// Réplica absorbida: la solicitud ya portaba asignatario.
    AlreadyAssigned,
    /// El Ledger no conoce la solicitud referida por el boleto.
    RequestNotFound,
    /// Ningún ejecutor calificó (ni primario ni fallback).
    NoCandidates,
}

/**
 * Orquestador de un despacho aislado: carga, puntúa, selecciona y sella.
 */
pub struct DispatchPipeline {
    request_repository: Arc<RequestRepository>,
    user_repository: Arc<UserRepository>,
    dispatch_log_repository: Arc<DispatchLogRepository>,
    daily_ledger: Arc<DailyLoadLedger>,
    /// Uplink hacia el hub; None deja el despacho mudo pero funcional.
    hub_uplink: Option<Arc<HubClient>>,
    min_score_fraction: f64,
    policy: DispatchPolicy,
}

impl DispatchPipeline {
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        request_repository: Arc<RequestRepository>,
        user_repository: Arc<UserRepository>,
        dispatch_log_repository: Arc<DispatchLogRepository>,
        daily_ledger: Arc<DailyLoadLedger>,
        hub_uplink: Option<Arc<HubClient>>,
        min_score_fraction: f64,
        policy: DispatchPolicy,
    ) -> Self {
        Self {
            request_repository,
            user_repository,
            dispatch_log_repository,
            daily_ledger,
            hub_uplink,
            min_score_fraction,
            policy,
        }
    }

    /**
     * Ejecuta el arbitraje completo del boleto reclamado.
     *
     * # Errors:
     * Sólo fallos de infraestructura (Ledger inalcanzable, mapeo
     * corrupto). Todo desenlace lógico viaja en 'DispatchOutcome'.
     */
    #[instrument(skip(self, ticket), fields(task_id = %ticket.task_id, request_id = %ticket.request_id))]
    pub async fn dispatch(&self, ticket: &DispatchTicket) -> Result<DispatchOutcome, StoreError> {
        // 1. HIDRATACIÓN DE LA SOLICITUD
        let Some(request) = self.request_repository.find_by_id(&ticket.request_id).await? else {
            error!("❌ [PIPELINE]: Request [{}] not found in ledger.", ticket.request_id);
            return Ok(DispatchOutcome::RequestNotFound);
        };

        // Guardia idempotente previa: réplicas tras un sellado consumado.
        if request.is_assigned() {
            info!("♻️  [PIPELINE]: Request [{}] already dispatched; replay absorbed.", request.id);
            return Ok(DispatchOutcome::AlreadyAssigned);
        }

        // 2. INSTANTÁNEA DE CONTADORES DIARIOS
        let daily_counts = self.daily_ledger.snapshot(false).await?;

        // 3-4. ENUMERACIÓN Y PUNTUACIÓN DE LA FLOTA
        let candidates = self.collect_candidates(&request, &daily_counts).await?;

        // 5-6. SELECCIÓN DEL GANADOR BAJO LA DOCTRINA VIGENTE
        let Some(winner) = select_winner(&candidates, self.policy) else {
            warn!("🕳️  [PIPELINE]: No eligible executor for request [{}].", request.id);
            return Ok(DispatchOutcome::NoCandidates);
        };
        let winner_identifier = winner.user_id.clone();

        // 7-10. SECUENCIA GUARDADA: el desprendimiento de la tarea
        // garantiza que la cancelación por límite blando no abandone
        // la auditoría tras un sellado consumado.
        let sealing_task = tokio::spawn(Self::seal_and_publish(
            Arc::clone(&self.request_repository),
            Arc::clone(&self.dispatch_log_repository),
            Arc::clone(&self.daily_ledger),
            self.hub_uplink.clone(),
            request,
            winner_identifier,
            ticket.task_id,
        ));

        match sealing_task.await {
            Ok(sealing_result) => sealing_result,
            Err(join_fault) => Err(StoreError::MappingError(format!(
                "sealing task collapsed: {}",
                join_fault
            ))),
        }
    }

    /**
     * Construye los registros de candidatura de toda la flota elegible.
     * Ejecutores con cuota consumada quedan excluidos antes de puntuar.
     */
    async fn collect_candidates(
        &self,
        request: &Request,
        daily_counts: &HashMap<String, u64>,
    ) -> Result<Vec<CandidateInfo>, StoreError> {
        let scorer = UserScorer::new(self.min_score_fraction);
        let candidate_profiles = self.user_repository.find_candidate_profiles().await?;

        let mut candidates = Vec::with_capacity(candidate_profiles.len());
        for profile in candidate_profiles {
            let daily_requests = daily_counts.get(&profile.id).copied().unwrap_or(0);

            // Guardia de cuota: cuota positiva consumada excluye al ejecutor.
            if let Some(quota) = profile.max_daily_requests {
                if quota > 0 && daily_requests >= u64::from(quota) {
                    continue;
                }
            }

            let parameter_scores =
                scorer.calculate_parameter_scores(&profile.params, &request.params);
            let (total_score, max_possible_score) =
                UserScorer::calculate_total_score(&parameter_scores);
            let is_fallback = !scorer.is_suitable_candidate(total_score, max_possible_score);

            candidates.push(CandidateInfo::new(
                profile.id,
                total_score,
                max_possible_score,
                daily_requests,
                profile.max_daily_requests,
                is_fallback,
            ));
        }

        Ok(candidates)
    }

    /**
     * Secuencia de consumación: CAS, auditoría, contador y difusión.
     * Corre en tarea desprendida — inmune a la cancelación del llamador.
     */
    async fn seal_and_publish(
        request_repository: Arc<RequestRepository>,
        dispatch_log_repository: Arc<DispatchLogRepository>,
        daily_ledger: Arc<DailyLoadLedger>,
        hub_uplink: Option<Arc<HubClient>>,
        request: Request,
        winner_identifier: String,
        task_id: Uuid,
    ) -> Result<DispatchOutcome, StoreError> {
        let sealed_at = Utc::now();

        // 7. PUNTO DE LINEALIZACIÓN (compare-and-set)
        let sealed = request_repository
            .seal_assignment(&request.id, &winner_identifier, sealed_at)
            .await?;

        if !sealed {
            return Ok(DispatchOutcome::AlreadyAssigned);
        }

        info!("🎯 [PIPELINE]: Request [{}] sealed on executor [{}].", request.id, winner_identifier);

        // 8. RASTRO DE AUDITORÍA
        // Un sellado sin log es una inconsistencia observable no fatal:
        // el fallo se registra y la consumación continúa.
        let audit_entry = DispatchLog {
            request_id: request.id.clone(),
            task_id,
            parent_id: request.parent_id.clone(),
            request_created_at: request.created_at,
            request_updated_at: sealed_at,
        };
        if let Err(audit_fault) = dispatch_log_repository.insert(&audit_entry).await {
            error!("⚠️ [AUDIT_GAP]: Dispatch log rejected for request [{}]: {}", request.id, audit_fault);
        }

        // 9. CONTADOR LOCAL DEL GANADOR
        daily_ledger.increment(&winner_identifier);

        // 10. DIFUSIÓN BEST-EFFORT (un intento, fallo tragado)
        if let Some(hub_client) = hub_uplink {
            let dispatched_frame = HubFrame::RequestDispatched {
                request_id: request.id.clone(),
                user: winner_identifier.clone(),
                timestamp: Utc::now(),
            };
            if let Err(broadcast_fault) = hub_client.publish_frame(&dispatched_frame).await {
                warn!("🔇 [HUB_MUTED]: Dispatch frame dropped for request [{}]: {}", request.id, broadcast_fault);
            }
        }

        Ok(DispatchOutcome::Assigned(winner_identifier))
    }
}
