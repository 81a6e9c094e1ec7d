// [libs/core/scoring-engine/src/candidate.rs]
/*!
 * =================================================================
 * APARATO: CANDIDATE ARBITRATION RECORD (V3.2 - STABLE ORDER)
 * CLASIFICACIÓN: CORE ENGINE (ESTRATO L1)
 * RESPONSABILIDAD: REGISTRO DE CANDIDATURA CON ORDEN TOTAL REPRODUCIBLE
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. FACTOR AT BIRTH: El factor de carga se cristaliza en la
 *    construcción — fórmula compuesta para primarios, degradada para
 *    fallbacks — y jamás se recalcula durante el arbitraje.
 * 2. TOTAL STABLE ORDER: (is_fallback, load_factor, user_id) bajo
 *    total_cmp: todo empate de factor se resuelve por el identificador
 *    lexicográficamente menor, garantizando ganadores reproducibles.
 * =================================================================
 */

use crate::balance::LoadBalancer;
use std::cmp::Ordering;

/**
 * Registro de candidatura de un ejecutor frente a una solicitud.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateInfo {
    /// Identificador del ejecutor candidato.
    pub user_id: String,
    /// Puntuación ponderada alcanzada.
    pub total_score: f64,
    /// Máximo ponderado alcanzable.
    pub max_score: f64,
    /// Solicitudes aceptadas hoy (instantánea del contador).
    pub daily_requests: u64,
    /// Cuota diaria declarada; None = ilimitada.
    pub max_daily_requests: Option<u32>,
    /// Verdadero cuando el candidato quedó bajo el umbral de idoneidad.
    pub is_fallback: bool,
    /// Factor de arbitraje precalculado; menor es mejor.
    pub load_factor: f64,
}

impl CandidateInfo {
    /**
     * Forja el registro calculando el factor según la clase de candidato.
     */
    #[must_use]
    pub fn new(
        user_id: String,
        total_score: f64,
        max_score: f64,
        daily_requests: u64,
        max_daily_requests: Option<u32>,
        is_fallback: bool,
    ) -> Self {
        let load_factor = if is_fallback {
            LoadBalancer::fallback_load_factor(daily_requests, max_daily_requests)
        } else {
            LoadBalancer::calculate_load_factor(
                daily_requests,
                max_daily_requests,
                total_score,
                max_score,
            )
        };

        Self {
            user_id,
            total_score,
            max_score,
            daily_requests,
            max_daily_requests,
            is_fallback,
            load_factor,
        }
    }

    /**
     * Orden total de arbitraje: primarios antes que fallbacks, factor
     * ascendente, desempate por identificador lexicográfico.
     */
    #[must_use]
    pub fn ranking_order(&self, other: &Self) -> Ordering {
        self.is_fallback
            .cmp(&other.is_fallback)
            .then(self.load_factor.total_cmp(&other.load_factor))
            .then_with(|| self.user_id.cmp(&other.user_id))
    }

    /// Factor de carga pura (sin componente de puntuación), usado por
    /// la política de umbral legada.
    #[must_use]
    pub fn pure_load_factor(&self) -> f64 {
        LoadBalancer::fallback_load_factor(self.daily_requests, self.max_daily_requests)
    }
}

// --- SUITE DE CERTIFICACIÓN DEL REGISTRO ---
