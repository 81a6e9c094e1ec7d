// [libs/core/scoring-engine/src/balance.rs]
/*!
 * =================================================================
 * APARATO: COMPOSITE LOAD BALANCER (V3.2 - DUAL FORMULA)
 * CLASIFICACIÓN: CORE ENGINE (ESTRATO L1)
 * RESPONSABILIDAD: FUSIÓN DE CARGA DIARIA Y PUNTUACIÓN EN UN ESCALAR
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. QUOTALESS DEGRADATION: Los ejecutores sin cuota degradan con
 *    daily/(daily+1) — la carga crece asintóticamente hacia 1 sin
 *    bloquearlos jamás.
 * 2. DUAL FORMULA: La variante fallback ignora la puntuación y rankea
 *    por carga pura, reservada para candidatos bajo el umbral.
 *
 * # Mathematical Proof (Factor Range):
 * Con daily <= quota y score_factor en [0,1], el factor compuesto
 * 0.7·load + 0.3·(1 - score_factor) permanece en [0,1]. Menor factor
 * implica mejor candidato; el orden es total bajo total_cmp.
 * =================================================================
 */

/// Ponderación del componente de carga en el factor compuesto.
const LOAD_COMPONENT_WEIGHT: f64 = 0.7;
/// Ponderación del componente de puntuación en el factor compuesto.
const SCORE_COMPONENT_WEIGHT: f64 = 0.3;

/// Motor de cálculo del factor de carga. Sin estado; funciones puras.
pub struct LoadBalancer;

impl LoadBalancer {
    /**
     * Factor compuesto carga+puntuación. Menor es mejor.
     *
     * @param daily_requests Solicitudes aceptadas hoy por el ejecutor.
     * @param max_daily_requests Cuota diaria; None o 0 = ilimitada.
     * @param total_score Puntuación ponderada alcanzada.
     * @param max_possible_score Máximo ponderado alcanzable.
     */
    #[must_use]
    pub fn calculate_load_factor(
        daily_requests: u64,
        max_daily_requests: Option<u32>,
        total_score: f64,
        max_possible_score: f64,
    ) -> f64 {
        let load_factor = Self::raw_load_component(daily_requests, max_daily_requests);

        let score_factor = if max_possible_score > 0.0 {
            total_score / max_possible_score
        } else {
            1.0
        };

        (LOAD_COMPONENT_WEIGHT * load_factor) + (SCORE_COMPONENT_WEIGHT * (1.0 - score_factor))
    }

    /**
     * Factor degradado para candidatos fallback: carga pura, sin
     * componente de puntuación.
     */
    #[must_use]
    pub fn fallback_load_factor(daily_requests: u64, max_daily_requests: Option<u32>) -> f64 {
        Self::raw_load_component(daily_requests, max_daily_requests)
    }

    fn raw_load_component(daily_requests: u64, max_daily_requests: Option<u32>) -> f64 {
        match max_daily_requests {
            Some(quota) if quota > 0 => daily_requests as f64 / f64::from(quota),
            _ => daily_requests as f64 / (daily_requests as f64 + 1.0),
        }
    }
}

// --- SUITE DE CERTIFICACIÓN DEL BALANCEADOR ---
