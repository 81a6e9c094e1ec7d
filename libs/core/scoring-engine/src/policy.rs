// [libs/core/scoring-engine/src/policy.rs]
/*!
 * =================================================================
 * APARATO: WINNER SELECTION POLICIES (V3.3 - DUAL DOCTRINE)
 * CLASIFICACIÓN: CORE ENGINE (ESTRATO L1)
 * RESPONSABILIDAD: ELECCIÓN DETERMINISTA DEL GANADOR DEL ARBITRAJE
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. MIXTURE DOCTRINE (default): Primarios por factor compuesto
 *    ascendente; fallbacks sólo ante ausencia total de primarios.
 * 2. THRESHOLD DOCTRINE (legado): Entre los candidatos con puntuación
 *    positiva, la banda dentro del 5% del mejor compite por carga pura.
 *    Sin puntuaciones positivas, degrada a carga pura global.
 * 3. REPRODUCIBILITY: Ambas doctrinas desempatan por identificador
 *    lexicográfico menor.
 * =================================================================
 */

use crate::candidate::CandidateInfo;
use std::cmp::Ordering;

/// Banda porcentual de tolerancia de la doctrina de umbral legada.
pub const HEIGHT_THRESHOLD_PERCENT: f64 = 5.0;

/// Doctrinas de selección disponibles para el pipeline de despacho.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchPolicy {
    /// Mixtura carga/puntuación con clases primario/fallback.
    #[default]
    ScoreLoadMixture,
    /// Banda del 5% sobre la mejor puntuación, resuelta por carga pura.
    HeightThreshold,
}

impl DispatchPolicy {
    /// Resuelve la etiqueta de configuración a su doctrina.
    #[must_use]
    pub fn from_label(raw_label: &str) -> Option<Self> {
        match raw_label.trim().to_ascii_lowercase().as_str() {
            "mixture" | "score_load_mixture" => Some(DispatchPolicy::ScoreLoadMixture),
            "height_threshold" | "threshold" => Some(DispatchPolicy::HeightThreshold),
            _ => None,
        }
    }

    /// Etiqueta nominal para rastros y configuración.
    #[must_use]
    pub fn as_label(&self) -> &'static str {
        match self {
            DispatchPolicy::ScoreLoadMixture => "score_load_mixture",
            DispatchPolicy::HeightThreshold => "height_threshold",
        }
    }
}

/**
 * Elige el ganador del arbitraje bajo la doctrina indicada.
 * Retorna None sólo ante un conjunto de candidatos vacío.
 */
#[must_use]
pub fn select_winner(
    candidates: &[CandidateInfo],
    policy: DispatchPolicy,
) -> Option<&CandidateInfo> {
    if candidates.is_empty() {
        return None;
    }

    match policy {
        // El orden total (is_fallback, factor, id) implementa la doctrina
        // completa: el mínimo es el primario menos cargado si existe
        // algún primario, o el mejor fallback en su defecto.
        DispatchPolicy::ScoreLoadMixture => {
            candidates.iter().min_by(|left, right| left.ranking_order(right))
        }
        DispatchPolicy::HeightThreshold => select_by_height_threshold(candidates),
    }
}

fn select_by_height_threshold(candidates: &[CandidateInfo]) -> Option<&CandidateInfo> {
    let best_positive_score = candidates
        .iter()
        .map(|candidate| candidate.total_score)
        .filter(|score| *score > 0.0)
        .fold(f64::NEG_INFINITY, f64::max);

    let contenders: Vec<&CandidateInfo> = if best_positive_score > 0.0 {
        let admission_floor = best_positive_score * (1.0 - HEIGHT_THRESHOLD_PERCENT / 100.0);
        candidates
            .iter()
            .filter(|candidate| candidate.total_score > 0.0)
            .filter(|candidate| candidate.total_score >= admission_floor)
            .collect()
    } else {
        // Sin puntuaciones positivas: toda la flota compite por carga pura.
        candidates.iter().collect()
    };

    contenders.into_iter().min_by(|left, right| {
        pure_load_order(left, right)
    })
}

fn pure_load_order(left: &CandidateInfo, right: &CandidateInfo) -> Ordering {
    left.pure_load_factor()
        .total_cmp(&right.pure_load_factor())
        .then_with(|| left.user_id.cmp(&right.user_id))
}

// --- SUITE DE CERTIFICACIÓN DE DOCTRINAS ---
