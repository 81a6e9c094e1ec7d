// [libs/core/scoring-engine/src/scorer.rs]
/*!
 * =================================================================
 * APARATO: WEIGHTED USER SCORER (V3.3 - PRECISION BONUS)
 * CLASIFICACIÓN: CORE ENGINE (ESTRATO L1)
 * RESPONSABILIDAD: AGREGACIÓN PONDERADA Y VEREDICTO DE IDONEIDAD
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. BONUS STRATA: Matches numéricos escalan su base por la precisión
 *    relativa 1 - |u - v| / max(|u|,|v|), sujeta a piso cero.
 * 2. VACUOUS SUITABILITY: Una solicitud sin condiciones declara idóneo
 *    a todo candidato (máximo alcanzable nulo).
 *
 * # Mathematical Proof (Score Bound):
 * Para cada condición, la contribución es base·peso con base en [0,1],
 * mientras el máximo acumula peso. Por inducción sobre el mapa de
 * condiciones: total_score <= max_possible_score con pesos no negativos.
 * =================================================================
 */

use crate::matcher::evaluate_condition;
use arbiter_domain_models::{Condition, Value};
use std::collections::BTreeMap;

/// Fracción mínima de idoneidad aplicada cuando el despliegue no la declara.
pub const DEFAULT_MIN_SCORE_FRACTION: f64 = 0.7;

/// Resultado de la evaluación de una condición individual.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamScore {
    /// Base de puntuación en [0,1] (tras el bono de precisión).
    pub value: f64,
    /// Peso declarado de la condición.
    pub weight: f64,
    /// Veredicto del matcher para esta condición.
    pub matches: bool,
}

impl ParamScore {
    /// Contribución efectiva al total: base·peso sólo si hubo match.
    #[must_use]
    pub fn weighted_score(&self) -> f64 {
        if self.matches {
            self.value * self.weight
        } else {
            0.0
        }
    }
}

/**
 * Calculadora de idoneidad de un ejecutor frente a una solicitud.
 */
#[derive(Debug, Clone, Copy)]
pub struct UserScorer {
    min_score_fraction: f64,
}

impl UserScorer {
    #[must_use]
    pub fn new(min_score_fraction: f64) -> Self {
        Self { min_score_fraction }
    }

    /**
     * Evalúa cada condición de la solicitud contra los parámetros del
     * ejecutor, aplicando el bono de precisión a los matches numéricos.
     */
    #[must_use]
    pub fn calculate_parameter_scores(
        &self,
        user_params: &BTreeMap<String, Value>,
        request_conditions: &BTreeMap<String, Condition>,
    ) -> Vec<ParamScore> {
        let mut parameter_scores = Vec::with_capacity(request_conditions.len());

        for (condition_key, condition) in request_conditions {
            let user_value = user_params.get(condition_key);
            let (matches, weight) = evaluate_condition(user_value, condition);

            let mut base_score = if matches { 1.0 } else { 0.0 };

            if matches {
                if let (Some(user_numeric), Some(target_numeric)) = (
                    user_value.and_then(Value::as_numeric),
                    condition.value.as_numeric(),
                ) {
                    let absolute_difference = (user_numeric - target_numeric).abs();
                    let dominant_magnitude = user_numeric.abs().max(target_numeric.abs());
                    if dominant_magnitude != 0.0 {
                        let precision_factor = 1.0 - (absolute_difference / dominant_magnitude);
                        base_score = (base_score * precision_factor).max(0.0);
                    }
                }
            }

            parameter_scores.push(ParamScore {
                value: base_score,
                weight,
                matches,
            });
        }

        parameter_scores
    }

    /// Agrega las evaluaciones en (total, máximo alcanzable).
    #[must_use]
    pub fn calculate_total_score(parameter_scores: &[ParamScore]) -> (f64, f64) {
        let mut total_score = 0.0;
        let mut max_possible_score = 0.0;

        for parameter_score in parameter_scores {
            total_score += parameter_score.weighted_score();
            max_possible_score += parameter_score.weight;
        }

        (total_score, max_possible_score)
    }

    /// Veredicto de idoneidad: total/max >= fracción mínima.
    /// Máximo alcanzable nulo declara idoneidad vacua.
    #[must_use]
    pub fn is_suitable_candidate(&self, total_score: f64, max_possible_score: f64) -> bool {
        if max_possible_score == 0.0 {
            return true;
        }
        (total_score / max_possible_score) >= self.min_score_fraction
    }
}

impl Default for UserScorer {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SCORE_FRACTION)
    }
}

// --- SUITE DE CERTIFICACIÓN DEL SCORER ---
