// [libs/core/scoring-engine/src/matcher.rs]
/*!
 * =================================================================
 * APARATO: TYPED CONDITION MATCHER (V3.2 - OPERAND SHIELD)
 * CLASIFICACIÓN: CORE ENGINE (ESTRATO L1)
 * RESPONSABILIDAD: EVALUACIÓN DE UNA COMPARACIÓN TIPADA AISLADA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ABSENT VALUE CONTRACT: Valor de ejecutor ausente retorna
 *    (false, 0.0) — la condición no aporta peso alguno.
 * 2. NORMALIZATION GATE: Cadenas portando 'T' intentan anclarse como
 *    instante UTC antes de comparar; el fallo de parseo las deja
 *    intactas como cadenas.
 * 3. OPERAND SHIELD: El desajuste de tipos en comparaciones de orden
 *    degrada a (false, peso); la igualdad heterogénea es falsa por
 *    construcción (y su negación, verdadera).
 *
 * # Mathematical Proof (Heterogeneous Equality):
 * Sea V el conjunto de variantes. Para u, v con variantes distintas y
 * no numéricas: EQ(u,v) = false y NE(u,v) = true, sin error — la
 * desigualdad trivial entre universos disjuntos.
 * =================================================================
 */

use arbiter_domain_models::{Condition, Operator, Value};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use std::cmp::Ordering;

/**
 * Evalúa una condición ponderada contra el valor declarado del ejecutor.
 * Retorna (hay_match, peso_de_la_condición).
 */
#[must_use]
pub fn evaluate_condition(user_value: Option<&Value>, condition: &Condition) -> (bool, f64) {
    let Some(user_value) = user_value else {
        return (false, 0.0);
    };

    let weight = condition.height;
    let normalized_user_value = normalize_comparable(user_value);
    let normalized_target_value = normalize_comparable(&condition.value);

    let matches = match condition.operator {
        Operator::Eq => values_equal(&normalized_user_value, &normalized_target_value),
        Operator::Ne => !values_equal(&normalized_user_value, &normalized_target_value),
        Operator::Gt => ordering_satisfies(&normalized_user_value, &normalized_target_value, |o| {
            o == Ordering::Greater
        }),
        Operator::Gte => ordering_satisfies(&normalized_user_value, &normalized_target_value, |o| {
            o != Ordering::Less
        }),
        Operator::Lt => ordering_satisfies(&normalized_user_value, &normalized_target_value, |o| {
            o == Ordering::Less
        }),
        Operator::Lte => ordering_satisfies(&normalized_user_value, &normalized_target_value, |o| {
            o != Ordering::Greater
        }),
        Operator::Icontains => case_insensitive_contains(
            &normalized_user_value,
            &normalized_target_value,
        ),
    };

    (matches, weight)
}

/**
 * Normalización previa a la comparación: toda cadena portando 'T' se
 * intenta anclar como instante UTC ('Z' equivale a +00:00; instantes
 * naive se asumen UTC). El fallo de parseo preserva la cadena.
 */
#[must_use]
pub fn normalize_comparable(raw_value: &Value) -> Value {
    if let Value::String(raw_text) = raw_value {
        if raw_text.contains('T') {
            if let Some(anchored_instant) = parse_instant_utc(raw_text) {
                return Value::DateTime(anchored_instant);
            }
        }
    }
    raw_value.clone()
}

fn parse_instant_utc(raw_text: &str) -> Option<DateTime<Utc>> {
    if let Ok(aware_instant) = DateTime::parse_from_rfc3339(raw_text) {
        return Some(aware_instant.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw_text, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive_instant| Utc.from_utc_datetime(&naive_instant))
}

// --- ESTRATO DE COMPARACIÓN TIPADA ---

fn values_equal(left_operand: &Value, right_operand: &Value) -> bool {
    // Sinapsis numérica: enteros y flotantes comparan en el mismo eje.
    if let (Some(left_numeric), Some(right_numeric)) =
        (left_operand.as_numeric(), right_operand.as_numeric())
    {
        return left_numeric == right_numeric;
    }

    match (left_operand, right_operand) {
        (Value::Bool(left), Value::Bool(right)) => left == right,
        (Value::String(left), Value::String(right)) => left == right,
        (Value::DateTime(left), Value::DateTime(right)) => left == right,
        _ => false,
    }
}

fn order_values(left_operand: &Value, right_operand: &Value) -> Option<Ordering> {
    if let (Some(left_numeric), Some(right_numeric)) =
        (left_operand.as_numeric(), right_operand.as_numeric())
    {
        return left_numeric.partial_cmp(&right_numeric);
    }

    match (left_operand, right_operand) {
        (Value::String(left), Value::String(right)) => Some(left.cmp(right)),
        (Value::DateTime(left), Value::DateTime(right)) => Some(left.cmp(right)),
        (Value::Bool(left), Value::Bool(right)) => Some(left.cmp(right)),
        _ => None,
    }
}

fn ordering_satisfies(
    left_operand: &Value,
    right_operand: &Value,
    verdict: impl Fn(Ordering) -> bool,
) -> bool {
    order_values(left_operand, right_operand).map(verdict).unwrap_or(false)
}

/// Subcadena sin distinción de mayúsculas: el objetivo de la condición
/// debe aparecer dentro del valor del ejecutor. Exclusivo de cadenas.
fn case_insensitive_contains(user_operand: &Value, target_operand: &Value) -> bool {
    match (user_operand, target_operand) {
        (Value::String(user_text), Value::String(target_text)) => user_text
            .to_lowercase()
            .contains(&target_text.to_lowercase()),
        _ => false,
    }
}

// --- SUITE DE CERTIFICACIÓN DEL MATCHER ---
