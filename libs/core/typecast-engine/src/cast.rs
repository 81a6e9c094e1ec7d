// [libs/core/typecast-engine/src/cast.rs]
/*!
 * =================================================================
 * APARATO: PARAM COERCION ENGINE (V3.2 - TOTAL CAST)
 * CLASIFICACIÓN: CORE ENGINE (ESTRATO L1)
 * RESPONSABILIDAD: COERCIÓN DE VALORES CRUDOS Y VALIDACIÓN DE CONDICIONES
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. TOTAL FUNCTION: Sobre la taxonomía declarada el casteo siempre
 *    produce un valor tipado o un error semántico; jamás un pánico.
 * 2. TRUTHINESS STRATA: Los booleanos aplican el conjunto veritativo
 *    {"1","true","yes","on"} sobre cadenas normalizadas y la veracidad
 *    estándar sobre el resto de literales.
 * 3. ISO-8601 SOVEREIGNTY: Instantes con 'Z' u offset explícito anclan
 *    a UTC; instantes naive se asumen UTC.
 * =================================================================
 */

use crate::errors::{CastError, ValidationError};
use crate::registry::KeyTypeRegistry;
use arbiter_domain_models::{Condition, Operator, ParamKind, Value};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Conjunto veritativo aplicado a cadenas bajo coerción booleana.
const TRUTHY_STRING_TOKENS: [&str; 4] = ["1", "true", "yes", "on"];

/// Operador aplicado cuando la condición no declara uno.
const DEFAULT_OPERATOR_TOKEN: &str = "EQ";

/**
 * Castea un valor crudo contra un tipo declarado del registro.
 *
 * # Errors:
 * - `CastError::NotCoercible`: El literal no admite el tipo destino.
 * - `CastError::MalformedDatetime`: Cadena fuera del formato ISO-8601.
 */
pub fn cast_value(raw_value: &JsonValue, target_kind: ParamKind) -> Result<Value, CastError> {
    match target_kind {
        ParamKind::String => Ok(Value::String(render_as_string(raw_value))),
        ParamKind::Integer => cast_integer(raw_value),
        ParamKind::Float => cast_float(raw_value),
        ParamKind::Boolean => Ok(Value::Bool(coerce_truthiness(raw_value))),
        ParamKind::Datetime => cast_datetime(raw_value),
    }
}

/**
 * Valida y castea un mapa completo de condiciones de solicitud.
 * Cada entrada exige la forma `{value, operator, height}`; el operador
 * se normaliza a mayúsculas y se valida contra el conjunto cerrado; el
 * peso se coerciona a flotante con 1.0 por defecto.
 *
 * # Errors:
 * Retorna el primer fallo semántico con la clave ofensora, listo para
 * el renderizado HTTP 400 en la frontera.
 */
pub fn cast_condition_map(
    raw_params: &serde_json::Map<String, JsonValue>,
    registry: &KeyTypeRegistry,
) -> Result<BTreeMap<String, Condition>, ValidationError> {
    let mut validated_conditions = BTreeMap::new();

    for (parameter_key, raw_entry) in raw_params {
        let entry_object = raw_entry
            .as_object()
            .ok_or_else(|| ValidationError::MalformedCondition {
                key: parameter_key.clone(),
            })?;

        let operator_token = match entry_object.get("operator") {
            None | Some(JsonValue::Null) => DEFAULT_OPERATOR_TOKEN.to_string(),
            Some(JsonValue::String(raw_token)) => raw_token.clone(),
            Some(_) => {
                return Err(ValidationError::MalformedCondition {
                    key: parameter_key.clone(),
                })
            }
        };

        let operator = Operator::from_token(&operator_token).ok_or_else(|| {
            ValidationError::UnsupportedOperator {
                key: parameter_key.clone(),
                token: operator_token.clone(),
            }
        })?;

        let height = coerce_height(entry_object.get("height")).ok_or_else(|| {
            ValidationError::MalformedHeight {
                key: parameter_key.clone(),
            }
        })?;

        let raw_condition_value = entry_object.get("value").cloned().unwrap_or(JsonValue::Null);
        let target_kind = registry.kind_for(parameter_key);
        let casted_value = cast_value(&raw_condition_value, target_kind).map_err(|source| {
            ValidationError::UncastableValue {
                key: parameter_key.clone(),
                source,
            }
        })?;

        validated_conditions.insert(
            parameter_key.clone(),
            Condition::new(casted_value, operator, height),
        );
    }

    Ok(validated_conditions)
}

// --- ESTRATO DE COERCIÓN POR TIPO ---

/// Renderizado textual de cualquier literal; las cadenas se devuelven
/// sin comillas, el resto conserva su forma JSON compacta.
fn render_as_string(raw_value: &JsonValue) -> String {
    match raw_value {
        JsonValue::String(inner_text) => inner_text.clone(),
        other_literal => other_literal.to_string(),
    }
}

fn cast_integer(raw_value: &JsonValue) -> Result<Value, CastError> {
    match raw_value {
        JsonValue::Number(numeric_literal) => {
            if let Some(exact_integer) = numeric_literal.as_i64() {
                return Ok(Value::Integer(exact_integer));
            }
            // Flotantes truncan hacia cero; NaN/infinito son rechazados.
            match numeric_literal.as_f64() {
                Some(float_literal) if float_literal.is_finite() => {
                    Ok(Value::Integer(float_literal.trunc() as i64))
                }
                _ => Err(not_coercible(raw_value, "integer")),
            }
        }
        JsonValue::Bool(boolean_literal) => Ok(Value::Integer(i64::from(*boolean_literal))),
        JsonValue::String(raw_text) => raw_text
            .trim()
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| not_coercible(raw_value, "integer")),
        _ => Err(not_coercible(raw_value, "integer")),
    }
}

fn cast_float(raw_value: &JsonValue) -> Result<Value, CastError> {
    match raw_value {
        JsonValue::Number(numeric_literal) => numeric_literal
            .as_f64()
            .map(Value::Float)
            .ok_or_else(|| not_coercible(raw_value, "float")),
        JsonValue::Bool(boolean_literal) => {
            Ok(Value::Float(if *boolean_literal { 1.0 } else { 0.0 }))
        }
        JsonValue::String(raw_text) => raw_text
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| not_coercible(raw_value, "float")),
        _ => Err(not_coercible(raw_value, "float")),
    }
}

fn coerce_truthiness(raw_value: &JsonValue) -> bool {
    match raw_value {
        JsonValue::Null => false,
        JsonValue::Bool(boolean_literal) => *boolean_literal,
        JsonValue::Number(numeric_literal) => {
            numeric_literal.as_f64().map(|f| f != 0.0).unwrap_or(false)
        }
        JsonValue::String(raw_text) => {
            TRUTHY_STRING_TOKENS.contains(&raw_text.trim().to_lowercase().as_str())
        }
        JsonValue::Array(elements) => !elements.is_empty(),
        JsonValue::Object(members) => !members.is_empty(),
    }
}

fn cast_datetime(raw_value: &JsonValue) -> Result<Value, CastError> {
    match raw_value {
        JsonValue::String(raw_text) => parse_iso_utc(raw_text)
            .map(Value::DateTime)
            .ok_or_else(|| CastError::MalformedDatetime {
                raw_rendering: raw_text.clone(),
            }),
        _ => Err(not_coercible(raw_value, "datetime")),
    }
}

/**
 * Parser ISO-8601 anclado a UTC.
 * Acepta offset explícito (incluida 'Z'), instantes naive con separador
 * 'T' o espacio, y fechas puras (medianoche UTC).
 */
pub fn parse_iso_utc(raw_text: &str) -> Option<DateTime<Utc>> {
    let trimmed_text = raw_text.trim();

    if let Ok(aware_instant) = DateTime::parse_from_rfc3339(trimmed_text) {
        return Some(aware_instant.with_timezone(&Utc));
    }
    for naive_layout in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive_instant) = NaiveDateTime::parse_from_str(trimmed_text, naive_layout) {
            return Some(Utc.from_utc_datetime(&naive_instant));
        }
    }
    if let Ok(pure_date) = NaiveDate::parse_from_str(trimmed_text, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&pure_date.and_hms_opt(0, 0, 0)?));
    }

    None
}

fn not_coercible(raw_value: &JsonValue, target_type: &'static str) -> CastError {
    CastError::NotCoercible {
        raw_rendering: render_as_string(raw_value),
        target_type,
    }
}

/// Coerciona el peso declarado a flotante; ausencia o null cristaliza 1.0.
fn coerce_height(raw_height: Option<&JsonValue>) -> Option<f64> {
    match raw_height {
        None | Some(JsonValue::Null) => Some(1.0),
        Some(JsonValue::Number(numeric_literal)) => numeric_literal.as_f64(),
        Some(JsonValue::String(raw_text)) => raw_text.trim().parse::<f64>().ok(),
        Some(JsonValue::Bool(boolean_literal)) => {
            Some(if *boolean_literal { 1.0 } else { 0.0 })
        }
        Some(_) => None,
    }
}

// --- SUITE DE CERTIFICACIÓN DEL MOTOR DE CASTEO ---
