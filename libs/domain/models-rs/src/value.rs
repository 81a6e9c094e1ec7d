// [libs/domain/models-rs/src/value.rs]
/*!
 * =================================================================
 * APARATO: TYPED VALUE UNION (V4.0 - CAST FRONTIER)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: REPRESENTACIÓN SELLADA DE VALORES DE PARÁMETRO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. UNTAGGED WIRE PARITY: La unión serializa a JSON plano (sin
 *    discriminante), preservando la forma exacta de las columnas
 *    'params' del Ledger.
 * 2. DATETIME STRATA: Los instantes viajan como RFC 3339; la variante
 *    'DateTime' captura cadenas con offset en la deserialización y el
 *    normalizador del matcher absorbe las cadenas naive restantes.
 * 3. NUMERIC SYNAPSE: 'as_numeric' unifica enteros y flotantes para el
 *    bono de precisión del scorer.
 *
 * # Mathematical Proof (Deserialization Order):
 * El orden de variantes (Bool -> Integer -> Float -> DateTime -> String)
 * es total y sin solapamiento bajo serde untagged: un literal JSON
 * booleano o numérico jamás es capturado por 'String', y una cadena
 * RFC 3339 con offset se cristaliza como instante tipado.
 * =================================================================
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unión tipada de los valores de parámetro reconocidos por el sistema.
/// Ningún 'serde_json::Value' crudo debe propagarse más allá del estrato
/// de casteo (C1); toda comparación opera sobre esta unión.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Valor lógico nativo.
    Bool(bool),
    /// Entero con signo de 64 bits.
    Integer(i64),
    /// Flotante IEEE-754 de doble precisión.
    Float(f64),
    /// Instante absoluto anclado a UTC (RFC 3339 en el cable).
    DateTime(DateTime<Utc>),
    /// Cadena opaca; último recurso de la escalera de deserialización.
    String(String),
}

impl Value {
    /// Proyección numérica unificada para el bono de precisión.
    /// Los booleanos y cadenas no son numéricos por contrato.
    #[must_use]
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            Value::Integer(integer_value) => Some(*integer_value as f64),
            Value::Float(float_value) => Some(*float_value),
            _ => None,
        }
    }

    /// Etiqueta nominal del tipo, usada en los rastros de validación.
    #[must_use]
    pub fn type_label(&self) -> &'static str {
        match self {
            Value::Bool(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::DateTime(_) => "datetime",
            Value::String(_) => "string",
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(boolean_value) => write!(formatter, "{}", boolean_value),
            Value::Integer(integer_value) => write!(formatter, "{}", integer_value),
            Value::Float(float_value) => write!(formatter, "{}", float_value),
            Value::DateTime(instant_value) => write!(formatter, "{}", instant_value.to_rfc3339()),
            Value::String(string_value) => write!(formatter, "{}", string_value),
        }
    }
}
