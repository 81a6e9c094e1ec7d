// [libs/domain/models-rs/src/condition.rs]
/*!
 * =================================================================
 * APARATO: WEIGHTED CONDITION CONTRACT (V4.1 - OPERATOR REGISTRY)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: DEFINICIÓN DE REQUISITOS POR CLAVE DE SOLICITUD
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. OPERATOR SOVEREIGNTY: El conjunto de operadores es cerrado y
 *    serializa en mayúsculas absolutas; cualquier token ajeno colapsa
 *    en la frontera de validación (C1).
 * 2. WEIGHT DEFAULTING: 'height' se cristaliza en 1.0 cuando la trama
 *    de entrada lo omite, preservando la semántica de peso unitario.
 * =================================================================
 */

use crate::value::Value;
use serde::{Deserialize, Serialize};

/// Operadores de comparación reconocidos por el motor de matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operator {
    /// Igualdad estricta entre operandos homogéneos.
    Eq,
    /// Desigualdad; variantes heterogéneas son trivialmente desiguales.
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    /// Subcadena sin distinción de mayúsculas; exclusivo de cadenas.
    Icontains,
}

impl Operator {
    /// Resuelve un token textual (insensible a mayúsculas) a su operador.
    #[must_use]
    pub fn from_token(raw_token: &str) -> Option<Self> {
        match raw_token.to_ascii_uppercase().as_str() {
            "EQ" => Some(Operator::Eq),
            "NE" => Some(Operator::Ne),
            "GT" => Some(Operator::Gt),
            "GTE" => Some(Operator::Gte),
            "LT" => Some(Operator::Lt),
            "LTE" => Some(Operator::Lte),
            "ICONTAINS" => Some(Operator::Icontains),
            _ => None,
        }
    }

    /// Etiqueta canónica en mayúsculas, idéntica a la forma de cable.
    #[must_use]
    pub fn as_token(&self) -> &'static str {
        match self {
            Operator::Eq => "EQ",
            Operator::Ne => "NE",
            Operator::Gt => "GT",
            Operator::Gte => "GTE",
            Operator::Lt => "LT",
            Operator::Lte => "LTE",
            Operator::Icontains => "ICONTAINS",
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_token())
    }
}

/// Peso unitario aplicado cuando la condición no declara 'height'.
fn default_condition_height() -> f64 {
    1.0
}

/**
 * Requisito ponderado sobre una clave de parámetro de la solicitud.
 * Forma de cable: `{ "value": ..., "operator": "EQ", "height": 1.0 }`.
 */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Valor objetivo ya casteado por el estrato C1.
    pub value: Value,
    /// Operador de comparación aplicado contra el valor del ejecutor.
    pub operator: Operator,
    /// Peso relativo de la condición dentro de la suma de puntuación.
    #[serde(default = "default_condition_height")]
    pub height: f64,
}

impl Condition {
    /// Forja una condición con peso explícito.
    #[must_use]
    pub fn new(value: Value, operator: Operator, height: f64) -> Self {
        Self { value, operator, height }
    }

    /// Forja una condición de peso unitario.
    #[must_use]
    pub fn unit(value: Value, operator: Operator) -> Self {
        Self::new(value, operator, default_condition_height())
    }
}
