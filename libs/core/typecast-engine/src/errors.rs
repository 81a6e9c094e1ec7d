// [libs/core/typecast-engine/src/errors.rs]
/*!
 * =================================================================
 * APARATO: TYPECAST ERROR CATALOG (V3.0 - SOBERANO)
 * CLASIFICACIÓN: CORE ENGINE (ESTRATO L1)
 * RESPONSABILIDAD: CATALOGACIÓN SEMÁNTICA DE FALLOS DE COERCIÓN
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. BOUNDARY TRANSLATION: 'CastError' es interno al motor; en la
 *    frontera de solicitud se traduce a 'ValidationError' con la clave
 *    ofensora, listo para el renderizado HTTP 400.
 * 2. ZERO ABBREVIATIONS: Nomenclatura nominal absoluta.
 * =================================================================
 */

use thiserror::Error;

/// Fallo de coerción de un valor individual contra un tipo declarado.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CastError {
    /// El valor no admite representación en el tipo destino.
    #[error("[L1_CAST_FAULT]: VALUE_NOT_COERCIBLE -> cannot cast '{raw_rendering}' into {target_type}")]
    NotCoercible {
        raw_rendering: String,
        target_type: &'static str,
    },

    /// La cadena no satisface el formato ISO-8601.
    #[error("[L1_CAST_FAULT]: DATETIME_FORMAT_REJECTED -> '{raw_rendering}' is not ISO-8601")]
    MalformedDatetime { raw_rendering: String },
}

/// Fallo de validación de un mapa de condiciones en la frontera HTTP.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// La entrada de la clave no es un objeto {value, operator, height}.
    #[error("[L1_VALIDATION_FAULT]: CONDITION_SHAPE_REJECTED -> param '{key}' must be an object with 'value', 'operator', 'height'")]
    MalformedCondition { key: String },

    /// El token de operador no pertenece al conjunto cerrado.
    #[error("[L1_VALIDATION_FAULT]: OPERATOR_REJECTED -> param '{key}' carries unsupported operator '{token}'")]
    UnsupportedOperator { key: String, token: String },

    /// El peso declarado no es coercible a flotante.
    #[error("[L1_VALIDATION_FAULT]: HEIGHT_REJECTED -> param '{key}' carries a non-numeric height")]
    MalformedHeight { key: String },

    /// El valor no casteó contra el tipo registrado para la clave.
    #[error("[L1_VALIDATION_FAULT]: VALUE_REJECTED -> param '{key}': {source}")]
    UncastableValue {
        key: String,
        #[source]
        source: CastError,
    },
}
