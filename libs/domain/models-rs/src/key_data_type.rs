// [libs/domain/models-rs/src/key_data_type.rs]
/*!
 * =================================================================
 * APARATO: KEY TYPE REGISTRY CONTRACT (V4.0 - TYPE STRATA)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: MAPEO NOMINAL CLAVE -> TIPO DE PARÁMETRO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. CLOSED TAXONOMY: Cinco tipos reconocidos; cualquier nombre ajeno
 *    degrada a 'string' sin colapsar la ráfaga de casteo.
 * 2. SNAPSHOT SEMANTICS: El registro se consume como instantánea
 *    inmutable por ráfaga de validación; la unicidad de 'name' es
 *    invariante del Ledger.
 * =================================================================
 */

use serde::{Deserialize, Serialize};

/// Taxonomía cerrada de tipos de parámetro del registro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    String,
    Integer,
    Float,
    Boolean,
    Datetime,
}

impl ParamKind {
    /// Resuelve el nombre textual del tipo.
    /// Nombres desconocidos degradan a 'String' por contrato.
    #[must_use]
    pub fn from_type_name(type_name: &str) -> Self {
        match type_name {
            "integer" => ParamKind::Integer,
            "float" => ParamKind::Float,
            "boolean" => ParamKind::Boolean,
            "datetime" => ParamKind::Datetime,
            _ => ParamKind::String,
        }
    }

    /// Nombre canónico persistido en la columna 'type_of'.
    #[must_use]
    pub fn as_type_name(&self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Integer => "integer",
            ParamKind::Float => "float",
            ParamKind::Boolean => "boolean",
            ParamKind::Datetime => "datetime",
        }
    }
}

impl Default for ParamKind {
    fn default() -> Self {
        ParamKind::String
    }
}

/// Registro persistido de un tipo reconocido por clave de parámetro.
/// Invariante del Ledger: 'name' único por instantánea del registro.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDataType {
    /// Clave de parámetro gobernada por este registro.
    pub name: String,
    /// Tipo al que se castea todo valor entrante bajo esta clave.
    pub type_of: ParamKind,
}
