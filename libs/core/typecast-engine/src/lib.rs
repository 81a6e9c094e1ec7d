// [libs/core/typecast-engine/src/lib.rs]
/*!
 * =================================================================
 * APARATO: TYPECAST ENGINE ROOT (V3.1 - CAST FRONTIER)
 * CLASIFICACIÓN: CORE ENGINE (ESTRATO L1)
 * RESPONSABILIDAD: COERCIÓN TOTAL DE PARÁMETROS CRUDOS AL DOMINIO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. SINGLE FRONTIER: Este es el único aparato del sistema autorizado
 *    a inspeccionar 'serde_json::Value'. Aguas abajo sólo circula la
 *    unión tipada del dominio.
 * 2. TOTALITY ON DECLARED TYPES: El casteo es una función total sobre
 *    la taxonomía declarada; todo fallo es un error semántico sellado,
 *    jamás un pánico.
 * =================================================================
 */

/// Motor de coerción de valores crudos y validación de condiciones.
pub mod cast;
/// Catálogo de fallos de casteo y validación.
pub mod errors;
/// Instantánea inmutable del registro clave -> tipo.
pub mod registry;

pub use cast::{cast_condition_map, cast_value};
pub use errors::{CastError, ValidationError};
pub use registry::KeyTypeRegistry;
