// [libs/domain/models-rs/src/dispatch_log.rs]
/*!
 * =================================================================
 * APARATO: DISPATCH AUDIT CONTRACT (V4.0 - APPEND ONLY)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: RASTRO INMUTABLE DE ASIGNACIONES CONSUMADAS
 *
 * # Mathematical Proof (Audit Cardinality):
 * Exactamente un registro por primer sellado de asignación de cada
 * solicitud: el commit compare-and-set es el punto de linealización,
 * y una redistribución repetida fracasa antes de alcanzar el log.
 * =================================================================
 */

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/**
 * Entrada de auditoría escrita en cada despacho exitoso.
 * 'task_id' identifica de forma estable el intento de despacho (boleto
 * de cola) que consumó la asignación.
 */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchLog {
    /// Solicitud sellada por este despacho.
    pub request_id: String,
    /// Identificador estable del intento de despacho.
    pub task_id: Uuid,
    /// Solicitud madre, si la cadena de derivación existe.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Instante de creación de la solicitud al momento del sellado.
    pub request_created_at: DateTime<Utc>,
    /// Instante de actualización estampado por el propio commit.
    pub request_updated_at: DateTime<Utc>,
}

/// Fila de la agregación diaria consumida por el endpoint de resumen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummaryRow {
    /// Día calendario (fecha de 'request_created_at').
    pub date: NaiveDate,
    /// Cantidad de despachos consumados ese día.
    pub count: u64,
}
