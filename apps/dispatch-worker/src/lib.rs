// [apps/dispatch-worker/src/lib.rs]
/*!
 * =================================================================
 * APARATO: DISPATCH WORKER LIBRARY ROOT (V4.1 - WORKER AUTHORITY)
 * CLASIFICACIÓN: CRATE ROOT (ESTRATO L1-WORKER)
 * RESPONSABILIDAD: DEFINICIÓN DEL ÁRBOL DE MÓDULOS DEL TRABAJADOR
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. PROCESS OWNERSHIP: El trabajador posee su caché de contadores
 *    como recurso explícito — jamás estado global mutable.
 * 2. SINGLE DISPATCH DISCIPLINE: Dentro del proceso, cada despacho
 *    corre a término antes del siguiente reclamo (prefetch 1).
 * =================================================================
 */

/// Caché de contadores diarios con reconciliación periódica.
pub mod counters;
/// Bucle de consumo del ledger de cola: reclamo, timeout, resolución.
pub mod engine;
/// Pipeline de arbitraje: puntuación, selección y sellado idempotente.
pub mod pipeline;

pub mod prelude {
    pub use crate::counters::DailyLoadLedger;
    pub use crate::engine::{DispatchEngine, EngineSettings};
    pub use crate::pipeline::{DispatchOutcome, DispatchPipeline};
}
