// [apps/orchestrator/src/services/mod.rs]
/*!
 * =================================================================
 * APARATO: SERVICES REGISTRY (V4.0 - SIGNAL STRATA)
 * CLASIFICACIÓN: APPLICATION SERVICES (ESTRATO L4)
 * RESPONSABILIDAD: EXPOSICIÓN DE SERVICIOS DEL ORQUESTADOR
 * =================================================================
 */

/// Hub de difusión de tramas en tiempo real.
pub mod event_bus;

pub use event_bus::BroadcastHub;
