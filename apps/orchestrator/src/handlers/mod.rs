// [apps/orchestrator/src/handlers/mod.rs]
/*!
 * =================================================================
 * APARATO: HANDLER REGISTRY (V4.0 - API ADAPTERS)
 * CLASIFICACIÓN: API ADAPTER LAYER (ESTRATO L4)
 * RESPONSABILIDAD: EXPOSICIÓN DE ADAPTADORES DE ENTRADA
 * =================================================================
 */

/// Intake de solicitudes: validación, persistencia, enfilado y señal.
pub mod requests;
/// Disparador directo de despacho (202 Accepted).
pub mod dispatch;
/// Resumen de auditoría agrupado por día.
pub mod summary;
/// Sonda de salud perimetral.
pub mod health;
/// Gateway interno de difusión para procesos trabajadores.
pub mod internal;
/// Suscripciones WebSocket a los canales del hub.
pub mod stream;
