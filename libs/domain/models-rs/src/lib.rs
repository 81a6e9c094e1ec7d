// [libs/domain/models-rs/src/lib.rs]
/*!
 * =================================================================
 * APARATO: DOMAIN MODELS LIBRARY ROOT (V4.2 - DISPATCH CONTRACTS)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: AUTORIDAD ÚNICA DEL ÁRBOL DE CONTRATOS DE DOMINIO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. TYPED FRONTIER: Todo valor dinámico queda sellado en la unión
 *    'Value' al cruzar el estrato C1. Ningún JSON crudo viaja más allá
 *    de la frontera de casteo.
 * 2. CONTRACT PARITY: Los modelos persisten bit-perfecto en el Ledger
 *    (columnas JSON) y viajan sin transformación por las tramas WS.
 * 3. ZERO ABBREVIATIONS: Nomenclatura nominal absoluta en todos los
 *    módulos expuestos.
 * =================================================================
 */

/// Unión tipada de valores de parámetro y sus ayudantes numéricos.
pub mod value;
/// Condiciones ponderadas de solicitud: operador, valor y peso.
pub mod condition;
/// Registro de tipos por clave de parámetro.
pub mod key_data_type;
/// Ejecutores del sistema y su proyección de candidatura.
pub mod user;
/// Solicitudes de trabajo y su ciclo de vida de estados.
pub mod request;
/// Rastro de auditoría de despachos consumados.
pub mod dispatch_log;
/// Boletos del ledger de cola y su carga útil de cable.
pub mod queue;
/// Tramas de difusión en tiempo real hacia los observadores.
pub mod events;

#[cfg(test)]
mod tests_serialization;

// Re-exportaciones para facilitar el consumo en apps y estratos L3
pub use condition::{Condition, Operator};
pub use dispatch_log::{DailySummaryRow, DispatchLog};
pub use events::{HubChannel, HubFrame};
pub use key_data_type::{KeyDataType, ParamKind};
pub use queue::{DispatchTicket, TicketPayload};
pub use request::{Request, RequestStatus};
pub use user::{CandidateProfile, User};
pub use value::Value;
