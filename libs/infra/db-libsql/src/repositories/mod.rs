// [libs/infra/db-libsql/src/repositories/mod.rs]
/*!
 * =================================================================
 * APARATO: REPOSITORY REGISTRY (V3.1 - ACCESS MATRIX)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: EXPOSICIÓN DE REPOSITORIOS DE AUTORIDAD ÚNICA
 * =================================================================
 */

/// Ejecutores y su proyección de candidatura.
pub mod users;
/// Solicitudes: intake, sellado CAS y agregación diaria.
pub mod requests;
/// Registro de tipos por clave de parámetro.
pub mod key_data_types;
/// Rastro de auditoría y resumen por día.
pub mod dispatch_logs;
/// Ledger de cola al-menos-una-vez.
pub mod queue;

pub use dispatch_logs::DispatchLogRepository;
pub use key_data_types::KeyDataTypeRepository;
pub use queue::QueueRepository;
pub use requests::RequestRepository;
pub use users::UserRepository;
