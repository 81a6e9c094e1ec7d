// [libs/infra/db-libsql/src/lib.rs]
/*!
 * =================================================================
 * APARATO: PERSISTENCE LIBRARY BARREL (V3.1 - LEDGER AUTHORITY)
 * CLASIFICACIÓN: INFRASTRUCTURE LIB (ESTRATO L3)
 * RESPONSABILIDAD: EXPOSICIÓN PÚBLICA DEL ADAPTADOR DE PERSISTENCIA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. SINGLE SOURCE OF TRUTH: El Ledger libSQL es la autoridad final
 *    sobre asignaciones; todo caché de proceso se reconcilia contra él.
 * 2. REPOSITORY DISCIPLINE: Todo SQL vive en este estrato; los
 *    consumidores sólo observan contratos de dominio tipados.
 * =================================================================
 */

/// Cliente de conexión con ancla de memoria y bootstrap de esquema.
pub mod client;
/// Catálogo semántico de fallos de persistencia.
pub mod errors;
/// Gobernanza estructural idempotente del Ledger.
pub mod schema;
/// Repositorios de autoridad única por agregado.
pub mod repositories;

pub use client::StoreClient;
pub use errors::StoreError;
