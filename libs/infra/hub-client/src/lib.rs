// [libs/infra/hub-client/src/lib.rs]
/*!
 * =================================================================
 * APARATO: HUB CLIENT LIBRARY BARREL (V2.1 - UPLINK EXPORTS)
 * CLASIFICACIÓN: INFRASTRUCTURE LIB (ESTRATO L3)
 * RESPONSABILIDAD: EXPOSICIÓN PÚBLICA DEL UPLINK DE DIFUSIÓN
 *
 * VISION HIPER-HOLÍSTICA:
 * Centraliza la exportación del cliente y su catálogo de fallos.
 * El uplink es best-effort por contrato: el despacho jamás depende
 * de la entrega de una trama.
 * =================================================================
 */

pub mod client;
pub mod errors;

pub use client::HubClient;
pub use errors::HubClientError;
