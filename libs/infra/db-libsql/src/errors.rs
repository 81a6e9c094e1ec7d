// [libs/infra/db-libsql/src/errors.rs]
/*!
 * =================================================================
 * APARATO: STORE ERROR CATALOG (V3.2 - SOBERANO)
 * CLASIFICACIÓN: INFRASTRUCTURE CORE (ESTRATO L3)
 * RESPONSABILIDAD: CATALOGACIÓN SEMÁNTICA DE FALLOS DE PERSISTENCIA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. RETRYABILITY AWARENESS: Todo fallo de este catálogo es transitorio
 *    desde la óptica del motor de despacho — la redistribución con
 *    backoff acotado es la respuesta canónica. Los desenlaces lógicos
 *    (solicitud inexistente, sin candidatos) NO son errores: viajan
 *    como resultados tipados del pipeline.
 * 2. STRATA PREFIXES: Mensajes con prefijo de estrato para el
 *    renderizado cromático en los rastros estructurados.
 * =================================================================
 */

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Fallo de enlace físico o de red con el Ledger.
    #[error("[L3_STORE_NET_FAULT]: LEDGER_UPLINK_SEVERED -> {0}")]
    ConnectionError(String),

    /// Configuración de entorno vacía o malformada.
    #[error("[L3_STORE_CONFIG_FAULT]: STRATEGIC_ENV_VOID -> {0}")]
    ConfigurationError(String),

    /// Error de sintaxis o ejecución devuelto por el motor libSQL.
    #[error("[L3_STORE_QUERY_FAULT]: SQL_QUERY_REJECTED -> {0}")]
    QueryError(#[from] libsql::Error),

    /// Fallo en la transformación de tipos entre el Ledger y el dominio.
    #[error("[L3_STORE_MAPPING_FAULT]: DATA_MAPPING_VIOLATION -> {0}")]
    MappingError(String),

    /// Colapso del sellado atómico de una secuencia multi-sentencia.
    #[error("[L3_STORE_FAULT]: TRANSACTION_COLLAPSE")]
    TransactionError,
}
