// [libs/infra/db-libsql/src/client.rs]
/*!
 * =================================================================
 * APARATO: LEDGER CONNECTION CLIENT (V4.0 - LOCATION AWARE)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: CLASIFICACIÓN DE DESTINO Y BOOTSTRAP DEL LEDGER
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. LOCATION TAXONOMY: La URL del Ledger se clasifica una sola vez
 *    (remoto / disco / volátil) y esa verdad gobierna credenciales y
 *    retención de conexiones — sin re-inspección aguas abajo.
 * 2. SINGLE BOOTSTRAP LINK: Una única conexión aplica el esquema de
 *    despacho. En destino volátil esa misma conexión queda retenida de
 *    por vida: las tablas de arbitraje viven mientras viva el proceso.
 *
 * # Mathematical Proof (Volatile Retention):
 * SQLite purga una base en RAM cuando su última conexión muere. Al
 * retener la conexión que materializó el esquema, el client garantiza
 * conteo de referencias >= 1 durante toda la vida del proceso, y toda
 * conexión posterior observa las colecciones de despacho ya selladas.
 * =================================================================
 */

use crate::errors::StoreError;
use crate::schema::apply_dispatch_schema;
use libsql::{Builder, Connection, Database};
use std::sync::Arc;
use tracing::{info, instrument};

/// Destino clasificado del Ledger de despacho.
#[derive(Clone, Copy)]
enum LedgerLocation {
    /// Cluster remoto; exige material de autenticación.
    Remote,
    /// Archivo local persistente.
    OnDisk,
    /// Segmento de RAM; exige retención de conexión.
    Volatile,
}

impl LedgerLocation {
    fn classify(database_connection_url: &str) -> Self {
        if database_connection_url.starts_with("libsql://")
            || database_connection_url.starts_with("https://")
        {
            return LedgerLocation::Remote;
        }
        if database_connection_url.contains(":memory:")
            || database_connection_url.contains("mode=memory")
        {
            return LedgerLocation::Volatile;
        }
        LedgerLocation::OnDisk
    }

    fn as_label(&self) -> &'static str {
        match self {
            LedgerLocation::Remote => "remote",
            LedgerLocation::OnDisk => "on-disk",
            LedgerLocation::Volatile => "volatile",
        }
    }
}

/// Cliente compartible del Ledger autoritativo de despacho.
#[derive(Clone)]
pub struct StoreClient {
    ledger_driver: Arc<Database>,
    /// Conexión fundacional retenida sólo en destino volátil.
    _volatile_retention: Option<Arc<Connection>>,
}

impl StoreClient {
    /**
     * Clasifica el destino, enciende el driver y sella el esquema de
     * despacho sobre la conexión fundacional.
     *
     * # Errors:
     * - `StoreError::ConfigurationError`: URL vacía, o destino remoto
     *   sin material de autenticación.
     * - `StoreError::ConnectionError`: Ignición del driver o sellado
     *   del esquema rechazados.
     */
    #[instrument(skip(database_access_token))]
    pub async fn connect(
        database_connection_url: &str,
        database_access_token: Option<String>,
    ) -> Result<Self, StoreError> {
        if database_connection_url.trim().is_empty() {
            return Err(StoreError::ConfigurationError(
                "DATABASE_URL carries no destination".into(),
            ));
        }

        let ledger_location = LedgerLocation::classify(database_connection_url);
        info!("🔌 [LEDGER]: Dispatch ledger resolved as {} destination.", ledger_location.as_label());

        let ledger_driver = match ledger_location {
            LedgerLocation::Remote => {
                let authentication_material = database_access_token.ok_or_else(|| {
                    StoreError::ConfigurationError(
                        "remote ledger requires DATABASE_AUTH_TOKEN".into(),
                    )
                })?;
                Builder::new_remote(
                    database_connection_url.to_string(),
                    authentication_material,
                )
                .build()
                .await
            }
            LedgerLocation::OnDisk | LedgerLocation::Volatile => {
                Builder::new_local(database_connection_url).build().await
            }
        }
        .map_err(|ignition_fault| {
            StoreError::ConnectionError(format!("ledger driver ignition rejected: {}", ignition_fault))
        })?;

        let ledger_driver = Arc::new(ledger_driver);

        // Conexión fundacional: materializa las colecciones de despacho.
        let founding_connection = ledger_driver.connect().map_err(|link_fault| {
            StoreError::ConnectionError(format!("founding link rejected: {}", link_fault))
        })?;

        apply_dispatch_schema(&founding_connection)
            .await
            .map_err(|schema_fault| {
                StoreError::ConnectionError(format!("dispatch schema sealing rejected: {}", schema_fault))
            })?;

        // En destino volátil, la conexión fundacional se retiene de por
        // vida; en disco o remoto se libera tras el sellado.
        let volatile_retention = match ledger_location {
            LedgerLocation::Volatile => {
                info!("⚓ [LEDGER]: Volatile destination — founding link retained for process lifetime.");
                Some(Arc::new(founding_connection))
            }
            _ => None,
        };

        Ok(Self {
            ledger_driver,
            _volatile_retention: volatile_retention,
        })
    }

    /// Adquiere una conexión fresca hacia el Ledger de despacho.
    pub fn get_connection(&self) -> Result<Connection, StoreError> {
        self.ledger_driver.connect().map_err(|allocation_fault| {
            StoreError::ConnectionError(format!("ledger link allocation rejected: {}", allocation_fault))
        })
    }
}
