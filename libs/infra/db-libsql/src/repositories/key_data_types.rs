// [libs/infra/db-libsql/src/repositories/key_data_types.rs]
/*!
 * =================================================================
 * APARATO: KEY TYPE REPOSITORY (V3.1 - REGISTRY SNAPSHOT)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: PERSISTENCIA DEL REGISTRO CLAVE -> TIPO
 * =================================================================
 */

use crate::errors::StoreError;
use crate::StoreClient;
use arbiter_domain_models::{KeyDataType, ParamKind};
use libsql::params;
use tracing::instrument;

/**
 * Repositorio de autoridad única sobre la colección 'key_data_types'.
 */
pub struct KeyDataTypeRepository {
    store_client: StoreClient,
}

impl KeyDataTypeRepository {
    #[must_use]
    pub fn new(store_client: StoreClient) -> Self {
        Self { store_client }
    }

    /**
     * Registra o actualiza el tipo gobernante de una clave.
     * Upsert idempotente: la unicidad de 'name' es invariante.
     */
    #[instrument(skip(self), fields(key = %record.name))]
    pub async fn upsert(&self, record: &KeyDataType) -> Result<(), StoreError> {
        let ledger_connection = self.store_client.get_connection()?;

        ledger_connection
            .execute(
                r#"
                INSERT INTO key_data_types (name, type_of)
                VALUES (?1, ?2)
                ON CONFLICT(name) DO UPDATE SET type_of = excluded.type_of
                "#,
                params![record.name.clone(), record.type_of.as_type_name()],
            )
            .await?;

        Ok(())
    }

    /**
     * Hidrata la instantánea completa del registro.
     * Los consumidores la congelan en un 'KeyTypeRegistry' por ráfaga
     * de validación.
     */
    #[instrument(skip(self))]
    pub async fn fetch_all(&self) -> Result<Vec<KeyDataType>, StoreError> {
        let ledger_connection = self.store_client.get_connection()?;

        let mut registry_rows = ledger_connection
            .query("SELECT name, type_of FROM key_data_types", ())
            .await?;

        let mut records = Vec::new();
        while let Some(registry_row) = registry_rows.next().await? {
            let type_name: String = registry_row.get(1)?;
            records.push(KeyDataType {
                name: registry_row.get(0)?,
                // Nombres desconocidos degradan a 'string' por contrato.
                type_of: ParamKind::from_type_name(&type_name),
            });
        }

        Ok(records)
    }
}
