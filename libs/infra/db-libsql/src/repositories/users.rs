// [libs/infra/db-libsql/src/repositories/users.rs]
/*!
 * =================================================================
 * APARATO: EXECUTOR REPOSITORY (V3.2 - CANDIDATE PROJECTION)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: PERSISTENCIA DE EJECUTORES Y SU ENUMERACIÓN MASIVA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. PROJECTION DISCIPLINE: La enumeración de candidatos hidrata
 *    exactamente tres columnas (id, params, max_daily_requests) — el
 *    perfil de identidad jamás viaja por el pipeline de despacho.
 * 2. JSON COLUMN PARITY: 'params' cristaliza como JSON textual y se
 *    rehidrata a la unión tipada del dominio en la frontera.
 * =================================================================
 */

use crate::errors::StoreError;
use crate::StoreClient;
use arbiter_domain_models::{CandidateProfile, User, Value};
use libsql::params;
use std::collections::BTreeMap;
use tracing::instrument;

/**
 * Repositorio de autoridad única sobre la colección 'user'.
 */
pub struct UserRepository {
    store_client: StoreClient,
}

impl UserRepository {
    #[must_use]
    pub fn new(store_client: StoreClient) -> Self {
        Self { store_client }
    }

    /**
     * Persiste un ejecutor completo.
     *
     * # Errors:
     * - `StoreError::QueryError`: Violación de unicidad de 'username' o
     *   fallo del motor.
     */
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn insert(&self, user: &User) -> Result<(), StoreError> {
        let ledger_connection = self.store_client.get_connection()?;

        let params_json = serde_json::to_string(&user.params)
            .map_err(|encode_fault| StoreError::MappingError(encode_fault.to_string()))?;

        ledger_connection
            .execute(
                r#"
                INSERT INTO user (
                    id, username, password, email, first_name, last_name,
                    params, max_daily_requests
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
                params![
                    user.id.clone(),
                    user.username.clone(),
                    user.password.clone(),
                    user.email.clone(),
                    user.first_name.clone(),
                    user.last_name.clone(),
                    params_json,
                    user.max_daily_requests.map(i64::from),
                ],
            )
            .await?;

        Ok(())
    }

    /**
     * Enumera la proyección de candidatura de toda la flota.
     * Ruta caliente del pipeline: sólo id, params y cuota.
     */
    #[instrument(skip(self))]
    pub async fn find_candidate_profiles(&self) -> Result<Vec<CandidateProfile>, StoreError> {
        let ledger_connection = self.store_client.get_connection()?;

        let mut profile_rows = ledger_connection
            .query(
                "SELECT id, params, max_daily_requests FROM user ORDER BY id ASC",
                (),
            )
            .await?;

        let mut candidate_profiles = Vec::new();
        while let Some(profile_row) = profile_rows.next().await? {
            let executor_identifier: String = profile_row.get(0)?;
            let params_json: String = profile_row.get(1)?;

            let declared_params: BTreeMap<String, Value> = serde_json::from_str(&params_json)
                .map_err(|decode_fault| {
                    StoreError::MappingError(format!(
                        "executor '{}' carries malformed params: {}",
                        executor_identifier, decode_fault
                    ))
                })?;

            let max_daily_requests = profile_row
                .get::<Option<i64>>(2)?
                .map(|quota| quota.max(0) as u32);

            candidate_profiles.push(CandidateProfile {
                id: executor_identifier,
                params: declared_params,
                max_daily_requests,
            });
        }

        Ok(candidate_profiles)
    }
}
