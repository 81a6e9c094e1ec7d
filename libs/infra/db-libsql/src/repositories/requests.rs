// [libs/infra/db-libsql/src/repositories/requests.rs]
/*!
 * =================================================================
 * APARATO: REQUEST REPOSITORY (V3.4 - CAS SEALING)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: INTAKE, SELLADO DE ASIGNACIÓN Y AGREGACIÓN DIARIA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. CAS LINEARIZATION: El sellado de asignación es un UPDATE con
 *    guardia 'user_id IS NULL' — el punto de linealización de todo el
 *    sistema. Cero filas afectadas significa redistribución repetida,
 *    jamás una segunda asignación.
 * 2. CANONICAL AGGREGATION: El contador diario agrega exclusivamente
 *    'accept' desde la medianoche UTC, agrupado por asignatario.
 *
 * # Mathematical Proof (At-Most-One Assignment):
 * Bajo semántica de escritor único por fila, dos réplicas del mismo
 * boleto ejecutan el CAS en serie: la primera transiciona NULL -> id,
 * la segunda observa la guardia falsa y retorna 0 filas. La asignación
 * es at-most-one por construcción.
 * =================================================================
 */

use crate::errors::StoreError;
use crate::StoreClient;
use arbiter_domain_models::{Condition, Request, RequestStatus};
use chrono::{DateTime, Utc};
use libsql::params;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, instrument};

/**
 * Repositorio de autoridad única sobre la colección 'request'.
 */
pub struct RequestRepository {
    store_client: StoreClient,
}

impl RequestRepository {
    #[must_use]
    pub fn new(store_client: StoreClient) -> Self {
        Self { store_client }
    }

    /**
     * Persiste una solicitud recién ingresada.
     */
    #[instrument(skip(self, request), fields(request_id = %request.id))]
    pub async fn insert(&self, request: &Request) -> Result<(), StoreError> {
        let ledger_connection = self.store_client.get_connection()?;

        let params_json = serde_json::to_string(&request.params)
            .map_err(|encode_fault| StoreError::MappingError(encode_fault.to_string()))?;

        ledger_connection
            .execute(
                r#"
                INSERT INTO request (
                    id, parent_id, user_id, params, text, status,
                    created_at, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
                params![
                    request.id.clone(),
                    request.parent_id.clone(),
                    request.user_id.clone(),
                    params_json,
                    request.text.clone(),
                    request.status.as_label(),
                    request.created_at.to_rfc3339(),
                    request.updated_at.to_rfc3339(),
                ],
            )
            .await?;

        Ok(())
    }

    /**
     * Hidrata una solicitud completa por identificador.
     * Retorna None si el Ledger no la conoce (desenlace lógico, no error).
     */
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, request_id: &str) -> Result<Option<Request>, StoreError> {
        let ledger_connection = self.store_client.get_connection()?;

        let mut request_rows = ledger_connection
            .query(
                r#"
                SELECT id, parent_id, user_id, params, text, status,
                       created_at, updated_at
                FROM request
                WHERE id = ?1
                "#,
                params![request_id],
            )
            .await?;

        let Some(request_row) = request_rows.next().await? else {
            return Ok(None);
        };

        let params_json: String = request_row.get(3)?;
        let condition_map: BTreeMap<String, Condition> = serde_json::from_str(&params_json)
            .map_err(|decode_fault| {
                StoreError::MappingError(format!(
                    "request '{}' carries malformed params: {}",
                    request_id, decode_fault
                ))
            })?;

        let status_label: String = request_row.get(5)?;
        let status = RequestStatus::from_label(&status_label).ok_or_else(|| {
            StoreError::MappingError(format!(
                "request '{}' carries unknown status '{}'",
                request_id, status_label
            ))
        })?;

        Ok(Some(Request {
            id: request_row.get(0)?,
            parent_id: read_optional_text(&request_row, 1)?,
            user_id: read_optional_text(&request_row, 2)?,
            params: condition_map,
            text: read_optional_text(&request_row, 4)?,
            status,
            created_at: parse_instant(&request_row.get::<String>(6)?)?,
            updated_at: parse_instant(&request_row.get::<String>(7)?)?,
        }))
    }

    /**
     * Sella la asignación mediante compare-and-set sobre 'user_id'.
     * Retorna true cuando esta llamada consumó el sellado; false cuando
     * la solicitud ya portaba asignatario (réplica idempotente).
     */
    #[instrument(skip(self))]
    pub async fn seal_assignment(
        &self,
        request_id: &str,
        winner_user_id: &str,
        sealed_at: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let ledger_connection = self.store_client.get_connection()?;

        let affected_rows = ledger_connection
            .execute(
                r#"
                UPDATE request
                SET user_id = ?1, updated_at = ?2
                WHERE id = ?3 AND user_id IS NULL
                "#,
                params![winner_user_id, sealed_at.to_rfc3339(), request_id],
            )
            .await?;

        if affected_rows == 0 {
            debug!("♻️  [CAS_GUARD]: Request [{}] already sealed; replay absorbed.", request_id);
        }

        Ok(affected_rows == 1)
    }

    /**
     * Agregación canónica del contador diario: solicitudes en 'accept'
     * creadas desde el instante dado, agrupadas por asignatario.
     */
    #[instrument(skip(self))]
    pub async fn daily_accept_counts(
        &self,
        since: DateTime<Utc>,
    ) -> Result<HashMap<String, u64>, StoreError> {
        let ledger_connection = self.store_client.get_connection()?;

        let mut aggregation_rows = ledger_connection
            .query(
                r#"
                SELECT user_id, COUNT(*)
                FROM request
                WHERE status = 'accept'
                  AND created_at >= ?1
                  AND user_id IS NOT NULL
                GROUP BY user_id
                "#,
                params![since.to_rfc3339()],
            )
            .await?;

        let mut accepted_counts = HashMap::new();
        while let Some(aggregation_row) = aggregation_rows.next().await? {
            let executor_identifier: String = aggregation_row.get(0)?;
            let accepted_total: i64 = aggregation_row.get(1)?;
            accepted_counts.insert(executor_identifier, accepted_total.max(0) as u64);
        }

        Ok(accepted_counts)
    }
}

// --- AYUDANTES DE MAPEO ---

fn read_optional_text(row: &libsql::Row, column_index: i32) -> Result<Option<String>, StoreError> {
    row.get::<Option<String>>(column_index)
        .map_err(StoreError::QueryError)
}

fn parse_instant(raw_instant: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(raw_instant)
        .map(|aware_instant| aware_instant.with_timezone(&Utc))
        .map_err(|parse_fault| {
            StoreError::MappingError(format!(
                "ledger instant '{}' rejected: {}",
                raw_instant, parse_fault
            ))
        })
}
