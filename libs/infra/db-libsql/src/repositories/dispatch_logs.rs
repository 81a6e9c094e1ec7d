// [libs/infra/db-libsql/src/repositories/dispatch_logs.rs]
/*!
 * =================================================================
 * APARATO: DISPATCH AUDIT REPOSITORY (V3.2 - APPEND ONLY)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: RASTRO INMUTABLE DE DESPACHOS Y RESUMEN DIARIO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. APPEND-ONLY DISCIPLINE: Sin updates ni deletes; el rastro es
 *    evidencia forense del arbitraje.
 * 2. BOUNDED SUMMARY: La agregación por día acepta cotas inclusivas
 *    opcionales mediante guardias NULL en la propia consulta.
 * =================================================================
 */

use crate::errors::StoreError;
use crate::StoreClient;
use arbiter_domain_models::{DailySummaryRow, DispatchLog};
use chrono::NaiveDate;
use libsql::params;
use tracing::instrument;

/**
 * Repositorio de autoridad única sobre la colección 'dispatch_logs'.
 */
pub struct DispatchLogRepository {
    store_client: StoreClient,
}

impl DispatchLogRepository {
    #[must_use]
    pub fn new(store_client: StoreClient) -> Self {
        Self { store_client }
    }

    /**
     * Anexa la entrada de auditoría de un despacho consumado.
     */
    #[instrument(skip(self, audit_entry), fields(request_id = %audit_entry.request_id))]
    pub async fn insert(&self, audit_entry: &DispatchLog) -> Result<(), StoreError> {
        let ledger_connection = self.store_client.get_connection()?;

        ledger_connection
            .execute(
                r#"
                INSERT INTO dispatch_logs (
                    request_id, task_id, parent_id,
                    request_created_at, request_updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    audit_entry.request_id.clone(),
                    audit_entry.task_id.to_string(),
                    audit_entry.parent_id.clone(),
                    audit_entry.request_created_at.to_rfc3339(),
                    audit_entry.request_updated_at.to_rfc3339(),
                ],
            )
            .await?;

        Ok(())
    }

    /**
     * Cantidad de entradas ancladas a una solicitud.
     * Consumido por las suites de certificación de idempotencia.
     */
    #[instrument(skip(self))]
    pub async fn count_for_request(&self, request_id: &str) -> Result<u64, StoreError> {
        let ledger_connection = self.store_client.get_connection()?;

        let mut count_rows = ledger_connection
            .query(
                "SELECT COUNT(*) FROM dispatch_logs WHERE request_id = ?1",
                params![request_id],
            )
            .await?;

        let total = match count_rows.next().await? {
            Some(count_row) => count_row.get::<i64>(0)?.max(0) as u64,
            None => 0,
        };

        Ok(total)
    }

    /**
     * Resumen de despachos agrupado por día de creación de la solicitud,
     * ascendente, con cotas inclusivas opcionales (YYYY-MM-DD).
     */
    #[instrument(skip(self))]
    pub async fn daily_summary(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<DailySummaryRow>, StoreError> {
        let ledger_connection = self.store_client.get_connection()?;

        let mut summary_rows = ledger_connection
            .query(
                r#"
                SELECT date(request_created_at) AS dispatch_day, COUNT(*)
                FROM dispatch_logs
                WHERE (?1 IS NULL OR date(request_created_at) >= ?1)
                  AND (?2 IS NULL OR date(request_created_at) <= ?2)
                GROUP BY dispatch_day
                ORDER BY dispatch_day ASC
                "#,
                params![
                    start_date.map(|bound| bound.format("%Y-%m-%d").to_string()),
                    end_date.map(|bound| bound.format("%Y-%m-%d").to_string()),
                ],
            )
            .await?;

        let mut daily_summary = Vec::new();
        while let Some(summary_row) = summary_rows.next().await? {
            let day_label: String = summary_row.get(0)?;
            let dispatch_count: i64 = summary_row.get(1)?;

            let date = NaiveDate::parse_from_str(&day_label, "%Y-%m-%d").map_err(|parse_fault| {
                StoreError::MappingError(format!(
                    "summary day '{}' rejected: {}",
                    day_label, parse_fault
                ))
            })?;

            daily_summary.push(DailySummaryRow {
                date,
                count: dispatch_count.max(0) as u64,
            });
        }

        Ok(daily_summary)
    }
}
