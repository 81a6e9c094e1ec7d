// [apps/dispatch-worker/src/counters.rs]
/*!
 * =================================================================
 * APARATO: DAILY LOAD LEDGER (V4.2 - RECONCILED CACHE)
 * CLASIFICACIÓN: WORKER STATE (ESTRATO L1-WORKER)
 * RESPONSABILIDAD: CONTADORES DIARIOS CON RECONCILIACIÓN PERIÓDICA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. STORE AUTHORITY: El Ledger es la fuente de verdad; la frontera de
 *    refresco (60 s) sobreescribe todo incremento local. Un incremento
 *    jamás toca 'last_refresh'.
 * 2. PROCESS LOCALITY: Cada proceso trabajador refresca de forma
 *    independiente — convergencia eventual minuto a minuto entre
 *    procesos.
 * 3. TOLERATED RACE: Una carrera corta de lectura-modificación puede
 *    subcontar en 1; la siguiente reconciliación es autoritativa.
 * =================================================================
 */

use arbiter_infra_db::repositories::RequestRepository;
use arbiter_infra_db::StoreError;
use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

/// Cadencia de reconciliación contra el Ledger.
const REFRESH_INTERVAL_SECONDS: u64 = 60;
/// Vida máxima de la instantánea; más allá, se trata como ausente.
const CACHE_TTL_SECONDS: u64 = 24 * 60 * 60;

/**
 * Caché de proceso de solicitudes aceptadas hoy por ejecutor.
 * Recurso explícito del trabajador, inicializado en la ignición.
 */
pub struct DailyLoadLedger {
    request_repository: Arc<RequestRepository>,
    cached_counts: RwLock<HashMap<String, u64>>,
    last_refresh: RwLock<Option<Instant>>,
    refresh_interval: Duration,
    cache_ttl: Duration,
}

impl DailyLoadLedger {
    #[must_use]
    pub fn new(request_repository: Arc<RequestRepository>) -> Self {
        Self {
            request_repository,
            cached_counts: RwLock::new(HashMap::new()),
            last_refresh: RwLock::new(None),
            refresh_interval: Duration::from_secs(REFRESH_INTERVAL_SECONDS),
            cache_ttl: Duration::from_secs(CACHE_TTL_SECONDS),
        }
    }

    /**
     * Instantánea de contadores del día. Sirve el caché mientras su
     * edad no supere la cadencia; en otro caso re-agrega desde el
     * Ledger (status 'accept', creadas desde la medianoche UTC) y
     * reemplaza el mapa completo.
     *
     * # Errors:
     * Propaga el fallo de agregación del Ledger (transitorio).
     */
    #[instrument(skip(self))]
    pub async fn snapshot(&self, force_store_read: bool) -> Result<HashMap<String, u64>, StoreError> {
        if !force_store_read && self.cache_is_fresh() {
            return Ok(self.read_counts());
        }

        let today_midnight_utc = Utc::now()
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .map(|midnight_naive| Utc.from_utc_datetime(&midnight_naive))
            .unwrap_or_else(Utc::now);

        let fresh_counts = self
            .request_repository
            .daily_accept_counts(today_midnight_utc)
            .await?;

        {
            let mut counts_guard = self
                .cached_counts
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            *counts_guard = fresh_counts.clone();
        }
        {
            let mut refresh_guard = self
                .last_refresh
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            *refresh_guard = Some(Instant::now());
        }

        debug!("🔄 [DAILY_LEDGER]: Reconciled {} executor counters from store.", fresh_counts.len());
        Ok(fresh_counts)
    }

    /**
     * Incremento local tras un sellado exitoso. No estampa
     * 'last_refresh': la próxima frontera de reconciliación manda.
     */
    pub fn increment(&self, executor_identifier: &str) {
        let mut counts_guard = self
            .cached_counts
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *counts_guard
            .entry(executor_identifier.to_string())
            .or_insert(0) += 1;
    }

    /// Lectura puntual del contador cacheado de un ejecutor.
    #[must_use]
    pub fn cached_count_for(&self, executor_identifier: &str) -> u64 {
        self.read_counts()
            .get(executor_identifier)
            .copied()
            .unwrap_or(0)
    }

    fn cache_is_fresh(&self) -> bool {
        let refresh_guard = self
            .last_refresh
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        match *refresh_guard {
            Some(refreshed_at) => {
                let snapshot_age = refreshed_at.elapsed();
                snapshot_age < self.refresh_interval && snapshot_age < self.cache_ttl
            }
            None => false,
        }
    }

    fn read_counts(&self) -> HashMap<String, u64> {
        self.cached_counts
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}
