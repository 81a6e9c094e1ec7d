// [apps/orchestrator/src/state.rs]
/*!
 * =================================================================
 * APARATO: ORCHESTRATOR SHARED STATE (V4.2 - COMPOSITION ROOT)
 * CLASIFICACIÓN: APPLICATION STATE (ESTRATO L1-APP)
 * RESPONSABILIDAD: ORQUESTACIÓN DE REPOSITORIOS Y HUB DE DIFUSIÓN
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. COMPOSITION ROOT: Centraliza el rastro de repositorios y el hub;
 *    los handlers sólo observan 'Arc<T>' inmutables.
 * 2. UPTIME ANCHOR: El instante de ignición queda sellado para la
 *    sonda de salud perimetral.
 * =================================================================
 */

use crate::services::event_bus::BroadcastHub;
use arbiter_infra_db::repositories::{
    DispatchLogRepository, KeyDataTypeRepository, QueueRepository, RequestRepository,
};
use arbiter_infra_db::StoreClient;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/**
 * Contenedor de estado compartido (Thread-Safe) del orquestador.
 */
#[derive(Clone)]
pub struct AppState {
    /// Cliente del Ledger autoritativo.
    pub store_client: StoreClient,
    /// Hub de difusión hacia los observadores WebSocket.
    pub broadcast_hub: Arc<BroadcastHub>,
    /// Repositorio de solicitudes (intake).
    pub request_repository: Arc<RequestRepository>,
    /// Registro de tipos por clave para la frontera de casteo.
    pub key_data_type_repository: Arc<KeyDataTypeRepository>,
    /// Rastro de auditoría para el resumen diario.
    pub dispatch_log_repository: Arc<DispatchLogRepository>,
    /// Ledger de cola para el enfilado de boletos.
    pub queue_repository: Arc<QueueRepository>,
    /// Instante de ignición del proceso (sonda de salud).
    pub boot_instant: Instant,
}

impl AppState {
    /**
     * Forja el Estado Maestro inyectando todas las dependencias.
     */
    #[must_use]
    pub fn new(store_client: StoreClient) -> Self {
        debug!("🧬 [APP_STATE]: Executing ignition sequence V4.2...");

        Self {
            broadcast_hub: Arc::new(BroadcastHub::new()),
            request_repository: Arc::new(RequestRepository::new(store_client.clone())),
            key_data_type_repository: Arc::new(KeyDataTypeRepository::new(store_client.clone())),
            dispatch_log_repository: Arc::new(DispatchLogRepository::new(store_client.clone())),
            queue_repository: Arc::new(QueueRepository::new(store_client.clone())),
            boot_instant: Instant::now(),
            store_client,
        }
    }
}
