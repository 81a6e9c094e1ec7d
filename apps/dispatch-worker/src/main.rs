// [apps/dispatch-worker/src/main.rs]
/*!
 * =================================================================
 * APARATO: DISPATCH WORKER SHELL (V4.2 - ZENITH SHELL)
 * CLASIFICACIÓN: APPLICATION LAYER (ENTRY POINT)
 * RESPONSABILIDAD: BOOTSTRAP DE ENTORNO E IGNICIÓN DEL MOTOR
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ARCHITECTURAL PURITY: El shell sólo hidrata configuración y
 *    señales; la totalidad de la operación vive en 'DispatchEngine'.
 * 2. ORDERED TERMINATION: Arc<AtomicBool> propaga la señal de apagado
 *    sin condiciones de carrera; el despacho en curso corre a término.
 * 3. OPTIONAL UPLINK: Sin gateway de difusión configurado, el nodo
 *    despacha mudo — la consumación jamás depende del hub.
 * =================================================================
 */

use anyhow::Result;
use clap::Parser;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

use arbiter_core_scoring::DispatchPolicy;
use arbiter_dispatch_worker::prelude::*;
use arbiter_infra_db::repositories::{
    DispatchLogRepository, QueueRepository, RequestRepository, UserRepository,
};
use arbiter_infra_db::StoreClient;
use arbiter_infra_hub_client::HubClient;
use arbiter_shared_heimdall::init_tracing;

/**
 * Directivas de mando del nodo trabajador.
 * Configuración inyectada vía CLI o variables de entorno.
 */
#[derive(Parser, Debug)]
#[command(
    author = "Arbiter Core Team",
    version = "4.2",
    about = "Arbiter Dispatch Worker // Queue consumption and arbitration node"
)]
struct WorkerDirectives {
    /// URL del Ledger autoritativo (local, :memory: o libsql://).
    #[arg(long, env = "DATABASE_URL")]
    database_connection_url: String,

    /// Token de acceso para Ledgers remotos.
    #[arg(long, env = "DATABASE_AUTH_TOKEN")]
    database_access_token: Option<String>,

    /// Endpoint raíz del orquestador para la difusión de tramas.
    #[arg(long, env = "HUB_GATEWAY_URL")]
    hub_gateway_url: Option<String>,

    /// Doctrina de selección: score_load_mixture | height_threshold.
    #[arg(long, env = "DISPATCH_POLICY", default_value = "score_load_mixture")]
    dispatch_policy: String,

    /// Fracción mínima de idoneidad de los candidatos primarios.
    #[arg(long, env = "MIN_SCORE_FRACTION", default_value_t = 0.7)]
    min_score_fraction: f64,

    /// Límite blando de ejecución por despacho.
    #[arg(long, env = "DISPATCH_SOFT_TIME_LIMIT_SECONDS", default_value_t = 30)]
    soft_time_limit_seconds: u64,

    /// Ventana de visibilidad del arrendamiento de boletos.
    #[arg(long, env = "QUEUE_VISIBILITY_TIMEOUT_SECONDS", default_value_t = 600)]
    visibility_timeout_seconds: i64,

    /// Backoff base de reintento transitorio.
    #[arg(long, env = "QUEUE_RETRY_BACKOFF_SECONDS", default_value_t = 300)]
    retry_backoff_seconds: i64,

    /// Pausa del bucle ante ledger vacío.
    #[arg(long, env = "QUEUE_POLL_INTERVAL_MILLIS", default_value_t = 1000)]
    poll_interval_millis: u64,

    /// Cadencia legada de reintento ante flota sin candidatos.
    #[arg(long, env = "NO_CANDIDATES_RETRY_SECONDS")]
    no_candidates_retry_seconds: Option<i64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. CARGA DE ENTORNO Y OBSERVABILIDAD
    dotenvy::dotenv().ok();
    init_tracing("arbiter_dispatch_worker");

    info!("💠 [SHELL]: Dispatch worker ignition sequence V4.2 starting...");

    // 2. PARSEO DE DIRECTIVAS ESTRATÉGICAS
    let worker_directives = WorkerDirectives::parse();

    let dispatch_policy = DispatchPolicy::from_label(&worker_directives.dispatch_policy)
        .unwrap_or_else(|| {
            warn!("⚠️ [SHELL]: Unknown policy '{}'; falling back to mixture doctrine.",
                worker_directives.dispatch_policy);
            DispatchPolicy::default()
        });

    // 3. PROTOCOLO DE SEÑALES (Terminación Ordenada)
    let termination_signal_atomic = Arc::new(AtomicBool::new(true));
    let signal_flag_reference = Arc::clone(&termination_signal_atomic);

    tokio::spawn(async move {
        if (tokio::signal::ctrl_c().await).is_ok() {
            warn!("⚠️ [SIGNAL]: Termination requested by host. Sealing current dispatch...");
            signal_flag_reference.store(false, std::sync::atomic::Ordering::SeqCst);
        }
    });

    // 4. ENLACE CON EL LEDGER AUTORITATIVO
    let store_client = StoreClient::connect(
        &worker_directives.database_connection_url,
        worker_directives.database_access_token.clone(),
    )
    .await?;

    // 5. HIDRATACIÓN DE REPOSITORIOS Y ESTADO DE PROCESO
    let request_repository = Arc::new(RequestRepository::new(store_client.clone()));
    let user_repository = Arc::new(UserRepository::new(store_client.clone()));
    let dispatch_log_repository = Arc::new(DispatchLogRepository::new(store_client.clone()));
    let queue_repository = Arc::new(QueueRepository::new(store_client.clone()));
    let daily_ledger = Arc::new(DailyLoadLedger::new(Arc::clone(&request_repository)));

    let hub_uplink = worker_directives.hub_gateway_url.clone().map(|gateway_url| {
        info!("📡 [SHELL]: Broadcast uplink targeting [{}].", gateway_url);
        Arc::new(HubClient::new(gateway_url))
    });
    if hub_uplink.is_none() {
        warn!("🔇 [SHELL]: No broadcast gateway configured; dispatching silently.");
    }

    // 6. CONSTRUCCIÓN DEL PIPELINE Y DEL MOTOR DE CONSUMO
    let pipeline = Arc::new(DispatchPipeline::new(
        request_repository,
        user_repository,
        dispatch_log_repository,
        daily_ledger,
        hub_uplink,
        worker_directives.min_score_fraction,
        dispatch_policy,
    ));

    let engine_settings = EngineSettings {
        visibility_timeout_seconds: worker_directives.visibility_timeout_seconds,
        soft_time_limit_seconds: worker_directives.soft_time_limit_seconds,
        retry_backoff_seconds: worker_directives.retry_backoff_seconds,
        poll_interval_millis: worker_directives.poll_interval_millis,
        no_candidates_retry_seconds: worker_directives.no_candidates_retry_seconds,
    };

    let consumption_engine = DispatchEngine::new(
        queue_repository,
        pipeline,
        termination_signal_atomic,
        engine_settings,
    );

    info!("🚀 [SHELL]: Handing control to DispatchEngine ({} doctrine).", dispatch_policy.as_label());

    // Ejecución bloqueante del bucle de consumo
    consumption_engine.ignite().await;

    // 7. CIERRE DETERMINISTA
    info!("🏁 [SHELL]: Worker node sealed. Goodbye.");
    Ok(())
}
