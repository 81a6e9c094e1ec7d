// [apps/orchestrator/src/kernel.rs]
/**
 * =================================================================
 * APARATO: ORCHESTRATOR KERNEL (V4.2 - COMPOSITION ROOT)
 * CLASIFICACIÓN: COMPOSITION ROOT (ESTRATO L1-APP)
 * RESPONSABILIDAD: BOOTSTRAP DE INFRAESTRUCTURA E IGNICIÓN SEGURA
 *
 * VISION HIPER-HOLÍSTICA:
 * Actúa como la placa base donde se conectan los servicios: establece
 * el enlace con el Ledger ANTES de abrir el socket TCP, previniendo
 * estados de carrera donde un trabajador publique tramas hacia un hub
 * aún no cristalizado.
 * =================================================================
 */

use crate::routes::create_dispatch_router;
use crate::state::AppState;
use arbiter_infra_db::StoreClient;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tracing::{error, info, instrument};

pub struct OrchestratorKernel {
    pub server_network_port: u16,
    pub application_shared_state: AppState,
}

impl OrchestratorKernel {
    /**
     * Realiza la ignición del cliente del Ledger y el estado maestro.
     */
    #[instrument(skip(database_access_token))]
    pub async fn ignite(
        database_connection_url: &str,
        database_access_token: Option<String>,
        listening_port: u16,
    ) -> Self {
        let store_client = StoreClient::connect(database_connection_url, database_access_token)
            .await
            .expect("FATAL: Ledger link collapse. Ignition aborted.");

        Self {
            server_network_port: listening_port,
            application_shared_state: AppState::new(store_client),
        }
    }

    /**
     * Levanta el servidor HTTP/WS principal. Bloqueante hasta el cierre.
     */
    pub async fn launch_command_surface(self) {
        let dispatch_router = create_dispatch_router(self.application_shared_state);

        let listening_address = SocketAddr::new(
            IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            self.server_network_port,
        );

        info!("🛰️  [KERNEL]: Command surface binding on {}.", listening_address);

        let tcp_listener = match tokio::net::TcpListener::bind(listening_address).await {
            Ok(listener) => listener,
            Err(bind_fault) => {
                error!("❌ [KERNEL]: TCP binding rejected: {}", bind_fault);
                std::process::exit(1);
            }
        };

        if let Err(serve_fault) = axum::serve(tcp_listener, dispatch_router).await {
            error!("💀 [KERNEL]: Command surface collapsed: {}", serve_fault);
        }
    }
}
