// [apps/orchestrator/src/main.rs]
/*!
 * =================================================================
 * APARATO: ORCHESTRATOR MAIN ENTRY POINT (V4.2 - GOLD MASTER)
 * CLASIFICACIÓN: APPLICATION SHELL (ESTRATO L3)
 * RESPONSABILIDAD: BOOTSTRAP DE INFRAESTRUCTURA E IGNICIÓN SEGURA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. DETERMINISTIC IGNITION: La hidratación de entorno y el enlace al
 *    Ledger preceden a la apertura del socket TCP.
 * 2. EXPLICIT RUNTIME: Runtime multi-hilo construido de forma nominal
 *    en el shell; el resto del árbol ignora su existencia.
 * =================================================================
 */

use arbiter_orchestrator::prelude::*;

use arbiter_shared_heimdall::init_tracing;
use dotenvy::dotenv;
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. CARGA DE ENTORNO
    dotenv().ok();

    // 2. INICIALIZACIÓN DE OBSERVABILIDAD (HEIMDALL)
    init_tracing("arbiter_orchestrator");

    // 3. CONFIGURACIÓN DEL RUNTIME
    let runtime_orchestrator = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime_orchestrator.block_on(async {
        info!("🛰️  [COMMAND_CENTER]: Ignition sequence starting...");

        // 4. ADQUISICIÓN DE COORDENADAS DE ENTORNO
        let database_connection_url = std::env::var("DATABASE_URL")
            .expect("CRITICAL_FAULT: DATABASE_URL not defined in runtime environment.");

        let database_access_token = std::env::var("DATABASE_AUTH_TOKEN").ok();

        let listening_network_port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .unwrap_or(3000);

        // 5. CONSTRUCCIÓN DEL KERNEL
        let kernel_instance = OrchestratorKernel::ignite(
            &database_connection_url,
            database_access_token,
            listening_network_port,
        )
        .await;

        // 6. IGNICIÓN DE LA SUPERFICIE DE MANDO
        info!("🚀 [COMMAND_CENTER]: System operational on port {}.", listening_network_port);
        kernel_instance.launch_command_surface().await;

        Ok(())
    })
}
