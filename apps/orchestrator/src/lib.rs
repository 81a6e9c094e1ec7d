// [apps/orchestrator/src/lib.rs]
/*!
 * =================================================================
 * APARATO: ORCHESTRATOR LIBRARY ROOT (V4.1 - COMMAND AUTHORITY)
 * CLASIFICACIÓN: CRATE ROOT (ESTRATO L3)
 * RESPONSABILIDAD: DEFINICIÓN SUPREMA DEL ÁRBOL DE MÓDULOS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. MODULE HIERARCHY: Autoridad única de módulos; 'crate::' resuelve
 *    de forma determinista en la librería y el binario.
 * 2. PUBLIC INTERFACE: Expone 'prelude' para la ignición mínima del
 *    Kernel desde 'main.rs' y las suites espejo.
 * =================================================================
 */

// --- ESTRATO DE DATOS Y ESTADO ---
/// Contenedor de estado compartido del orquestador.
pub mod state;

// --- ESTRATO DE TRANSPORTE Y ACCIÓN ---
/// Adaptadores de entrada para ráfagas HTTP y WebSockets.
pub mod handlers;
/// Núcleo de mando para la ignición de servicios.
pub mod kernel;
/// Definición de rutas y topología de red.
pub mod routes;

// --- ESTRATO DE SERVICIOS ---
/// Hub de difusión en tiempo real.
pub mod services;

/**
 * PRELUDIO DEL ORQUESTADOR
 *
 * Re-exportación estratégica de los componentes necesarios para la
 * ignición mínima del sistema.
 */
pub mod prelude {
    pub use crate::kernel::OrchestratorKernel;
    pub use crate::routes::create_dispatch_router;
    pub use crate::services::event_bus::BroadcastHub;
    pub use crate::state::AppState;
}
