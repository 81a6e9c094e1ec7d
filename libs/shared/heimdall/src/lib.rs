// [libs/shared/heimdall/src/lib.rs]
/*!
 * =================================================================
 * APARATO: HEIMDALL DISPATCH OBSERVER (V3.0 - SENTINEL STRATA)
 * CLASIFICACIÓN: SHARED UTILITY (ESTRATO L4/L6)
 * RESPONSABILIDAD: TELEMETRÍA DEL GRID DE DESPACHO Y CENTINELA DE PÁNICOS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. DISPATCH-FIRST FILTERING: Las directivas por defecto iluminan los
 *    estratos del arbitraje (frontera de casteo, Ledger, uplink del
 *    hub) y amordazan el transporte HTTP y el driver SQL.
 * 2. SENTINEL DOCTRINE: Un pánico en cualquier hilo — bucle de consumo,
 *    sellado desprendido o socket de observadores — deja coordenadas y
 *    causa en el rastro estructurado antes de la defunción.
 * 3. DUAL RENDERING: Consola compacta para el operador local; JSON
 *    aplanado para la ingesta de producción.
 * =================================================================
 */

use std::any::Any;
use std::panic;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Estratos de infraestructura amordazados en las directivas por defecto.
/// El transporte y el driver sólo hablan cuando algo va mal.
const MUZZLED_INFRASTRUCTURE_DIRECTIVES: &[&str] = &[
    "tower_http=warn",
    "hyper=warn",
    "reqwest=warn",
    "libsql=error",
];

/// Estratos del dominio de despacho iluminados junto al servicio anfitrión.
const DISPATCH_DOMAIN_TARGETS: &[&str] = &[
    "arbiter_infra_db",
    "arbiter_infra_hub_client",
    "arbiter_core_scoring",
];

/// Inicializa la telemetría del grid y arma el centinela de pánicos.
///
/// Respeta `RUST_LOG` cuando el operador lo declara; en su ausencia,
/// compone las directivas de despacho por defecto.
///
/// # Errors:
/// Provoca pánico si otro suscriptor global ya fue inicializado — la
/// ignición de telemetría pertenece en exclusiva al shell del binario.
pub fn init_tracing(service_nominal_identifier: &str) {
    let environmental_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(compose_dispatch_directives(service_nominal_identifier)));

    if cfg!(debug_assertions) {
        // Operador local: líneas compactas, sin ruido de targets.
        tracing_subscriber::fmt()
            .with_env_filter(environmental_filter)
            .compact()
            .with_target(false)
            .init();
    } else {
        // Producción: tramas JSON aplanadas para la ingesta estructurada.
        tracing_subscriber::fmt()
            .with_env_filter(environmental_filter)
            .json()
            .flatten_event(true)
            .init();
    }

    arm_panic_sentinel(service_nominal_identifier);

    info!(
        "👁️  [HEIMDALL]: Dispatch telemetry online for [{}]. Panic sentinel armed.",
        service_nominal_identifier
    );
}

/// Compone las directivas por defecto: el servicio anfitrión y los
/// estratos del arbitraje al nivel del perfil, la infraestructura
/// amordazada detrás.
fn compose_dispatch_directives(service_nominal_identifier: &str) -> String {
    let domain_level = if cfg!(debug_assertions) { "debug" } else { "info" };

    let mut directives = Vec::with_capacity(DISPATCH_DOMAIN_TARGETS.len() + 5);
    directives.push(format!("{}={}", service_nominal_identifier, domain_level));
    for domain_target in DISPATCH_DOMAIN_TARGETS {
        directives.push(format!("{}={}", domain_target, domain_level));
    }
    directives.extend(
        MUZZLED_INFRASTRUCTURE_DIRECTIVES
            .iter()
            .map(|muzzle| (*muzzle).to_string()),
    );

    directives.join(",")
}

/**
 * Arma el centinela global: todo colapso de hilo — un despacho a medio
 * sellar, un socket de observadores, el bucle de reclamo — queda
 * registrado con sitio y causa antes de que el proceso muera.
 */
fn arm_panic_sentinel(service_nominal_identifier: &str) {
    let service_label = service_nominal_identifier.to_owned();

    panic::set_hook(Box::new(move |panic_metadata| {
        let crash_site = panic_metadata
            .location()
            .map(|site| format!("{} (line {})", site.file(), site.line()))
            .unwrap_or_else(|| "unresolved crash site".to_owned());

        error!(
            target: "dispatch_sentinel",
            service = %service_label,
            site = %crash_site,
            "💥 [SENTINEL]: Dispatch stratum collapsed mid-flight: {}",
            describe_panic_cause(panic_metadata.payload())
        );
    }));
}

/// Extrae la causa legible del payload del pánico, sea literal estático
/// o mensaje formateado; lo demás queda como causa opaca.
fn describe_panic_cause(panic_payload: &(dyn Any + Send)) -> String {
    if let Some(static_message) = panic_payload.downcast_ref::<&str>() {
        (*static_message).to_owned()
    } else if let Some(formatted_message) = panic_payload.downcast_ref::<String>() {
        formatted_message.clone()
    } else {
        "opaque panic payload".to_owned()
    }
}
