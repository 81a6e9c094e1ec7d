// [libs/infra/hub-client/src/errors.rs]
//! =================================================================
//! APARATO: HUB CLIENT ERRORS (V2.0 - FAULT CATALOG)
//! RESPONSABILIDAD: CATALOGACIÓN DE FALLOS DEL UPLINK DE DIFUSIÓN
//! =================================================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HubClientError {
    #[error("NETWORK_UNREACHABLE: Failed to reach broadcast gateway: {0}")]
    NetworkFault(#[from] reqwest::Error),

    #[error("GATEWAY_REJECTION: Broadcast gateway returned status {0}")]
    GatewayRejection(String),
}
