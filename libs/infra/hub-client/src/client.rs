// [libs/infra/hub-client/src/client.rs]
/*!
 * =================================================================
 * APARATO: BROADCAST HUB UPLINK (V2.2 - FIRE AND FORGET)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: PUBLICACIÓN DE TRAMAS HACIA EL GATEWAY DEL HUB
 *
 * VISION HIPER-HOLÍSTICA:
 * Implementa el túnel de comunicación entre los procesos trabajadores
 * y el hub de difusión del orquestador. Un solo intento por trama:
 * el fallo se reporta al llamador, que lo traga con un rastro — la
 * consumación del despacho jamás queda condicionada a la difusión.
 * =================================================================
 */

use crate::errors::HubClientError;
use arbiter_domain_models::HubFrame;
use reqwest::Client;
use tracing::{debug, instrument};

/// Ventana máxima de espera del gateway antes de abandonar la trama.
const UPLINK_TIMEOUT_SECONDS: u64 = 5;

pub struct HubClient {
    network_session_client: Client,
    gateway_base_endpoint: String,
}

impl HubClient {
    /**
     * Inicializa el uplink hacia el gateway de difusión.
     *
     * @param base_url Endpoint raíz del orquestador.
     */
    #[must_use]
    pub fn new(base_url: String) -> Self {
        Self {
            network_session_client: Client::builder()
                .user_agent("Arbiter-Dispatch-Worker/V2.2")
                .timeout(std::time::Duration::from_secs(UPLINK_TIMEOUT_SECONDS))
                .build()
                .unwrap_or_default(),
            gateway_base_endpoint: base_url.trim_end_matches('/').to_string(),
        }
    }

    /**
     * Publica una trama en su canal del hub. Un intento, sin replay.
     *
     * # Errors:
     * - `HubClientError::NetworkFault`: Gateway inalcanzable o timeout.
     * - `HubClientError::GatewayRejection`: Respuesta fuera del rango 2xx.
     */
    #[instrument(skip(self, frame))]
    pub async fn publish_frame(&self, frame: &HubFrame) -> Result<(), HubClientError> {
        let target_url = format!("{}/api/v1/internal/broadcast", self.gateway_base_endpoint);

        let gateway_response = self
            .network_session_client
            .post(&target_url)
            .json(frame)
            .send()
            .await?;

        if !gateway_response.status().is_success() {
            return Err(HubClientError::GatewayRejection(format!(
                "HTTP_{}",
                gateway_response.status()
            )));
        }

        debug!("📡 [HUB_UPLINK]: Frame delivered to channel '{}'.", frame.channel().group_name());
        Ok(())
    }
}
