// [apps/orchestrator/src/services/event_bus.rs]
/*!
 * =================================================================
 * APARATO: BROADCAST HUB SERVICE (V4.2 - DUAL CHANNEL MASTER)
 * CLASIFICACIÓN: APPLICATION SERVICES (ESTRATO L4)
 * RESPONSABILIDAD: DIFUSIÓN BEST-EFFORT HACIA OBSERVADORES SUSCRITOS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. CHANNEL SOVEREIGNTY: Dos canales nominales ('new_requests' y
 *    'dispatched'); cada trama conoce el suyo y el hub enruta sin
 *    inspección estructural.
 * 2. NO REPLAY DOCTRINE: Fan-out exclusivo a suscriptores conectados;
 *    sin persistencia, sin replay, sin backpressure sobre el emisor.
 *
 * # Mathematical Proof (Signal Propagation):
 * El despacho de una trama es O(1) respecto al número de receptores;
 * la pérdida o el rezago de un suscriptor jamás bloquea al emisor
 * (Lock-Free Emission sobre tokio::broadcast).
 * =================================================================
 */

use arbiter_domain_models::{HubChannel, HubFrame};
use tokio::sync::broadcast;
use tracing::trace;

/// Capacidad de cada canal de difusión.
/// Sintonizada para absorber ráfagas de despacho sin disparar 'Lagged'.
const HUB_CHANNEL_CAPACITY: usize = 4096;

/**
 * Hub central de señales en tiempo real del orquestador.
 */
#[derive(Debug)]
pub struct BroadcastHub {
    new_requests_channel: broadcast::Sender<HubFrame>,
    dispatched_channel: broadcast::Sender<HubFrame>,
}

impl BroadcastHub {
    /**
     * Forja el hub con ambos canales endurecidos.
     */
    #[must_use]
    pub fn new() -> Self {
        let (new_requests_sender, _) = broadcast::channel(HUB_CHANNEL_CAPACITY);
        let (dispatched_sender, _) = broadcast::channel(HUB_CHANNEL_CAPACITY);
        Self {
            new_requests_channel: new_requests_sender,
            dispatched_channel: dispatched_sender,
        }
    }

    /**
     * Genera un receptor fresco para el canal indicado.
     * El coste de suscripción es despreciable.
     */
    #[must_use]
    pub fn subscribe(&self, channel: HubChannel) -> broadcast::Receiver<HubFrame> {
        self.sender_for(channel).subscribe()
    }

    /**
     * Publica una trama en su canal nominal.
     * Sin suscriptores activos, la trama se descarta en silencio.
     */
    pub fn publish(&self, frame: HubFrame) {
        let channel = frame.channel();
        match self.sender_for(channel).send(frame) {
            Ok(subscriber_count) => {
                trace!("📡 [HUB]: Frame broadcasted on '{}' to {} active links.",
                    channel.group_name(), subscriber_count);
            }
            Err(_) => {
                // Sin receptores vivos: silencio nominal del canal.
                trace!("💤 [HUB]: Frame discarded on '{}'. No active links.", channel.group_name());
            }
        }
    }

    /// Cantidad de suscriptores vivos de un canal (sonda de salud).
    #[must_use]
    pub fn subscriber_count(&self, channel: HubChannel) -> usize {
        self.sender_for(channel).receiver_count()
    }

    fn sender_for(&self, channel: HubChannel) -> &broadcast::Sender<HubFrame> {
        match channel {
            HubChannel::NewRequests => &self.new_requests_channel,
            HubChannel::Dispatched => &self.dispatched_channel,
        }
    }
}

impl Default for BroadcastHub {
    fn default() -> Self {
        Self::new()
    }
}
