// [apps/orchestrator/src/handlers/stream.rs]
/*!
 * =================================================================
 * APARATO: OBSERVER SOCKET HANDLER (V4.3 - DUAL CHANNEL UPLINK)
 * CLASIFICACIÓN: API HANDLER (ESTRATO L4)
 * RESPONSABILIDAD: SUSCRIPCIÓN WEBSOCKET A LOS CANALES DEL HUB
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. CHANNEL ISOLATION: Cada endpoint ancla al socket exactamente a un
 *    canal ('new_requests' | 'dispatched'); sin replay, sin historia.
 * 2. LAG TOLERANCE: Un observador rezagado pierde tramas y continúa —
 *    la congestión de un socket jamás contamina al hub.
 * 3. KEEPALIVE DOCTRINE: Ping cada 25 s para sobrevivir proxies de
 *    capa 7 con cierre por inactividad.
 * =================================================================
 */

use crate::state::AppState;
use arbiter_domain_models::HubChannel;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures::{sink::SinkExt, stream::StreamExt};
use tokio::time::{interval, Duration};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Intervalo de latido (Keep-Alive).
const KEEPALIVE_INTERVAL_SECONDS: u64 = 25;

/**
 * Endpoint: GET /ws/newRequest — observadores de ingresos.
 */
#[instrument(skip(websocket_upgrade, application_state))]
pub async fn join_new_requests_stream(
    websocket_upgrade: WebSocketUpgrade,
    State(application_state): State<AppState>,
) -> impl IntoResponse {
    websocket_upgrade.on_upgrade(move |socket| {
        handle_subscription(socket, application_state, HubChannel::NewRequests)
    })
}

/**
 * Endpoint: GET /ws/dispatched — observadores de despachos consumados.
 */
#[instrument(skip(websocket_upgrade, application_state))]
pub async fn join_dispatched_stream(
    websocket_upgrade: WebSocketUpgrade,
    State(application_state): State<AppState>,
) -> impl IntoResponse {
    websocket_upgrade.on_upgrade(move |socket| {
        handle_subscription(socket, application_state, HubChannel::Dispatched)
    })
}

/**
 * Bucle soberano de la sesión: sifón del canal, keepalive y drenaje
 * del tráfico entrante hasta el cierre del observador.
 */
async fn handle_subscription(socket: WebSocket, application_state: AppState, channel: HubChannel) {
    let (mut socket_sender, mut socket_receiver) = socket.split();
    let mut channel_subscriber = application_state.broadcast_hub.subscribe(channel);

    let session_identifier = Uuid::new_v4().to_string();
    info!("⚡ [OBSERVER_JOIN]: Session {} anchored to '{}'.", session_identifier, channel.group_name());

    let mut keepalive_timer = interval(Duration::from_secs(KEEPALIVE_INTERVAL_SECONDS));

    loop {
        tokio::select! {
            // Brazo 1: Pulso de vida físico (Ping)
            _ = keepalive_timer.tick() => {
                if socket_sender.send(Message::Ping(Vec::new())).await.is_err() {
                    break;
                }
            },

            // Brazo 2: Sifón del canal del hub
            frame_reception = channel_subscriber.recv() => {
                match frame_reception {
                    Ok(hub_frame) => {
                        match serde_json::to_string(&hub_frame) {
                            Ok(frame_json) => {
                                if socket_sender.send(Message::Text(frame_json)).await.is_err() {
                                    warn!("⚠️ [OBSERVER_SEVERED]: Session {} lost downstream.", session_identifier);
                                    break;
                                }
                            }
                            Err(encode_fault) => {
                                warn!("⚠️ [FRAME_REJECTED]: Session {} dropped frame: {}", session_identifier, encode_fault);
                            }
                        }
                    },
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(missed_frames_count)) => {
                        warn!("🐢 [OBSERVER_LAG]: Session {} skipped {} frames.", session_identifier, missed_frames_count);
                    },
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                        break;
                    }
                }
            },

            // Brazo 3: Drenaje del tráfico entrante (Pong/Close)
            inbound_message = socket_receiver.next() => {
                match inbound_message {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!("👋 [OBSERVER_CLOSE]: Session {} closed by peer.", session_identifier);
                        break;
                    }
                    Some(Err(_)) => break,
                    // Pong y tráfico del observador se descartan en silencio.
                    Some(Ok(_)) => {}
                }
            },
        }
    }

    info!("🔌 [OBSERVER_LEAVE]: Session {} released from '{}'.", session_identifier, channel.group_name());
}
