// [libs/domain/models-rs/src/events.rs]
/*!
 * =================================================================
 * APARATO: REALTIME FRAME CONTRACT (V4.1 - DUAL CHANNEL)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: TRAMAS DE DIFUSIÓN HACIA OBSERVADORES SUSCRITOS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. TAGGED WIRE FORMAT: El discriminante viaja en el campo 'type'
 *    ('new_request' | 'request_dispatched'), bit-perfecto con los
 *    consumidores WebSocket.
 * 2. CHANNEL ROUTING: Cada trama conoce su canal de difusión; el hub
 *    enruta sin inspección estructural adicional.
 * =================================================================
 */

use crate::request::RequestStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canales nominales del hub de difusión.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HubChannel {
    /// Observadores de solicitudes recién ingresadas.
    NewRequests,
    /// Observadores de despachos consumados.
    Dispatched,
}

impl HubChannel {
    /// Nombre nominal del grupo de suscripción.
    #[must_use]
    pub fn group_name(&self) -> &'static str {
        match self {
            HubChannel::NewRequests => "new_requests",
            HubChannel::Dispatched => "dispatched",
        }
    }
}

/**
 * Trama JSON empujada a los observadores conectados.
 * Entrega best-effort: sin replay, sin persistencia.
 */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HubFrame {
    /// Una solicitud acaba de ingresar al sistema.
    NewRequest {
        id: String,
        status: RequestStatus,
        timestamp: DateTime<Utc>,
    },
    /// Una solicitud acaba de ser sellada sobre un ejecutor.
    RequestDispatched {
        request_id: String,
        user: String,
        timestamp: DateTime<Utc>,
    },
}

impl HubFrame {
    /// Canal de difusión al que pertenece la trama.
    #[must_use]
    pub fn channel(&self) -> HubChannel {
        match self {
            HubFrame::NewRequest { .. } => HubChannel::NewRequests,
            HubFrame::RequestDispatched { .. } => HubChannel::Dispatched,
        }
    }
}
