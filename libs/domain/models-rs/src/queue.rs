// [libs/domain/models-rs/src/queue.rs]
/*!
 * =================================================================
 * APARATO: QUEUE TICKET CONTRACT (V4.1 - AT-LEAST-ONCE)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: BOLETOS DEL LEDGER DE COLA Y SU CARGA DE CABLE
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. WIRE FORMAT PARITY: La carga útil persiste como JSON
 *    `{"id": request_id}` — el contrato exacto entre el enfilador HTTP
 *    y los procesos trabajadores.
 * 2. ATTEMPT ACCOUNTING: 'attempt_count' crece en cada reclamo,
 *    permitiendo backoff acotado y diagnóstico de redeliveries.
 * =================================================================
 */

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Carga útil de cable transportada por cada boleto de la cola.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketPayload {
    /// Identificador de la solicitud a despachar.
    pub id: String,
}

/**
 * Boleto reclamado del ledger de cola, arrendado a un trabajador.
 * El arrendamiento (visibilidad) expira si el trabajador perece, y el
 * boleto vuelve a ser reclamable — entrega al-menos-una-vez.
 */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchTicket {
    /// Identificador estable del intento de despacho.
    pub task_id: Uuid,
    /// Solicitud referida por la carga útil del boleto.
    pub request_id: String,
    /// Cantidad de reclamos acumulados (1 en la primera entrega).
    pub attempt_count: u32,
}
