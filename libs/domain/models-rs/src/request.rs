// [libs/domain/models-rs/src/request.rs]
/*!
 * =================================================================
 * APARATO: REQUEST LIFECYCLE CONTRACT (V4.2 - ASSIGNMENT READY)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: DEFINICIÓN DE SOLICITUDES Y SU CICLO DE ESTADOS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. LIFECYCLE DISCIPLINE: Nace en 'processed' sin asignatario; el
 *    despachador sólo escribe 'user_id' y 'updated_at'. Las
 *    transiciones a accept/reject/await pertenecen a sistemas externos.
 * 2. PARENT AS IDENTIFIER: 'parent_id' se persiste como id puro y se
 *    resuelve bajo demanda; sin punteros inversos, sin ciclos reales.
 * =================================================================
 */

use crate::condition::Condition;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Estados reconocidos del ciclo de vida de una solicitud.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Estado inicial: en tránsito por el pipeline de despacho.
    Processed,
    /// En espera de resolución externa.
    Await,
    /// Aceptada por el ejecutor; alimenta el contador diario.
    Accept,
    /// Rechazada por el ejecutor.
    Reject,
}

impl RequestStatus {
    /// Etiqueta canónica persistida en la columna 'status'.
    #[must_use]
    pub fn as_label(&self) -> &'static str {
        match self {
            RequestStatus::Processed => "processed",
            RequestStatus::Await => "await",
            RequestStatus::Accept => "accept",
            RequestStatus::Reject => "reject",
        }
    }

    /// Resuelve la etiqueta textual del Ledger a su estado tipado.
    #[must_use]
    pub fn from_label(raw_label: &str) -> Option<Self> {
        match raw_label {
            "processed" => Some(RequestStatus::Processed),
            "await" => Some(RequestStatus::Await),
            "accept" => Some(RequestStatus::Accept),
            "reject" => Some(RequestStatus::Reject),
            _ => None,
        }
    }
}

impl Default for RequestStatus {
    fn default() -> Self {
        RequestStatus::Processed
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_label())
    }
}

/**
 * Unidad de trabajo sometida a arbitraje.
 * El mapa 'params' porta condiciones ponderadas ya validadas por C1.
 */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Identificador unívoco de la solicitud.
    pub id: String,
    /// Identificador de la solicitud madre (cadenas de derivación).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Ejecutor asignado; None hasta el sellado del despacho.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Condiciones ponderadas por clave de parámetro.
    #[serde(default)]
    pub params: BTreeMap<String, Condition>,
    /// Descripción libre, opaca para el núcleo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Estado vigente del ciclo de vida.
    #[serde(default)]
    pub status: RequestStatus,
    /// Instante de creación (UTC).
    pub created_at: DateTime<Utc>,
    /// Instante de última modificación (UTC).
    pub updated_at: DateTime<Utc>,
}

impl Request {
    /// Indica si la solicitud ya posee un asignatario sellado.
    #[must_use]
    pub fn is_assigned(&self) -> bool {
        self.user_id.is_some()
    }
}
