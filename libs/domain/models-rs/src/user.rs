// [libs/domain/models-rs/src/user.rs]
/*!
 * =================================================================
 * APARATO: EXECUTOR DOMAIN CONTRACT (V4.1 - CANDIDATE PROJECTION)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: DEFINICIÓN DE EJECUTORES Y SU PROYECCIÓN DE DESPACHO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. PROJECTION DISCIPLINE: El pipeline de despacho enumera ejecutores
 *    mediante 'CandidateProfile' (id, params, cuota), jamás el perfil
 *    completo — los campos de identidad son opacos para el núcleo.
 * 2. QUOTA SEMANTICS: 'max_daily_requests' ausente significa cuota
 *    ilimitada; el balanceador degrada la carga con daily/(daily+1).
 * =================================================================
 */

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/**
 * Ejecutor del sistema: receptor final de solicitudes despachadas.
 * Invariantes: 'username' único; 'params' conforme al registro de tipos.
 */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Identificador unívoco del ejecutor en el Ledger.
    pub id: String,
    /// Nombre de acceso único en todo el sistema.
    pub username: String,
    /// Material de credencial opaco; jamás inspeccionado por el núcleo.
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Parámetros declarados del ejecutor, ya casteados (clave -> valor).
    #[serde(default)]
    pub params: BTreeMap<String, Value>,
    /// Cuota diaria de solicitudes aceptables; None = ilimitada.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_daily_requests: Option<u32>,
}

/**
 * Proyección mínima del ejecutor consumida por el pipeline de despacho.
 * La enumeración masiva de candidatos sólo hidrata estas tres columnas.
 */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub id: String,
    #[serde(default)]
    pub params: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_daily_requests: Option<u32>,
}

impl From<&User> for CandidateProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            params: user.params.clone(),
            max_daily_requests: user.max_daily_requests,
        }
    }
}
