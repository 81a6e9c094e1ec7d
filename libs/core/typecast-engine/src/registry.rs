// [libs/core/typecast-engine/src/registry.rs]
/*!
 * =================================================================
 * APARATO: KEY TYPE REGISTRY SNAPSHOT (V3.0 - IMMUTABLE STRATA)
 * CLASIFICACIÓN: CORE ENGINE (ESTRATO L1)
 * RESPONSABILIDAD: RESOLUCIÓN CLAVE -> TIPO POR RÁFAGA DE VALIDACIÓN
 *
 * # Mathematical Proof (Snapshot Consistency):
 * Cada ráfaga de validación consume una instantánea inmutable del
 * registro. Dos condiciones del mismo mapa jamás observan tipos
 * distintos para la misma clave, sin importar mutaciones concurrentes
 * del Ledger.
 * =================================================================
 */

use arbiter_domain_models::{KeyDataType, ParamKind};
use std::collections::HashMap;

/// Instantánea inmutable del registro de tipos por clave.
/// Claves no registradas degradan a 'string' por contrato.
#[derive(Debug, Clone, Default)]
pub struct KeyTypeRegistry {
    registered_kinds: HashMap<String, ParamKind>,
}

impl KeyTypeRegistry {
    /// Construye la instantánea desde los registros hidratados del Ledger.
    #[must_use]
    pub fn from_records(records: Vec<KeyDataType>) -> Self {
        let registered_kinds = records
            .into_iter()
            .map(|record| (record.name, record.type_of))
            .collect();
        Self { registered_kinds }
    }

    /// Resuelve el tipo gobernante de una clave (fallback: 'string').
    #[must_use]
    pub fn kind_for(&self, parameter_key: &str) -> ParamKind {
        self.registered_kinds
            .get(parameter_key)
            .copied()
            .unwrap_or_default()
    }

    /// Cantidad de claves gobernadas por la instantánea.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registered_kinds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registered_kinds.is_empty()
    }
}
