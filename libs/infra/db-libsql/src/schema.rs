// [libs/infra/db-libsql/src/schema.rs]
/**
 * =================================================================
 * APARATO: DISPATCH LEDGER SCHEMA (V3.4 - IDEMPOTENT STRATA)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: GOBERNANZA ESTRUCTURAL E IDEMPOTENCIA TOTAL
 *
 * VISION HIPER-HOLÍSTICA:
 * 1. COLLECTION PARITY: Cuatro colecciones de dominio (user, request,
 *    key_data_types, dispatch_logs) más el ledger de cola.
 * 2. IDEMPOTENCIA: CREATE IF NOT EXISTS en todas las entidades;
 *    re-aplicable en caliente sin deriva.
 * 3. PERFORMANCE: Índices de aceleración para la agregación diaria,
 *    el reclamo de cola y el sellado de asignaciones.
 * =================================================================
 */

use anyhow::{Context, Result};
use libsql::Connection;
use tracing::{debug, info, instrument};

/**
 * ESTRATO 1: SOLIDIFICACIÓN (Génesis de Tablas)
 * Define las entidades base del ecosistema de despacho.
 */
const DISPATCH_TABLES: &[(&str, &str)] = &[
    ("TABLE_USER", r#"
        CREATE TABLE IF NOT EXISTS user (
            id TEXT PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            password TEXT NOT NULL,
            email TEXT,
            first_name TEXT,
            last_name TEXT,
            params TEXT NOT NULL DEFAULT '{}',
            max_daily_requests INTEGER
        );
    "#),
    ("TABLE_REQUEST", r#"
        CREATE TABLE IF NOT EXISTS request (
            id TEXT PRIMARY KEY,
            parent_id TEXT,
            user_id TEXT,
            params TEXT NOT NULL DEFAULT '{}',
            text TEXT,
            status TEXT NOT NULL DEFAULT 'processed',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
    "#),
    ("TABLE_KEY_DATA_TYPES", r#"
        CREATE TABLE IF NOT EXISTS key_data_types (
            name TEXT PRIMARY KEY,
            type_of TEXT NOT NULL DEFAULT 'string'
        );
    "#),
    ("TABLE_DISPATCH_LOGS", r#"
        CREATE TABLE IF NOT EXISTS dispatch_logs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            request_id TEXT NOT NULL,
            task_id TEXT NOT NULL,
            parent_id TEXT,
            request_created_at TEXT NOT NULL,
            request_updated_at TEXT NOT NULL
        );
    "#),
    ("TABLE_DISPATCH_QUEUE", r#"
        CREATE TABLE IF NOT EXISTS dispatch_queue (
            task_id TEXT PRIMARY KEY,
            request_id TEXT NOT NULL,
            payload TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'queued',
            attempt_count INTEGER NOT NULL DEFAULT 0,
            next_attempt_at TEXT NOT NULL,
            leased_until TEXT,
            created_at TEXT NOT NULL
        );
    "#),
];

/**
 * ESTRATO 2: ACELERACIÓN (Índices de Despacho)
 * La agregación diaria y el reclamo de cola son las rutas calientes.
 */
const DISPATCH_INDICES: &[(&str, &str)] = &[
    ("IDX_REQUEST_STATUS_CREATED", r#"
        CREATE INDEX IF NOT EXISTS idx_request_status_created
        ON request (status, created_at);
    "#),
    ("IDX_REQUEST_ASSIGNEE", r#"
        CREATE INDEX IF NOT EXISTS idx_request_assignee
        ON request (user_id);
    "#),
    ("IDX_QUEUE_CLAIM", r#"
        CREATE INDEX IF NOT EXISTS idx_queue_claim
        ON dispatch_queue (status, next_attempt_at, created_at);
    "#),
    ("IDX_LOGS_REQUEST_CREATED", r#"
        CREATE INDEX IF NOT EXISTS idx_logs_request_created
        ON dispatch_logs (request_created_at);
    "#),
];

/**
 * Aplica la totalidad del esquema del Ledger de despacho.
 * Re-aplicable en caliente: toda sentencia es idempotente.
 *
 * # Errors:
 * Propaga el primer fallo estructural con el nombre del aparato SQL.
 */
#[instrument(skip(ledger_connection))]
pub async fn apply_dispatch_schema(ledger_connection: &Connection) -> Result<()> {
    for (table_label, table_definition) in DISPATCH_TABLES {
        debug!("🧱 [SCHEMA]: Solidifying {}", table_label);
        ledger_connection
            .execute(table_definition, ())
            .await
            .with_context(|| format!("SCHEMA_FAULT: table genesis collapsed at {}", table_label))?;
    }

    for (index_label, index_definition) in DISPATCH_INDICES {
        debug!("⚡ [SCHEMA]: Accelerating {}", index_label);
        ledger_connection
            .execute(index_definition, ())
            .await
            .with_context(|| format!("SCHEMA_FAULT: index genesis collapsed at {}", index_label))?;
    }

    info!("🏛️  [SCHEMA]: Dispatch ledger strata levelized ({} tables, {} indices).",
        DISPATCH_TABLES.len(), DISPATCH_INDICES.len());

    Ok(())
}
