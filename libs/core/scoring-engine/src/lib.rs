// [libs/core/scoring-engine/src/lib.rs]
/*!
 * =================================================================
 * APARATO: SCORING ENGINE ROOT (V3.3 - ARBITRATION CORE)
 * CLASIFICACIÓN: CORE ENGINE (ESTRATO L1)
 * RESPONSABILIDAD: AUTORIDAD ÚNICA DEL CÁLCULO DE ARBITRAJE
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. PURE STRATA: Ningún módulo de este motor toca red, Ledger ni
 *    reloj de pared. Entradas tipadas, salidas deterministas.
 * 2. SWALLOWED OPERAND FAULTS: Un desajuste de tipos entre operandos
 *    degrada a no-match con peso, jamás colapsa la ráfaga de despacho.
 * 3. STABLE ARBITRATION: El desempate por identificador lexicográfico
 *    garantiza un ganador reproducible entre factores idénticos.
 * =================================================================
 */

/// Comparación tipada de un valor de ejecutor contra una condición.
pub mod matcher;
/// Agregación ponderada de matches y veredicto de idoneidad.
pub mod scorer;
/// Factor de carga compuesto y su variante degradada.
pub mod balance;
/// Registro de candidatura con factor precalculado y orden total.
pub mod candidate;
/// Políticas de selección del ganador (mixtura y umbral legado).
pub mod policy;

pub use balance::LoadBalancer;
pub use candidate::CandidateInfo;
pub use matcher::evaluate_condition;
pub use policy::{select_winner, DispatchPolicy, HEIGHT_THRESHOLD_PERCENT};
pub use scorer::{ParamScore, UserScorer, DEFAULT_MIN_SCORE_FRACTION};
