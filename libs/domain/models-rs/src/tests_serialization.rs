// [libs/domain/models-rs/src/tests_serialization.rs]
/*!
 * =================================================================
 * APARATO: DOMAIN SERIALIZATION TEST (V4.2 - WIRE PARITY)
 * CLASIFICACIÓN: TRINITY EVIDENCE (ESTRATO L2-MODELS)
 * RESPONSABILIDAD: CERTIFICACIÓN DE PARIDAD JSON DE LOS CONTRATOS
 *
 * # Mathematical Proof (Untagged Ladder):
 * La escalera de deserialización de 'Value' es determinista: un literal
 * JSON cae exactamente en una variante, y la serialización inversa
 * reproduce el literal original bit-perfecto.
 * =================================================================
 */

use crate::condition::{Condition, Operator};
use crate::events::{HubChannel, HubFrame};
use crate::request::RequestStatus;
use crate::value::Value;
use chrono::{TimeZone, Utc};

/**
 * CERTIFICACIÓN: La escalera untagged captura cada literal JSON en la
 * variante correcta y el roundtrip preserva la forma de cable.
 */
#[test]
fn certify_value_untagged_ladder_roundtrip() {
    println!("\n🧪 [PROVING_GROUNDS]: Validating Value wire parity...");

    let raw_literals = [
        ("true", Value::Bool(true)),
        ("42", Value::Integer(42)),
        ("3.5", Value::Float(3.5)),
        ("\"NW\"", Value::String("NW".into())),
    ];

    for (raw_json, expected_value) in raw_literals {
        let decoded: Value = serde_json::from_str(raw_json)
            .expect("CRITICAL_FAULT: Value deserialization collapsed.");
        assert_eq!(decoded, expected_value);

        let reencoded = serde_json::to_string(&decoded)
            .expect("CRITICAL_FAULT: Value serialization collapsed.");
        assert_eq!(reencoded, raw_json);
    }

    // Una cadena RFC 3339 con offset cristaliza como instante tipado.
    let decoded_instant: Value = serde_json::from_str("\"2024-01-02T03:04:05Z\"")
        .expect("CRITICAL_FAULT: Datetime literal rejected.");
    assert_eq!(
        decoded_instant,
        Value::DateTime(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap())
    );

    // Una cadena naive (sin offset) permanece como String; el matcher
    // la normaliza en el punto de comparación.
    let decoded_naive: Value = serde_json::from_str("\"2024-01-02T03:04:05\"")
        .expect("CRITICAL_FAULT: Naive literal rejected.");
    assert_eq!(decoded_naive, Value::String("2024-01-02T03:04:05".into()));
}

/**
 * CERTIFICACIÓN: Condición con 'height' omitido cristaliza en 1.0 y el
 * operador viaja en mayúsculas absolutas.
 */
#[test]
fn certify_condition_height_default_and_operator_tokens() {
    let decoded: Condition =
        serde_json::from_str(r#"{"value": "NW", "operator": "EQ"}"#)
            .expect("CRITICAL_FAULT: Condition deserialization collapsed.");

    assert_eq!(decoded.operator, Operator::Eq);
    assert!((decoded.height - 1.0).abs() < f64::EPSILON);

    let reencoded = serde_json::to_value(&decoded)
        .expect("CRITICAL_FAULT: Condition serialization collapsed.");
    assert_eq!(reencoded["operator"], "EQ");

    let icontains: Condition =
        serde_json::from_str(r#"{"value": "world", "operator": "ICONTAINS", "height": 2.0}"#)
            .expect("CRITICAL_FAULT: ICONTAINS token rejected.");
    assert_eq!(icontains.operator, Operator::Icontains);

    assert!(Operator::from_token("gte").is_some());
    assert!(Operator::from_token("BETWEEN").is_none());
}

/**
 * CERTIFICACIÓN: Las tramas del hub portan el discriminante 'type' y
 * resuelven su canal de difusión sin inspección estructural.
 */
#[test]
fn certify_hub_frame_tagging_and_channel_routing() {
    let dispatched_frame = HubFrame::RequestDispatched {
        request_id: "req-7".into(),
        user: "user-a".into(),
        timestamp: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
    };

    let encoded = serde_json::to_value(&dispatched_frame)
        .expect("CRITICAL_FAULT: Frame serialization collapsed.");
    assert_eq!(encoded["type"], "request_dispatched");
    assert_eq!(encoded["request_id"], "req-7");
    assert_eq!(dispatched_frame.channel(), HubChannel::Dispatched);

    let intake_frame = HubFrame::NewRequest {
        id: "req-8".into(),
        status: RequestStatus::Processed,
        timestamp: Utc::now(),
    };
    let encoded_intake = serde_json::to_value(&intake_frame)
        .expect("CRITICAL_FAULT: Frame serialization collapsed.");
    assert_eq!(encoded_intake["type"], "new_request");
    assert_eq!(encoded_intake["status"], "processed");
    assert_eq!(intake_frame.channel(), HubChannel::NewRequests);
}
