// [tests/mirror/apps/orchestrator/broadcast_hub.test.rs]
/*!
 * =================================================================
 * APARATO: CERTIFICADOR DEL HUB DE DIFUSIÓN (V1.1 - CHANNEL ROUTING)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L4-MIRROR
 * RESPONSABILIDAD: AUDITORÍA DEL ENRUTAMIENTO Y FAN-OUT BEST-EFFORT
 *
 * # Mathematical Proof (Channel Isolation):
 * Una trama publicada en un canal jamás contamina al otro: el
 * enrutamiento por discriminante es una partición exacta del espacio
 * de tramas.
 * =================================================================
 */

use arbiter_domain_models::{HubChannel, HubFrame, RequestStatus};
use arbiter_orchestrator::prelude::BroadcastHub;
use chrono::Utc;
use tokio::sync::broadcast::error::TryRecvError;

/**
 * CERTIFICACIÓN: Enrutamiento por canal y aislamiento entre grupos.
 */
#[tokio::test]
async fn certify_channel_routing_isolation() {
    println!("\n📡 [PROVING_GROUNDS]: Auditing broadcast hub routing...");

    let broadcast_hub = BroadcastHub::new();
    let mut dispatched_subscriber = broadcast_hub.subscribe(HubChannel::Dispatched);
    let mut intake_subscriber = broadcast_hub.subscribe(HubChannel::NewRequests);

    broadcast_hub.publish(HubFrame::RequestDispatched {
        request_id: "request-7".into(),
        user: "user-a".into(),
        timestamp: Utc::now(),
    });

    // El canal 'dispatched' recibe exactamente su trama.
    let delivered_frame = dispatched_subscriber.try_recv().unwrap();
    assert!(matches!(
        delivered_frame,
        HubFrame::RequestDispatched { ref request_id, .. } if request_id == "request-7"
    ));

    // El canal 'new_requests' permanece intacto.
    assert!(matches!(intake_subscriber.try_recv(), Err(TryRecvError::Empty)));

    broadcast_hub.publish(HubFrame::NewRequest {
        id: "request-8".into(),
        status: RequestStatus::Processed,
        timestamp: Utc::now(),
    });

    let intake_frame = intake_subscriber.try_recv().unwrap();
    assert!(matches!(intake_frame, HubFrame::NewRequest { ref id, .. } if id == "request-8"));
    assert!(matches!(dispatched_subscriber.try_recv(), Err(TryRecvError::Empty)));

    println!("   ✅ [VERDICT]: Channel isolation certified.");
}

/**
 * CERTIFICACIÓN: Sin suscriptores vivos, la publicación es inerte —
 * el emisor jamás observa un fallo.
 */
#[tokio::test]
async fn certify_publication_without_subscribers_is_silent() {
    let broadcast_hub = BroadcastHub::new();
    assert_eq!(broadcast_hub.subscriber_count(HubChannel::Dispatched), 0);

    // Sin pánico ni error: silencio nominal del canal.
    broadcast_hub.publish(HubFrame::RequestDispatched {
        request_id: "request-9".into(),
        user: "user-b".into(),
        timestamp: Utc::now(),
    });

    // Un suscriptor tardío no observa historia previa (sin replay).
    let mut late_subscriber = broadcast_hub.subscribe(HubChannel::Dispatched);
    assert!(matches!(late_subscriber.try_recv(), Err(TryRecvError::Empty)));
}
