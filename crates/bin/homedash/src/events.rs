//! Background task that logs every state event.

use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

use homedash_domain::event::StateEvent;

/// Drain `events` until the bus is dropped, logging each one.
///
/// Returns the number of events logged.
pub async fn log_events(mut events: BroadcastStream<StateEvent>) -> usize {
    let mut logged = 0;
    while let Some(item) = events.next().await {
        match item {
            Ok(event) => {
                logged += 1;
                match &event {
                    StateEvent::WeatherUpdated { reading } => tracing::info!(
                        kind = event.kind(),
                        city = %reading.city,
                        temperature = reading.temperature,
                        "state event"
                    ),
                    other => tracing::info!(kind = other.kind(), event = ?other, "state event"),
                }
            }
            Err(BroadcastStreamRecvError::Lagged(missed)) => {
                tracing::warn!(missed, "event logger lagged behind");
            }
        }
    }
    tracing::debug!(logged, "event bus closed");
    logged
}
