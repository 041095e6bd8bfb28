use tokio::task::JoinHandle;

use crate::session::MissionProgress;
use crate::TelemetryRecvChannel;

/// Reports every mission-progress update until the stream ends or the task
/// is cancelled from outside.
pub async fn report_mission_progress(mut progress: TelemetryRecvChannel<MissionProgress>) {
    while let Some(update) = progress.recv().await {
        tracing::info!("mission progress: {}/{}", update.current, update.total);
    }
}

/// Watches the in-air stream for a landing after the vehicle has been
/// airborne. Returns true once that landing is seen, false if the stream
/// closes first. Either way every task in `running_tasks` is cancelled and
/// awaited before returning; the expected cancellation is not an error.
///
/// Observations before the first airborne report never count as a landing.
pub async fn watch_flight_completion(
    mut in_air: TelemetryRecvChannel<bool>,
    running_tasks: Vec<JoinHandle<()>>,
) -> bool {
    let method_name = "watch_flight_completion";
    let mut was_in_air = false;
    let mut landed = false;

    while let Some(flying) = in_air.recv().await {
        if flying && !was_in_air {
            tracing::info!(method_name, "vehicle airborne");
            was_in_air = true;
        }
        if was_in_air && !flying {
            tracing::info!(method_name, "vehicle landed");
            landed = true;
            break;
        }
    }

    for task in running_tasks {
        task.abort();
        if let Err(e) = task.await {
            if !e.is_cancelled() {
                tracing::warn!(method_name, "monitor task failed: {e}");
            }
        }
    }
    landed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry_channel;
    use std::time::Duration;
    use tokio::time::timeout;

    async fn feed_and_watch(observations: &[bool]) -> bool {
        let (tx, rx) = telemetry_channel();
        for &obs in observations {
            tx.send(obs).await.unwrap();
        }
        drop(tx);
        timeout(Duration::from_secs(1), watch_flight_completion(rx, Vec::new()))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_landing_after_flight_signals() {
        assert!(feed_and_watch(&[false, true, true, false]).await);
    }

    #[tokio::test]
    async fn test_never_airborne_never_signals() {
        assert!(!feed_and_watch(&[false, false, false]).await);
    }

    #[tokio::test]
    async fn test_airborne_without_landing_never_signals() {
        assert!(!feed_and_watch(&[false, true, true]).await);
    }

    #[tokio::test]
    async fn test_landing_cancels_running_tasks() {
        let (tx, rx) = telemetry_channel();
        tx.send(true).await.unwrap();
        tx.send(false).await.unwrap();

        // a task that would never finish on its own
        let stuck = tokio::spawn(async {
            std::future::pending::<()>().await;
        });

        let landed = timeout(
            Duration::from_secs(1),
            watch_flight_completion(rx, vec![stuck]),
        )
        .await
        .unwrap();
        // returning at all proves the stuck task was cancelled and awaited
        assert!(landed);
    }

    #[tokio::test]
    async fn test_progress_reporter_drains_stream() {
        let (tx, rx) = telemetry_channel();
        for i in 1..=3 {
            tx.send(MissionProgress {
                current: i,
                total: 3,
            })
            .await
            .unwrap();
        }
        drop(tx);
        timeout(Duration::from_secs(1), report_mission_progress(rx))
            .await
            .unwrap();
    }
}
