use thiserror::Error;

use crate::monitor;
use crate::plan::MissionPlan;
use crate::session::{SessionError, VehicleSession};

#[derive(Debug, Error)]
pub enum MissionError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("{0} telemetry closed before the awaited update")]
    TelemetryClosed(&'static str),
    #[error("flight completion monitor failed: {0}")]
    Monitor(#[from] tokio::task::JoinError),
}

/// How a run ended: a clean landing after being airborne, or the in-air
/// stream closing before one was seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightOutcome {
    Landed,
    TelemetryEnded,
}

/// Drives one waypoint mission from connect to touchdown.
///
/// Strictly sequential, no retries: connect and wait for the link, spawn the
/// progress and flight-completion monitors, enable return-to-launch, upload
/// the plan, wait for the position estimate, arm, start, then block until the
/// completion monitor has torn the monitors down. Any failed remote call
/// aborts the run.
pub async fn fly_mission<S: VehicleSession>(
    session: &mut S,
    address: &str,
    plan: MissionPlan,
) -> Result<FlightOutcome, MissionError> {
    let method_name = "fly_mission";

    session.connect(address).await?;
    tracing::info!(method_name, address, "waiting for vehicle to connect...");
    let mut connection = session.connection_state();
    loop {
        match connection.recv().await {
            Some(state) if state.is_connected => {
                tracing::info!(method_name, "connected to vehicle");
                break;
            }
            Some(_) => {}
            None => return Err(MissionError::TelemetryClosed("connection-state")),
        }
    }

    let progress_task = tokio::spawn(monitor::report_mission_progress(session.mission_progress()));
    let progress_abort = progress_task.abort_handle();
    let running_tasks = vec![progress_task];
    let termination_task = tokio::spawn(monitor::watch_flight_completion(
        session.in_air(),
        running_tasks,
    ));

    // a failed remote call must not leave the monitors running detached
    if let Err(e) = prepare_and_start(session, plan).await {
        termination_task.abort();
        if let Err(join_err) = termination_task.await {
            if !join_err.is_cancelled() {
                tracing::warn!(method_name, "completion monitor failed: {join_err}");
            }
        }
        progress_abort.abort();
        return Err(e);
    }

    let landed = termination_task.await?;
    if landed {
        tracing::info!(method_name, "mission complete, vehicle landed");
        Ok(FlightOutcome::Landed)
    } else {
        tracing::warn!(method_name, "in-air telemetry ended before a landing");
        Ok(FlightOutcome::TelemetryEnded)
    }
}

/// The remote-call half of the run: enable return-to-launch, upload, wait
/// for the position estimate, arm, start. Any failure aborts the run.
async fn prepare_and_start<S: VehicleSession>(
    session: &mut S,
    plan: MissionPlan,
) -> Result<(), MissionError> {
    let method_name = "prepare_and_start";

    session.set_return_to_launch_after_mission(true).await?;

    tracing::info!(method_name, items = plan.len(), "uploading mission");
    session.upload_mission(plan).await?;

    tracing::info!(method_name, "waiting for global position estimate...");
    let mut health = session.health();
    loop {
        match health.recv().await {
            Some(h) if h.position_ok() => {
                tracing::info!(method_name, "global position estimate OK");
                break;
            }
            Some(_) => {}
            None => return Err(MissionError::TelemetryClosed("health")),
        }
    }

    tracing::info!(method_name, "arming");
    session.arm().await?;

    tracing::info!(method_name, "starting mission");
    session.start_mission().await?;
    Ok(())
}
