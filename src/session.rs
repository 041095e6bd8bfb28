use async_trait::async_trait;
use thiserror::Error;

use crate::plan::MissionPlan;
use crate::TelemetryRecvChannel;

/// Link state as reported by the connection-state stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionState {
    pub is_connected: bool,
}

/// Health snapshot; the orchestrator waits for both position estimates
/// before arming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub is_global_position_ok: bool,
    pub is_home_position_ok: bool,
}

impl Health {
    pub fn position_ok(&self) -> bool {
        self.is_global_position_ok && self.is_home_position_ok
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissionProgress {
    pub current: i32,
    pub total: i32,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("connection to {0} failed: {1}")]
    ConnectionFailed(String, String),
    #[error("not connected to a vehicle")]
    NotConnected,
    #[error("vehicle is not armed")]
    NotArmed,
    #[error("command rejected: {0}")]
    CommandRejected(String),
}

/// Consumed interface of the remote vehicle-control service.
///
/// Telemetry is handed out as owned channel receivers so monitor tasks can
/// consume streams independently of the session borrow. Each stream method
/// may be called once per session; streams end only when the session drops
/// its publishing side.
#[async_trait]
pub trait VehicleSession: Send {
    /// Starts establishing a link. Success is observed on the
    /// connection-state stream, not through the return value.
    async fn connect(&mut self, address: &str) -> Result<(), SessionError>;

    fn connection_state(&mut self) -> TelemetryRecvChannel<ConnectionState>;

    fn health(&mut self) -> TelemetryRecvChannel<Health>;

    fn in_air(&mut self) -> TelemetryRecvChannel<bool>;

    fn mission_progress(&mut self) -> TelemetryRecvChannel<MissionProgress>;

    async fn set_return_to_launch_after_mission(&mut self, enable: bool)
        -> Result<(), SessionError>;

    async fn upload_mission(&mut self, plan: MissionPlan) -> Result<(), SessionError>;

    async fn arm(&mut self) -> Result<(), SessionError>;

    async fn start_mission(&mut self) -> Result<(), SessionError>;
}
