use tokio::sync::mpsc::{Receiver, Sender};

pub mod env;
pub mod mission;
pub mod monitor;
pub mod plan;
pub mod session;
pub mod sim;
pub mod waypoints;

#[macro_use]
extern crate lazy_static;

pub use mission::{fly_mission, FlightOutcome, MissionError};
pub use plan::{CameraAction, MissionItem, MissionPlan, VehicleAction};
pub use session::{ConnectionState, Health, MissionProgress, SessionError, VehicleSession};
pub use sim::{SimConfig, SimulatedVehicle};
pub use waypoints::{load_waypoints, Waypoint, WaypointParseError};

pub type TelemetryRecvChannel<T> = Receiver<T>;
pub type TelemetryPublishChannel<T> = Sender<T>;

/// Buffer size for every telemetry channel. A producer that outruns a stalled
/// consumer blocks at the channel instead of growing without bound.
pub const TELEMETRY_CHANNEL_SIZE: usize = 32;

pub fn telemetry_channel<T>() -> (TelemetryPublishChannel<T>, TelemetryRecvChannel<T>) {
    tokio::sync::mpsc::channel(TELEMETRY_CHANNEL_SIZE)
}
