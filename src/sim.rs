//! In-process vehicle for demos and tests.
//!
//! Stands in for the remote vehicle-control service with a scripted flight:
//! link up on connect, position estimate after a warm-up, then takeoff, one
//! progress report per mission item, and touchdown. No physics, no external
//! dependencies, deterministic apart from timing.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use crate::env;
use crate::plan::MissionPlan;
use crate::session::{ConnectionState, Health, MissionProgress, SessionError, VehicleSession};
use crate::{telemetry_channel, TelemetryPublishChannel, TelemetryRecvChannel};

/// Timing knobs for the scripted flight.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Delay before the health stream reports position estimates OK.
    pub health_warmup: Duration,
    /// Delay between mission start and the first airborne report.
    pub takeoff_delay: Duration,
    /// Flight time per mission item.
    pub leg_duration: Duration,
    /// Delay between the last item and touchdown.
    pub landing_delay: Duration,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            health_warmup: Duration::from_millis(500),
            takeoff_delay: Duration::from_secs(1),
            leg_duration: Duration::from_secs(2),
            landing_delay: Duration::from_secs(1),
        }
    }
}

impl SimConfig {
    /// Timings from the `ENV_MAV_SIM_*` variables, falling back to the
    /// defaults.
    pub fn from_env() -> Self {
        Self {
            health_warmup: Duration::from_millis(*env::ENV_MAV_SIM_WARMUP_MS),
            takeoff_delay: Duration::from_millis(*env::ENV_MAV_SIM_TAKEOFF_MS),
            leg_duration: Duration::from_millis(*env::ENV_MAV_SIM_LEG_MS),
            landing_delay: Duration::from_millis(*env::ENV_MAV_SIM_LANDING_MS),
        }
    }

    /// Millisecond-scale timings so test flights finish quickly.
    pub fn fast() -> Self {
        Self {
            health_warmup: Duration::from_millis(1),
            takeoff_delay: Duration::from_millis(1),
            leg_duration: Duration::from_millis(1),
            landing_delay: Duration::from_millis(1),
        }
    }
}

pub struct SimulatedVehicle {
    config: SimConfig,
    connected: bool,
    armed: bool,
    uploaded_items: usize,
    rtl_after_mission: bool,
    connection_tx: TelemetryPublishChannel<ConnectionState>,
    connection_rx: Option<TelemetryRecvChannel<ConnectionState>>,
    health_tx: TelemetryPublishChannel<Health>,
    health_rx: Option<TelemetryRecvChannel<Health>>,
    in_air_tx: TelemetryPublishChannel<bool>,
    in_air_rx: Option<TelemetryRecvChannel<bool>>,
    progress_tx: TelemetryPublishChannel<MissionProgress>,
    progress_rx: Option<TelemetryRecvChannel<MissionProgress>>,
}

impl SimulatedVehicle {
    pub fn new(config: SimConfig) -> Self {
        let (connection_tx, connection_rx) = telemetry_channel();
        let (health_tx, health_rx) = telemetry_channel();
        let (in_air_tx, in_air_rx) = telemetry_channel();
        let (progress_tx, progress_rx) = telemetry_channel();
        Self {
            config,
            connected: false,
            armed: false,
            uploaded_items: 0,
            rtl_after_mission: false,
            connection_tx,
            connection_rx: Some(connection_rx),
            health_tx,
            health_rx: Some(health_rx),
            in_air_tx,
            in_air_rx: Some(in_air_rx),
            progress_tx,
            progress_rx: Some(progress_rx),
        }
    }

    pub fn return_to_launch_after_mission(&self) -> bool {
        self.rtl_after_mission
    }

    fn spawn_flight(&self) {
        let in_air = self.in_air_tx.clone();
        let progress = self.progress_tx.clone();
        let total = self.uploaded_items;
        let config = self.config.clone();
        tokio::spawn(async move {
            let method_name = "sim_flight";
            let _ = in_air.send(false).await;
            sleep(config.takeoff_delay).await;
            if in_air.send(true).await.is_err() {
                return;
            }
            for i in 1..=total {
                sleep(config.leg_duration).await;
                let r = progress
                    .send(MissionProgress {
                        current: i as i32,
                        total: total as i32,
                    })
                    .await;
                if r.is_err() {
                    // progress consumer is gone, the flight itself goes on
                    tracing::debug!(method_name, i, "progress receiver dropped");
                }
            }
            sleep(config.landing_delay).await;
            let _ = in_air.send(false).await;
            tracing::debug!(method_name, total, "scripted flight finished");
        });
    }
}

#[async_trait]
impl VehicleSession for SimulatedVehicle {
    async fn connect(&mut self, address: &str) -> Result<(), SessionError> {
        let method_name = "sim_connect";
        tracing::debug!(method_name, address, "link up");
        self.connected = true;
        self.connection_tx
            .send(ConnectionState { is_connected: true })
            .await
            .map_err(|e| SessionError::ConnectionFailed(address.to_owned(), e.to_string()))?;

        let health = self.health_tx.clone();
        let warmup = self.config.health_warmup;
        tokio::spawn(async move {
            let _ = health
                .send(Health {
                    is_global_position_ok: false,
                    is_home_position_ok: false,
                })
                .await;
            sleep(warmup).await;
            let _ = health
                .send(Health {
                    is_global_position_ok: true,
                    is_home_position_ok: true,
                })
                .await;
        });
        Ok(())
    }

    fn connection_state(&mut self) -> TelemetryRecvChannel<ConnectionState> {
        self.connection_rx
            .take()
            .expect("connection-state stream handed out twice")
    }

    fn health(&mut self) -> TelemetryRecvChannel<Health> {
        self.health_rx.take().expect("health stream handed out twice")
    }

    fn in_air(&mut self) -> TelemetryRecvChannel<bool> {
        self.in_air_rx.take().expect("in-air stream handed out twice")
    }

    fn mission_progress(&mut self) -> TelemetryRecvChannel<MissionProgress> {
        self.progress_rx
            .take()
            .expect("mission-progress stream handed out twice")
    }

    async fn set_return_to_launch_after_mission(
        &mut self,
        enable: bool,
    ) -> Result<(), SessionError> {
        if !self.connected {
            return Err(SessionError::NotConnected);
        }
        self.rtl_after_mission = enable;
        Ok(())
    }

    async fn upload_mission(&mut self, plan: MissionPlan) -> Result<(), SessionError> {
        if !self.connected {
            return Err(SessionError::NotConnected);
        }
        self.uploaded_items = plan.len();
        tracing::debug!(items = self.uploaded_items, "mission stored");
        Ok(())
    }

    async fn arm(&mut self) -> Result<(), SessionError> {
        if !self.connected {
            return Err(SessionError::NotConnected);
        }
        self.armed = true;
        Ok(())
    }

    async fn start_mission(&mut self) -> Result<(), SessionError> {
        if !self.armed {
            return Err(SessionError::NotArmed);
        }
        self.spawn_flight();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::MissionItem;
    use tokio::time::timeout;

    #[tokio::test]
    async fn test_arm_requires_connect() {
        let mut vehicle = SimulatedVehicle::new(SimConfig::fast());
        assert!(matches!(
            vehicle.arm().await,
            Err(SessionError::NotConnected)
        ));
    }

    #[tokio::test]
    async fn test_start_requires_arm() {
        let mut vehicle = SimulatedVehicle::new(SimConfig::fast());
        vehicle.connect("udp://:14540").await.unwrap();
        assert!(matches!(
            vehicle.start_mission().await,
            Err(SessionError::NotArmed)
        ));
    }

    #[tokio::test]
    async fn test_scripted_flight_telemetry() {
        let mut vehicle = SimulatedVehicle::new(SimConfig::fast());
        vehicle.connect("udp://:14540").await.unwrap();

        let mut connection = vehicle.connection_state();
        assert!(connection.recv().await.unwrap().is_connected);

        let plan = MissionPlan::new(vec![
            MissionItem::at(47.1, 8.1, 10.0),
            MissionItem::at(47.2, 8.2, 10.0),
        ]);
        vehicle
            .set_return_to_launch_after_mission(true)
            .await
            .unwrap();
        assert!(vehicle.return_to_launch_after_mission());
        vehicle.upload_mission(plan).await.unwrap();
        vehicle.arm().await.unwrap();

        let mut in_air = vehicle.in_air();
        let mut progress = vehicle.mission_progress();
        vehicle.start_mission().await.unwrap();

        let wait = Duration::from_secs(1);
        assert!(!timeout(wait, in_air.recv()).await.unwrap().unwrap());
        assert!(timeout(wait, in_air.recv()).await.unwrap().unwrap());
        for i in 1..=2 {
            let p = timeout(wait, progress.recv()).await.unwrap().unwrap();
            assert_eq!(p, MissionProgress { current: i, total: 2 });
        }
        assert!(!timeout(wait, in_air.recv()).await.unwrap().unwrap());
    }

    #[tokio::test]
    async fn test_health_reaches_position_ok() {
        let mut vehicle = SimulatedVehicle::new(SimConfig::fast());
        let mut health = vehicle.health();
        vehicle.connect("udp://:14540").await.unwrap();
        let wait = Duration::from_secs(1);
        let first = timeout(wait, health.recv()).await.unwrap().unwrap();
        assert!(!first.position_ok());
        let second = timeout(wait, health.recv()).await.unwrap().unwrap();
        assert!(second.position_ok());
    }
}
