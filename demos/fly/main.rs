use rust_mavmission::{env, fly_mission, load_waypoints, MissionPlan, SimConfig, SimulatedVehicle};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let waypoint_file = env::ENV_MAV_WAYPOINT_FILE.clone();
    let system_addr = env::ENV_MAV_SYSTEM_ADDR.clone();

    let waypoints = load_waypoints(&waypoint_file);
    tracing::info!(waypoint_file, count = waypoints.len(), "waypoints loaded");
    let plan = MissionPlan::from_waypoints(waypoints);

    let mut vehicle = SimulatedVehicle::new(SimConfig::from_env());
    let outcome = fly_mission(&mut vehicle, &system_addr, plan).await?;
    tracing::info!("flight finished: {:?}", outcome);
    Ok(())
}
