use rust_mavmission::{env, load_waypoints, MissionPlan};

pub fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| env::ENV_MAV_WAYPOINT_FILE.clone());

    let waypoints = load_waypoints(&path);
    let plan = MissionPlan::from_waypoints(waypoints);
    tracing::info!(path, items = plan.len(), "parsed mission plan");
    for (i, item) in plan.mission_items.iter().enumerate() {
        tracing::info!(
            "item {}: lat={} lon={} alt={}m speed={}m/s fly_through={}",
            i,
            item.latitude_deg,
            item.longitude_deg,
            item.relative_altitude_m,
            item.speed_m_s,
            item.is_fly_through
        );
    }
}
