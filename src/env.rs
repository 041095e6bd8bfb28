use std::str::FromStr;

lazy_static! {
    pub static ref ENV_MAV_SYSTEM_ADDR: String =
        get_env_str("ENV_MAV_SYSTEM_ADDR", String::from("udp://:14540"));
    pub static ref ENV_MAV_WAYPOINT_FILE: String =
        get_env_str("ENV_MAV_WAYPOINT_FILE", "waypoints.txt".to_owned());
    pub static ref ENV_MAV_SIM_WARMUP_MS: u64 = get_env("ENV_MAV_SIM_WARMUP_MS", 500);
    pub static ref ENV_MAV_SIM_TAKEOFF_MS: u64 = get_env("ENV_MAV_SIM_TAKEOFF_MS", 1000);
    pub static ref ENV_MAV_SIM_LEG_MS: u64 = get_env("ENV_MAV_SIM_LEG_MS", 2000);
    pub static ref ENV_MAV_SIM_LANDING_MS: u64 = get_env("ENV_MAV_SIM_LANDING_MS", 1000);
}

pub fn get_env_str(name: &str, value: String) -> String {
    return std::env::var(name).unwrap_or(value);
}

pub fn get_env<T: FromStr>(name: &str, value: T) -> T {
    let r = std::env::var(name);
    if r.is_err() {
        return value;
    }
    let r = r.unwrap().parse::<T>();
    if let Ok(res) = r {
        res
    } else {
        value
    }
}
