use crate::waypoints::Waypoint;

/// Cruise speed applied to every mission item.
pub const MISSION_SPEED_M_S: f32 = 10.0;

/// Camera action attached to a mission item. Only `None` is produced by the
/// plan builder; the other variants exist so uploaded items can express the
/// full command set of the vehicle service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraAction {
    None,
    TakePhoto,
    StartPhotoInterval,
    StopPhotoInterval,
    StartVideo,
    StopVideo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleAction {
    None,
    Takeoff,
    Land,
    TransitionToFw,
    TransitionToMc,
}

/// One waypoint plus the flight-behavior parameters for traversing it.
///
/// Field layout follows the mission item of the vehicle-control service.
/// Unused optional fields stay at their NaN / `None` sentinels, which the
/// service reads as "no action".
#[derive(Debug, Clone, Copy)]
pub struct MissionItem {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub relative_altitude_m: f32,
    pub speed_m_s: f32,
    pub is_fly_through: bool,
    pub gimbal_pitch_deg: f32,
    pub gimbal_yaw_deg: f32,
    pub camera_action: CameraAction,
    pub loiter_time_s: f32,
    pub camera_photo_interval_s: f64,
    pub acceptance_radius_m: f32,
    pub yaw_deg: f32,
    pub camera_photo_distance_m: f32,
    pub vehicle_action: VehicleAction,
}

impl MissionItem {
    /// Fixed per-item defaults; only the position varies between items.
    const TEMPLATE: MissionItem = MissionItem {
        latitude_deg: 0.0,
        longitude_deg: 0.0,
        relative_altitude_m: 0.0,
        speed_m_s: MISSION_SPEED_M_S,
        is_fly_through: true,
        gimbal_pitch_deg: f32::NAN,
        gimbal_yaw_deg: f32::NAN,
        camera_action: CameraAction::None,
        loiter_time_s: f32::NAN,
        camera_photo_interval_s: f64::NAN,
        acceptance_radius_m: f32::NAN,
        yaw_deg: f32::NAN,
        camera_photo_distance_m: f32::NAN,
        vehicle_action: VehicleAction::None,
    };

    /// Stamps a position onto the default template.
    pub fn at(latitude_deg: f64, longitude_deg: f64, relative_altitude_m: f32) -> Self {
        MissionItem {
            latitude_deg,
            longitude_deg,
            relative_altitude_m,
            ..Self::TEMPLATE
        }
    }
}

impl From<Waypoint> for MissionItem {
    fn from(wp: Waypoint) -> Self {
        MissionItem::at(wp.latitude, wp.longitude, wp.altitude as f32)
    }
}

/// The complete ordered set of mission items for one flight.
#[derive(Debug, Clone, Default)]
pub struct MissionPlan {
    pub mission_items: Vec<MissionItem>,
}

impl MissionPlan {
    pub fn new(mission_items: Vec<MissionItem>) -> Self {
        Self { mission_items }
    }

    /// Builds a plan from parsed waypoints, one item per waypoint in file
    /// order. An empty input still yields a (warned-about) empty plan.
    pub fn from_waypoints(waypoints: Vec<Waypoint>) -> Self {
        if waypoints.is_empty() {
            tracing::warn!("building an empty mission plan");
        }
        Self {
            mission_items: waypoints.into_iter().map(MissionItem::from).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.mission_items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mission_items.is_empty()
    }
}
