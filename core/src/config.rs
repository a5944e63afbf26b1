//! Empirical design constants.
//!
//! Every assumption the layout algorithms bake in is a named default here and
//! can be overridden per engine through [`DesignConstants`].

use serde::{Deserialize, Serialize};

/// GPM of drip per 144 ft² of planted area.
pub const DRIP_DENSITY_GPM_PER_144_SQ_FT: f64 = 0.9;
/// Fixed operating pressure of drip zones.
pub const DRIP_PRESSURE_PSI: f64 = 30.0;
/// Absolute distance at which a head counts as sitting on a boundary edge.
pub const EDGE_TOLERANCE_FT: f64 = 2.0;
/// Converts GPM / ft² to inches per hour.
pub const PRECIPITATION_CONSTANT: f64 = 96.25;
/// Application depth per watering cycle.
pub const TARGET_DEPTH_IN: f64 = 0.5;
/// Placeholder coverage radius of a drip emitter (area = π × r²).
pub const DRIP_PLACEHOLDER_RADIUS_FT: f64 = 10.0;

pub const MASTER_VALVE_GPM_THRESHOLD: f64 = 20.0;
pub const MAINLINE_UPSIZE_GPM_THRESHOLD: f64 = 40.0;
pub const ZONE_VALVE_UPSIZE_GPM_THRESHOLD: f64 = 15.0;

pub const BACKFLOW_OFFSET_FT: f64 = 5.0;
pub const MASTER_VALVE_OFFSET_FT: f64 = 10.0;
pub const ZONE_VALVE_OFFSET_FT: f64 = 3.0;
pub const MAINLINE_START_OFFSET_FT: f64 = 2.0;
pub const CONTROLLER_BUILDING_OFFSET_FT: f64 = 3.0;
pub const RAIN_SENSOR_OFFSET_FT: f64 = 2.0;

pub const VALVES_PER_BOX: u32 = 4;
/// Pressure reserved for friction and elevation losses above head operating pressure.
pub const PRESSURE_LOSS_ALLOWANCE_PSI: f64 = 10.0;
/// Rise over run above which overhead spray on a zone is flagged.
pub const STEEP_SLOPE_RATIO: f64 = 0.25;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignConstants {
    pub drip_density_gpm_per_144_sq_ft: f64,
    pub drip_pressure_psi: f64,
    pub edge_tolerance_ft: f64,
    pub precipitation_constant: f64,
    pub target_depth_in: f64,
    pub drip_placeholder_radius_ft: f64,
    pub master_valve_gpm_threshold: f64,
    pub mainline_upsize_gpm_threshold: f64,
    pub zone_valve_upsize_gpm_threshold: f64,
    pub backflow_offset_ft: f64,
    pub master_valve_offset_ft: f64,
    pub zone_valve_offset_ft: f64,
    pub mainline_start_offset_ft: f64,
    pub controller_building_offset_ft: f64,
    pub rain_sensor_offset_ft: f64,
    pub valves_per_box: u32,
    pub pressure_loss_allowance_psi: f64,
    pub steep_slope_ratio: f64,
}

impl Default for DesignConstants {
    fn default() -> Self {
        Self {
            drip_density_gpm_per_144_sq_ft: DRIP_DENSITY_GPM_PER_144_SQ_FT,
            drip_pressure_psi: DRIP_PRESSURE_PSI,
            edge_tolerance_ft: EDGE_TOLERANCE_FT,
            precipitation_constant: PRECIPITATION_CONSTANT,
            target_depth_in: TARGET_DEPTH_IN,
            drip_placeholder_radius_ft: DRIP_PLACEHOLDER_RADIUS_FT,
            master_valve_gpm_threshold: MASTER_VALVE_GPM_THRESHOLD,
            mainline_upsize_gpm_threshold: MAINLINE_UPSIZE_GPM_THRESHOLD,
            zone_valve_upsize_gpm_threshold: ZONE_VALVE_UPSIZE_GPM_THRESHOLD,
            backflow_offset_ft: BACKFLOW_OFFSET_FT,
            master_valve_offset_ft: MASTER_VALVE_OFFSET_FT,
            zone_valve_offset_ft: ZONE_VALVE_OFFSET_FT,
            mainline_start_offset_ft: MAINLINE_START_OFFSET_FT,
            controller_building_offset_ft: CONTROLLER_BUILDING_OFFSET_FT,
            rain_sensor_offset_ft: RAIN_SENSOR_OFFSET_FT,
            valves_per_box: VALVES_PER_BOX,
            pressure_loss_allowance_psi: PRESSURE_LOSS_ALLOWANCE_PSI,
            steep_slope_ratio: STEEP_SLOPE_RATIO,
        }
    }
}

impl DesignConstants {
    /// Shared by routing and material takeoff so both agree on master valve presence.
    pub fn requires_master_valve(&self, total_gpm: f64) -> bool {
        total_gpm > self.master_valve_gpm_threshold
    }
}
