use crate::catalog::HeadKind;
use crate::geometry::{self, Point2D};
use crate::units::{MaterialUnit, PipeMaterial, PipeSize};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One sprinkler or drip emitter instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadPlacement {
    pub id: String,
    pub position: Point2D,
    pub kind: HeadKind,
    pub manufacturer: String,
    pub model: String,
    pub arc_degrees: f64,
    pub radius_ft: f64,
    pub gpm: f64,
    pub pressure_psi: f64,
    pub nozzle: String,
    /// Irrigable zone the head was placed for; `None` for quick couplers.
    #[serde(default)]
    pub source_zone_id: Option<String>,
    /// Valve zone, filled in by zone assignment.
    #[serde(default)]
    pub zone_id: Option<String>,
}

/// Valve chosen for a zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValveSelection {
    pub catalog_id: String,
    pub manufacturer: String,
    pub model: String,
    pub size: PipeSize,
}

/// A hydraulically independent group of heads sharing one valve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub sequence: u32,
    pub head_kind: HeadKind,
    pub head_ids: Vec<String>,
    pub total_gpm: f64,
    pub coverage_area_sq_ft: f64,
    pub precipitation_in_hr: f64,
    pub runtime_minutes: f64,
    pub color: String,
    pub valve: ValveSelection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PipeKind {
    Mainline,
    Lateral,
    DripSupply,
}

impl fmt::Display for PipeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mainline => write!(f, "mainline"),
            Self::Lateral => write!(f, "lateral"),
            Self::DripSupply => write!(f, "drip-supply"),
        }
    }
}

/// A straight pipe run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeSegment {
    pub id: String,
    pub start: Point2D,
    pub end: Point2D,
    pub size: PipeSize,
    pub material: PipeMaterial,
    pub kind: PipeKind,
    /// Owning valve zone; `None` for mainline.
    #[serde(default)]
    pub zone_id: Option<String>,
}

impl PipeSegment {
    pub fn length_ft(&self) -> f64 {
        geometry::distance(self.start, self.end)
    }

    pub fn diameter_in(&self) -> f64 {
        self.size.diameter_in()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneValve {
    pub zone_id: String,
    pub position: Point2D,
    pub manufacturer: String,
    pub model: String,
    pub size: PipeSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EquipmentKind {
    PointOfConnection,
    BackflowPreventer,
    MasterValve,
    Controller,
    RainSensor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub kind: EquipmentKind,
    pub position: Point2D,
    pub manufacturer: String,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<PipeSize>,
}

/// Aggregated line of the bill of quantities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialScheduleItem {
    pub description: String,
    pub manufacturer: String,
    pub model: String,
    pub quantity: u32,
    pub unit: MaterialUnit,
}

/// Non-fatal findings about a generated design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum DesignWarning {
    /// A single head whose flow exceeds the lateral capacity of its kind.
    OversizedHead {
        zone_id: String,
        head_id: String,
        gpm: f64,
        capacity_gpm: f64,
    },
    SupplyUndersized {
        zone_id: String,
        zone_gpm: f64,
        supply_capacity_gpm: f64,
    },
    LowStaticPressure {
        required_psi: f64,
        static_psi: f64,
    },
    RunoffRisk {
        zone_id: String,
        precipitation_in_hr: f64,
        soil_intake_in_hr: f64,
    },
    SteepSlope {
        source_zone_id: String,
        slope_ratio: f64,
    },
}

impl fmt::Display for DesignWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OversizedHead { zone_id, head_id, gpm, capacity_gpm } => write!(
                f,
                "{}: head {} draws {:.2} GPM, above the {:.2} GPM lateral capacity",
                zone_id, head_id, gpm, capacity_gpm
            ),
            Self::SupplyUndersized { zone_id, zone_gpm, supply_capacity_gpm } => write!(
                f,
                "{}: {:.2} GPM exceeds the {:.2} GPM water supply capacity",
                zone_id, zone_gpm, supply_capacity_gpm
            ),
            Self::LowStaticPressure { required_psi, static_psi } => write!(
                f,
                "static pressure {:.0} PSI is below the {:.0} PSI required",
                static_psi, required_psi
            ),
            Self::RunoffRisk { zone_id, precipitation_in_hr, soil_intake_in_hr } => write!(
                f,
                "{}: precipitation {:.2} in/hr exceeds soil intake {:.2} in/hr, use cycle and soak",
                zone_id, precipitation_in_hr, soil_intake_in_hr
            ),
            Self::SteepSlope { source_zone_id, slope_ratio } => write!(
                f,
                "{}: slope {:.2} is steep for overhead irrigation",
                source_zone_id, slope_ratio
            ),
        }
    }
}

/// Complete output of one design run, consumed by the plan renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrrigationDesign {
    pub heads: Vec<HeadPlacement>,
    pub pipes: Vec<PipeSegment>,
    pub zones: Vec<Zone>,
    pub zone_valves: Vec<ZoneValve>,
    pub point_of_connection: Equipment,
    pub backflow: Equipment,
    pub master_valve: Option<Equipment>,
    pub controller: Equipment,
    pub rain_sensor: Equipment,
    pub material_schedule: Vec<MaterialScheduleItem>,
    pub total_system_gpm: f64,
    pub total_zones: usize,
    #[serde(default)]
    pub warnings: Vec<DesignWarning>,
}

impl IrrigationDesign {
    pub fn pipes_of_kind(&self, kind: PipeKind) -> impl Iterator<Item = &PipeSegment> {
        self.pipes.iter().filter(move |p| p.kind == kind)
    }

    pub fn heads_in_zone<'a>(&'a self, zone_id: &'a str) -> impl Iterator<Item = &'a HeadPlacement> {
        self.heads
            .iter()
            .filter(move |h| h.zone_id.as_deref() == Some(zone_id))
    }
}
