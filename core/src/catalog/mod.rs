//! Equipment catalog and sizing rules.
//!
//! The catalog is plain data. Every lookup returns a `Result` so a
//! caller-supplied catalog with missing entries surfaces as a
//! [`CatalogError`] instead of a panic. The standard catalog is complete for
//! every id the rule tables reference.

pub mod rules;

use crate::units::PipeSize;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Unknown head spec: {0}")]
    UnknownHead(String),

    #[error("Unknown valve spec: {0}")]
    UnknownValve(String),

    #[error("Unknown equipment spec: {0}")]
    UnknownEquipment(String),

    #[error("No lateral capacity rule for {0} pipe")]
    NoLateralCapacity(PipeSize),

    #[error("Invalid catalog data: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog ids referenced by the rule tables and the material takeoff.
pub mod ids {
    pub const SPRAY_8: &str = "SPRAY-8";
    pub const SPRAY_12: &str = "SPRAY-12";
    pub const ROTARY_MP2000: &str = "ROTARY-MP2000";
    pub const ROTOR_PGP: &str = "ROTOR-PGP";
    pub const ROTOR_I25: &str = "ROTOR-I25";
    pub const ROTOR_I40: &str = "ROTOR-I40";
    pub const STRIP_SST: &str = "STRIP-SST";
    pub const DRIP_LINE: &str = "DRIP-LINE";
    pub const DRIP_EMITTER: &str = "DRIP-EMITTER";
    pub const QUICK_COUPLER: &str = "QC-33DRC";

    pub const ZONE_VALVE_1: &str = "PGA-100";
    pub const ZONE_VALVE_15: &str = "PGA-150";
    pub const MASTER_VALVE: &str = "MV-150PESB";
    pub const BACKFLOW: &str = "RPZ-825Y";

    pub const POINT_OF_CONNECTION: &str = "POC";
    pub const CONTROLLER: &str = "ESP-TM2";
    pub const CONTROLLER_MODULAR: &str = "ESP-LXME2";
    pub const RAIN_SENSOR: &str = "WR2";
    pub const SWING_JOINT: &str = "SWING-JOINT";
    pub const VALVE_BOX: &str = "VALVE-BOX";
    pub const COMMON_WIRE: &str = "WIRE-COMMON";
    pub const ZONE_WIRE: &str = "WIRE-ZONE";
    pub const DRIP_KIT: &str = "DRIP-KIT";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeadKind {
    Rotor,
    Spray,
    RotaryNozzle,
    Drip,
    Strip,
    QuickCoupler,
}

impl HeadKind {
    pub fn is_drip(&self) -> bool {
        matches!(self, Self::Drip)
    }

    /// Quick couplers are maintenance outlets, never valved.
    pub fn is_zoned(&self) -> bool {
        !matches!(self, Self::QuickCoupler)
    }

    /// Heads installed on a swing joint.
    pub fn is_overhead(&self) -> bool {
        self.is_zoned() && !self.is_drip()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadSpec {
    pub id: String,
    pub kind: HeadKind,
    pub manufacturer: String,
    pub model: String,
    pub nozzle: String,
    pub description: String,
    /// Default throw radius; also the grid spacing.
    pub radius_ft: f64,
    pub full_circle_gpm: f64,
    pub pressure_psi: f64,
}

impl HeadSpec {
    /// Flow of a head of this spec at `arc_degrees`.
    pub fn gpm_for_arc(&self, arc_degrees: f64) -> f64 {
        self.full_circle_gpm * (arc_degrees / 360.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValveSpec {
    pub id: String,
    pub manufacturer: String,
    pub model: String,
    pub description: String,
    pub size: PipeSize,
}

/// Anything else on the schedule: controllers, sensors, boxes, wire, kits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentSpec {
    pub id: String,
    pub manufacturer: String,
    pub model: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LateralCapacity {
    pub size: PipeSize,
    pub max_gpm: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentCatalog {
    pub heads: Vec<HeadSpec>,
    pub valves: Vec<ValveSpec>,
    pub equipment: Vec<EquipmentSpec>,
    pub lateral_capacities: Vec<LateralCapacity>,
}

impl Default for EquipmentCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[allow(clippy::too_many_arguments)]
fn head(
    id: &str,
    kind: HeadKind,
    manufacturer: &str,
    model: &str,
    nozzle: &str,
    description: &str,
    radius_ft: f64,
    full_circle_gpm: f64,
    pressure_psi: f64,
) -> HeadSpec {
    HeadSpec {
        id: id.to_string(),
        kind,
        manufacturer: manufacturer.to_string(),
        model: model.to_string(),
        nozzle: nozzle.to_string(),
        description: description.to_string(),
        radius_ft,
        full_circle_gpm,
        pressure_psi,
    }
}

fn valve(id: &str, manufacturer: &str, model: &str, description: &str, size: PipeSize) -> ValveSpec {
    ValveSpec {
        id: id.to_string(),
        manufacturer: manufacturer.to_string(),
        model: model.to_string(),
        description: description.to_string(),
        size,
    }
}

fn item(id: &str, manufacturer: &str, model: &str, description: &str) -> EquipmentSpec {
    EquipmentSpec {
        id: id.to_string(),
        manufacturer: manufacturer.to_string(),
        model: model.to_string(),
        description: description.to_string(),
    }
}

impl EquipmentCatalog {
    /// The built-in commercial catalog.
    pub fn standard() -> Self {
        use HeadKind::*;

        let heads = vec![
            head(ids::SPRAY_8, Spray, "Rain Bird", "1804-PRS", "8-VAN", "Spray head, 8 ft VAN nozzle", 8.0, 1.05, 30.0),
            head(ids::SPRAY_12, Spray, "Rain Bird", "1804-PRS", "12-VAN", "Spray head, 12 ft VAN nozzle", 12.0, 2.60, 30.0),
            head(ids::ROTARY_MP2000, RotaryNozzle, "Hunter", "PROS-04-PRS40", "MP2000", "Rotary nozzle head, MP2000", 17.0, 1.47, 40.0),
            head(ids::ROTOR_PGP, Rotor, "Hunter", "PGP-ADJ", "8", "Gear-driven rotor, 35 ft", 35.0, 3.0, 45.0),
            head(ids::ROTOR_I25, Rotor, "Hunter", "I-25-04-SS", "13", "Stainless rotor, 50 ft", 50.0, 9.5, 55.0),
            head(ids::ROTOR_I40, Rotor, "Hunter", "I-40-ON-SS", "25", "Sports field rotor, 65 ft", 65.0, 17.0, 70.0),
            head(ids::STRIP_SST, Strip, "Rain Bird", "1804-PRS", "15-SST", "Spray head, side strip nozzle", 15.0, 1.21, 30.0),
            head(ids::DRIP_LINE, Drip, "Rain Bird", "XFCV-06-12", "0.6 GPH @ 12 in", "Inline dripline, check valve", 0.0, 0.0, 30.0),
            head(ids::DRIP_EMITTER, Drip, "Rain Bird", "XB-10PC", "1.0 GPH", "Pressure-compensating drip emitters", 0.0, 0.0, 30.0),
            head(ids::QUICK_COUPLER, QuickCoupler, "Rain Bird", "33-DRC", "", "Quick coupling valve, 3/4 in", 0.0, 0.0, 0.0),
        ];

        let valves = vec![
            valve(ids::ZONE_VALVE_1, "Rain Bird", "100-PGA", "Zone control valve", PipeSize::One),
            valve(ids::ZONE_VALVE_15, "Rain Bird", "150-PGA", "Zone control valve", PipeSize::OneAndHalf),
            valve(ids::MASTER_VALVE, "Rain Bird", "150-PESB", "Master valve, normally closed", PipeSize::OneAndHalf),
            valve(ids::BACKFLOW, "Febco", "825Y", "Reduced pressure zone backflow preventer", PipeSize::OneAndHalf),
        ];

        let equipment = vec![
            item(ids::POINT_OF_CONNECTION, "Existing", "Water service tap", "Point of connection"),
            item(ids::CONTROLLER, "Rain Bird", "ESP-TM2-12", "Irrigation controller, 12 station"),
            item(ids::CONTROLLER_MODULAR, "Rain Bird", "ESP-LXME2", "Irrigation controller, modular"),
            item(ids::RAIN_SENSOR, "Rain Bird", "WR2-RFC", "Wireless rain/freeze sensor"),
            item(ids::SWING_JOINT, "Rain Bird", "SJ-7512", "Swing joint assembly"),
            item(ids::VALVE_BOX, "NDS", "113BC", "Jumbo valve box"),
            item(ids::COMMON_WIRE, "Paige", "14-1 UF WHT", "Common control wire, 14 AWG"),
            item(ids::ZONE_WIRE, "Paige", "14-1 UF RED", "Zone control wire, 14 AWG"),
            item(ids::DRIP_KIT, "Rain Bird", "XCZ-100-PRF", "Drip control zone kit"),
        ];

        let lateral_capacities = vec![
            LateralCapacity { size: PipeSize::ThreeQuarter, max_gpm: 12.0 },
            LateralCapacity { size: PipeSize::One, max_gpm: 20.0 },
            LateralCapacity { size: PipeSize::OneAndQuarter, max_gpm: 30.0 },
            LateralCapacity { size: PipeSize::OneAndHalf, max_gpm: 40.0 },
            LateralCapacity { size: PipeSize::Two, max_gpm: 65.0 },
        ];

        Self {
            heads,
            valves,
            equipment,
            lateral_capacities,
        }
    }

    /// Load a caller-supplied catalog from JSON.
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn head(&self, id: &str) -> CatalogResult<&HeadSpec> {
        self.heads
            .iter()
            .find(|h| h.id == id)
            .ok_or_else(|| CatalogError::UnknownHead(id.to_string()))
    }

    pub fn valve(&self, id: &str) -> CatalogResult<&ValveSpec> {
        self.valves
            .iter()
            .find(|v| v.id == id)
            .ok_or_else(|| CatalogError::UnknownValve(id.to_string()))
    }

    pub fn equipment(&self, id: &str) -> CatalogResult<&EquipmentSpec> {
        self.equipment
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| CatalogError::UnknownEquipment(id.to_string()))
    }

    /// Maximum flow a lateral of the given size may carry.
    pub fn lateral_capacity(&self, size: PipeSize) -> CatalogResult<f64> {
        self.lateral_capacities
            .iter()
            .find(|c| c.size == size)
            .map(|c| c.max_gpm)
            .ok_or(CatalogError::NoLateralCapacity(size))
    }

    /// Lateral capacity for a head kind, through its standard lateral size.
    pub fn max_lateral_gpm(&self, kind: HeadKind) -> CatalogResult<f64> {
        self.lateral_capacity(rules::lateral_size_for(kind))
    }
}
