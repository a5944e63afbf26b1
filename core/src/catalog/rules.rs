//! Rule tables: equipment selection per irrigable zone and GPM-threshold sizing.

use super::{ids, HeadKind};
use crate::config::DesignConstants;
use crate::site::{IrrigableZone, ZoneKind};
use crate::units::PipeSize;

/// Beds larger than this get inline dripline instead of point-source emitters.
pub const BED_DRIPLINE_THRESHOLD_FT: f64 = 21.0;
/// Strips narrower than this get strip nozzles.
pub const STRIP_MAX_WIDTH_FT: f64 = 8.0;
/// Station count of the fixed-size controller.
pub const CONTROLLER_FIXED_STATIONS: usize = 12;

/// One row of the equipment selection table. Rows are evaluated in order, first match wins.
pub struct EquipmentRule {
    pub name: &'static str,
    pub spec_id: &'static str,
    pub applies: fn(&IrrigableZone, bool) -> bool,
}

fn is_bed_like(kind: ZoneKind) -> bool {
    matches!(kind, ZoneKind::Bed | ZoneKind::Planter)
}

pub static EQUIPMENT_RULES: &[EquipmentRule] = &[
    EquipmentRule {
        name: "athletic-turf",
        spec_id: ids::ROTOR_I40,
        applies: |zone, athletic| athletic && zone.kind == ZoneKind::Turf,
    },
    EquipmentRule {
        name: "large-bed-dripline",
        spec_id: ids::DRIP_LINE,
        applies: |zone, _| is_bed_like(zone.kind) && zone.dominant_dimension() > BED_DRIPLINE_THRESHOLD_FT,
    },
    EquipmentRule {
        name: "bed-emitters",
        spec_id: ids::DRIP_EMITTER,
        applies: |zone, _| is_bed_like(zone.kind) || zone.kind == ZoneKind::TreeRing,
    },
    EquipmentRule {
        name: "narrow-strip",
        spec_id: ids::STRIP_SST,
        applies: |zone, _| zone.kind == ZoneKind::NarrowStrip && zone.minor_dimension() < STRIP_MAX_WIDTH_FT,
    },
    EquipmentRule {
        name: "turf-under-12",
        spec_id: ids::SPRAY_8,
        applies: |zone, _| zone.dominant_dimension() < 12.0,
    },
    EquipmentRule {
        name: "turf-under-25",
        spec_id: ids::SPRAY_12,
        applies: |zone, _| zone.dominant_dimension() < 25.0,
    },
    EquipmentRule {
        name: "turf-under-50",
        spec_id: ids::ROTARY_MP2000,
        applies: |zone, _| zone.dominant_dimension() < 50.0,
    },
    EquipmentRule {
        name: "turf-under-100",
        spec_id: ids::ROTOR_PGP,
        applies: |zone, _| zone.dominant_dimension() < 100.0,
    },
    EquipmentRule {
        name: "turf-large",
        spec_id: ids::ROTOR_I25,
        applies: |_, _| true,
    },
];

pub fn select_rule(zone: &IrrigableZone, athletic_field: bool) -> Option<&'static EquipmentRule> {
    EQUIPMENT_RULES.iter().find(|rule| (rule.applies)(zone, athletic_field))
}

/// Catalog id of the head spec for a zone. The last table row always matches.
pub fn select_head_spec_id(zone: &IrrigableZone, athletic_field: bool) -> &'static str {
    select_rule(zone, athletic_field)
        .map(|rule| rule.spec_id)
        .unwrap_or(ids::ROTOR_I25)
}

/// Standard lateral size per head kind.
pub fn lateral_size_for(kind: HeadKind) -> PipeSize {
    match kind {
        HeadKind::Rotor => PipeSize::One,
        _ => PipeSize::ThreeQuarter,
    }
}

pub fn mainline_size(total_gpm: f64, constants: &DesignConstants) -> PipeSize {
    if total_gpm <= constants.mainline_upsize_gpm_threshold {
        PipeSize::OneAndHalf
    } else {
        PipeSize::Two
    }
}

/// Zone valve catalog id for a zone flow.
pub fn zone_valve_id(zone_gpm: f64, constants: &DesignConstants) -> &'static str {
    if zone_gpm > constants.zone_valve_upsize_gpm_threshold {
        ids::ZONE_VALVE_15
    } else {
        ids::ZONE_VALVE_1
    }
}

pub fn controller_id(stations: usize) -> &'static str {
    if stations <= CONTROLLER_FIXED_STATIONS {
        ids::CONTROLLER
    } else {
        ids::CONTROLLER_MODULAR
    }
}

/// Flow a water service of the given size delivers without excessive velocity.
pub fn supply_capacity_gpm(size: PipeSize) -> f64 {
    match size {
        PipeSize::ThreeQuarter => 10.0,
        PipeSize::One => 16.0,
        PipeSize::OneAndQuarter => 25.0,
        PipeSize::OneAndHalf => 35.0,
        PipeSize::Two => 60.0,
    }
}
