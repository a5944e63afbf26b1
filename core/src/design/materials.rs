//! Material takeoff: aggregates a finished layout into schedule line items.

use super::types::{HeadPlacement, MaterialScheduleItem, PipeKind, PipeSegment, Zone, ZoneValve};
use super::{DesignContext, DesignResult};
use crate::catalog::{ids, rules, EquipmentSpec, HeadKind, ValveSpec};
use crate::units::{MaterialUnit, PipeMaterial, PipeSize};
use std::collections::BTreeMap;
use tracing::debug;

/// Sizes zone valves are scheduled under, in schedule order.
const ZONE_VALVE_SIZES: [PipeSize; 2] = [PipeSize::One, PipeSize::OneAndHalf];

fn head_description(kind: HeadKind) -> &'static str {
    match kind {
        HeadKind::Rotor => "Rotor head",
        HeadKind::Spray => "Spray head",
        HeadKind::RotaryNozzle => "Rotary nozzle head",
        HeadKind::Drip => "Drip zone emission device",
        HeadKind::Strip => "Strip spray head",
        HeadKind::QuickCoupler => "Quick coupling valve",
    }
}

fn line(description: String, manufacturer: &str, model: &str, quantity: u32, unit: MaterialUnit) -> MaterialScheduleItem {
    MaterialScheduleItem {
        description,
        manufacturer: manufacturer.to_string(),
        model: model.to_string(),
        quantity,
        unit,
    }
}

fn equipment_line(spec: &EquipmentSpec, quantity: u32, unit: MaterialUnit) -> MaterialScheduleItem {
    line(spec.description.clone(), &spec.manufacturer, &spec.model, quantity, unit)
}

fn valve_line(spec: &ValveSpec, quantity: u32) -> MaterialScheduleItem {
    line(spec.description.clone(), &spec.manufacturer, &spec.model, quantity, MaterialUnit::Each)
}

fn whole_feet(length_ft: f64) -> u32 {
    length_ft.max(0.0).ceil() as u32
}

/// Head lines grouped by model, in order of first appearance.
fn head_lines(ctx: &DesignContext, heads: &[HeadPlacement]) -> DesignResult<Vec<MaterialScheduleItem>> {
    let qc = ctx.catalog.head(ids::QUICK_COUPLER)?;
    let mut lines: Vec<MaterialScheduleItem> = Vec::new();

    for head in heads {
        let (manufacturer, model, description) = if head.kind == HeadKind::QuickCoupler {
            (qc.manufacturer.as_str(), qc.model.as_str(), qc.description.clone())
        } else {
            (head.manufacturer.as_str(), head.model.as_str(), head_description(head.kind).to_string())
        };

        match lines.iter_mut().find(|l| l.model == model) {
            Some(existing) => existing.quantity += 1,
            None => lines.push(line(description, manufacturer, model, 1, MaterialUnit::Each)),
        }
    }

    Ok(lines)
}

/// Pipe footage per size and material, ordered by material then size.
pub fn pipe_totals(pipes: &[PipeSegment]) -> BTreeMap<(PipeMaterial, PipeSize), f64> {
    let mut totals = BTreeMap::new();
    for pipe in pipes {
        *totals.entry((pipe.material, pipe.size)).or_insert(0.0) += pipe.length_ft();
    }
    totals
}

/// Build the material schedule for a routed design.
pub fn calculate_materials(
    ctx: &DesignContext,
    heads: &[HeadPlacement],
    zones: &[Zone],
    zone_valves: &[ZoneValve],
    pipes: &[PipeSegment],
) -> DesignResult<Vec<MaterialScheduleItem>> {
    let catalog = ctx.catalog;
    let constants = ctx.constants;

    let mut schedule = head_lines(ctx, heads)?;

    for size in ZONE_VALVE_SIZES {
        let matching: Vec<&ZoneValve> = zone_valves.iter().filter(|v| v.size == size).collect();
        if let Some(first) = matching.first() {
            schedule.push(line(
                format!("{} zone control valve", size),
                &first.manufacturer,
                &first.model,
                matching.len() as u32,
                MaterialUnit::Each,
            ));
        }
    }

    let total_gpm: f64 = zones.iter().map(|z| z.total_gpm).sum();
    if constants.requires_master_valve(total_gpm) {
        schedule.push(valve_line(catalog.valve(ids::MASTER_VALVE)?, 1));
    }

    schedule.push(valve_line(catalog.valve(ids::BACKFLOW)?, 1));
    schedule.push(equipment_line(
        catalog.equipment(rules::controller_id(zones.len()))?,
        1,
        MaterialUnit::Each,
    ));
    schedule.push(equipment_line(catalog.equipment(ids::RAIN_SENSOR)?, 1, MaterialUnit::Each));

    for ((material, size), length) in pipe_totals(pipes) {
        schedule.push(line(
            format!("{} {} pipe", size, material),
            "Generic",
            &material.to_string(),
            whole_feet(length),
            MaterialUnit::LinearFeet,
        ));
    }

    let swing_joints = heads.iter().filter(|h| h.kind.is_overhead()).count() as u32;
    if swing_joints > 0 {
        schedule.push(equipment_line(catalog.equipment(ids::SWING_JOINT)?, swing_joints, MaterialUnit::Each));
    }

    if !zone_valves.is_empty() {
        let per_box = constants.valves_per_box.max(1) as usize;
        let boxes = zone_valves.len().div_ceil(per_box) as u32;
        schedule.push(equipment_line(catalog.equipment(ids::VALVE_BOX)?, boxes, MaterialUnit::Each));
    }

    let mainline_ft: f64 = pipes
        .iter()
        .filter(|p| p.kind == PipeKind::Mainline)
        .map(PipeSegment::length_ft)
        .sum();
    let common_wire = whole_feet(mainline_ft);
    if common_wire > 0 {
        schedule.push(equipment_line(catalog.equipment(ids::COMMON_WIRE)?, common_wire, MaterialUnit::LinearFeet));
        schedule.push(equipment_line(
            catalog.equipment(ids::ZONE_WIRE)?,
            common_wire * zones.len() as u32,
            MaterialUnit::LinearFeet,
        ));
    }

    let drip_zones = zones.iter().filter(|z| z.head_kind.is_drip()).count() as u32;
    if drip_zones > 0 {
        schedule.push(equipment_line(catalog.equipment(ids::DRIP_KIT)?, drip_zones, MaterialUnit::Each));
    }

    debug!(lines = schedule.len(), "material schedule complete");
    Ok(schedule)
}
