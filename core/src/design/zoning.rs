//! Zone assignment: first-fit greedy packing of heads into valve zones.

use super::types::{DesignWarning, HeadPlacement, ValveSelection, Zone};
use super::{DesignContext, DesignResult};
use crate::catalog::{rules, HeadKind};
use crate::geometry::EPSILON;
use std::collections::HashMap;
use std::f64::consts::PI;
use tracing::{debug, warn};

/// Display colours, cycled by zone sequence.
pub const ZONE_COLORS: [&str; 8] = [
    "#2563eb", "#16a34a", "#dc2626", "#9333ea", "#ea580c", "#0891b2", "#ca8a04", "#db2777",
];

pub fn zone_color(sequence: u32) -> &'static str {
    let idx = (sequence.max(1) - 1) as usize % ZONE_COLORS.len();
    ZONE_COLORS[idx]
}

/// Result of zone assignment. `heads` is the input list with `zone_id` filled in.
#[derive(Debug, Clone)]
pub struct ZoneAssignment {
    pub zones: Vec<Zone>,
    pub heads: Vec<HeadPlacement>,
    pub warnings: Vec<DesignWarning>,
}

/// Group heads into zones.
///
/// Heads are grouped by kind in order of first appearance (quick couplers
/// are skipped), then packed in input order: a zone closes as soon as the
/// next head would push it past the lateral capacity of its kind. A head
/// that alone exceeds capacity still forms its own zone and is reported as
/// [`DesignWarning::OversizedHead`].
pub fn assign_zones(ctx: &DesignContext, heads: &[HeadPlacement]) -> DesignResult<ZoneAssignment> {
    let mut groups: Vec<(HeadKind, Vec<&HeadPlacement>)> = Vec::new();
    for head in heads.iter().filter(|h| h.kind.is_zoned()) {
        match groups.iter_mut().find(|(kind, _)| *kind == head.kind) {
            Some((_, members)) => members.push(head),
            None => groups.push((head.kind, vec![head])),
        }
    }

    let mut zones: Vec<Zone> = Vec::new();
    let mut warnings = Vec::new();

    for (kind, members) in groups {
        let capacity = ctx.catalog.max_lateral_gpm(kind)?;
        let mut current: Vec<&HeadPlacement> = Vec::new();
        let mut current_gpm = 0.0;

        for head in members {
            if !current.is_empty() && current_gpm + head.gpm > capacity {
                let zone = close_zone(ctx, kind, &current, capacity, zones.len(), &mut warnings)?;
                zones.push(zone);
                current.clear();
                current_gpm = 0.0;
            }
            current.push(head);
            current_gpm += head.gpm;
        }

        if !current.is_empty() {
            let zone = close_zone(ctx, kind, &current, capacity, zones.len(), &mut warnings)?;
            zones.push(zone);
        }
    }

    let membership: HashMap<&str, &str> = zones
        .iter()
        .flat_map(|z| z.head_ids.iter().map(move |h| (h.as_str(), z.id.as_str())))
        .collect();

    let heads = heads
        .iter()
        .map(|h| {
            let mut h = h.clone();
            h.zone_id = membership.get(h.id.as_str()).map(|z| z.to_string());
            h
        })
        .collect();

    debug!(zones = zones.len(), "zone assignment complete");
    Ok(ZoneAssignment { zones, heads, warnings })
}

fn close_zone(
    ctx: &DesignContext,
    kind: HeadKind,
    members: &[&HeadPlacement],
    capacity: f64,
    closed_so_far: usize,
    warnings: &mut Vec<DesignWarning>,
) -> DesignResult<Zone> {
    let sequence = closed_so_far as u32 + 1;
    let id = ctx.ids.next_zone_id();
    let constants = ctx.constants;

    let total_gpm: f64 = members.iter().map(|h| h.gpm).sum();

    let coverage_area_sq_ft: f64 = if kind.is_drip() {
        let r = constants.drip_placeholder_radius_ft;
        members.len() as f64 * PI * r * r
    } else {
        members.iter().map(|h| PI * h.radius_ft * h.radius_ft).sum()
    };

    let precipitation_in_hr = if coverage_area_sq_ft > EPSILON {
        total_gpm * constants.precipitation_constant / coverage_area_sq_ft
    } else {
        0.0
    };

    let runtime_minutes = if precipitation_in_hr > EPSILON {
        constants.target_depth_in / precipitation_in_hr * 60.0
    } else {
        0.0
    };

    let valve_spec = ctx.catalog.valve(rules::zone_valve_id(total_gpm, constants))?;

    if total_gpm > capacity {
        if let Some(head) = members.first() {
            warn!(zone = %id, head = %head.id, gpm = total_gpm, capacity, "single head exceeds lateral capacity");
            warnings.push(DesignWarning::OversizedHead {
                zone_id: id.clone(),
                head_id: head.id.clone(),
                gpm: total_gpm,
                capacity_gpm: capacity,
            });
        }
    }

    Ok(Zone {
        id,
        sequence,
        head_kind: kind,
        head_ids: members.iter().map(|h| h.id.clone()).collect(),
        total_gpm,
        coverage_area_sq_ft,
        precipitation_in_hr,
        runtime_minutes,
        color: zone_color(sequence).to_string(),
        valve: ValveSelection {
            catalog_id: valve_spec.id.clone(),
            manufacturer: valve_spec.manufacturer.clone(),
            model: valve_spec.model.clone(),
            size: valve_spec.size,
        },
    })
}
