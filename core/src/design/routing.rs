//! Pipe routing: mainline from the point of connection to each zone valve,
//! laterals from each valve out to its heads.
//!
//! Mainline runs are straight segments from a shared start point, laterals
//! chain each head to its nearest neighbour or the valve. Lengths feed the
//! material takeoff; they are not a construction route.

use super::types::{Equipment, EquipmentKind, HeadPlacement, PipeKind, PipeSegment, Zone, ZoneValve};
use super::{DesignContext, DesignResult};
use crate::catalog::{ids, rules, EquipmentSpec, ValveSpec};
use crate::geometry::{self, Point2D};
use crate::site::SiteAnalysis;
use crate::units::{PipeMaterial, PipeSize};
use tracing::debug;

/// Controller position when the site gives neither a controller nor a building.
pub const DEFAULT_CONTROLLER_POSITION: Point2D = Point2D { x: 5.0, y: 5.0 };

#[derive(Debug, Clone)]
pub struct RoutingResult {
    pub pipes: Vec<PipeSegment>,
    pub zone_valves: Vec<ZoneValve>,
    pub point_of_connection: Equipment,
    pub backflow: Equipment,
    pub master_valve: Option<Equipment>,
    pub controller: Equipment,
    pub rain_sensor: Equipment,
    pub mainline_size: PipeSize,
    pub total_gpm: f64,
}

fn equipment(kind: EquipmentKind, spec: &EquipmentSpec, position: Point2D) -> Equipment {
    Equipment {
        kind,
        position,
        manufacturer: spec.manufacturer.clone(),
        model: spec.model.clone(),
        size: None,
    }
}

fn valve_equipment(kind: EquipmentKind, spec: &ValveSpec, position: Point2D, size: PipeSize) -> Equipment {
    Equipment {
        kind,
        position,
        manufacturer: spec.manufacturer.clone(),
        model: spec.model.clone(),
        size: Some(size),
    }
}

fn new_pipe(
    ctx: &DesignContext,
    start: Point2D,
    end: Point2D,
    size: PipeSize,
    material: PipeMaterial,
    kind: PipeKind,
    zone_id: Option<&str>,
) -> PipeSegment {
    PipeSegment {
        id: ctx.ids.next_pipe_id(),
        start,
        end,
        size,
        material,
        kind,
        zone_id: zone_id.map(str::to_string),
    }
}

/// Point of connection: the surveyed water source, else the middle of the left property edge.
pub fn point_of_connection(site: &SiteAnalysis) -> Point2D {
    site.water_source
        .unwrap_or_else(|| Point2D::new(0.0, site.property_length_ft / 2.0))
}

pub fn controller_position(ctx: &DesignContext, site: &SiteAnalysis) -> Point2D {
    if let Some(p) = site.controller_location {
        return p;
    }
    match site.nearest_building {
        Some(b) => b.offset(ctx.constants.controller_building_offset_ft, 0.0),
        None => DEFAULT_CONTROLLER_POSITION,
    }
}

/// Where a head is fed from: the valve, or the closest other head of the zone.
///
/// Ties keep the valve, then the earlier head.
pub fn nearest_feed_point(valve: Point2D, members: &[&HeadPlacement], index: usize) -> Point2D {
    let target = members[index].position;
    let mut best = valve;
    let mut best_dist = geometry::distance(valve, target);

    for (j, other) in members.iter().enumerate() {
        if j == index {
            continue;
        }
        let d = geometry::distance(other.position, target);
        if d < best_dist {
            best_dist = d;
            best = other.position;
        }
    }

    best
}

/// Lay out hydraulic equipment, mainline and laterals for a set of zones.
pub fn route_pipes(
    ctx: &DesignContext,
    site: &SiteAnalysis,
    zones: &[Zone],
    heads: &[HeadPlacement],
) -> DesignResult<RoutingResult> {
    let constants = ctx.constants;
    let catalog = ctx.catalog;

    let poc = point_of_connection(site);
    let total_gpm: f64 = zones.iter().map(|z| z.total_gpm).sum();
    let mainline_size = rules::mainline_size(total_gpm, constants);

    let backflow_pos = poc.offset(constants.backflow_offset_ft, 0.0);
    let backflow = valve_equipment(
        EquipmentKind::BackflowPreventer,
        catalog.valve(ids::BACKFLOW)?,
        backflow_pos,
        mainline_size,
    );

    let controller_pos = controller_position(ctx, site);
    let controller = equipment(
        EquipmentKind::Controller,
        catalog.equipment(rules::controller_id(zones.len()))?,
        controller_pos,
    );
    let rain_sensor = equipment(
        EquipmentKind::RainSensor,
        catalog.equipment(ids::RAIN_SENSOR)?,
        controller_pos.offset(constants.rain_sensor_offset_ft, 0.0),
    );
    let point_of_connection = equipment(
        EquipmentKind::PointOfConnection,
        catalog.equipment(ids::POINT_OF_CONNECTION)?,
        poc,
    );

    let mut pipes = Vec::new();

    let master_valve = if constants.requires_master_valve(total_gpm) {
        let spec = catalog.valve(ids::MASTER_VALVE)?;
        let pos = backflow_pos.offset(constants.master_valve_offset_ft, 0.0);
        pipes.push(new_pipe(
            ctx,
            backflow_pos,
            pos,
            mainline_size,
            PipeMaterial::Schedule40Pvc,
            PipeKind::Mainline,
            None,
        ));
        Some(valve_equipment(EquipmentKind::MasterValve, spec, pos, spec.size))
    } else {
        None
    };

    let upstream_x = master_valve
        .as_ref()
        .map(|mv| mv.position.x)
        .unwrap_or(backflow_pos.x);
    let mainline_start = Point2D::new(upstream_x + constants.mainline_start_offset_ft, poc.y);

    let mut zone_valves = Vec::new();

    for zone in zones {
        let members: Vec<&HeadPlacement> = heads
            .iter()
            .filter(|h| h.kind.is_zoned() && h.zone_id.as_deref() == Some(zone.id.as_str()))
            .collect();
        if members.is_empty() {
            debug!(zone = %zone.id, "skipping zone without heads");
            continue;
        }

        let positions: Vec<Point2D> = members.iter().map(|h| h.position).collect();
        let offset = constants.zone_valve_offset_ft;
        let valve_pos = geometry::centroid(&positions).offset(-offset, -offset);

        zone_valves.push(ZoneValve {
            zone_id: zone.id.clone(),
            position: valve_pos,
            manufacturer: zone.valve.manufacturer.clone(),
            model: zone.valve.model.clone(),
            size: zone.valve.size,
        });

        pipes.push(new_pipe(
            ctx,
            mainline_start,
            valve_pos,
            mainline_size,
            PipeMaterial::Schedule40Pvc,
            PipeKind::Mainline,
            None,
        ));

        let lateral_size = rules::lateral_size_for(zone.head_kind);
        let lateral_kind = if zone.head_kind.is_drip() {
            PipeKind::DripSupply
        } else {
            PipeKind::Lateral
        };

        for (i, head) in members.iter().enumerate() {
            let from = nearest_feed_point(valve_pos, &members, i);
            pipes.push(new_pipe(
                ctx,
                from,
                head.position,
                lateral_size,
                PipeMaterial::Class200Pvc,
                lateral_kind,
                Some(&zone.id),
            ));
        }
    }

    debug!(
        pipes = pipes.len(),
        valves = zone_valves.len(),
        total_gpm,
        master_valve = master_valve.is_some(),
        "pipe routing complete"
    );

    Ok(RoutingResult {
        pipes,
        zone_valves,
        point_of_connection,
        backflow,
        master_valve,
        controller,
        rain_sensor,
        mainline_size,
        total_gpm,
    })
}
