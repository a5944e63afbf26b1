//! Head placement: turns each irrigable zone into sprinkler / drip placements.

use super::types::HeadPlacement;
use super::{DesignContext, DesignError, DesignResult};
use crate::catalog::{ids, rules, HeadSpec};
use crate::geometry::{self, GridPattern, Point2D, EPSILON};
use crate::site::{IrrigableZone, ProjectParameters, SiteAnalysis};
use tracing::debug;

/// |cos θ| below which two edges count as perpendicular (roughly 84°–96°).
pub const PERPENDICULAR_COS_TOLERANCE: f64 = 0.1;

/// Quick coupler stations on athletic fields, as fractions of property length at mid-width.
pub const QUICK_COUPLER_LENGTH_FRACTIONS: [f64; 3] = [0.5, 0.25, 0.75];

/// Position of a head relative to the zone outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadArc {
    Corner,
    Edge,
    Interior,
}

impl HeadArc {
    pub fn degrees(&self) -> f64 {
        match self {
            Self::Corner => 90.0,
            Self::Edge => 180.0,
            Self::Interior => 360.0,
        }
    }
}

/// Classify a point against the outline edges it sits within `tolerance` of.
///
/// A perpendicular pair among the touched edges makes a corner; any other
/// contact is an edge.
pub fn classify_arc(point: Point2D, edges: &[(Point2D, Point2D)], tolerance: f64) -> HeadArc {
    let touching: Vec<_> = edges
        .iter()
        .filter(|(a, b)| geometry::distance_point_to_segment(point, *a, *b) <= tolerance)
        .filter_map(|(a, b)| geometry::segment_direction(*a, *b))
        .collect();

    if touching.is_empty() {
        return HeadArc::Interior;
    }

    for (i, d1) in touching.iter().enumerate() {
        for d2 in touching.iter().skip(i + 1) {
            if d1.dot(d2).abs() < PERPENDICULAR_COS_TOLERANCE {
                return HeadArc::Corner;
            }
        }
    }

    HeadArc::Edge
}

fn new_head(
    ctx: &DesignContext,
    spec: &HeadSpec,
    position: Point2D,
    arc_degrees: f64,
    gpm: f64,
    pressure_psi: f64,
    source_zone_id: Option<&str>,
) -> HeadPlacement {
    HeadPlacement {
        id: ctx.ids.next_head_id(),
        position,
        kind: spec.kind,
        manufacturer: spec.manufacturer.clone(),
        model: spec.model.clone(),
        arc_degrees,
        radius_ft: spec.radius_ft,
        gpm,
        pressure_psi,
        nozzle: spec.nozzle.clone(),
        source_zone_id: source_zone_id.map(str::to_string),
        zone_id: None,
    }
}

/// Place heads for a single irrigable zone.
///
/// Drip zones get one placement at the centroid carrying the whole zone
/// flow. Overhead zones get a grid at the head's throw radius clipped to the
/// outline; without an outline every grid point is kept. Degenerate zones
/// yield no heads.
pub fn place_zone(ctx: &DesignContext, zone: &IrrigableZone, athletic_field: bool) -> DesignResult<Vec<HeadPlacement>> {
    let area = zone.effective_area();
    if !(area > EPSILON) || zone.bounds().is_degenerate() {
        debug!(zone = %zone.id, "skipping zone with no irrigable area");
        return Ok(vec![]);
    }

    let spec_id = rules::select_head_spec_id(zone, athletic_field);
    let spec = ctx.catalog.head(spec_id)?;
    let rule = rules::select_rule(zone, athletic_field).map_or("default", |r| r.name);
    debug!(zone = %zone.id, rule, spec = spec_id, "selected head spec");

    if spec.kind.is_drip() {
        let gpm = area / 144.0 * ctx.constants.drip_density_gpm_per_144_sq_ft;
        let head = new_head(
            ctx,
            spec,
            zone.centroid(),
            0.0,
            gpm,
            ctx.constants.drip_pressure_psi,
            Some(&zone.id),
        );
        return Ok(vec![head]);
    }

    let bounds = zone.bounds();
    let pattern = if athletic_field {
        GridPattern::Triangular
    } else {
        GridPattern::Square
    };
    if geometry::grid_point_count(bounds.width, bounds.height, spec.radius_ft, spec.radius_ft).is_none() {
        return Err(DesignError::InvalidSite(format!(
            "zone {} needs more than {} candidate head positions at {} ft spacing",
            zone.id,
            geometry::MAX_GRID_POINTS,
            spec.radius_ft
        )));
    }
    let candidates = geometry::generate_grid_points(
        bounds.min_x,
        bounds.min_y,
        bounds.width,
        bounds.height,
        spec.radius_ft,
        spec.radius_ft,
        pattern,
    );

    let edges = geometry::polygon_edges(&zone.outline());
    let tolerance = ctx.constants.edge_tolerance_ft;

    let heads: Vec<HeadPlacement> = candidates
        .into_iter()
        .filter(|p| !zone.has_polygon() || geometry::point_in_polygon(*p, &zone.boundary))
        .map(|p| {
            let arc = classify_arc(p, &edges, tolerance).degrees();
            new_head(ctx, spec, p, arc, spec.gpm_for_arc(arc), spec.pressure_psi, Some(&zone.id))
        })
        .collect();

    debug!(zone = %zone.id, heads = heads.len(), "placed overhead heads");
    Ok(heads)
}

/// Maintenance quick couplers down the middle of an athletic field.
pub fn place_quick_couplers(ctx: &DesignContext, site: &SiteAnalysis) -> DesignResult<Vec<HeadPlacement>> {
    let spec = ctx.catalog.head(ids::QUICK_COUPLER)?;
    let x = site.property_width_ft * 0.5;

    Ok(QUICK_COUPLER_LENGTH_FRACTIONS
        .iter()
        .map(|f| {
            let position = Point2D::new(x, site.property_length_ft * f);
            new_head(ctx, spec, position, 0.0, 0.0, spec.pressure_psi, None)
        })
        .collect())
}

/// Place heads for every irrigable zone of the site, turf first, then beds, then strips.
pub fn place_heads(ctx: &DesignContext, site: &SiteAnalysis, params: &ProjectParameters) -> DesignResult<Vec<HeadPlacement>> {
    let athletic_field = params.is_athletic_field();
    let mut heads = Vec::new();

    for zone in site.irrigable_zones() {
        heads.extend(place_zone(ctx, zone, athletic_field)?);
    }

    if athletic_field {
        heads.extend(place_quick_couplers(ctx, site)?);
    }

    debug!(heads = heads.len(), "head placement complete");
    Ok(heads)
}
