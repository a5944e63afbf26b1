//! The design pipeline: placement, zoning, routing, materials, validation.

pub mod types;
pub mod generator;
pub mod placement;
pub mod zoning;
pub mod routing;
pub mod materials;
pub mod validation;

#[cfg(test)]
mod tests_zoning;


#[cfg(test)]
mod tests_materials;

#[cfg(test)]
mod tests_validation;

pub use generator::IdGenerator;
pub use types::*;

use crate::catalog::{CatalogError, EquipmentCatalog};
use crate::config::DesignConstants;
use crate::geometry::Point2D;
use crate::site::{IrrigableZone, ProjectParameters, SiteAnalysis};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum DesignError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("Invalid site: {0}")]
    InvalidSite(String),
}

pub type DesignResult<T> = Result<T, DesignError>;

/// Everything a stage needs for one run: read-only tables plus the run's ID counters.
pub struct DesignContext<'a> {
    pub catalog: &'a EquipmentCatalog,
    pub constants: &'a DesignConstants,
    pub ids: IdGenerator,
}

impl<'a> DesignContext<'a> {
    pub fn new(catalog: &'a EquipmentCatalog, constants: &'a DesignConstants) -> Self {
        Self {
            catalog,
            constants,
            ids: IdGenerator::new(),
        }
    }
}

/// Stateless design engine. One instance can serve any number of runs.
#[derive(Debug, Clone, Default)]
pub struct DesignEngine {
    pub catalog: EquipmentCatalog,
    pub constants: DesignConstants,
}

fn check_dimension(name: &str, value: f64) -> DesignResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(DesignError::InvalidSite(format!("{} must be a finite, non-negative number, got {}", name, value)))
    }
}

fn check_point(name: &str, point: Point2D) -> DesignResult<()> {
    if point.x.is_finite() && point.y.is_finite() {
        Ok(())
    } else {
        Err(DesignError::InvalidSite(format!("{} must have finite coordinates, got ({}, {})", name, point.x, point.y)))
    }
}

fn check_zone(zone: &IrrigableZone) -> DesignResult<()> {
    check_dimension(&format!("zone {} width_ft", zone.id), zone.width_ft)?;
    check_dimension(&format!("zone {} length_ft", zone.id), zone.length_ft)?;
    check_dimension(&format!("zone {} area_sq_ft", zone.id), zone.area_sq_ft)?;
    check_point(&format!("zone {} center", zone.id), zone.center)?;
    for point in &zone.boundary {
        check_point(&format!("zone {} boundary", zone.id), *point)?;
    }
    Ok(())
}

impl DesignEngine {
    pub fn new(catalog: EquipmentCatalog, constants: DesignConstants) -> Self {
        Self { catalog, constants }
    }

    pub fn with_constants(constants: DesignConstants) -> Self {
        Self {
            catalog: EquipmentCatalog::standard(),
            constants,
        }
    }

    /// Run the full pipeline for one site.
    pub fn generate(&self, site: &SiteAnalysis, params: &ProjectParameters) -> DesignResult<IrrigationDesign> {
        check_dimension("property_width_ft", site.property_width_ft)?;
        check_dimension("property_length_ft", site.property_length_ft)?;
        for zone in site.irrigable_zones() {
            check_zone(zone)?;
        }

        let ctx = DesignContext::new(&self.catalog, &self.constants);

        let placed = placement::place_heads(&ctx, site, params)?;
        let assignment = zoning::assign_zones(&ctx, &placed)?;
        let heads = assignment.heads;
        let zones = assignment.zones;

        let routed = routing::route_pipes(&ctx, site, &zones, &heads)?;
        let material_schedule =
            materials::calculate_materials(&ctx, &heads, &zones, &routed.zone_valves, &routed.pipes)?;

        let mut warnings = assignment.warnings;
        warnings.extend(validation::validate_design(&ctx, site, params, &heads, &zones));
        debug!(warnings = warnings.len(), "validation complete");

        let design = IrrigationDesign {
            total_zones: zones.len(),
            total_system_gpm: routed.total_gpm,
            heads,
            pipes: routed.pipes,
            zones,
            zone_valves: routed.zone_valves,
            point_of_connection: routed.point_of_connection,
            backflow: routed.backflow,
            master_valve: routed.master_valve,
            controller: routed.controller,
            rain_sensor: routed.rain_sensor,
            material_schedule,
            warnings,
        };

        info!(
            heads = design.heads.len(),
            zones = design.total_zones,
            pipes = design.pipes.len(),
            gpm = design.total_system_gpm,
            "irrigation design generated"
        );

        Ok(design)
    }
}

/// Generate a design with the standard catalog and default constants.
pub fn generate_design(site: &SiteAnalysis, params: &ProjectParameters) -> DesignResult<IrrigationDesign> {
    DesignEngine::default().generate(site, params)
}
