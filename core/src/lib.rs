pub mod geometry;
pub mod units;
pub mod site;
pub mod config;
pub mod catalog;
pub mod design;

pub use catalog::{CatalogError, EquipmentCatalog, HeadKind};
pub use config::DesignConstants;
pub use design::{generate_design, DesignEngine, DesignError, IrrigationDesign};
pub use geometry::Point2D;
pub use site::{IrrigableZone, ProjectParameters, SiteAnalysis, ZoneKind};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
