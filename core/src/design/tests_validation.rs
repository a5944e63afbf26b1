use crate::catalog::{EquipmentCatalog, HeadKind};
use crate::config::DesignConstants;
use crate::design::validation::{self, check_pressure, check_runoff, check_slopes, check_supply};
use crate::design::{zoning, DesignContext, DesignWarning, HeadPlacement};
use crate::geometry::Point2D;
use crate::site::{IrrigableZone, ProjectParameters, SiteAnalysis, SoilType, ZoneKind};
use crate::units::PipeSize;

fn head(id: &str, kind: HeadKind, gpm: f64, radius_ft: f64, pressure_psi: f64) -> HeadPlacement {
    HeadPlacement {
        id: id.to_string(),
        position: Point2D::origin(),
        kind,
        manufacturer: "Test".to_string(),
        model: "T".to_string(),
        arc_degrees: 360.0,
        radius_ft,
        gpm,
        pressure_psi,
        nozzle: String::new(),
        source_zone_id: Some("T1".to_string()),
        zone_id: None,
    }
}

#[test]
fn test_supply_undersized() {
    let catalog = EquipmentCatalog::standard();
    let constants = DesignConstants::default();
    let ctx = DesignContext::new(&catalog, &constants);

    let heads = vec![head("H-1", HeadKind::Rotor, 9.0, 50.0, 55.0), head("H-2", HeadKind::Rotor, 9.0, 50.0, 55.0)];
    let zoned = zoning::assign_zones(&ctx, &heads).unwrap();

    let small = ProjectParameters {
        water_supply_size: PipeSize::One,
        ..Default::default()
    };
    assert_eq!(
        check_supply(&zoned.zones, &small),
        vec![DesignWarning::SupplyUndersized {
            zone_id: "Z-1".to_string(),
            zone_gpm: 18.0,
            supply_capacity_gpm: 16.0,
        }]
    );

    let large = ProjectParameters {
        water_supply_size: PipeSize::OneAndHalf,
        ..Default::default()
    };
    assert!(check_supply(&zoned.zones, &large).is_empty());
}

#[test]
fn test_low_static_pressure() {
    let catalog = EquipmentCatalog::standard();
    let constants = DesignConstants::default();
    let ctx = DesignContext::new(&catalog, &constants);

    let heads = vec![head("H-1", HeadKind::Spray, 1.0, 12.0, 30.0), head("H-2", HeadKind::Rotor, 3.0, 35.0, 55.0)];

    let low = ProjectParameters {
        static_pressure_psi: 60.0,
        ..Default::default()
    };
    assert_eq!(
        check_pressure(&ctx, &heads, &low),
        Some(DesignWarning::LowStaticPressure {
            required_psi: 65.0,
            static_psi: 60.0,
        })
    );

    let ok = ProjectParameters {
        static_pressure_psi: 65.0,
        ..Default::default()
    };
    assert!(check_pressure(&ctx, &heads, &ok).is_none());
    assert!(check_pressure(&ctx, &[], &low).is_none());
}

#[test]
fn test_runoff_risk_depends_on_soil() {
    let catalog = EquipmentCatalog::standard();
    let constants = DesignConstants::default();
    let ctx = DesignContext::new(&catalog, &constants);

    // 2.6 GPM over one 8 ft circle: about 1.25 in/hr.
    let heads = vec![head("H-1", HeadKind::Spray, 2.6, 8.0, 30.0)];
    let zoned = zoning::assign_zones(&ctx, &heads).unwrap();
    let precip = zoned.zones[0].precipitation_in_hr;
    assert!(precip > 1.0);

    let clay = ProjectParameters {
        soil_type: SoilType::Clay,
        ..Default::default()
    };
    let warnings = check_runoff(&zoned.zones, &clay);
    assert_eq!(warnings.len(), 1);
    assert!(matches!(warnings[0], DesignWarning::RunoffRisk { soil_intake_in_hr, .. } if soil_intake_in_hr == 0.25));

    let heads = vec![head("H-1", HeadKind::Rotor, 3.0, 35.0, 45.0)];
    let zoned = zoning::assign_zones(&ctx, &heads).unwrap();
    assert!(check_runoff(&zoned.zones, &clay).is_empty());
}

#[test]
fn test_steep_slope_only_for_overhead_heads() {
    let catalog = EquipmentCatalog::standard();
    let constants = DesignConstants::default();
    let ctx = DesignContext::new(&catalog, &constants);

    let mut site = SiteAnalysis::new(100.0, 100.0);
    site.turf_zones.push(
        IrrigableZone::rectangle("T1", ZoneKind::Turf, Point2D::origin(), 40.0, 40.0).with_slope(0.4),
    );
    site.bed_zones.push(
        IrrigableZone::rectangle("B1", ZoneKind::Bed, Point2D::new(50.0, 0.0), 10.0, 10.0).with_slope(0.5),
    );
    site.strip_zones.push(
        IrrigableZone::rectangle("S1", ZoneKind::NarrowStrip, Point2D::new(0.0, 60.0), 5.0, 30.0).with_slope(0.1),
    );

    let mut turf = head("H-1", HeadKind::RotaryNozzle, 1.47, 17.0, 40.0);
    turf.source_zone_id = Some("T1".to_string());
    let mut drip = head("H-2", HeadKind::Drip, 0.6, 0.0, 30.0);
    drip.source_zone_id = Some("B1".to_string());
    let mut strip = head("H-3", HeadKind::Strip, 1.21, 15.0, 30.0);
    strip.source_zone_id = Some("S1".to_string());

    let warnings = check_slopes(&ctx, &site, &[turf, drip, strip]);
    assert_eq!(
        warnings,
        vec![DesignWarning::SteepSlope {
            source_zone_id: "T1".to_string(),
            slope_ratio: 0.4,
        }]
    );
}

#[test]
fn test_clean_design_has_no_warnings() {
    let catalog = EquipmentCatalog::standard();
    let constants = DesignConstants::default();
    let ctx = DesignContext::new(&catalog, &constants);

    let site = SiteAnalysis::new(40.0, 40.0);
    let heads = vec![head("H-1", HeadKind::RotaryNozzle, 1.47, 17.0, 40.0)];
    let zoned = zoning::assign_zones(&ctx, &heads).unwrap();

    let warnings = validation::validate_design(&ctx, &site, &ProjectParameters::default(), &zoned.heads, &zoned.zones);
    assert!(warnings.is_empty());
}
