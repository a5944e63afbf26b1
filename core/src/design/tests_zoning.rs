use crate::catalog::{EquipmentCatalog, HeadKind};
use crate::config::DesignConstants;
use crate::design::zoning::{self, zone_color, ZONE_COLORS};
use crate::design::{placement, DesignContext, DesignWarning, HeadPlacement};
use crate::geometry::Point2D;
use crate::site::{IrrigableZone, ZoneKind};
use crate::units::PipeSize;
use std::f64::consts::PI;

fn head(id: &str, kind: HeadKind, gpm: f64, radius_ft: f64) -> HeadPlacement {
    HeadPlacement {
        id: id.to_string(),
        position: Point2D::origin(),
        kind,
        manufacturer: "Test".to_string(),
        model: format!("{:?}", kind),
        arc_degrees: 360.0,
        radius_ft,
        gpm,
        pressure_psi: 30.0,
        nozzle: String::new(),
        source_zone_id: Some("T1".to_string()),
        zone_id: None,
    }
}

#[test]
fn test_square_turf_fits_one_zone() {
    let catalog = EquipmentCatalog::standard();
    let constants = DesignConstants::default();
    let ctx = DesignContext::new(&catalog, &constants);

    let zone = IrrigableZone::rectangle("T1", ZoneKind::Turf, Point2D::origin(), 40.0, 40.0);
    let heads = placement::place_zone(&ctx, &zone, false).unwrap();
    let result = zoning::assign_zones(&ctx, &heads).unwrap();

    assert_eq!(result.zones.len(), 1);
    let z = &result.zones[0];
    assert_eq!(z.id, "Z-1");
    assert_eq!(z.sequence, 1);
    assert_eq!(z.color, ZONE_COLORS[0]);
    assert_eq!(z.head_kind, HeadKind::RotaryNozzle);
    assert_eq!(z.head_ids.len(), 9);
    assert!((z.total_gpm - 9.1875).abs() < 1e-9);
    assert_eq!(z.valve.model, "100-PGA");
    assert_eq!(z.valve.size, PipeSize::One);

    let coverage = 9.0 * PI * 17.0 * 17.0;
    assert!((z.coverage_area_sq_ft - coverage).abs() < 1e-6);
    let precip = 9.1875 * 96.25 / coverage;
    assert!((z.precipitation_in_hr - precip).abs() < 1e-9);
    assert!((z.runtime_minutes - 0.5 / precip * 60.0).abs() < 1e-6);

    assert!(result.heads.iter().all(|h| h.zone_id.as_deref() == Some("Z-1")));
    assert!(result.warnings.is_empty());
}

#[test]
fn test_greedy_packing_respects_capacity() {
    let catalog = EquipmentCatalog::standard();
    let constants = DesignConstants::default();
    let ctx = DesignContext::new(&catalog, &constants);

    let heads: Vec<_> = (1..=12)
        .map(|i| head(&format!("H-{}", i), HeadKind::Spray, 2.6, 12.0))
        .collect();
    let result = zoning::assign_zones(&ctx, &heads).unwrap();

    assert_eq!(result.zones.len(), 3);
    for zone in &result.zones {
        assert_eq!(zone.head_ids.len(), 4);
        assert!(zone.total_gpm <= 12.0);
    }
    assert_eq!(result.zones[0].head_ids, vec!["H-1", "H-2", "H-3", "H-4"]);
    assert_eq!(result.zones[2].sequence, 3);
    assert_eq!(result.heads[4].zone_id.as_deref(), Some("Z-2"));
}

#[test]
fn test_zones_are_homogeneous_in_first_appearance_order() {
    let catalog = EquipmentCatalog::standard();
    let constants = DesignConstants::default();
    let ctx = DesignContext::new(&catalog, &constants);

    let heads = vec![
        head("H-1", HeadKind::Rotor, 3.0, 35.0),
        head("H-2", HeadKind::Spray, 1.0, 12.0),
        head("H-3", HeadKind::Rotor, 3.0, 35.0),
        head("H-4", HeadKind::Drip, 2.0, 0.0),
        head("H-5", HeadKind::Spray, 1.0, 12.0),
    ];
    let result = zoning::assign_zones(&ctx, &heads).unwrap();

    let kinds: Vec<_> = result.zones.iter().map(|z| z.head_kind).collect();
    assert_eq!(kinds, vec![HeadKind::Rotor, HeadKind::Spray, HeadKind::Drip]);
    assert_eq!(result.zones[0].head_ids, vec!["H-1", "H-3"]);
    assert_eq!(result.zones[1].head_ids, vec!["H-2", "H-5"]);

    for zone in &result.zones {
        for id in &zone.head_ids {
            let h = result.heads.iter().find(|h| &h.id == id).unwrap();
            assert_eq!(h.kind, zone.head_kind);
        }
    }
}

#[test]
fn test_oversized_head_gets_own_zone_and_warning() {
    let catalog = EquipmentCatalog::standard();
    let constants = DesignConstants::default();
    let ctx = DesignContext::new(&catalog, &constants);

    let heads = vec![
        head("H-1", HeadKind::Rotor, 4.0, 35.0),
        head("H-2", HeadKind::Rotor, 25.0, 65.0),
        head("H-3", HeadKind::Rotor, 4.0, 35.0),
    ];
    let result = zoning::assign_zones(&ctx, &heads).unwrap();

    assert_eq!(result.zones.len(), 3);
    assert_eq!(result.zones[1].head_ids, vec!["H-2"]);
    assert_eq!(result.zones[1].valve.model, "150-PGA");
    assert_eq!(result.zones[0].valve.model, "100-PGA");

    assert_eq!(
        result.warnings,
        vec![DesignWarning::OversizedHead {
            zone_id: "Z-2".to_string(),
            head_id: "H-2".to_string(),
            gpm: 25.0,
            capacity_gpm: 20.0,
        }]
    );
}

#[test]
fn test_quick_couplers_stay_unzoned() {
    let catalog = EquipmentCatalog::standard();
    let constants = DesignConstants::default();
    let ctx = DesignContext::new(&catalog, &constants);

    let heads = vec![
        head("H-1", HeadKind::Rotor, 3.0, 35.0),
        head("H-2", HeadKind::QuickCoupler, 0.0, 0.0),
    ];
    let result = zoning::assign_zones(&ctx, &heads).unwrap();

    assert_eq!(result.zones.len(), 1);
    assert_eq!(result.heads.len(), 2);
    assert!(result.heads[1].zone_id.is_none());
}

#[test]
fn test_drip_coverage_uses_placeholder_radius() {
    let catalog = EquipmentCatalog::standard();
    let constants = DesignConstants::default();
    let ctx = DesignContext::new(&catalog, &constants);

    let heads = vec![
        head("H-1", HeadKind::Drip, 1.5, 0.0),
        head("H-2", HeadKind::Drip, 2.5, 0.0),
    ];
    let result = zoning::assign_zones(&ctx, &heads).unwrap();

    let zone = &result.zones[0];
    assert!((zone.coverage_area_sq_ft - 2.0 * PI * 100.0).abs() < 1e-9);
    assert!(zone.precipitation_in_hr > 0.0);
}

#[test]
fn test_empty_input() {
    let catalog = EquipmentCatalog::standard();
    let constants = DesignConstants::default();
    let ctx = DesignContext::new(&catalog, &constants);

    let result = zoning::assign_zones(&ctx, &[]).unwrap();
    assert!(result.zones.is_empty());
    assert!(result.heads.is_empty());
}

#[test]
fn test_zone_colors_cycle() {
    assert_eq!(zone_color(1), ZONE_COLORS[0]);
    assert_eq!(zone_color(8), ZONE_COLORS[7]);
    assert_eq!(zone_color(9), ZONE_COLORS[0]);
}
