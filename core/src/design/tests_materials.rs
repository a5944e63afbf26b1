use crate::catalog::{EquipmentCatalog, HeadKind};
use crate::config::DesignConstants;
use crate::design::materials::{self, pipe_totals};
use crate::design::{placement, routing, zoning, DesignContext, HeadPlacement, MaterialScheduleItem, PipeKind, PipeSegment};
use crate::geometry::Point2D;
use crate::site::{IrrigableZone, SiteAnalysis, ZoneKind};
use crate::units::{MaterialUnit, PipeMaterial, PipeSize};

fn head_at(id: &str, kind: HeadKind, model: &str, gpm: f64, x: f64, y: f64) -> HeadPlacement {
    HeadPlacement {
        id: id.to_string(),
        position: Point2D::new(x, y),
        kind,
        manufacturer: "Test".to_string(),
        model: model.to_string(),
        arc_degrees: 360.0,
        radius_ft: 12.0,
        gpm,
        pressure_psi: 30.0,
        nozzle: String::new(),
        source_zone_id: None,
        zone_id: None,
    }
}

fn schedule_for(ctx: &DesignContext, site: &SiteAnalysis, heads: &[HeadPlacement]) -> Vec<MaterialScheduleItem> {
    let zoned = zoning::assign_zones(ctx, heads).unwrap();
    let routed = routing::route_pipes(ctx, site, &zoned.zones, &zoned.heads).unwrap();
    materials::calculate_materials(ctx, &zoned.heads, &zoned.zones, &routed.zone_valves, &routed.pipes).unwrap()
}

fn find<'a>(schedule: &'a [MaterialScheduleItem], model: &str) -> Option<&'a MaterialScheduleItem> {
    schedule.iter().find(|l| l.model == model)
}

#[test]
fn test_square_turf_schedule() {
    let catalog = EquipmentCatalog::standard();
    let constants = DesignConstants::default();
    let ctx = DesignContext::new(&catalog, &constants);

    let mut site = SiteAnalysis::new(40.0, 40.0);
    site.turf_zones
        .push(IrrigableZone::rectangle("T1", ZoneKind::Turf, Point2D::origin(), 40.0, 40.0));
    let heads = placement::place_heads(&ctx, &site, &Default::default()).unwrap();

    let schedule = schedule_for(&ctx, &site, &heads);
    let models: Vec<_> = schedule.iter().map(|l| l.model.as_str()).collect();

    assert_eq!(
        models,
        vec![
            "PROS-04-PRS40",
            "100-PGA",
            "825Y",
            "ESP-TM2-12",
            "WR2-RFC",
            "Sch 40 PVC",
            "Class 200 PVC",
            "SJ-7512",
            "113BC",
            "14-1 UF WHT",
            "14-1 UF RED",
        ]
    );

    assert_eq!(schedule[0].quantity, 9);
    assert_eq!(schedule[0].unit, MaterialUnit::Each);
    assert_eq!(schedule[1].quantity, 1);
    assert_eq!(schedule[5].description, "1-1/2\" Sch 40 PVC pipe");
    assert_eq!(schedule[5].quantity, 10);
    assert_eq!(schedule[5].unit, MaterialUnit::LinearFeet);
    assert_eq!(schedule[6].description, "3/4\" Class 200 PVC pipe");
    assert_eq!(schedule[7].quantity, 9);
    assert_eq!(schedule[8].quantity, 1);
    assert_eq!(schedule[9].quantity, 10);
    assert_eq!(schedule[10].quantity, 10);
}

#[test]
fn test_heads_grouped_by_model_with_quick_couplers() {
    let catalog = EquipmentCatalog::standard();
    let constants = DesignConstants::default();
    let ctx = DesignContext::new(&catalog, &constants);
    let site = SiteAnalysis::new(100.0, 100.0);

    let heads = vec![
        head_at("H-1", HeadKind::Spray, "1804-PRS", 1.0, 0.0, 0.0),
        head_at("H-2", HeadKind::Rotor, "PGP-ADJ", 3.0, 30.0, 0.0),
        head_at("H-3", HeadKind::Spray, "1804-PRS", 1.0, 0.0, 10.0),
        head_at("H-4", HeadKind::QuickCoupler, "anything", 0.0, 50.0, 50.0),
        head_at("H-5", HeadKind::QuickCoupler, "else", 0.0, 50.0, 25.0),
    ];
    let schedule = schedule_for(&ctx, &site, &heads);

    assert_eq!(schedule[0].model, "1804-PRS");
    assert_eq!(schedule[0].quantity, 2);
    assert_eq!(schedule[1].model, "PGP-ADJ");
    assert_eq!(schedule[1].quantity, 1);
    assert_eq!(schedule[2].model, "33-DRC");
    assert_eq!(schedule[2].manufacturer, "Rain Bird");
    assert_eq!(schedule[2].quantity, 2);

    // Quick couplers are not on swing joints.
    assert_eq!(find(&schedule, "SJ-7512").unwrap().quantity, 3);
}

#[test]
fn test_valves_master_valve_and_boxes() {
    let catalog = EquipmentCatalog::standard();
    let constants = DesignConstants::default();
    let ctx = DesignContext::new(&catalog, &constants);
    let site = SiteAnalysis::new(200.0, 200.0);

    // Five rotor zones: four at 16 GPM (1-1/2" valves), one at 9 GPM (1" valve).
    let mut heads: Vec<_> = (0..4)
        .map(|i| head_at(&format!("H-{}", i + 1), HeadKind::Rotor, "I-25", 16.0, i as f64 * 40.0, 0.0))
        .collect();
    heads.push(head_at("H-5", HeadKind::Rotor, "I-25", 9.0, 0.0, 100.0));

    let schedule = schedule_for(&ctx, &site, &heads);

    assert_eq!(schedule[1].description, "1\" zone control valve");
    assert_eq!(schedule[1].quantity, 1);
    assert_eq!(schedule[2].description, "1-1/2\" zone control valve");
    assert_eq!(schedule[2].quantity, 4);

    assert_eq!(schedule[3].model, "150-PESB");
    assert_eq!(find(&schedule, "113BC").unwrap().quantity, 2);

    let common = find(&schedule, "14-1 UF WHT").unwrap().quantity;
    let zone_wire = find(&schedule, "14-1 UF RED").unwrap().quantity;
    assert_eq!(zone_wire, common * 5);
}

#[test]
fn test_drip_kit_per_drip_zone() {
    let catalog = EquipmentCatalog::standard();
    let constants = DesignConstants::default();
    let ctx = DesignContext::new(&catalog, &constants);
    let site = SiteAnalysis::new(100.0, 100.0);

    let heads = vec![
        head_at("H-1", HeadKind::Drip, "XB-10PC", 8.0, 10.0, 10.0),
        head_at("H-2", HeadKind::Drip, "XB-10PC", 8.0, 30.0, 10.0),
        head_at("H-3", HeadKind::Spray, "1804-PRS", 1.0, 50.0, 50.0),
    ];
    let schedule = schedule_for(&ctx, &site, &heads);

    assert_eq!(find(&schedule, "XCZ-100-PRF").unwrap().quantity, 2);
    assert_eq!(find(&schedule, "SJ-7512").unwrap().quantity, 1);
    assert!(find(&schedule, "150-PESB").is_none());
}

#[test]
fn test_pipe_totals_order_and_rounding() {
    let pipe = |id: &str, len: f64, size: PipeSize, material: PipeMaterial| PipeSegment {
        id: id.to_string(),
        start: Point2D::origin(),
        end: Point2D::new(len, 0.0),
        size,
        material,
        kind: PipeKind::Lateral,
        zone_id: None,
    };
    let pipes = vec![
        pipe("P-1", 10.2, PipeSize::One, PipeMaterial::Class200Pvc),
        pipe("P-2", 4.0, PipeSize::Two, PipeMaterial::Schedule40Pvc),
        pipe("P-3", 0.5, PipeSize::One, PipeMaterial::Class200Pvc),
        pipe("P-4", 7.0, PipeSize::ThreeQuarter, PipeMaterial::Class200Pvc),
    ];

    let keys: Vec<_> = pipe_totals(&pipes).into_keys().collect();
    assert_eq!(
        keys,
        vec![
            (PipeMaterial::Schedule40Pvc, PipeSize::Two),
            (PipeMaterial::Class200Pvc, PipeSize::ThreeQuarter),
            (PipeMaterial::Class200Pvc, PipeSize::One),
        ]
    );

    let catalog = EquipmentCatalog::standard();
    let constants = DesignConstants::default();
    let ctx = DesignContext::new(&catalog, &constants);
    let schedule = materials::calculate_materials(&ctx, &[], &[], &[], &pipes).unwrap();

    let one_inch = schedule.iter().find(|l| l.description == "1\" Class 200 PVC pipe").unwrap();
    assert_eq!(one_inch.quantity, 11);
    assert!(find(&schedule, "113BC").is_none());
    assert!(find(&schedule, "14-1 UF WHT").is_none());
}
