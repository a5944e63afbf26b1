//! Post-design checks. Findings are reported, never acted on.

use super::types::{DesignWarning, HeadPlacement, Zone};
use super::DesignContext;
use crate::catalog::rules;
use crate::site::{ProjectParameters, SiteAnalysis};
use tracing::warn;

pub fn check_supply(zones: &[Zone], params: &ProjectParameters) -> Vec<DesignWarning> {
    let capacity = rules::supply_capacity_gpm(params.water_supply_size);
    zones
        .iter()
        .filter(|z| z.total_gpm > capacity)
        .map(|z| DesignWarning::SupplyUndersized {
            zone_id: z.id.clone(),
            zone_gpm: z.total_gpm,
            supply_capacity_gpm: capacity,
        })
        .collect()
}

/// Static pressure must cover the most demanding head plus the loss allowance.
pub fn check_pressure(ctx: &DesignContext, heads: &[HeadPlacement], params: &ProjectParameters) -> Option<DesignWarning> {
    let max_head_psi = heads
        .iter()
        .filter(|h| h.kind.is_zoned())
        .map(|h| h.pressure_psi)
        .fold(None, |acc: Option<f64>, p| Some(acc.map_or(p, |a| a.max(p))))?;

    let required_psi = max_head_psi + ctx.constants.pressure_loss_allowance_psi;
    (params.static_pressure_psi < required_psi).then_some(DesignWarning::LowStaticPressure {
        required_psi,
        static_psi: params.static_pressure_psi,
    })
}

pub fn check_runoff(zones: &[Zone], params: &ProjectParameters) -> Vec<DesignWarning> {
    let intake = params.soil_type.intake_rate_in_hr();
    zones
        .iter()
        .filter(|z| z.precipitation_in_hr > intake)
        .map(|z| DesignWarning::RunoffRisk {
            zone_id: z.id.clone(),
            precipitation_in_hr: z.precipitation_in_hr,
            soil_intake_in_hr: intake,
        })
        .collect()
}

/// Irrigable zones steeper than the limit that still received overhead heads.
pub fn check_slopes(ctx: &DesignContext, site: &SiteAnalysis, heads: &[HeadPlacement]) -> Vec<DesignWarning> {
    site.irrigable_zones()
        .filter_map(|zone| {
            let slope = zone.slope_ratio?;
            if slope <= ctx.constants.steep_slope_ratio {
                return None;
            }
            let overhead = heads
                .iter()
                .any(|h| h.kind.is_overhead() && h.source_zone_id.as_deref() == Some(zone.id.as_str()));
            overhead.then(|| DesignWarning::SteepSlope {
                source_zone_id: zone.id.clone(),
                slope_ratio: slope,
            })
        })
        .collect()
}

/// Run every check and log each finding.
pub fn validate_design(
    ctx: &DesignContext,
    site: &SiteAnalysis,
    params: &ProjectParameters,
    heads: &[HeadPlacement],
    zones: &[Zone],
) -> Vec<DesignWarning> {
    let mut warnings = check_supply(zones, params);
    warnings.extend(check_pressure(ctx, heads, params));
    warnings.extend(check_runoff(zones, params));
    warnings.extend(check_slopes(ctx, site, heads));

    for warning in &warnings {
        warn!("{}", warning);
    }

    warnings
}
