use crate::geometry::{self, BoundingBox, Point2D, EPSILON};
use crate::units::PipeSize;
use serde::{de, Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZoneKind {
    Turf,
    Bed,
    NarrowStrip,
    TreeRing,
    Planter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SunExposure {
    #[default]
    FullSun,
    PartialShade,
    FullShade,
}

/// A polygon area to be irrigated, as delivered by site analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrrigableZone {
    pub id: String,
    pub kind: ZoneKind,
    pub width_ft: f64,
    pub length_ft: f64,
    #[serde(default)]
    pub area_sq_ft: f64,
    #[serde(default)]
    pub sun_exposure: SunExposure,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slope_ratio: Option<f64>,
    pub center: Point2D,
    /// Ordered outline. Fewer than three points means "no polygon": the
    /// rectangle derived from `center`, `width_ft` (x) and `length_ft` (y) is used.
    #[serde(default)]
    pub boundary: Vec<Point2D>,
}

impl IrrigableZone {
    /// Rectangle zone without an explicit outline.
    pub fn new(id: &str, kind: ZoneKind, center: Point2D, width_ft: f64, length_ft: f64) -> Self {
        Self {
            id: id.to_string(),
            kind,
            width_ft,
            length_ft,
            area_sq_ft: width_ft * length_ft,
            sun_exposure: SunExposure::default(),
            slope_ratio: None,
            center,
            boundary: Vec::new(),
        }
    }

    /// Axis-aligned rectangle with its minimum corner at `origin`, outline included.
    pub fn rectangle(id: &str, kind: ZoneKind, origin: Point2D, width_ft: f64, length_ft: f64) -> Self {
        let center = origin.offset(width_ft / 2.0, length_ft / 2.0);
        let outline = BoundingBox::from_center(center, width_ft, length_ft).corners();
        Self::new(id, kind, center, width_ft, length_ft).with_boundary(outline)
    }

    pub fn with_boundary(mut self, boundary: Vec<Point2D>) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn with_slope(mut self, ratio: f64) -> Self {
        self.slope_ratio = Some(ratio);
        self
    }

    pub fn has_polygon(&self) -> bool {
        self.boundary.len() >= 3
    }

    pub fn dominant_dimension(&self) -> f64 {
        self.width_ft.max(self.length_ft)
    }

    pub fn minor_dimension(&self) -> f64 {
        self.width_ft.min(self.length_ft)
    }

    /// Stated area, falling back to the outline area and then width × length.
    pub fn effective_area(&self) -> f64 {
        if self.area_sq_ft.is_finite() && self.area_sq_ft > EPSILON {
            return self.area_sq_ft;
        }
        if self.has_polygon() {
            return geometry::polygon_area(&self.boundary);
        }
        (self.width_ft * self.length_ft).max(0.0)
    }

    pub fn bounds(&self) -> BoundingBox {
        if self.has_polygon() {
            geometry::bounding_box(&self.boundary)
        } else {
            BoundingBox::from_center(self.center, self.width_ft, self.length_ft)
        }
    }

    /// Polygon used for edge classification: the outline, or the fallback rectangle.
    pub fn outline(&self) -> Vec<Point2D> {
        if self.has_polygon() {
            self.boundary.clone()
        } else {
            self.bounds().corners()
        }
    }

    pub fn centroid(&self) -> Point2D {
        if self.has_polygon() {
            geometry::centroid(&self.boundary)
        } else {
            self.center
        }
    }
}

/// Geometry of a property as returned by the site-analysis collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SiteAnalysis {
    pub property_width_ft: f64,
    pub property_length_ft: f64,
    #[serde(default)]
    pub turf_zones: Vec<IrrigableZone>,
    #[serde(default)]
    pub bed_zones: Vec<IrrigableZone>,
    #[serde(default)]
    pub strip_zones: Vec<IrrigableZone>,
    #[serde(default)]
    pub water_source: Option<Point2D>,
    #[serde(default)]
    pub controller_location: Option<Point2D>,
    #[serde(default)]
    pub nearest_building: Option<Point2D>,
}

impl SiteAnalysis {
    pub fn new(property_width_ft: f64, property_length_ft: f64) -> Self {
        Self {
            property_width_ft,
            property_length_ft,
            ..Default::default()
        }
    }

    /// Every zone in processing order: turf, then beds, then strips.
    pub fn irrigable_zones(&self) -> impl Iterator<Item = &IrrigableZone> {
        self.turf_zones
            .iter()
            .chain(self.bed_zones.iter())
            .chain(self.strip_zones.iter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SoilType {
    Clay,
    #[default]
    Loam,
    Sand,
}

impl SoilType {
    /// Basic intake rate of bare soil, inches per hour.
    pub fn intake_rate_in_hr(&self) -> f64 {
        match self {
            Self::Clay => 0.25,
            Self::Loam => 0.5,
            Self::Sand => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TurfType {
    #[default]
    Bermudagrass,
    Zoysia,
    StAugustine,
    TallFescue,
    KentuckyBluegrass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ApplicationType {
    #[default]
    Commercial,
    Multifamily,
    AthleticField,
    HoaCommonArea,
}

/// Water service sizes the project form offers.
pub const WATER_SUPPLY_SIZES: [PipeSize; 4] = [PipeSize::ThreeQuarter, PipeSize::One, PipeSize::OneAndHalf, PipeSize::Two];

fn deserialize_supply_size<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PipeSize, D::Error> {
    let size = PipeSize::deserialize(deserializer)?;
    if WATER_SUPPLY_SIZES.contains(&size) {
        Ok(size)
    } else {
        Err(de::Error::custom(format!("unsupported water supply size: {} in", size.diameter_in())))
    }
}

/// Project form options. Only `application_type` changes the generated layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectParameters {
    #[serde(deserialize_with = "deserialize_supply_size")]
    pub water_supply_size: PipeSize,
    pub static_pressure_psi: f64,
    #[serde(default)]
    pub soil_type: SoilType,
    #[serde(default)]
    pub turf_type: TurfType,
    #[serde(default)]
    pub application_type: ApplicationType,
}

impl Default for ProjectParameters {
    fn default() -> Self {
        Self {
            water_supply_size: PipeSize::One,
            static_pressure_psi: 60.0,
            soil_type: SoilType::default(),
            turf_type: TurfType::default(),
            application_type: ApplicationType::default(),
        }
    }
}

impl ProjectParameters {
    pub fn is_athletic_field(&self) -> bool {
        self.application_type == ApplicationType::AthleticField
    }
}
