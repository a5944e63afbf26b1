use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Nominal pipe / valve size. Serialized as the diameter in inches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub enum PipeSize {
    ThreeQuarter,
    One,
    OneAndQuarter,
    OneAndHalf,
    Two,
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("Unsupported nominal pipe size: {0} in")]
pub struct UnsupportedPipeSize(pub f64);

impl PipeSize {
    pub const ALL: [PipeSize; 5] = [
        Self::ThreeQuarter,
        Self::One,
        Self::OneAndQuarter,
        Self::OneAndHalf,
        Self::Two,
    ];

    pub fn diameter_in(&self) -> f64 {
        match self {
            Self::ThreeQuarter => 0.75,
            Self::One => 1.0,
            Self::OneAndQuarter => 1.25,
            Self::OneAndHalf => 1.5,
            Self::Two => 2.0,
        }
    }

    pub fn from_diameter(inches: f64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|size| (size.diameter_in() - inches).abs() < 1e-6)
    }
}

impl TryFrom<f64> for PipeSize {
    type Error = UnsupportedPipeSize;

    fn try_from(inches: f64) -> Result<Self, Self::Error> {
        Self::from_diameter(inches).ok_or(UnsupportedPipeSize(inches))
    }
}

impl From<PipeSize> for f64 {
    fn from(size: PipeSize) -> Self {
        size.diameter_in()
    }
}

impl fmt::Display for PipeSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThreeQuarter => write!(f, "3/4\""),
            Self::One => write!(f, "1\""),
            Self::OneAndQuarter => write!(f, "1-1/4\""),
            Self::OneAndHalf => write!(f, "1-1/2\""),
            Self::Two => write!(f, "2\""),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PipeMaterial {
    Schedule40Pvc,
    Class200Pvc,
}

impl fmt::Display for PipeMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schedule40Pvc => write!(f, "Sch 40 PVC"),
            Self::Class200Pvc => write!(f, "Class 200 PVC"),
        }
    }
}

/// Unit of measure on the material schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialUnit {
    #[serde(rename = "EA")]
    Each,
    #[serde(rename = "LF")]
    LinearFeet,
}

impl fmt::Display for MaterialUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Each => write!(f, "EA"),
            Self::LinearFeet => write!(f, "LF"),
        }
    }
}
