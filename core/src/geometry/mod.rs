use nalgebra as na;

pub type Vector2 = na::Vector2<f64>;

pub const EPSILON: f64 = 1e-6;

pub trait ApproxEq {
    fn approx_eq(&self, other: &Self) -> bool;
}

impl ApproxEq for f64 {
    fn approx_eq(&self, other: &Self) -> bool {
        (self - other).abs() < EPSILON
    }
}

impl ApproxEq for Point2D {
    fn approx_eq(&self, other: &Self) -> bool {
        (self.to_vector() - other.to_vector()).norm_squared() < EPSILON * EPSILON
    }
}

pub mod primitives;
pub use primitives::*;

pub mod utils_2d;
pub use utils_2d::*;
