use geo_traits::{CoordTrait, Dimensions};
use serde::{Deserialize, Serialize};

use crate::datatypes::Dimension;

/// A single coordinate tuple, either XY or XYZ.
///
/// This is the leaf value of a multi-line-string payload. It implements [CoordTrait], which you
/// can use to extract data. Serialized with serde as a bare array, e.g. `[30.0, 10.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coordinates {
    /// A two-dimensional coordinate.
    Xy([f64; 2]),

    /// A three-dimensional coordinate.
    Xyz([f64; 3]),
}

impl Coordinates {
    /// Construct an XY coordinate.
    pub fn xy(x: f64, y: f64) -> Self {
        Self::Xy([x, y])
    }

    /// Construct an XYZ coordinate.
    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self::Xyz([x, y, z])
    }

    /// Construct from a slice of 2 or 3 values.
    pub fn try_from_slice(values: &[f64]) -> Option<Self> {
        match *values {
            [x, y] => Some(Self::xy(x, y)),
            [x, y, z] => Some(Self::xyz(x, y, z)),
            _ => None,
        }
    }

    /// Copy the values out of any [CoordTrait] implementation.
    ///
    /// M values are dropped, so XYM becomes XY and XYZM becomes XYZ. A coordinate of unknown
    /// dimension keeps its first three values when it has at least three.
    pub fn from_coord(coord: &impl CoordTrait<T = f64>) -> Self {
        match coord.dim() {
            Dimensions::Xyz | Dimensions::Xyzm => {
                Self::xyz(coord.x(), coord.y(), coord.nth_or_panic(2))
            }
            Dimensions::Unknown(n) if n >= 3 => {
                Self::xyz(coord.x(), coord.y(), coord.nth_or_panic(2))
            }
            _ => Self::xy(coord.x(), coord.y()),
        }
    }

    /// The dimension of this coordinate.
    pub fn dimension(&self) -> Dimension {
        match self {
            Self::Xy(_) => Dimension::XY,
            Self::Xyz(_) => Dimension::XYZ,
        }
    }

    /// The values of this coordinate, in x, y[, z] order.
    pub fn as_slice(&self) -> &[f64] {
        match self {
            Self::Xy(values) => values,
            Self::Xyz(values) => values,
        }
    }

    /// The z value, if any.
    pub fn z(&self) -> Option<f64> {
        match self {
            Self::Xy(_) => None,
            Self::Xyz([_, _, z]) => Some(*z),
        }
    }
}

impl From<(f64, f64)> for Coordinates {
    fn from((x, y): (f64, f64)) -> Self {
        Self::xy(x, y)
    }
}

impl From<(f64, f64, f64)> for Coordinates {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::xyz(x, y, z)
    }
}

impl From<geo_types::Coord<f64>> for Coordinates {
    fn from(value: geo_types::Coord<f64>) -> Self {
        Self::xy(value.x, value.y)
    }
}

impl From<Coordinates> for geo_types::Coord<f64> {
    /// Drops any z value.
    fn from(value: Coordinates) -> Self {
        geo_types::coord! { x: value.x(), y: value.y() }
    }
}

impl CoordTrait for Coordinates {
    type T = f64;

    fn dim(&self) -> geo_traits::Dimensions {
        self.dimension().into()
    }

    fn nth_or_panic(&self, n: usize) -> Self::T {
        self.as_slice()[n]
    }

    fn x(&self) -> Self::T {
        self.as_slice()[0]
    }

    fn y(&self) -> Self::T {
        self.as_slice()[1]
    }
}
