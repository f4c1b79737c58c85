use geo_traits::LineStringTrait;
use serde::{Deserialize, Serialize};

use crate::datatypes::Dimension;
use crate::scalar::Coordinates;

/// The coordinates of a single LineString: an ordered, non-null sequence of [Coordinates].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineStringCoordinates {
    coords: Vec<Coordinates>,
}

impl LineStringCoordinates {
    pub fn new(coords: Vec<Coordinates>) -> Self {
        Self { coords }
    }

    /// Copy the coordinates out of any [LineStringTrait] implementation.
    ///
    /// Every coordinate is kept; M values are dropped as in [Coordinates::from_coord].
    pub fn from_line_string(geom: &impl LineStringTrait<T = f64>) -> Self {
        let coords = geom
            .coords()
            .map(|coord| Coordinates::from_coord(&coord))
            .collect();
        Self { coords }
    }

    pub fn coords(&self) -> &[Coordinates] {
        &self.coords
    }

    pub fn into_inner(self) -> Vec<Coordinates> {
        self.coords
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// The dimension of the first coordinate, or XY if this LineString is empty.
    pub fn dimension(&self) -> Dimension {
        self.coords
            .first()
            .map(|coord| coord.dimension())
            .unwrap_or(Dimension::XY)
    }
}

impl From<Vec<Coordinates>> for LineStringCoordinates {
    fn from(coords: Vec<Coordinates>) -> Self {
        Self::new(coords)
    }
}

impl From<&geo_types::LineString<f64>> for LineStringCoordinates {
    fn from(value: &geo_types::LineString<f64>) -> Self {
        Self::new(value.0.iter().map(|c| Coordinates::from(*c)).collect())
    }
}

impl From<&LineStringCoordinates> for geo_types::LineString<f64> {
    fn from(value: &LineStringCoordinates) -> Self {
        geo_types::LineString::new(
            value
                .coords
                .iter()
                .map(|c| geo_types::Coord::from(*c))
                .collect(),
        )
    }
}

impl LineStringTrait for LineStringCoordinates {
    type T = f64;
    type CoordType<'a>
        = Coordinates
    where
        Self: 'a;

    fn dim(&self) -> geo_traits::Dimensions {
        self.dimension().into()
    }

    fn num_coords(&self) -> usize {
        self.coords.len()
    }

    unsafe fn coord_unchecked(&self, i: usize) -> Self::CoordType<'_> {
        *self.coords.get_unchecked(i)
    }
}

impl LineStringTrait for &LineStringCoordinates {
    type T = f64;
    type CoordType<'a>
        = Coordinates
    where
        Self: 'a;

    fn dim(&self) -> geo_traits::Dimensions {
        self.dimension().into()
    }

    fn num_coords(&self) -> usize {
        self.coords.len()
    }

    unsafe fn coord_unchecked(&self, i: usize) -> Self::CoordType<'_> {
        *self.coords.get_unchecked(i)
    }
}
