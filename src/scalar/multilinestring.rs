use geo_traits::MultiLineStringTrait;
use serde::{Deserialize, Serialize};

use crate::datatypes::Dimension;
use crate::scalar::LineStringCoordinates;

/// The coordinates of a MultiLineString: an ordered sequence of [LineStringCoordinates].
///
/// An empty sequence is a valid value and is distinct from an absent one, which is modelled as
/// `Option::<MultiLineStringCoordinates>::None` throughout this crate.
///
/// Serializing with serde produces exactly the GeoJSON `"coordinates"` member of a
/// MultiLineString, e.g. `[[[30.0,10.0],[10.0,30.0]],[]]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MultiLineStringCoordinates {
    line_strings: Vec<LineStringCoordinates>,
}

impl MultiLineStringCoordinates {
    pub fn new(line_strings: Vec<LineStringCoordinates>) -> Self {
        Self { line_strings }
    }

    /// Copy the coordinates out of any [MultiLineStringTrait] implementation, such as a
    /// [geo_types::MultiLineString].
    pub fn from_multi_line_string(geom: &impl MultiLineStringTrait<T = f64>) -> Self {
        let line_strings = geom
            .line_strings()
            .map(|line_string| LineStringCoordinates::from_line_string(&line_string))
            .collect();
        Self { line_strings }
    }

    pub fn line_strings(&self) -> &[LineStringCoordinates] {
        &self.line_strings
    }

    pub fn into_inner(self) -> Vec<LineStringCoordinates> {
        self.line_strings
    }

    pub fn len(&self) -> usize {
        self.line_strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line_strings.is_empty()
    }

    /// The dimension of the first coordinate found, or XY if there are no coordinates.
    pub fn dimension(&self) -> Dimension {
        self.line_strings
            .iter()
            .find_map(|ls| ls.coords().first())
            .map(|coord| coord.dimension())
            .unwrap_or(Dimension::XY)
    }
}

impl From<Vec<LineStringCoordinates>> for MultiLineStringCoordinates {
    fn from(line_strings: Vec<LineStringCoordinates>) -> Self {
        Self::new(line_strings)
    }
}

impl From<&geo_types::MultiLineString<f64>> for MultiLineStringCoordinates {
    fn from(value: &geo_types::MultiLineString<f64>) -> Self {
        Self::new(value.0.iter().map(LineStringCoordinates::from).collect())
    }
}

impl From<geo_types::MultiLineString<f64>> for MultiLineStringCoordinates {
    fn from(value: geo_types::MultiLineString<f64>) -> Self {
        (&value).into()
    }
}

impl From<&MultiLineStringCoordinates> for geo_types::MultiLineString<f64> {
    /// Drops any z values.
    fn from(value: &MultiLineStringCoordinates) -> Self {
        geo_types::MultiLineString::new(
            value
                .line_strings
                .iter()
                .map(geo_types::LineString::from)
                .collect(),
        )
    }
}

impl MultiLineStringTrait for MultiLineStringCoordinates {
    type T = f64;
    type LineStringType<'a>
        = &'a LineStringCoordinates
    where
        Self: 'a;

    fn dim(&self) -> geo_traits::Dimensions {
        self.dimension().into()
    }

    fn num_line_strings(&self) -> usize {
        self.line_strings.len()
    }

    unsafe fn line_string_unchecked(&self, i: usize) -> Self::LineStringType<'_> {
        self.line_strings.get_unchecked(i)
    }
}
