use crate::error::GeometryError;

/// Closed interval of heights, real-world meters or output units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightRange {
    min: f64,
    max: f64,
}

impl HeightRange {
    pub fn new(min: f64, max: f64) -> Result<Self, GeometryError> {
        if !(min.is_finite() && max.is_finite()) || min > max {
            return Err(GeometryError::InvalidHeightRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Min/max over a set of heights
///
/// A set where every value is equal is widened by one unit on each side so
/// that [`map_height`] stays well defined. Returns `None` for an empty set or
/// when no value is finite.
pub fn compute_range(heights: &[f64]) -> Option<HeightRange> {
    let mut finite = heights.iter().copied().filter(|h| h.is_finite());
    let first = finite.next()?;

    let (min, max) = finite.fold((first, first), |(lo, hi), h| (lo.min(h), hi.max(h)));

    if min == max {
        Some(HeightRange {
            min: min - 1.0,
            max: max + 1.0,
        })
    } else {
        Some(HeightRange { min, max })
    }
}

/// Linearly remap `h` from `source` onto `target`
///
/// Relative ordering is preserved. A zero-span source maps everything to
/// `target.min()`.
pub fn map_height(h: f64, source: &HeightRange, target: &HeightRange) -> f64 {
    let span = source.span();
    if span == 0.0 {
        return target.min;
    }
    target.min + (h - source.min) / span * target.span()
}
