use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Geographic bounding box in degrees.
///
/// `south <= north` is required. `west`/`east` define a plain span; regions
/// crossing the ±180° antimeridian are not supported.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoundingBox {
    /// The full global extent.
    pub fn global() -> Self {
        Self {
            north: 90.0,
            south: -90.0,
            east: 180.0,
            west: -180.0,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.south > self.north {
            return Err(Error::InvalidBoundingBox {
                south: self.south,
                north: self.north,
            });
        }
        Ok(())
    }
}

/// Inclusive index range along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexRange {
    pub min: usize,
    pub max: usize,
}

impl IndexRange {
    pub fn len(&self) -> usize {
        self.max - self.min + 1
    }
}

/// Monotonic in either direction; coordinate axes may be stored ascending
/// (MERRA-2 latitudes) or descending.
fn is_monotonic(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1]) || values.windows(2).all(|w| w[0] >= w[1])
}

fn axis_range(values: &[f64], lo: f64, hi: f64, axis: &'static str) -> Result<IndexRange> {
    if !is_monotonic(values) {
        return Err(Error::NonMonotonicAxis { axis });
    }

    let mut min = None;
    let mut max = None;
    for (i, v) in values.iter().enumerate() {
        if *v >= lo && *v <= hi {
            if min.is_none() {
                min = Some(i);
            }
            max = Some(i);
        }
    }

    match (min, max) {
        (Some(min), Some(max)) => Ok(IndexRange { min, max }),
        _ => Err(Error::EmptyRegion { axis }),
    }
}

/// Resolve a bounding box to inclusive index ranges along the latitude and
/// longitude axes.
///
/// Both axes are resolved independently with inclusive bound checks. An axis
/// with no matching coordinate is an error, never a silent zero-length range.
pub fn resolve(
    lats: &[f64],
    lons: &[f64],
    bbox: &BoundingBox,
) -> Result<(IndexRange, IndexRange)> {
    bbox.validate()?;
    let lat = axis_range(lats, bbox.south, bbox.north, "lat")?;
    let lon = axis_range(lons, bbox.west, bbox.east, "lon")?;
    Ok((lat, lon))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lats_global() -> Vec<f64> {
        // -90..=90 in 10 degree steps.
        (0..19).map(|i| -90.0 + 10.0 * i as f64).collect()
    }

    #[test]
    fn resolves_inner_band() {
        let bbox = BoundingBox {
            north: 10.0,
            south: -10.0,
            east: 180.0,
            west: -180.0,
        };
        let (lat, lon) = resolve(&lats_global(), &lats_global(), &bbox).unwrap();
        // Values -10, 0, 10 at positions 8..=10.
        assert_eq!(lat, IndexRange { min: 8, max: 10 });
        assert_eq!(lat.len(), 3);
        // Longitude bound covers everything.
        assert_eq!(lon, IndexRange { min: 0, max: 18 });
    }

    #[test]
    fn bounds_are_inclusive() {
        let coords = [0.0, 5.0, 10.0, 15.0];
        let r = axis_range(&coords, 5.0, 10.0, "lat").unwrap();
        assert_eq!(r, IndexRange { min: 1, max: 2 });
    }

    #[test]
    fn descending_axis_resolves() {
        let coords = [60.0, 50.0, 40.0, 30.0];
        let r = axis_range(&coords, 35.0, 55.0, "lat").unwrap();
        assert_eq!(r, IndexRange { min: 1, max: 2 });
    }

    #[test]
    fn box_outside_span_is_empty_region() {
        let bbox = BoundingBox {
            north: 200.0,
            south: 150.0,
            east: 180.0,
            west: -180.0,
        };
        assert!(matches!(
            resolve(&lats_global(), &lats_global(), &bbox),
            Err(Error::EmptyRegion { axis: "lat" })
        ));
    }

    #[test]
    fn non_monotonic_axis_is_rejected() {
        let coords = [0.0, 10.0, 5.0, 20.0];
        assert!(matches!(
            axis_range(&coords, 0.0, 20.0, "lon"),
            Err(Error::NonMonotonicAxis { axis: "lon" })
        ));
    }

    #[test]
    fn inverted_box_is_rejected() {
        let bbox = BoundingBox {
            north: -10.0,
            south: 10.0,
            east: 180.0,
            west: -180.0,
        };
        assert!(matches!(
            resolve(&lats_global(), &lats_global(), &bbox),
            Err(Error::InvalidBoundingBox { .. })
        ));
    }
}
