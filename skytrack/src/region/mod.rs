//! Named geographic regions.
//!
//! A [`RegionTable`] is immutable configuration: it is built once, then
//! borrowed by the normalizer (bounding-box filter), the sample synthesizer
//! (fleet placement) and the HTTP source (query bounds).
//!
//! # Example
//!
//! ```
//! use skytrack::region::RegionTable;
//!
//! let regions = RegionTable::builtin();
//! let india = regions.get("india").unwrap();
//! assert!(india.bounds.contains(23.0, 80.0));
//! assert!(!india.bounds.contains(50.0, 80.0));
//! ```

use std::fmt;

use serde::Serialize;

use crate::geo::GeoPoint;

/// Key of the region used when nothing else is configured.
pub const DEFAULT_REGION: &str = "india";

/// Built-in regions: key, name, (lat_min, lat_max, lng_min, lng_max), center, zoom.
const BUILTIN_REGIONS: [(&str, &str, (f64, f64, f64, f64), (f64, f64), u8); 8] = [
    ("india", "India", (6.0, 37.0, 68.0, 97.0), (23.5937, 78.9629), 5),
    ("china", "China", (18.0, 54.0, 73.0, 135.0), (35.8617, 104.1954), 4),
    ("usa", "United States", (25.0, 50.0, -125.0, -65.0), (39.8283, -98.5795), 4),
    ("germany", "Germany", (47.0, 55.0, 6.0, 15.0), (51.1657, 10.4515), 6),
    ("france", "France", (41.0, 51.0, -5.0, 10.0), (46.2276, 2.2137), 6),
    ("uk", "United Kingdom", (50.0, 59.0, -8.0, 2.0), (55.3781, -3.4360), 6),
    ("japan", "Japan", (30.0, 46.0, 129.0, 146.0), (36.2048, 138.2529), 5),
    ("australia", "Australia", (-44.0, -10.0, 113.0, 154.0), (-25.2744, 133.7751), 4),
];

/// Inclusive latitude/longitude rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    /// Southern edge in degrees.
    pub lat_min: f64,
    /// Northern edge in degrees.
    pub lat_max: f64,
    /// Western edge in degrees.
    pub lng_min: f64,
    /// Eastern edge in degrees.
    pub lng_max: f64,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(lat_min: f64, lat_max: f64, lng_min: f64, lng_max: f64) -> Self {
        Self {
            lat_min,
            lat_max,
            lng_min,
            lng_max,
        }
    }

    /// Returns true if the point lies inside or on the edge of the box.
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        latitude >= self.lat_min
            && latitude <= self.lat_max
            && longitude >= self.lng_min
            && longitude <= self.lng_max
    }

    /// Returns true if the point lies inside or on the edge of the box.
    pub fn contains_point(&self, point: &GeoPoint) -> bool {
        self.contains(point.latitude, point.longitude)
    }
}

/// A named region with its bounding box and map hints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    /// Lookup key (e.g. `india`).
    pub key: String,
    /// Display name (e.g. `India`).
    pub name: String,
    /// Area whose flights belong to this region.
    pub bounds: BoundingBox,
    /// Map center.
    pub center: GeoPoint,
    /// Default map zoom level.
    pub zoom: u8,
}

impl Region {
    /// Create a new region.
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        bounds: BoundingBox,
        center: GeoPoint,
        zoom: u8,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            bounds,
            center,
            zoom,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.key)
    }
}

/// Read-only lookup of regions by key.
#[derive(Debug, Clone)]
pub struct RegionTable {
    regions: Vec<Region>,
}

impl Default for RegionTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RegionTable {
    /// The eight built-in regions.
    pub fn builtin() -> Self {
        let regions = BUILTIN_REGIONS
            .iter()
            .map(|&(key, name, (lat_min, lat_max, lng_min, lng_max), (lat, lng), zoom)| {
                Region::new(
                    key,
                    name,
                    BoundingBox::new(lat_min, lat_max, lng_min, lng_max),
                    GeoPoint::new(lat, lng),
                    zoom,
                )
            })
            .collect();
        Self { regions }
    }

    /// Build a table from arbitrary regions.
    pub fn from_regions(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    /// Look up a region by key (case-insensitive).
    pub fn get(&self, key: &str) -> Option<&Region> {
        self.regions
            .iter()
            .find(|r| r.key.eq_ignore_ascii_case(key.trim()))
    }

    /// All regions, in table order.
    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    /// All region keys, in table order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().map(|r| r.key.as_str())
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns true if the table holds no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
