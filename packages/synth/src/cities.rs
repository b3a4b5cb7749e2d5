//! Cities sampled on the globe overlay.

/// A sampled city centroid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct City {
    /// Display name, also used as the aggregation key.
    pub name: &'static str,
    /// Latitude (WGS84).
    pub lat: f64,
    /// Longitude (WGS84).
    pub lon: f64,
}

/// The fixed city table, in overlay order.
pub const CITIES: &[City] = &[
    City { name: "New York", lat: 40.7128, lon: -74.006 },
    City { name: "London", lat: 51.5074, lon: -0.1278 },
    City { name: "Tokyo", lat: 35.6762, lon: 139.6503 },
    City { name: "Mexico", lat: 19.4326, lon: -99.1332 },
    City { name: "Delhi", lat: 28.6139, lon: 77.209 },
    City { name: "São Paulo", lat: -23.5505, lon: -46.6333 },
    City { name: "Shanghai", lat: 31.2304, lon: 121.4737 },
    City { name: "Los Angeles", lat: 34.0522, lon: -118.2437 },
    City { name: "Vancouver", lat: 49.2827, lon: -123.1207 },
    City { name: "Ottawa", lat: 45.4215, lon: -75.6972 },
    City { name: "Montreal", lat: 45.5017, lon: -73.5673 },
];
