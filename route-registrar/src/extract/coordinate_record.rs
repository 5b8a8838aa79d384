use serde::Serialize;

/// a (latitude, longitude) pair in decimal degrees.
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct LatLon {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLon {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for LatLon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// one parsed CSV row, consumed once by the submission phase.
#[derive(Clone, Debug, PartialEq)]
pub struct CoordinateRecord {
    pub origin: LatLon,
    pub destination: LatLon,
    pub label: Option<String>,
}
