use serde::{Deserialize, Serialize};

/// Latitude/longitude pair captured when a submission is filed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Build a point, rejecting coordinates outside the valid ranges.
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        let valid = lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng);

        valid.then_some(Self { lat, lng })
    }

    /// Five decimals, as shown on the submission form
    pub fn display(&self) -> String {
        format!("{:.5}, {:.5}", self.lat, self.lng)
    }

    pub fn maps_url(&self) -> String {
        format!("https://www.google.com/maps?q={},{}", self.lat, self.lng)
    }
}
