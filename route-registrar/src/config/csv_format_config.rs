use serde::{Deserialize, Serialize};

/// describes which CSV columns hold route coordinates. either encoding may
/// be configured; the one satisfied by the CSV header is used, with the
/// combined encoding tested first.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct CsvFormatConfig {
    pub combined_coordinates: Option<CombinedCoordinateColumns>,
    pub separate_coordinates: Option<SeparateCoordinateColumns>,
    /// optional column with a human-readable segment name, used to derive
    /// route identifiers.
    pub segment_name_column: Option<String>,
}

/// two columns, each holding a "(lat, lon)" pair.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CombinedCoordinateColumns {
    pub origin_coord_column: String,
    pub destination_coord_column: String,
}

/// four columns, one per coordinate value.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SeparateCoordinateColumns {
    pub origin_lat_column: String,
    pub origin_lon_column: String,
    pub destination_lat_column: String,
    pub destination_lon_column: String,
}

impl CombinedCoordinateColumns {
    pub fn columns(&self) -> [&str; 2] {
        [&self.origin_coord_column, &self.destination_coord_column]
    }
}

impl SeparateCoordinateColumns {
    pub fn columns(&self) -> [&str; 4] {
        [
            &self.origin_lat_column,
            &self.origin_lon_column,
            &self.destination_lat_column,
            &self.destination_lon_column,
        ]
    }
}
