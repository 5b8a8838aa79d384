use std::collections::HashMap;
use std::sync::OnceLock;

use csv::StringRecord;
use regex::Regex;

use super::{LatLon, RowParseError};
use crate::config::{CombinedCoordinateColumns, CsvFormatConfig, SeparateCoordinateColumns};

/// the coordinate layout detected for a CSV file, holding the column
/// indices resolved from its header.
#[derive(Clone, Debug, PartialEq)]
pub enum CoordinateEncoding {
    /// each of two cells holds a "(lat, lon)" pair.
    Combined {
        origin: ColumnRef,
        destination: ColumnRef,
    },
    /// latitude and longitude in their own columns.
    Separate {
        origin_lat: ColumnRef,
        origin_lon: ColumnRef,
        destination_lat: ColumnRef,
        destination_lon: ColumnRef,
    },
}

/// a header name and its position in each record.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnRef {
    pub name: String,
    pub index: usize,
}

fn coordinate_pair_regex() -> &'static Regex {
    static COORDINATE_PAIR: OnceLock<Regex> = OnceLock::new();
    COORDINATE_PAIR.get_or_init(|| {
        Regex::new(r"\(\s*([-+]?\d+\.?\d*)\s*,\s*([-+]?\d+\.?\d*)\s*\)")
            .expect("internal error: coordinate pair pattern is invalid")
    })
}

impl CoordinateEncoding {
    /// picks the encoding satisfied by the header lookup. combined columns
    /// are tested first, so they win when both encodings are present.
    pub fn detect(format: &CsvFormatConfig, headers: &HashMap<String, usize>) -> Option<Self> {
        format
            .combined_coordinates
            .as_ref()
            .and_then(|c| Self::try_combined(c, headers))
            .or_else(|| {
                format
                    .separate_coordinates
                    .as_ref()
                    .and_then(|s| Self::try_separate(s, headers))
            })
    }

    fn try_combined(
        columns: &CombinedCoordinateColumns,
        headers: &HashMap<String, usize>,
    ) -> Option<Self> {
        Some(Self::Combined {
            origin: ColumnRef::find(&columns.origin_coord_column, headers)?,
            destination: ColumnRef::find(&columns.destination_coord_column, headers)?,
        })
    }

    fn try_separate(
        columns: &SeparateCoordinateColumns,
        headers: &HashMap<String, usize>,
    ) -> Option<Self> {
        Some(Self::Separate {
            origin_lat: ColumnRef::find(&columns.origin_lat_column, headers)?,
            origin_lon: ColumnRef::find(&columns.origin_lon_column, headers)?,
            destination_lat: ColumnRef::find(&columns.destination_lat_column, headers)?,
            destination_lon: ColumnRef::find(&columns.destination_lon_column, headers)?,
        })
    }

    /// reads the origin and destination of one record.
    pub fn read_coordinates(
        &self,
        record: &StringRecord,
    ) -> Result<(LatLon, LatLon), RowParseError> {
        match self {
            Self::Combined {
                origin,
                destination,
            } => {
                let origin = parse_coordinate_pair(origin, origin.get(record)?)?;
                let destination = parse_coordinate_pair(destination, destination.get(record)?)?;
                Ok((origin, destination))
            }
            Self::Separate {
                origin_lat,
                origin_lon,
                destination_lat,
                destination_lon,
            } => {
                let origin = LatLon::new(
                    parse_number(origin_lat, record)?,
                    parse_number(origin_lon, record)?,
                );
                let destination = LatLon::new(
                    parse_number(destination_lat, record)?,
                    parse_number(destination_lon, record)?,
                );
                Ok((origin, destination))
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Combined { .. } => "combined_coordinates",
            Self::Separate { .. } => "separate_coordinates",
        }
    }
}

impl ColumnRef {
    pub fn find(name: &str, headers: &HashMap<String, usize>) -> Option<Self> {
        headers.get(name).map(|index| Self {
            name: name.to_string(),
            index: *index,
        })
    }

    pub fn get<'a>(&self, record: &'a StringRecord) -> Result<&'a str, RowParseError> {
        record
            .get(self.index)
            .ok_or_else(|| RowParseError::MissingColumn(self.name.clone()))
    }
}

fn parse_coordinate_pair(column: &ColumnRef, value: &str) -> Result<LatLon, RowParseError> {
    let invalid = || RowParseError::InvalidCoordinatePair {
        column: column.name.clone(),
        value: value.to_string(),
    };
    let captures = coordinate_pair_regex().captures(value).ok_or_else(invalid)?;
    let lat = captures[1].parse::<f64>().map_err(|_| invalid())?;
    let lon = captures[2].parse::<f64>().map_err(|_| invalid())?;
    Ok(LatLon::new(lat, lon))
}

fn parse_number(column: &ColumnRef, record: &StringRecord) -> Result<f64, RowParseError> {
    let value = column.get(record)?;
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| RowParseError::InvalidNumber {
            column: column.name.clone(),
            value: value.to_string(),
        })
}
