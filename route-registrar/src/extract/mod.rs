mod coordinate_encoding;
mod coordinate_record;
mod extractor;
mod row_error;

pub use coordinate_encoding::{ColumnRef, CoordinateEncoding};
pub use coordinate_record::{CoordinateRecord, LatLon};
pub use extractor::{extract_coordinates, CoordinateExtraction, SkippedRow};
pub use row_error::RowParseError;
