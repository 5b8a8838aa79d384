mod csv_format_config;
mod registrar_config;

pub use csv_format_config::{
    CombinedCoordinateColumns, CsvFormatConfig, SeparateCoordinateColumns,
};
pub use registrar_config::{load_config, RegistrarConfig};
