mod geofence_source;
mod point_source;
mod result_sink;
mod scan_app;
mod scan_cli_error;

pub use geofence_source::read_geofence;
pub use point_source::{CsvPointSource, PointSource};
pub use result_sink::{build_sink, ConsoleSink, CsvSink, JsonSink, OutputFormat, ResultSink};
pub use scan_app::{ScanApp, ScanOperation};
pub use scan_cli_error::ScanCliError;
