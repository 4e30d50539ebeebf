pub mod aggregate_result;
pub mod hardware;
pub mod output_format;
pub mod params;
pub mod report;
pub mod results;
pub mod worker_result;
