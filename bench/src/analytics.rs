pub mod metrics;
pub mod report_builder;
