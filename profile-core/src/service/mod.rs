pub mod errors;
pub mod pipeline;
pub mod profile_builder;

pub use errors::ServiceError;
pub use pipeline::{PipelineOutput, ProfilePipeline};
pub use profile_builder::{DegradedMetric, Metric, ProfileBuilder, ProfileReport, ScanOptions};
