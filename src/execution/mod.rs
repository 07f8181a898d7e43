pub mod archive;
pub mod exporter;
pub mod stats;
