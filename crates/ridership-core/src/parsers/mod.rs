//! Parsers for ridership data files

pub mod dataset;

pub use dataset::DatasetParser;
