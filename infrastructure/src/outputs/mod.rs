//! Result output sinks

pub mod csv_sink;
