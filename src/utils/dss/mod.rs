pub mod dss_pathname;
pub mod dss_reader;
