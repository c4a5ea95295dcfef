pub mod constellation;
pub mod error;
pub mod feed;
pub mod satellites;
pub mod status;
pub mod telemetry;
