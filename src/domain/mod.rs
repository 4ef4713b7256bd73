// Domain layer - Fleet telemetry models and aggregation rules
pub mod aggregation;
pub mod status;
pub mod telemetry;
pub mod vehicle;
pub mod view;
