// Application layer - Use cases over the planner statistics API
pub mod charts;
pub mod efficiency_service;
pub mod error;
pub mod home;
pub mod low_soc_service;
pub mod soc_service;
pub mod telemetry_repository;
pub mod vehicle_service;

#[cfg(test)]
pub mod fake_repository;
