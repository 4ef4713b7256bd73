// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod planner_stats_repository;
pub mod view_mapper;
pub mod wire;
