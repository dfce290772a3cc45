// Domain layer - Core business logic

pub mod config;
pub mod model;
pub mod postprocess;
pub mod tracker;
