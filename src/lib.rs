pub mod algorithm;
pub mod common;
pub mod config;
pub mod height_map;
pub mod map;
pub mod pool;
pub mod scenario;
pub mod solver;
pub mod stat;
