// Service exports
pub mod seed;

pub use seed::{MockDataGenerator, SeedCounts, SeedData, SeedError};
