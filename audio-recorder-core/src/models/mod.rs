pub mod config;
pub mod device;
pub mod error;
pub mod noise_floor;
pub mod reports;
pub mod state;
