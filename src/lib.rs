pub mod audio;
pub mod compute;
pub mod config;
pub mod difficulty;
pub mod entities;
pub mod error;
pub mod menu;
pub mod records;
pub mod session;
