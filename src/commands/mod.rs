pub mod config;
pub mod convert;
pub mod generate;
pub mod read;
