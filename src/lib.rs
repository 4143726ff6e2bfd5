pub mod config;
pub mod constants;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod logging;
pub mod normalize;
pub mod output;
pub mod table;
pub mod types;
