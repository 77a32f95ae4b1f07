pub mod config;
pub mod export;
pub mod heat;
pub mod network;
pub mod pipeline;
pub mod stats;
pub mod util;
