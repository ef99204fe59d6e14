pub mod config;
pub mod logging;

pub mod fetch;
pub mod job;
pub mod manifest;
pub mod pool;
pub mod queue;
pub mod storage;
