//! Single-player grid snake: the tick-driven game loop, its driver, and the
//! storage and configuration pieces a host needs to run it.

pub mod config;
pub mod games;
pub mod logger;
pub mod storage;
