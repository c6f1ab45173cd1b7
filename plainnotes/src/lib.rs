pub mod config;
pub mod storage;
pub mod logging;
pub mod bin_constants;
mod lib_constants;
mod rng;
mod util;
