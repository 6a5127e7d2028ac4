//! Application module containing the demo flight loop.

mod demo;

pub use demo::run_demo;
