pub mod core;
pub mod errors;
pub mod report;
pub mod utils;
pub mod validate;
