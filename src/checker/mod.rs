pub mod checks;
pub mod core;
pub mod errors;
pub mod exceptions;
pub mod runner;
pub mod utils;
pub mod validate;
