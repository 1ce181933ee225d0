//! Built-in node checks.

pub mod classes;
pub mod file_path;
pub mod interval;

pub use classes::CategoricalClassCheck;
pub use file_path::{FilePathCheck, PathDeriver};
pub use interval::IntervalCheck;

use crate::checker::core::Check;

/// Every built-in check with its default exception tables.
pub fn builtin() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(FilePathCheck::default()),
        Box::new(CategoricalClassCheck::default()),
        Box::new(IntervalCheck::default()),
    ]
}
