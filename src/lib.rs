pub mod checker;

pub use checker::core::{Check, Issue, IssueRecord, Node, NodeKind};
pub use checker::errors::{Error, Result};
pub use checker::runner::CheckRunner;
