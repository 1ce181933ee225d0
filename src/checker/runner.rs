use rayon::prelude::*;

use crate::checker::checks;
use crate::checker::core::{Check, Issue, Node};
use crate::checker::errors::{Error, Result};

/// Ordered set of checks applied to every node.
pub struct CheckRunner {
    checks: Vec<Box<dyn Check>>,
}

impl Default for CheckRunner {
    fn default() -> Self {
        Self::new(checks::builtin())
    }
}

impl CheckRunner {
    pub fn new(checks: Vec<Box<dyn Check>>) -> Self {
        Self { checks }
    }

    /// Built-in checks restricted to `names`, in registry order.
    ///
    /// An empty selection keeps every check.
    pub fn select<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let runner = Self::default();
        if names.is_empty() {
            return Ok(runner);
        }
        let known = runner.names();
        if let Some(unknown) = names
            .iter()
            .map(|name| name.as_ref())
            .find(|name| !known.iter().any(|known| known == name))
        {
            return Err(Error::UnknownCheck(unknown.to_string()));
        }
        let checks = runner
            .checks
            .into_iter()
            .filter(|check| names.iter().any(|name| name.as_ref() == check.name()))
            .collect();
        Ok(Self::new(checks))
    }

    pub fn register(&mut self, check: Box<dyn Check>) {
        self.checks.push(check);
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|check| check.name()).collect()
    }

    pub fn run<'a>(&self, node: &'a Node) -> Vec<Issue<'a>> {
        let mut issues = Vec::new();
        for check in &self.checks {
            let found = check.run(node);
            tracing::trace!(
                check = check.name(),
                id = %node.id,
                issues = found.len(),
                "check finished"
            );
            issues.extend(found);
        }
        issues
    }

    /// Validates nodes in parallel; issues keep the order of `nodes`.
    pub fn run_all<'a>(&self, nodes: &'a [Node]) -> Vec<Issue<'a>> {
        let issues: Vec<Issue<'a>> = nodes
            .par_iter()
            .flat_map_iter(|node| self.run(node))
            .collect();
        tracing::info!(
            nodes = nodes.len(),
            checks = self.checks.len(),
            issues = issues.len(),
            "validation pass complete"
        );
        issues
    }
}
