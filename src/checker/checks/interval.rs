//! The optional `gee:interval` record of a collection.
//!
//! ```json
//! "gee:interval": {"type": "cadence", "unit": "year", "interval": 1}
//! ```

use serde_json::Value;

use crate::checker::core::{Check, Issue, Node};
use crate::checker::exceptions::IntervalExceptions;
use crate::checker::utils::{as_integer, char_len, describe_value, unexpected_keys};

pub const GEE_INTERVAL: &str = "gee:interval";
pub const CUSTOM_TIME_UNIT: &str = "custom_time_unit";

const DESCRIPTION: &str = "description";
const INTERVAL: &str = "interval";
const NAME: &str = "name";
const TYPE: &str = "type";
const UNIT: &str = "unit";

const FIELDS: &[&str] = &[DESCRIPTION, INTERVAL, NAME, TYPE, UNIT];
pub const TYPES: &[&str] = &["cadence", "climatological_interval", "revisit_interval"];
pub const UNITS: &[&str] = &[CUSTOM_TIME_UNIT, "day", "hour", "minute", "month", "year"];

const MAX_INTERVAL: i128 = 32;

#[derive(Debug, Clone, Copy, Default)]
pub struct IntervalCheck {
    exceptions: IntervalExceptions,
}

impl IntervalCheck {
    pub fn new(exceptions: IntervalExceptions) -> Self {
        Self { exceptions }
    }

    fn check_text<'a>(
        &self,
        node: &'a Node,
        field: &str,
        value: &Value,
        bounds: (usize, usize),
        issues: &mut Vec<Issue<'a>>,
    ) {
        let Some(text) = value.as_str() else {
            issues.push(self.new_issue(node, format!("{field} must be a str")));
            return;
        };
        let (min, max) = bounds;
        let len = char_len(text);
        if len < min {
            issues.push(self.new_issue(node, format!("{field} too short")));
        }
        if len > max {
            issues.push(self.new_issue(node, format!("{field} too long: {len}")));
        }
    }
}

impl Check for IntervalCheck {
    fn name(&self) -> &'static str {
        GEE_INTERVAL
    }

    fn run<'a>(&self, node: &'a Node) -> Vec<Issue<'a>> {
        let Some(interval) = node.payload.get(GEE_INTERVAL) else {
            return Vec::new();
        };

        if node.is_catalog() {
            return vec![self.new_issue(node, format!("Catalogs cannot have \"{GEE_INTERVAL}\""))];
        }

        let Some(record) = interval.as_object() else {
            return vec![self.new_issue(node, format!("{GEE_INTERVAL} must be a dict"))];
        };

        let mut issues = Vec::new();
        if let Some(message) = unexpected_keys(record, FIELDS) {
            issues.push(self.new_issue(node, message));
        }

        match record.get(TYPE) {
            None => issues.push(self.new_issue(node, format!("Missing {TYPE}"))),
            Some(kind) if !kind.as_str().is_some_and(|kind| TYPES.contains(&kind)) => issues.push(
                self.new_issue(node, format!("Unknown {TYPE}: {}", describe_value(kind))),
            ),
            Some(_) => {}
        }

        match record.get(UNIT) {
            None => issues.push(self.new_issue(node, format!("Missing {UNIT}"))),
            Some(unit) => {
                let name = unit.as_str();
                if !name.is_some_and(|name| UNITS.contains(&name)) {
                    issues.push(
                        self.new_issue(node, format!("Unknown {UNIT}: {}", describe_value(unit))),
                    );
                }
                if name == Some(CUSTOM_TIME_UNIT) {
                    for required in [DESCRIPTION, NAME] {
                        if !record.contains_key(required) {
                            issues.push(self.new_issue(
                                node,
                                format!(
                                    "Having {UNIT} of {CUSTOM_TIME_UNIT} must have a {required}"
                                ),
                            ));
                        }
                    }
                }
            }
        }

        match record.get(INTERVAL) {
            None => issues.push(self.new_issue(node, format!("Missing {INTERVAL}"))),
            Some(value) => match as_integer(value) {
                None => issues.push(self.new_issue(node, format!("{INTERVAL} must be a number"))),
                Some(count) if count <= 0 => issues.push(
                    self.new_issue(node, format!("{INTERVAL} must be a positive number")),
                ),
                Some(count)
                    if count > MAX_INTERVAL
                        && !self.exceptions.long_intervals.contains(&node.id.as_str()) =>
                {
                    issues.push(self.new_issue(node, format!("{INTERVAL} too large: {count}")))
                }
                Some(_) => {}
            },
        }

        if let Some(description) = record.get(DESCRIPTION) {
            self.check_text(node, DESCRIPTION, description, (10, 200), &mut issues);
        }
        if let Some(name) = record.get(NAME) {
            self.check_text(node, NAME, name, (2, 200), &mut issues);
        }

        issues
    }
}
