//! Categorical class tables (`gee:classes`) inside band summaries.
//!
//! ```json
//! "summaries": {
//!   "eo:bands": [{
//!     "name": "water",
//!     "gee:classes": [
//!       {"value": 1, "color": "FAFAFA", "description": "Land"},
//!       {"value": 2, "color": "00C5FF", "description": "Water"}
//!     ]
//!   }]
//! }
//! ```

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

use crate::checker::core::{Check, Issue, Node};
use crate::checker::exceptions::ClassExceptions;
use crate::checker::utils::{as_integer, char_len, describe_value, has_duplicates, unexpected_keys};

pub const SUMMARIES: &str = "summaries";
pub const EO_BANDS: &str = "eo:bands";
pub const CLASSES: &str = "gee:classes";

const VALUE: &str = "value";
const DESCRIPTION: &str = "description";
const COLOR: &str = "color";

const REQUIRED: &[&str] = &[DESCRIPTION, VALUE];
const FIELDS: &[&str] = &[COLOR, DESCRIPTION, VALUE];

const MIN_CLASSES: usize = 2;
const MAX_CLASSES: usize = 255;
const MAX_DESCRIPTION_LEN: usize = 1000;

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{6}([0-9a-fA-F]{2})?$").expect("hex color pattern is valid")
});

#[derive(Debug, Clone, Copy, Default)]
pub struct CategoricalClassCheck {
    exceptions: ClassExceptions,
}

/// Values gathered across one table for the uniqueness and ordering rules.
#[derive(Default)]
struct Collected<'n> {
    values: Vec<i128>,
    descriptions: Vec<&'n str>,
    colors: Vec<&'n str>,
}

impl CategoricalClassCheck {
    pub fn new(exceptions: ClassExceptions) -> Self {
        Self { exceptions }
    }

    fn is_color(&self, color: &str) -> bool {
        HEX_COLOR.is_match(color) || self.exceptions.color_names.contains(&color)
    }

    fn check_table<'a>(&self, node: &'a Node, classes: &'a Value, issues: &mut Vec<Issue<'a>>) {
        let Some(classes) = classes.as_array() else {
            issues.push(self.new_issue(node, format!("\"{CLASSES}\" must be a list")));
            return;
        };

        if classes.len() < MIN_CLASSES {
            if !self.exceptions.one_class.contains(&node.id.as_str()) {
                issues.push(self.new_issue(
                    node,
                    format!("\"{CLASSES}\" must have at least {MIN_CLASSES} classes"),
                ));
            }
            if classes.is_empty() {
                return;
            }
        }

        if classes.len() > MAX_CLASSES
            && !self
                .exceptions
                .large_tables
                .iter()
                .any(|marker| node.id.contains(marker))
        {
            issues.push(self.new_issue(
                node,
                format!("\"{CLASSES}\" has too many classes: {}", classes.len()),
            ));
        }

        let mut collected = Collected::default();
        for entry in classes {
            let Some(entry) = entry.as_object() else {
                issues.push(self.new_issue(node, format!("\"{CLASSES}\" item must be a dict")));
                continue;
            };
            self.check_entry(node, entry, &mut collected, issues);
        }

        if has_duplicates(&collected.values) {
            issues.push(self.new_issue(node, format!("{VALUE}s have duplicates")));
        }
        if !collected.values.is_sorted() {
            issues.push(self.new_issue(node, format!("{VALUE}s must be sorted")));
        }
        if has_duplicates(&collected.descriptions)
            && !self
                .exceptions
                .duplicate_descriptions
                .contains(&node.id.as_str())
        {
            issues.push(self.new_issue(node, format!("{DESCRIPTION}s have duplicates")));
        }
        if has_duplicates(&collected.colors)
            && !self.exceptions.duplicate_colors.contains(&node.id.as_str())
        {
            issues.push(self.new_issue(node, format!("{COLOR}s have duplicates")));
        }
    }

    fn check_entry<'a>(
        &self,
        node: &'a Node,
        entry: &'a Map<String, Value>,
        collected: &mut Collected<'a>,
        issues: &mut Vec<Issue<'a>>,
    ) {
        let mut missing: Vec<&str> = REQUIRED
            .iter()
            .copied()
            .filter(|key| !entry.contains_key(*key))
            .collect();
        if !missing.is_empty() {
            missing.sort_unstable();
            issues.push(self.new_issue(node, format!("A {CLASSES} entry missing {missing:?}")));
        }

        if let Some(message) = unexpected_keys(entry, FIELDS) {
            issues.push(self.new_issue(node, message));
        }

        if let Some(value) = entry.get(VALUE) {
            match as_integer(value) {
                Some(value) => collected.values.push(value),
                None => issues.push(self.new_issue(
                    node,
                    format!("{VALUE} must be a number: \"{}\"", describe_value(value)),
                )),
            }
        }

        if let Some(description) = entry.get(DESCRIPTION) {
            match description.as_str() {
                None => issues.push(self.new_issue(
                    node,
                    format!("{DESCRIPTION} must be a str: {description}"),
                )),
                Some(text) => {
                    collected.descriptions.push(text);
                    let len = char_len(text);
                    if len < 1 {
                        issues.push(self.new_issue(node, format!("Invalid {DESCRIPTION}: \"{text}\"")));
                    } else if len > MAX_DESCRIPTION_LEN {
                        issues.push(self.new_issue(node, format!("{DESCRIPTION} too long: {len}")));
                    }
                }
            }
        }

        if let Some(color) = entry.get(COLOR) {
            match color.as_str() {
                None => issues.push(self.new_issue(node, format!("{COLOR} must be a str: {color}"))),
                Some(text) => {
                    collected.colors.push(text);
                    if !self.is_color(text) {
                        issues.push(self.new_issue(
                            node,
                            format!(
                                "{COLOR} must be a 6 (or 8) character hex or color name - found \"{text}\""
                            ),
                        ));
                    }
                }
            }
        }
    }
}

impl Check for CategoricalClassCheck {
    fn name(&self) -> &'static str {
        "gee_classes"
    }

    fn run<'a>(&self, node: &'a Node) -> Vec<Issue<'a>> {
        let mut issues = Vec::new();
        let Some(bands) = node
            .payload
            .get(SUMMARIES)
            .and_then(Value::as_object)
            .and_then(|summaries| summaries.get(EO_BANDS))
            .and_then(Value::as_array)
        else {
            return issues;
        };

        for band in bands.iter().filter_map(Value::as_object) {
            if let Some(classes) = band.get(CLASSES) {
                self.check_table(node, classes, &mut issues);
            }
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::core::NodeKind;
    use serde_json::json;

    const ID: &str = "a/collection";

    fn node_with(id: &str, classes: Value) -> Node {
        let payload = json!({
            "summaries": {
                "eo:bands": [{
                    "name": "band_name",
                    "description": "a descr",
                    "gee:classes": classes,
                }]
            }
        });
        Node::new(
            id,
            "test/path/should/be/ignored",
            NodeKind::Collection,
            payload.as_object().cloned().unwrap_or_default(),
        )
    }

    fn messages_for(node: &Node) -> Vec<String> {
        CategoricalClassCheck::default()
            .run(node)
            .into_iter()
            .map(|issue| issue.message)
            .collect()
    }

    fn messages(classes: Value) -> Vec<String> {
        messages_for(&node_with(ID, classes))
    }

    #[test]
    fn valid_tables() {
        assert!(messages(json!([
            {"color": "FAFAFA", "description": "A", "value": 1},
            {"color": "violet", "description": "B", "value": 2},
        ]))
        .is_empty());
        assert!(messages(json!([
            {"color": "AABBCCDD", "description": "A", "value": -1},
            {"color": "white", "description": "B", "value": 0},
        ]))
        .is_empty());
    }

    #[test]
    fn absent_or_mistyped_containers_are_ignored() {
        let check = CategoricalClassCheck::default();
        for payload in [
            json!({}),
            json!({"summaries": []}),
            json!({"summaries": {"eo:bands": "nope"}}),
            json!({"summaries": {"eo:bands": ["nope", {"name": "b1"}]}}),
        ] {
            let node = Node::new(
                ID,
                "a/a_collection.json",
                NodeKind::Collection,
                payload.as_object().cloned().unwrap_or_default(),
            );
            assert!(check.run(&node).is_empty());
        }
    }

    #[test]
    fn classes_must_be_a_list() {
        assert_eq!(
            messages(json!("not a list")),
            vec![r#""gee:classes" must be a list"#]
        );
    }

    #[test]
    fn only_one_class() {
        assert_eq!(
            messages(json!([{"color": "red", "description": "A", "value": 1}])),
            vec![r#""gee:classes" must have at least 2 classes"#]
        );
    }

    #[test]
    fn one_class_exception() {
        let node = node_with(
            "LANDSAT/MANGROVE_FORESTS",
            json!([{"color": "red", "description": "A", "value": 1}]),
        );
        assert!(messages_for(&node).is_empty());

        let empty = node_with("LANDSAT/MANGROVE_FORESTS", json!([]));
        assert!(messages_for(&empty).is_empty());
    }

    #[test]
    fn empty_table_stops_after_count() {
        assert_eq!(
            messages(json!([])),
            vec![r#""gee:classes" must have at least 2 classes"#]
        );
    }

    fn large_table() -> Value {
        let classes: Vec<Value> = (0..256)
            .map(|x| json!({"color": format!("{x:02x}0001"), "description": x.to_string(), "value": x}))
            .collect();
        Value::Array(classes)
    }

    #[test]
    fn too_many_classes() {
        assert_eq!(
            messages(large_table()),
            vec![r#""gee:classes" has too many classes: 256"#]
        );
    }

    #[test]
    fn large_table_exception_matches_fragment() {
        let node = node_with("LANDFIRE/Vegetation/EVT/v9", large_table());
        assert!(messages_for(&node).is_empty());
    }

    #[test]
    fn item_must_be_a_dict() {
        assert_eq!(
            messages(json!([
                "not a dict",
                {"color": "violet", "description": "B", "value": 2},
            ])),
            vec![r#""gee:classes" item must be a dict"#]
        );
    }

    #[test]
    fn missing_required_keys() {
        assert_eq!(
            messages(json!([
                {"color": "red"},
                {"color": "blue", "description": "B", "value": 2},
            ])),
            vec![r#"A gee:classes entry missing ["description", "value"]"#]
        );
    }

    #[test]
    fn extra_keys() {
        assert_eq!(
            messages(json!([
                {"color": "red", "description": "A", "value": 1, "bad": 3},
                {"color": "blue", "description": "B", "value": 2},
            ])),
            vec![r#"Unexpected key: "bad""#]
        );
        assert_eq!(
            messages(json!([
                {"color": "red", "description": "A", "value": 1, "bad2": 3, "bad1": 4},
                {"color": "blue", "description": "B", "value": 2},
            ])),
            vec![r#"Unexpected keys: ["bad1", "bad2"]"#]
        );
    }

    #[test]
    fn value_must_be_an_integer() {
        assert_eq!(
            messages(json!([
                {"color": "red", "description": "A", "value": 1},
                {"color": "blue", "description": "B", "value": "a str"},
            ])),
            vec![r#"value must be a number: "a str""#]
        );
        assert_eq!(
            messages(json!([
                {"color": "red", "description": "A", "value": 1},
                {"color": "blue", "description": "B", "value": 3.14},
            ])),
            vec![r#"value must be a number: "3.14""#]
        );
    }

    #[test]
    fn description_rules() {
        assert_eq!(
            messages(json!([
                {"color": "red", "description": 3, "value": 1},
                {"color": "blue", "description": "B", "value": 2},
            ])),
            vec!["description must be a str: 3"]
        );
        assert_eq!(
            messages(json!([
                {"color": "red", "description": "", "value": 1},
                {"color": "blue", "description": "B", "value": 2},
            ])),
            vec![r#"Invalid description: """#]
        );
        assert_eq!(
            messages(json!([
                {"color": "red", "description": "A".repeat(1001), "value": 1},
                {"color": "blue", "description": "B", "value": 2},
            ])),
            vec!["description too long: 1001"]
        );
    }

    #[test]
    fn description_length_limit_is_inclusive() {
        assert!(
            messages(json!([
                {"color": "red", "description": "A".repeat(1000), "value": 1},
                {"color": "blue", "description": "B", "value": 2},
            ]))
            .is_empty()
        );
    }

    #[test]
    fn color_rules() {
        assert_eq!(
            messages(json!([
                {"color": 1, "description": "A", "value": 1},
                {"color": "blue", "description": "B", "value": 2},
            ])),
            vec!["color must be a str: 1"]
        );
        assert_eq!(
            messages(json!([
                {"color": "GGGGGG", "description": "A", "value": 1},
                {"color": "blue", "description": "B", "value": 2},
            ])),
            vec![r#"color must be a 6 (or 8) character hex or color name - found "GGGGGG""#]
        );
        assert_eq!(
            messages(json!([
                {"color": "abc", "description": "A", "value": 1},
                {"color": "aabbccd", "description": "B", "value": 2},
            ]))
            .len(),
            2
        );
    }

    #[test]
    fn duplicate_values() {
        assert_eq!(
            messages(json!([
                {"color": "red", "description": "A", "value": 3},
                {"color": "blue", "description": "B", "value": 3},
            ])),
            vec!["values have duplicates"]
        );
    }

    #[test]
    fn unsorted_values() {
        assert_eq!(
            messages(json!([
                {"color": "red", "description": "A", "value": 5},
                {"color": "blue", "description": "B", "value": 4},
            ])),
            vec!["values must be sorted"]
        );
    }

    #[test]
    fn duplicate_descriptions() {
        let classes = json!([
            {"color": "red", "description": "C", "value": 1},
            {"color": "blue", "description": "C", "value": 2},
        ]);
        assert_eq!(
            messages(classes.clone()),
            vec!["descriptions have duplicates"]
        );
        assert!(messages_for(&node_with("USDA/NASS/CDL", classes)).is_empty());
    }

    #[test]
    fn duplicate_colors() {
        let classes = json!([
            {"color": "green", "description": "D", "value": 1},
            {"color": "green", "description": "E", "value": 2},
        ]);
        assert_eq!(messages(classes.clone()), vec!["colors have duplicates"]);
        assert!(messages_for(&node_with("AAFC/ACI", classes)).is_empty());
    }

    #[test]
    fn every_band_is_checked() {
        let payload = json!({
            "summaries": {
                "eo:bands": [
                    {"name": "b1", "gee:classes": "oops"},
                    {"name": "b2"},
                    {"name": "b3", "gee:classes": [{"description": "A", "value": 1}]},
                ]
            }
        });
        let node = Node::new(
            ID,
            "a/a_collection.json",
            NodeKind::Collection,
            payload.as_object().cloned().unwrap_or_default(),
        );
        assert_eq!(
            messages_for(&node),
            vec![
                r#""gee:classes" must be a list"#,
                r#""gee:classes" must have at least 2 classes"#,
            ]
        );
    }
}
