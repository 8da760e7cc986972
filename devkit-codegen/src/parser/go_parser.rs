//! Go struct extractor used by the reverse conversions

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

lazy_static! {
    static ref STRUCT_BLOCK: Regex =
        Regex::new(r"(?s)\btype\s+(\w+)\s+struct\s*\{((?:[^{}]|\{\s*\})*)\}").unwrap();
    static ref FIELD_LINE: Regex =
        Regex::new(r"^(\w+)\s+([^`]+?)\s*(?:`([^`]*)`)?\s*(?://.*)?$").unwrap();
    static ref TAG_PAIR: Regex = Regex::new(r#"(\w+):"([^"]*)""#).unwrap();
}

/// A Go `type Name struct { ... }` definition
#[derive(Debug, Clone, PartialEq)]
pub struct GoStruct {
    pub name: String,
    pub fields: Vec<GoField>,
}

/// One named field of a Go struct
#[derive(Debug, Clone, PartialEq)]
pub struct GoField {
    pub name: String,

    /// Type as written, e.g. "*int64", "[]string", "map[string]int32"
    pub go_type: String,

    /// Struct tag keys to values, e.g. "json" -> "id"
    pub tags: BTreeMap<String, String>,
}

impl GoField {
    /// Value of a `gorm:"..."` setting such as `column` or `type`
    pub fn gorm_setting(&self, key: &str) -> Option<&str> {
        self.tags.get("gorm")?.split(';').find_map(|part| {
            let (k, v) = part.split_once(':').unwrap_or((part, ""));
            k.trim().eq_ignore_ascii_case(key).then_some(v.trim())
        })
    }

    /// Whether a valueless gorm flag (`primaryKey`, `autoIncrement`, ...) is set
    pub fn has_gorm_flag(&self, flag: &str) -> bool {
        self.gorm_setting(flag).is_some()
    }

    /// Column name from the gorm, db or json tag, in that order
    pub fn tagged_column(&self) -> Option<&str> {
        self.gorm_setting("column")
            .or_else(|| self.tag_name("db"))
            .or_else(|| self.tag_name("json"))
            .filter(|name| !name.is_empty() && *name != "-")
    }

    fn tag_name(&self, key: &str) -> Option<&str> {
        self.tags
            .get(key)
            .and_then(|v| v.split(',').next())
            .map(str::trim)
    }
}

/// Extract every struct definition, in source order
pub fn parse_go_structs(code: &str) -> Vec<GoStruct> {
    STRUCT_BLOCK
        .captures_iter(code)
        .map(|caps| GoStruct {
            name: caps[1].to_string(),
            fields: parse_fields(&caps[2]),
        })
        .collect()
}

fn parse_fields(body: &str) -> Vec<GoField> {
    let mut fields = Vec::new();

    for line in body.lines().map(str::trim) {
        if line.is_empty() || line.starts_with("//") {
            continue;
        }
        let Some(caps) = FIELD_LINE.captures(line) else {
            debug!("Skipping unrecognized struct line: {}", line);
            continue;
        };

        let tags = caps
            .get(3)
            .map(|m| {
                TAG_PAIR
                    .captures_iter(m.as_str())
                    .map(|t| (t[1].to_string(), t[2].to_string()))
                    .collect()
            })
            .unwrap_or_default();

        fields.push(GoField {
            name: caps[1].to_string(),
            go_type: caps[2].split_whitespace().collect(),
            tags,
        });
    }

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_struct_with_tags() {
        let code = r#"
package main

type Users struct {
	// surrogate key
	Id int64 `json:"id" gorm:"column:id;primaryKey;autoIncrement;type:BIGINT"`
	Name *string `json:"name,omitempty"`
	Tags []string
	Meta map[string]int32 // free-form
	gorm.Model
}
"#;
        let structs = parse_go_structs(code);
        assert_eq!(structs.len(), 1);
        assert_eq!(structs[0].name, "Users");

        let fields = &structs[0].fields;
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Id", "Name", "Tags", "Meta"]);

        assert_eq!(fields[0].go_type, "int64");
        assert_eq!(fields[0].gorm_setting("type"), Some("BIGINT"));
        assert!(fields[0].has_gorm_flag("primaryKey"));
        assert!(!fields[0].has_gorm_flag("uniqueIndex"));
        assert_eq!(fields[0].tagged_column(), Some("id"));

        assert_eq!(fields[1].go_type, "*string");
        assert_eq!(fields[1].tagged_column(), Some("name"));
        assert_eq!(fields[3].go_type, "map[string]int32");
        assert_eq!(fields[3].tagged_column(), None);
    }

    #[test]
    fn test_multiple_structs() {
        let code = "type A struct { X int }\ntype B struct {\n Y string\n}";
        let structs = parse_go_structs(code);
        assert_eq!(structs.len(), 2);
        assert_eq!(structs[1].fields[0].name, "Y");
    }

    #[test]
    fn test_empty_interface_field_does_not_end_struct() {
        let code = "type Shape struct {\n\tArea interface{} `json:\"area\"`\n\tName string\n}";
        let structs = parse_go_structs(code);
        assert_eq!(structs.len(), 1);
        assert_eq!(structs[0].fields.len(), 2);
        assert_eq!(structs[0].fields[0].go_type, "interface{}");
        assert_eq!(structs[0].fields[1].name, "Name");
    }
}
