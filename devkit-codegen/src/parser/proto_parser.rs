//! Protocol Buffer `message` extractor
//!
//! Only flat messages are understood. Extraction never fails; an input with
//! no messages yields an empty list and the emitters decide whether that is
//! an error.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use super::metadata::{FieldDescriptor, MessageSchema};

lazy_static! {
    static ref MESSAGE_BLOCK: Regex = Regex::new(r"(?s)\bmessage\s+(\w+)\s*\{([^}]*)\}").unwrap();
    static ref LINE_SPLIT: Regex = Regex::new(r"[\r\n;]+").unwrap();
    static ref MAP_FIELD: Regex =
        Regex::new(r"^map\s*<\s*([\w.]+)\s*,\s*([\w.]+)\s*>\s*(\w+)\s*=\s*\d+").unwrap();
    static ref FIELD: Regex =
        Regex::new(r"^(?:(repeated|optional|required)\s+)?([\w.]+)\s+(\w+)\s*=\s*\d+").unwrap();
}

/// Extract every `message Name { ... }` block, in source order
pub fn parse_messages(proto: &str) -> Vec<MessageSchema> {
    let messages: Vec<MessageSchema> = MESSAGE_BLOCK
        .captures_iter(proto)
        .map(|caps| MessageSchema {
            name: caps[1].to_string(),
            fields: parse_fields(&caps[2]),
        })
        .collect();

    debug!("Parsed {} proto messages", messages.len());
    messages
}

fn parse_fields(body: &str) -> Vec<FieldDescriptor> {
    let mut fields = Vec::new();

    for line in LINE_SPLIT.split(body).map(str::trim) {
        if line.is_empty() || line.starts_with("//") || line.starts_with("reserved") {
            continue;
        }

        let code = match line.find("//") {
            Some(idx) => line[..idx].trim(),
            None => line,
        };
        if code.is_empty() {
            continue;
        }

        if let Some(caps) = MAP_FIELD.captures(code) {
            fields.push(FieldDescriptor::map(&caps[3], &caps[1], &caps[2]));
        } else if let Some(caps) = FIELD.captures(code) {
            let repeated = caps.get(1).is_some_and(|m| m.as_str() == "repeated");
            fields.push(FieldDescriptor::scalar(&caps[3], &caps[2], repeated));
        } else {
            debug!("Skipping unrecognized proto line: {}", code);
        }
    }

    fields
}
