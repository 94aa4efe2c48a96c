//! Change summaries for audit entries
//!
//! Walks two JSON snapshots of the same record and lists the fields that
//! differ. Nested objects and equal-length arrays are followed so that a
//! settlement flip reads as `participants[1].is_settled: false -> true`.

use serde_json::Value;

/// Longest string value shown before truncation
const MAX_SHOWN_CHARS: usize = 40;

/// Summarize the differences between two snapshots, `None` when identical
pub fn describe_changes(before: &Value, after: &Value) -> Option<String> {
    let mut changes = Vec::new();
    collect_changes(before, after, "", &mut changes);

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn collect_changes(before: &Value, after: &Value, path: &str, out: &mut Vec<String>) {
    if before == after {
        return;
    }

    match (before, after) {
        (Value::Object(old), Value::Object(new)) => {
            for (key, old_val) in old {
                let field = join_path(path, key);
                match new.get(key) {
                    Some(new_val) => collect_changes(old_val, new_val, &field, out),
                    None => out.push(format!("{}: {} -> (removed)", field, render(old_val))),
                }
            }
            for (key, new_val) in new {
                if !old.contains_key(key) {
                    out.push(format!(
                        "{}: (added) -> {}",
                        join_path(path, key),
                        render(new_val)
                    ));
                }
            }
        }
        (Value::Array(old), Value::Array(new)) if old.len() == new.len() => {
            for (i, (old_item, new_item)) in old.iter().zip(new).enumerate() {
                collect_changes(old_item, new_item, &format!("{}[{}]", path, i), out);
            }
        }
        _ => out.push(format!("{}: {} -> {}", path, render(before), render(after))),
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) if s.chars().count() > MAX_SHOWN_CHARS => {
            let head: String = s.chars().take(MAX_SHOWN_CHARS - 3).collect();
            format!("\"{}...\"", head)
        }
        Value::Array(items) => format!("[{} items]", items.len()),
        Value::Object(fields) => format!("{{{} fields}}", fields.len()),
        other => other.to_string(),
    }
}
