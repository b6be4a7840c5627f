// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Closing instruction appended to every prompt that expects a JSON reply.
pub const JSON_ONLY_INSTRUCTION: &str = "\
Please output only valid JSON. \
Do NOT wrap the JSON in markdown code fences. \
Do NOT include any text outside the JSON object.";

/// Fills `{name}` placeholders in a template in a single left-to-right pass.
/// Inserted values are never rescanned, so braces inside user text stay literal.
/// Unknown placeholders are left as-is.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let replacement = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value, close))
        });
        match replacement {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_replaces_every_occurrence() {
        let out = fill("{a} and {a} then {b}", &[("a", "x"), ("b", "y")]);
        assert_eq!(out, "x and x then y");
    }

    #[test]
    fn test_fill_leaves_unknown_placeholders() {
        assert_eq!(fill("{missing}", &[("a", "x")]), "{missing}");
    }

    #[test]
    fn test_fill_does_not_expand_inside_inserted_values() {
        let out = fill("{a} then {b}", &[("a", "literal {b} text"), ("b", "y")]);
        assert_eq!(out, "literal {b} text then y");
    }

    #[test]
    fn test_fill_keeps_json_braces_in_template() {
        let out = fill(r#"Reply as {"reply": "..."} for {name}"#, &[("name", "Jane")]);
        assert_eq!(out, r#"Reply as {"reply": "..."} for Jane"#);
    }
}
