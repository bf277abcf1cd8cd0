// Shared prompt constants and prompt-building utilities.
// Each feature that needs LLM calls defines its own prompts.rs alongside it.
// This file contains the cross-cutting pieces.

/// Prompt used by the connection test. Any non-error reply counts as success.
pub const CONNECTION_TEST_PROMPT: &str = "Say hello in a friendly, professional way.";

/// Fills `{name}` placeholders in a single left-to-right pass.
///
/// Substituted values are never rescanned, so user text that happens to
/// contain `{position}` stays literal. Unknown placeholders are left as-is.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
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

/// Returns `value` unless it is absent or blank, in which case `placeholder`.
pub fn or_placeholder<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => placeholder,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_template_replaces_every_occurrence() {
        let filled = fill_template("{name} applies. Signed, {name}.", &[("name", "Ada")]);
        assert_eq!(filled, "Ada applies. Signed, Ada.");
    }

    #[test]
    fn test_fill_template_does_not_rescan_values() {
        let filled = fill_template(
            "Role: {position}; Company: {company}",
            &[("position", "{company}"), ("company", "Acme")],
        );
        assert_eq!(filled, "Role: {company}; Company: Acme");
    }

    #[test]
    fn test_fill_template_keeps_unknown_and_unclosed_braces() {
        assert_eq!(fill_template("{unknown} {", &[]), "{unknown} {");
        assert_eq!(fill_template("a { b {x}", &[("x", "1")]), "a { b 1");
    }

    #[test]
    fn test_or_placeholder_treats_blank_as_absent() {
        assert_eq!(or_placeholder(None, "Hiring Manager"), "Hiring Manager");
        assert_eq!(or_placeholder(Some("  "), "Hiring Manager"), "Hiring Manager");
        assert_eq!(or_placeholder(Some("Dana Lee"), "Hiring Manager"), "Dana Lee");
    }
}
