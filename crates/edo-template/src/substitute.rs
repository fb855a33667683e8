use indexmap::IndexMap;

/// Answers collected for a boilerplate, keyed by question name.
pub type Variables = IndexMap<String, String>;

/// Replaces `{{ key }}` placeholders with values from `vars`.
///
/// Keys are word characters with optional surrounding spaces. Unknown keys
/// are left as written, and `\{{ key }}` produces the literal `{{ key }}`.
#[must_use]
pub fn substitute(content: &str, vars: &Variables) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(start) = rest.find("{{") {
        let escaped = rest[..start].ends_with('\\');
        let prefix_end = if escaped { start - 1 } else { start };
        out.push_str(&rest[..prefix_end]);

        let after_open = &rest[start + 2..];
        match parse_placeholder(after_open) {
            Some((key, consumed)) => {
                let block = &rest[start..start + 2 + consumed];
                match vars.get(key) {
                    Some(value) if !escaped => out.push_str(value),
                    _ => out.push_str(block),
                }
                rest = &after_open[consumed..];
            }
            None => {
                if escaped {
                    out.push('\\');
                }
                out.push_str("{{");
                rest = after_open;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Parses ` *key *}}` and returns the key plus the number of bytes consumed.
fn parse_placeholder(input: &str) -> Option<(&str, usize)> {
    let key_start = input.len() - input.trim_start_matches(' ').len();
    let after_spaces = &input[key_start..];
    let key_len = after_spaces
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(after_spaces.len());
    if key_len == 0 {
        return None;
    }
    let key = &after_spaces[..key_len];

    let after_key = &after_spaces[key_len..];
    let trailing = after_key.len() - after_key.trim_start_matches(' ').len();
    if !after_key[trailing..].starts_with("}}") {
        return None;
    }

    Some((key, key_start + key_len + trailing + 2))
}
