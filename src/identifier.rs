//! Identifier handling for dump statements.
//!
//! Names in source dumps arrive in every style: `"Former Employees"`,
//! `[dbo].[Price Data]`, `` `orders` ``, `Sales-2016`. These helpers split a
//! possibly qualified name into its parts and rewrite each part to the
//! lowercase/underscore convention.

use std::sync::LazyLock;

use regex::Regex;

/// Runs of whitespace or hyphens collapse to a single underscore.
static SEPARATOR_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\-]+").expect("Invalid separator regex"));

/// How a name is rewritten by [`standardize_name`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameStyle {
    /// Prefix prepended to the table part (`prefix_name`)
    pub prefix: Option<String>,
    /// Schema qualifier replacing or adding the schema part
    pub schema: Option<String>,
}

/// Strips brackets `[]`, double quotes `""` and backticks from an identifier part.
pub fn unquote(part: &str) -> &str {
    let trimmed = part.trim();
    for (open, close) in [('[', ']'), ('"', '"'), ('`', '`')] {
        if let Some(inner) = trimmed
            .strip_prefix(open)
            .and_then(|rest| rest.strip_suffix(close))
        {
            return inner;
        }
    }
    trimmed
}

/// Splits a qualified name on `.` separators that sit outside quoting.
///
/// `[my.schema]."a b"` splits into `["[my.schema]", "\"a b\""]`.
pub fn split_qualified(name: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut closer: Option<char> = None;
    let mut start = 0;
    for (idx, ch) in name.char_indices() {
        match closer {
            Some(c) if ch == c => closer = None,
            Some(_) => {}
            None => match ch {
                '[' => closer = Some(']'),
                '"' | '`' => closer = Some(ch),
                '.' => {
                    parts.push(&name[start..idx]);
                    start = idx + 1;
                }
                _ => {}
            },
        }
    }
    parts.push(&name[start..]);
    parts
}

/// Replaces whitespace (and hyphen) runs with a single underscore.
pub fn underscore_spaces(name: &str) -> String {
    SEPARATOR_RUN_RE.replace_all(name.trim(), "_").into_owned()
}

/// Lowercases a name.
pub fn remove_caps(name: &str) -> String {
    name.to_lowercase()
}

/// Prepends `prefix_` to a name. Already-prefixed names are returned as-is.
pub fn add_prefix(name: &str, prefix: &str) -> String {
    let prefix = prefix.trim_end_matches('_');
    if prefix.is_empty() {
        return name.to_string();
    }
    let marker = format!("{}_", prefix);
    if name.starts_with(&marker) {
        name.to_string()
    } else {
        format!("{}{}", marker, name)
    }
}

/// Standardizes a single identifier part: unquote, underscore, lowercase.
pub fn standardize_part(part: &str) -> String {
    remove_caps(&underscore_spaces(unquote(part)))
}

/// Standardizes a (possibly schema-qualified) table name.
///
/// The prefix is applied to the last part only. A configured schema replaces
/// any schema already present, or is added when the name is unqualified.
pub fn standardize_name(raw: &str, style: &NameStyle) -> String {
    let mut parts: Vec<String> = split_qualified(raw.trim())
        .into_iter()
        .map(standardize_part)
        .collect();

    if let (Some(prefix), Some(table)) = (style.prefix.as_deref(), parts.last_mut()) {
        *table = add_prefix(table, &standardize_part(prefix));
    }

    if let Some(schema) = style.schema.as_deref() {
        let schema = standardize_part(schema);
        if parts.len() > 1 {
            let schema_idx = parts.len() - 2;
            parts[schema_idx] = schema;
        } else {
            parts.insert(0, schema);
        }
    }

    parts.join(".")
}

/// Standardizes a parenthesized column list: `("First Name", [Age])` → `(first_name, age)`.
pub fn standardize_column_list(list: &str) -> String {
    let inner = list
        .trim()
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(list);
    let columns: Vec<String> = inner
        .split(',')
        .map(standardize_part)
        .filter(|c| !c.is_empty())
        .collect();
    format!("({})", columns.join(", "))
}

/// Compares two table names ignoring quoting and case.
pub fn same_table(a: &str, b: &str) -> bool {
    let left: Vec<String> = split_qualified(a).into_iter().map(standardize_part).collect();
    let right: Vec<String> = split_qualified(b).into_iter().map(standardize_part).collect();
    left == right
}
