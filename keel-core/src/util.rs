use std::{borrow::Cow, cmp::min};
use syn::Path;

/// True when the trailing segments of `path` match the trailing entries of `expect`.
///
/// Lets `String`, `string::String` and `::std::string::String` all match `["std", "string", "String"]`.
pub fn matches_path(path: &Path, expect: &[&str]) -> bool {
    let len = min(path.segments.len(), expect.len());
    path.segments
        .iter()
        .rev()
        .take(len)
        .map(|v| &v.ident)
        .eq(expect.iter().rev().take(len))
}

pub fn separated_by<T, F>(
    out: &mut String,
    values: impl IntoIterator<Item = T>,
    mut f: F,
    separator: &str,
) where
    F: FnMut(&mut String, T),
{
    let mut len = out.len();
    for v in values {
        if out.len() > len {
            out.push_str(separator);
        }
        len = out.len();
        f(out, v);
    }
}

/// Shorten long SQL text for log and error messages, respecting char boundaries.
pub fn truncate_long(query: &str) -> Cow<'_, str> {
    const LIMIT: usize = 497;
    if query.len() <= LIMIT {
        return Cow::Borrowed(query);
    }
    let mut end = LIMIT;
    while !query.is_char_boundary(end) {
        end -= 1;
    }
    Cow::Owned(format!("{}...", query[..end].trim_end()))
}
