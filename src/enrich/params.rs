use std::collections::HashSet;

/// Return the distinct query parameter names of `u`, in first-seen order.
///
/// Only the raw string is inspected, so relative or scheme-less targets work
/// the same as absolute URLs. Anything that does not parse as a query simply
/// yields no names.
pub fn extract_params(u: &str) -> Vec<String> {
    let query = match query_component(u) {
        Some(q) if !q.is_empty() => q,
        _ => return Vec::new(),
    };

    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for (key, _) in url::form_urlencoded::parse(query.as_bytes()) {
        if key.is_empty() {
            continue;
        }
        if seen.insert(key.clone()) {
            names.push(key.into_owned());
        }
    }
    names
}

// text between the first '?' and the fragment
fn query_component(u: &str) -> Option<&str> {
    let without_fragment = u.split('#').next().unwrap_or(u);
    without_fragment.split_once('?').map(|(_, q)| q)
}
