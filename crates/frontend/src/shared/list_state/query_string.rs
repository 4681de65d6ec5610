//! Query-string helpers.
//!
//! Every URL write in the engine goes through [`merge_query`], so untouched
//! params (page, active tab, other lists' filters) always survive. Parsing and
//! encoding are `application/x-www-form-urlencoded`, so a merge re-emits the
//! untouched params in canonical form.

/// Decoded key/value pairs in their original order
pub fn parse_query(search: &str) -> Vec<(String, String)> {
    match serde_urlencoded::from_str::<Vec<(String, String)>>(search.trim_start_matches('?')) {
        Ok(pairs) => pairs,
        Err(e) => {
            log::warn!("Ignoring unreadable query string: {}", e);
            Vec::new()
        }
    }
}

/// First value for `key`, decoded
pub fn get_param(search: &str, key: &str) -> Option<String> {
    parse_query(search)
        .into_iter()
        .find_map(|(k, v)| (k == key).then_some(v))
}

/// Apply `updates` to `search` and return the new query string (without `?`).
///
/// `Some(value)` sets the key (first occurrence replaced in place, duplicates
/// dropped, new keys appended), `None` removes it.
pub fn merge_query(search: &str, updates: &[(&str, Option<&str>)]) -> String {
    let mut pairs: Vec<(String, String)> = Vec::new();
    let mut written: Vec<&str> = Vec::new();

    for (key, value) in parse_query(search) {
        match updates.iter().find(|(u, _)| *u == key) {
            None => pairs.push((key, value)),
            Some((u, Some(next))) => {
                if !written.contains(u) {
                    pairs.push((key, next.to_string()));
                    written.push(u);
                }
            }
            Some((_, None)) => {}
        }
    }

    for (key, value) in updates {
        if let Some(value) = value {
            if !written.contains(key) {
                pairs.push((key.to_string(), value.to_string()));
                written.push(key);
            }
        }
    }

    match serde_urlencoded::to_string(&pairs) {
        Ok(merged) => merged,
        Err(e) => {
            log::warn!("Failed to encode query string: {}", e);
            search.trim_start_matches('?').to_string()
        }
    }
}

/// Same params with the same values, regardless of encoding
pub fn same_query(a: &str, b: &str) -> bool {
    parse_query(a) == parse_query(b)
}
