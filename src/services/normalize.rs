//! Field lookup helpers for normalizing backend payloads.
//!
//! The backend is inconsistent about naming (`short_description` vs
//! `excerpt`, flat `lat` vs nested `location.latitude`), so every lookup
//! takes a list of candidate paths and returns the first usable value.
//! Paths are dot-separated for nested objects.

use serde_json::Value;

/// Resolve a dotted path inside `item`.
pub fn lookup<'a>(item: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(item, |node, segment| node.get(segment))
}

/// First non-empty string among `paths`. Numbers are stringified.
pub fn pick_str(item: &Value, paths: &[&str]) -> Option<String> {
    paths.iter().find_map(|path| match lookup(item, path)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// First number among `paths`; numeric strings are accepted.
pub fn pick_f64(item: &Value, paths: &[&str]) -> Option<f64> {
    paths.iter().find_map(|path| match lookup(item, path)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

pub fn pick_i64(item: &Value, paths: &[&str]) -> Option<i64> {
    pick_f64(item, paths).map(|f| f as i64)
}

/// First boolean among `paths`; `0`/`1` and `"true"`/`"false"` count.
pub fn pick_bool(item: &Value, paths: &[&str]) -> Option<bool> {
    paths.iter().find_map(|path| match lookup(item, path)? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|i| i != 0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

/// First array among `paths`.
pub fn pick_array<'a>(item: &'a Value, paths: &[&str]) -> Option<&'a Vec<Value>> {
    paths.iter().find_map(|path| lookup(item, path)?.as_array())
}

pub fn pick_id(item: &Value) -> Option<String> {
    pick_str(item, &["id", "uuid", "_id"])
}

/// Image URL, whether stored as a string or an `{url}` object.
pub fn pick_image(item: &Value) -> Option<String> {
    pick_str(
        item,
        &[
            "image.url",
            "image",
            "image_url",
            "imageUrl",
            "featured_image.url",
            "featured_image",
            "thumbnail.url",
            "thumbnail",
        ],
    )
}

/// Normalize every item with `f`, skipping (and logging) the ones it rejects.
pub fn normalize_items<T>(items: &[Value], resource: &str, f: impl Fn(&Value) -> Option<T>) -> Vec<T> {
    items
        .iter()
        .filter_map(|item| {
            let normalized = f(item);
            if normalized.is_none() {
                tracing::debug!(resource, item = %item, "Skipping item that cannot be normalized");
            }
            normalized
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_lookup_and_fallbacks() {
        let item = json!({"title": "", "name": "Office", "location": {"city": "Berlin"}});
        assert_eq!(pick_str(&item, &["title", "name"]).as_deref(), Some("Office"));
        assert_eq!(pick_str(&item, &["city", "location.city"]).as_deref(), Some("Berlin"));
        assert_eq!(pick_str(&item, &["missing"]), None);
    }

    #[test]
    fn test_numbers_and_bools() {
        let item = json!({"id": 12, "lat": "52.52", "req": 1, "flag": "false"});
        assert_eq!(pick_id(&item).as_deref(), Some("12"));
        assert_eq!(pick_f64(&item, &["lat"]), Some(52.52));
        assert_eq!(pick_bool(&item, &["req"]), Some(true));
        assert_eq!(pick_bool(&item, &["flag"]), Some(false));
    }

    #[test]
    fn test_image_shapes() {
        assert_eq!(
            pick_image(&json!({"image": {"url": "/a.jpg"}})).as_deref(),
            Some("/a.jpg")
        );
        assert_eq!(pick_image(&json!({"image": "/b.jpg"})).as_deref(), Some("/b.jpg"));
        assert_eq!(
            pick_image(&json!({"featured_image": "/c.jpg"})).as_deref(),
            Some("/c.jpg")
        );
    }

    #[test]
    fn test_normalize_items_skips_rejects() {
        let items = vec![json!({"id": 1}), json!({"name": "no id"})];
        let ids = normalize_items(&items, "test", pick_id);
        assert_eq!(ids, vec!["1".to_string()]);
    }
}
