// File: src/helpers.rs
// Purpose: Small view helpers for navigation state and tagged content listings

use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// `"active"` when `link` is the current page or the section it lives in.
///
/// The query string of `request_uri` is ignored. A link also counts as
/// active when it contains the first segment of the current path, so
/// `/blog` stays highlighted on `/blog/some-post`.
pub fn active_class(request_uri: &str, link: &str) -> &'static str {
    let path = request_uri.split('?').next().unwrap_or_default();
    if path == link {
        return "active";
    }

    let section = path.split('/').nth(1).unwrap_or_default();
    if !section.is_empty() && link.contains(section) {
        return "active";
    }
    ""
}

/// Items whose `item[key]` object has an entry named `tag`
pub fn filter_by_tag<'a>(items: &'a [JsonValue], tag: &str, key: &str) -> Vec<&'a JsonValue> {
    items
        .iter()
        .filter(|item| item.get(key).and_then(|tags| tags.get(tag)).is_some())
        .collect()
}

/// Options for a tag `<select>`: every `slug -> label` pair found under
/// `item[tag]`, skipping slugs that are also used as a label in the same item
pub fn tags_for_input(items: &[JsonValue], tag: &str) -> BTreeMap<String, String> {
    let mut categories = BTreeMap::new();

    for tags in items.iter().filter_map(|item| item.get(tag)?.as_object()) {
        for (slug, name) in tags {
            let used_as_label = tags.values().any(|v| v.as_str() == Some(slug.as_str()));
            if used_as_label {
                continue;
            }
            let label = name.as_str().map(str::to_string).unwrap_or_else(|| name.to_string());
            categories.insert(slug.clone(), label);
        }
    }

    categories
}
