use serde_json::Value;

/// Walk `root` and return the dotted paths of every object that looks like an
/// offer, i.e. carries both `offerId` and `section`.
///
/// The walk does not descend into a matched offer. Array indices appear as
/// plain path segments (`_embedded.offer.0`). An offer at the root itself is
/// reported with an empty path.
#[must_use]
pub fn locate_offers(root: &Value) -> Vec<String> {
    let mut found = Vec::new();
    scan(root, String::new(), &mut found);
    found
}

fn scan(value: &Value, path: String, found: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            if map.contains_key("offerId") && map.contains_key("section") {
                found.push(path);
                return;
            }
            for (key, child) in map {
                scan(child, join(&path, key), found);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                scan(child, join(&path, &index.to_string()), found);
            }
        }
        _ => {}
    }
}

fn join(path: &str, segment: &str) -> String {
    if path.is_empty() {
        segment.to_string()
    } else {
        format!("{path}.{segment}")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn finds_offers_without_descending_into_them() {
        let root = json!({
            "page": {"size": 2},
            "_embedded": {
                "offer": [
                    {"offerId": "o-1", "section": "101", "nested": {"offerId": "x", "section": "y"}},
                    {"offerId": "o-2"},
                    {"offerId": "o-3", "section": "102"}
                ]
            }
        });

        let paths = locate_offers(&root);
        assert_eq!(paths, vec!["_embedded.offer.0", "_embedded.offer.2"]);
    }

    #[test]
    fn root_offer_has_empty_path() {
        let root = json!({"offerId": "o-1", "section": "A"});
        assert_eq!(locate_offers(&root), vec![String::new()]);
    }

    #[test]
    fn scalars_have_no_offers() {
        assert!(locate_offers(&json!("offer")).is_empty());
    }
}
