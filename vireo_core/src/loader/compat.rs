use serde_json::{Map, Value};

/// Uniform view over a top-level resource collection.
///
/// Legacy documents store collections as arrays whose entries each carry
/// a `uuid` field; current ones key an object by uuid. Detection is by
/// JSON shape per collection, so mixed documents written by older
/// exporters still normalize.
#[derive(Clone, Copy, Debug)]
pub enum CollectionView<'a> {
    Empty,
    Array(&'a [Value]),
    Object(&'a Map<String, Value>),
}

impl<'a> CollectionView<'a> {
    pub fn of(doc: &'a Value, key: &str) -> Self {
        match doc.get(key) {
            Some(Value::Array(entries)) => Self::Array(entries),
            Some(Value::Object(entries)) => Self::Object(entries),
            _ => Self::Empty,
        }
    }

    /// Entries with their uuid, in document order. Array entries missing
    /// a `uuid` field yield `None` and are up to the caller to skip.
    pub fn iter(&self) -> CollectionIter<'a> {
        match self {
            Self::Empty => CollectionIter::Empty,
            Self::Array(entries) => CollectionIter::Array(entries.iter()),
            Self::Object(entries) => CollectionIter::Object(entries.iter()),
        }
    }

    /// Entry with a matching uuid. Linear for array collections.
    pub fn get(&self, uuid: &str) -> Option<&'a Value> {
        match self {
            Self::Empty => None,
            Self::Array(entries) => entries
                .iter()
                .find(|e| e.get("uuid").and_then(Value::as_str) == Some(uuid)),
            Self::Object(entries) => entries.get(uuid),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Array(entries) => entries.is_empty(),
            Self::Object(entries) => entries.is_empty(),
        }
    }
}

pub enum CollectionIter<'a> {
    Empty,
    Array(std::slice::Iter<'a, Value>),
    Object(serde_json::map::Iter<'a>),
}

impl<'a> Iterator for CollectionIter<'a> {
    type Item = (Option<&'a str>, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Empty => None,
            Self::Array(it) => {
                let entry = it.next()?;
                Some((entry.get("uuid").and_then(Value::as_str), entry))
            }
            Self::Object(it) => {
                let (uuid, entry) = it.next()?;
                Some((Some(uuid.as_str()), entry))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_array_collection() {
        let doc = json!({
            "geometries": [
                { "uuid": "g1", "type": "BoxGeometry" },
                { "uuid": "g2", "type": "SphereGeometry" },
            ]
        });
        let view = CollectionView::of(&doc, "geometries");
        let uuids: Vec<_> = view.iter().map(|(u, _)| u.unwrap()).collect();
        assert_eq!(uuids, ["g1", "g2"]);
        assert_eq!(view.get("g2").unwrap()["type"], "SphereGeometry");
        assert!(view.get("g3").is_none());
    }

    #[test]
    fn test_object_collection() {
        let doc = json!({
            "geometries": {
                "g1": { "type": "BoxGeometry" }
            }
        });
        let view = CollectionView::of(&doc, "geometries");
        assert_eq!(view.get("g1").unwrap()["type"], "BoxGeometry");
        assert_eq!(view.iter().count(), 1);
    }

    #[test]
    fn test_missing_collection_is_empty() {
        let doc = json!({});
        let view = CollectionView::of(&doc, "geometries");
        assert!(view.is_empty());
        assert_eq!(view.iter().count(), 0);
    }
}
