//! Response envelopes for the content provider.
//!
//! The provider is inconsistent about wrapping: most endpoints wrap the
//! payload in `{"data": ...}`, verse endpoints use `{"verses": [...]}`,
//! and a few return the payload bare. Every decode goes through one of
//! the enums here so the shape handling lives in exactly one place.
//! Variants are tried in declaration order, so `data` wins over `verses`
//! wins over a bare payload.

use serde::Deserialize;

/// Envelope around a list payload.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListEnvelope<T> {
    Data { data: Vec<T> },
    Verses { verses: Vec<T> },
    Bare(Vec<T>),
}

impl<T> ListEnvelope<T> {
    pub(crate) fn into_items(self) -> Vec<T> {
        match self {
            Self::Data { data } => data,
            Self::Verses { verses } => verses,
            Self::Bare(items) => items,
        }
    }
}

/// Envelope around a single-object payload.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ObjectEnvelope<T> {
    Data { data: T },
    Bare(T),
}

impl<T> ObjectEnvelope<T> {
    pub(crate) fn into_inner(self) -> T {
        match self {
            Self::Data { data } => data,
            Self::Bare(value) => value,
        }
    }
}

/// Body of a search response. `query` and `total` are echoed by some
/// provider deployments and missing from others.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchBody<V> {
    #[serde(default)]
    pub(crate) total: Option<u32>,
    pub(crate) verses: Vec<V>,
}

/// Envelope around a search response.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum SearchEnvelope<V> {
    Data { data: SearchBody<V> },
    Flat(SearchBody<V>),
    Bare(Vec<V>),
}

impl<V> SearchEnvelope<V> {
    pub(crate) fn into_body(self) -> SearchBody<V> {
        match self {
            Self::Data { data } => data,
            Self::Flat(body) => body,
            Self::Bare(verses) => SearchBody {
                total: None,
                verses,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Item {
        id: String,
    }

    // ====== ListEnvelope ======

    #[test]
    fn test_list_data_wrapper() {
        let envelope: ListEnvelope<Item> =
            serde_json::from_str(r#"{"data": [{"id": "a"}, {"id": "b"}]}"#).unwrap();
        let items = envelope.into_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "a");
    }

    #[test]
    fn test_list_verses_wrapper() {
        let envelope: ListEnvelope<Item> =
            serde_json::from_str(r#"{"verses": [{"id": "JHN.3.16"}]}"#).unwrap();
        assert_eq!(envelope.into_items()[0].id, "JHN.3.16");
    }

    #[test]
    fn test_list_bare_array() {
        let envelope: ListEnvelope<Item> =
            serde_json::from_str(r#"[{"id": "a"}]"#).unwrap();
        assert_eq!(envelope.into_items().len(), 1);
    }

    #[test]
    fn test_list_data_wins_over_verses() {
        let envelope: ListEnvelope<Item> = serde_json::from_str(
            r#"{"data": [{"id": "from-data"}], "verses": [{"id": "from-verses"}]}"#,
        )
        .unwrap();
        assert_eq!(envelope.into_items()[0].id, "from-data");
    }

    // ====== ObjectEnvelope ======

    #[test]
    fn test_object_data_wrapper() {
        let envelope: ObjectEnvelope<Item> =
            serde_json::from_str(r#"{"data": {"id": "PSA.23"}}"#).unwrap();
        assert_eq!(envelope.into_inner().id, "PSA.23");
    }

    #[test]
    fn test_object_bare() {
        let envelope: ObjectEnvelope<Item> =
            serde_json::from_str(r#"{"id": "PSA.23"}"#).unwrap();
        assert_eq!(envelope.into_inner().id, "PSA.23");
    }

    // ====== SearchEnvelope ======

    #[test]
    fn test_search_data_wrapper() {
        let envelope: SearchEnvelope<Item> =
            serde_json::from_str(r#"{"data": {"total": 12, "verses": [{"id": "a"}]}}"#).unwrap();
        let body = envelope.into_body();
        assert_eq!(body.total, Some(12));
        assert_eq!(body.verses.len(), 1);
    }

    #[test]
    fn test_search_flat_body() {
        let envelope: SearchEnvelope<Item> =
            serde_json::from_str(r#"{"verses": [{"id": "a"}, {"id": "b"}]}"#).unwrap();
        let body = envelope.into_body();
        assert_eq!(body.total, None);
        assert_eq!(body.verses.len(), 2);
    }

    #[test]
    fn test_search_bare_array() {
        let envelope: SearchEnvelope<Item> =
            serde_json::from_str(r#"[{"id": "a"}]"#).unwrap();
        let body = envelope.into_body();
        assert_eq!(body.total, None);
        assert_eq!(body.verses[0].id, "a");
    }

    #[test]
    fn test_unrecognized_shape_is_rejected() {
        let result: Result<ListEnvelope<Item>, _> =
            serde_json::from_str(r#"{"entries": [{"id": "a"}]}"#);
        assert!(result.is_err());
    }
}
