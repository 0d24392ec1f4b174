use serde::Serialize;
use std::collections::BTreeMap;

/// Query string parameters for collection and entity lookups.
///
/// Keys keep a stable (sorted) order so request URLs are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryParams(BTreeMap<String, String>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an arbitrary parameter, e.g. `fields.title[match]`
    pub fn insert(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.0.insert(key.into(), value.to_string());
        self
    }

    pub fn limit(self, limit: u32) -> Self {
        self.insert("limit", limit)
    }

    pub fn skip(self, skip: u32) -> Self {
        self.insert("skip", skip)
    }

    pub fn order(self, order: impl Into<String>) -> Self {
        self.insert("order", order.into())
    }

    pub fn select(self, select: impl Into<String>) -> Self {
        self.insert("select", select.into())
    }

    pub fn content_type(self, content_type_id: impl Into<String>) -> Self {
        self.insert("content_type", content_type_id.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Make sure a `select` projection always includes `sys`.
    ///
    /// The API rejects projections without `sys`, so `fields.title` becomes
    /// `fields.title,sys`. The check is a case-insensitive substring match;
    /// anything already mentioning `sys` is left alone.
    pub fn normalize_select(&self) -> QueryParams {
        match self.0.get("select") {
            Some(select) if !select.to_ascii_lowercase().contains("sys") => {
                let mut normalized = self.clone();
                normalized
                    .0
                    .insert("select".to_string(), format!("{},sys", select));
                normalized
            }
            _ => self.clone(),
        }
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        QueryParams(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.to_string()))
                .collect(),
        )
    }
}
