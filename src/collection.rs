use crate::entity::Sys;
use crate::error::Result;
use crate::query::QueryParams;
use serde::{Deserialize, Serialize};

/// One page of a collection endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sys: Option<Sys>,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub skip: u32,
    #[serde(default)]
    pub limit: u32,
    pub items: Vec<T>,
}

impl<T> Collection<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Walks a collection endpoint page by page.
///
/// Each request carries the base query plus `limit` and a `skip` equal to
/// the number of items received so far. Iteration stops after the first
/// empty page, or right after yielding an error.
///
/// A `limit` of 0 is raised to 1: the API answers `limit=0` with an empty
/// page, which would end the walk before the first item.
pub struct Pages<T, F>
where
    F: FnMut(&QueryParams) -> Result<Collection<T>>,
{
    fetch: F,
    query: QueryParams,
    limit: u32,
    skip: u32,
    done: bool,
}

impl<T, F> Pages<T, F>
where
    F: FnMut(&QueryParams) -> Result<Collection<T>>,
{
    pub fn new(query: QueryParams, limit: u32, fetch: F) -> Self {
        Pages {
            fetch,
            query,
            limit: limit.max(1),
            skip: 0,
            done: false,
        }
    }

    /// Number of items received so far
    pub fn seen(&self) -> u32 {
        self.skip
    }

    /// Flatten into individual items
    pub fn items(self) -> Items<T, F> {
        Items {
            pages: self,
            current: Vec::new().into_iter(),
        }
    }
}

impl<T, F> Iterator for Pages<T, F>
where
    F: FnMut(&QueryParams) -> Result<Collection<T>>,
{
    type Item = Result<Collection<T>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let query = self.query.clone().limit(self.limit).skip(self.skip);
        match (self.fetch)(&query) {
            Ok(page) if page.is_empty() => {
                self.done = true;
                None
            }
            Ok(page) => {
                self.skip += page.len() as u32;
                Some(Ok(page))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Item-level view over [`Pages`]
pub struct Items<T, F>
where
    F: FnMut(&QueryParams) -> Result<Collection<T>>,
{
    pages: Pages<T, F>,
    current: std::vec::IntoIter<T>,
}

impl<T, F> Iterator for Items<T, F>
where
    F: FnMut(&QueryParams) -> Result<Collection<T>>,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.current.next() {
                return Some(Ok(item));
            }
            match self.pages.next()? {
                Ok(page) => self.current = page.items.into_iter(),
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RestError;

    fn page(items: Vec<u32>, skip: u32, total: u32) -> Collection<u32> {
        Collection {
            sys: None,
            total,
            skip,
            limit: 2,
            items,
        }
    }

    /// Serves `data` in pages and records the queries it saw
    fn serve(
        data: Vec<u32>,
        seen: &mut Vec<QueryParams>,
    ) -> impl FnMut(&QueryParams) -> Result<Collection<u32>> + '_ {
        move |query: &QueryParams| {
            seen.push(query.clone());
            let skip: usize = query.get("skip").unwrap().parse().unwrap();
            let limit: usize = query.get("limit").unwrap().parse().unwrap();
            let items: Vec<u32> = data.iter().skip(skip).take(limit).copied().collect();
            Ok(page(items, skip as u32, data.len() as u32))
        }
    }

    #[test]
    fn test_pages_walk_until_empty() {
        let mut seen = Vec::new();
        let base = QueryParams::new().order("sys.createdAt");
        let pages: Vec<_> = Pages::new(base, 2, serve(vec![1, 2, 3, 4, 5], &mut seen))
            .collect::<Result<_>>()
            .unwrap();

        let lens: Vec<usize> = pages.iter().map(|p| p.len()).collect();
        assert_eq!(lens, vec![2, 2, 1]);

        let skips: Vec<&str> = seen.iter().map(|q| q.get("skip").unwrap()).collect();
        assert_eq!(skips, vec!["0", "2", "4", "5"]);
        assert!(seen.iter().all(|q| q.get("order") == Some("sys.createdAt")));
        assert!(seen.iter().all(|q| q.get("limit") == Some("2")));
    }

    #[test]
    fn test_items_flatten() {
        let mut seen = Vec::new();
        let items: Vec<u32> = Pages::new(QueryParams::new(), 2, serve(vec![7, 8, 9], &mut seen))
            .items()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(items, vec![7, 8, 9]);
    }

    #[test]
    fn test_zero_limit_still_walks_everything() {
        let mut seen = Vec::new();
        let pages = Pages::new(QueryParams::new(), 0, serve(vec![1, 2, 3, 4, 5], &mut seen));
        let items: Vec<u32> = pages
            .items()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(items, vec![1, 2, 3, 4, 5]);
        assert!(seen.iter().all(|q| q.get("limit") == Some("1")));
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn test_empty_collection() {
        let mut seen = Vec::new();
        let mut pages = Pages::new(QueryParams::new(), 10, serve(Vec::new(), &mut seen));
        assert!(pages.next().is_none());
        assert!(pages.next().is_none());
        drop(pages);
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn test_error_stops_iteration() {
        let mut calls = 0;
        let mut pages = Pages::new(QueryParams::new(), 2, |_: &QueryParams| {
            calls += 1;
            if calls == 1 {
                Ok(page(vec![1, 2], 0, 10))
            } else {
                Err(RestError::Other("boom".to_string()))
            }
        });

        assert!(pages.next().unwrap().is_ok());
        assert_eq!(pages.seen(), 2);
        assert!(pages.next().unwrap().is_err());
        assert!(pages.next().is_none());
    }

    #[test]
    fn test_collection_deserialization() {
        let json = r#"{
            "sys": {"type": "Array"},
            "total": 1, "skip": 0, "limit": 100,
            "items": [{"sys": {"id": "a", "type": "Space"}, "name": "Blog"}]
        }"#;
        let collection: Collection<crate::entity::SpaceProps> =
            serde_json::from_str(json).unwrap();
        assert_eq!(collection.total, 1);
        assert_eq!(collection.items[0].name, "Blog");
    }
}
