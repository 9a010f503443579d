//! Search, status filter, sort and pagination for record lists.
//!
//! Every list screen (terms, notification templates and history, ticket
//! types) runs the same pipeline over its records: search, filter by
//! status, sort, then cut out one page. Entities opt in by implementing
//! [`Listable`].

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Default page size.
pub const DEFAULT_PER_PAGE: usize = 10;

/// Largest accepted page size.
pub const MAX_PER_PAGE: usize = 100;

/// Status filter value meaning "no filter".
pub const STATUS_ALL: &str = "all";

/// Status filter for records that can be switched on and off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveStatus {
    Active,
    Inactive,
}

impl ActiveStatus {
    pub fn from_flag(is_active: bool) -> Self {
        if is_active {
            Self::Active
        } else {
            Self::Inactive
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(CoreError::Validation(format!(
                "Invalid status '{value}'. Must be one of: all, active, inactive"
            ))),
        }
    }
}

/// Raw list parameters as received from a client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    /// Sort key, prefixed with `-` for descending order.
    pub sort: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// A record type that can be listed.
pub trait Listable {
    /// Value compared against the `status` filter.
    type Status: PartialEq;

    /// Accepted sort keys.
    const SORT_KEYS: &'static [&'static str];

    /// Sort applied when the query names none (may carry a `-` prefix).
    const DEFAULT_SORT: &'static str;

    /// Parse a status filter value other than [`STATUS_ALL`].
    fn parse_status(value: &str) -> Result<Self::Status, CoreError>;

    fn status(&self) -> Self::Status;

    /// Whether the record matches a lowercase, non-empty search needle.
    fn matches_search(&self, needle: &str) -> bool;

    /// Ascending comparison for one of [`Self::SORT_KEYS`].
    fn compare_by(&self, other: &Self, key: &str) -> Ordering;
}

/// Clamp a 1-based page number.
pub fn clamp_page(page: Option<usize>) -> usize {
    page.unwrap_or(1).max(1)
}

/// Clamp a page size into `1..=MAX_PER_PAGE`.
pub fn clamp_per_page(per_page: Option<usize>) -> usize {
    per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE)
}

/// Keep only records whose status equals `status`; `None` or `"all"` keeps
/// everything.
pub fn filter_status<T: Listable>(
    items: Vec<T>,
    status: Option<&str>,
) -> Result<Vec<T>, CoreError> {
    match status.map(str::trim) {
        None | Some("") | Some(STATUS_ALL) => Ok(items),
        Some(value) => {
            let wanted = T::parse_status(value)?;
            Ok(items.into_iter().filter(|i| i.status() == wanted).collect())
        }
    }
}

/// Cut page `page` (1-based) of size `per_page` out of `items`.
///
/// Page `k` holds items `[(k-1)*per_page, k*per_page)` clipped to the
/// total; a page past the end is empty.
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let page = page.max(1);
    let per_page = per_page.max(1);
    let total = items.len();
    let start = (page - 1).saturating_mul(per_page).min(total);
    let end = start.saturating_add(per_page).min(total);
    let items = items.into_iter().skip(start).take(end - start).collect();

    Page {
        items,
        total,
        page,
        per_page,
        total_pages: total.div_ceil(per_page),
    }
}

/// Run the whole pipeline over `items`.
pub fn apply<T: Listable>(items: Vec<T>, query: &ListQuery) -> Result<Page<T>, CoreError> {
    let (key, descending) = parse_sort::<T>(query.sort.as_deref())?;

    let needle = query
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    let mut items = filter_status(items, query.status.as_deref())?;
    if let Some(needle) = &needle {
        items.retain(|i| i.matches_search(needle));
    }

    items.sort_by(|a, b| {
        let ord = a.compare_by(b, key);
        if descending {
            ord.reverse()
        } else {
            ord
        }
    });

    Ok(paginate(
        items,
        clamp_page(query.page),
        clamp_per_page(query.per_page),
    ))
}

/// Case-insensitive containment used by `matches_search` implementations.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn parse_sort<T: Listable>(sort: Option<&str>) -> Result<(&'static str, bool), CoreError> {
    let raw = sort.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(T::DEFAULT_SORT);
    let (name, descending) = match raw.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (raw, false),
    };
    let key = T::SORT_KEYS
        .iter()
        .copied()
        .find(|k| *k == name)
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "Invalid sort key '{name}'. Must be one of: {}",
                T::SORT_KEYS.join(", ")
            ))
        })?;
    Ok((key, descending))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: usize,
        name: String,
        failed: bool,
    }

    impl Listable for Row {
        type Status = bool;
        const SORT_KEYS: &'static [&'static str] = &["id", "name"];
        const DEFAULT_SORT: &'static str = "id";

        fn parse_status(value: &str) -> Result<bool, CoreError> {
            match value {
                "failed" => Ok(true),
                "sent" => Ok(false),
                other => Err(CoreError::Validation(format!("bad status {other}"))),
            }
        }

        fn status(&self) -> bool {
            self.failed
        }

        fn matches_search(&self, needle: &str) -> bool {
            contains_ci(&self.name, needle)
        }

        fn compare_by(&self, other: &Self, key: &str) -> Ordering {
            match key {
                "name" => self.name.cmp(&other.name),
                _ => self.id.cmp(&other.id),
            }
        }
    }

    fn rows(n: usize) -> Vec<Row> {
        (0..n)
            .map(|id| Row {
                id,
                name: format!("row-{id:02}"),
                failed: id % 3 == 0,
            })
            .collect()
    }

    #[test]
    fn test_paginate_pages() {
        let page1 = paginate(rows(25), 1, 10);
        assert_eq!(page1.items.len(), 10);
        assert_eq!(page1.items[0].id, 0);
        assert_eq!(page1.total, 25);
        assert_eq!(page1.total_pages, 3);

        let page3 = paginate(rows(25), 3, 10);
        let ids: Vec<usize> = page3.items.iter().map(|r| r.id).collect();
        assert_eq!(ids, (20..25).collect::<Vec<_>>());

        let page4 = paginate(rows(25), 4, 10);
        assert!(page4.items.is_empty());
        assert_eq!(page4.total, 25);
    }

    #[test]
    fn test_paginate_every_page_matches_window() {
        for n in [0, 1, 9, 10, 11, 30] {
            for k in 1..=4 {
                let page = paginate(rows(n), k, 10);
                let expected: Vec<usize> = ((k - 1) * 10..(k * 10).min(n)).collect();
                let got: Vec<usize> = page.items.iter().map(|r| r.id).collect();
                assert_eq!(got, expected, "n={n} k={k}");
            }
        }
    }

    #[test]
    fn test_paginate_empty() {
        let page = paginate(Vec::<Row>::new(), 1, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn test_clamping() {
        assert_eq!(clamp_page(None), 1);
        assert_eq!(clamp_page(Some(0)), 1);
        assert_eq!(clamp_per_page(None), DEFAULT_PER_PAGE);
        assert_eq!(clamp_per_page(Some(0)), 1);
        assert_eq!(clamp_per_page(Some(10_000)), MAX_PER_PAGE);
    }

    #[test]
    fn test_filter_status_only_matching() {
        let failed = filter_status(rows(10), Some("failed")).unwrap();
        assert!(failed.iter().all(|r| r.failed));
        assert_eq!(failed.len(), 4);
    }

    #[test]
    fn test_filter_status_all_is_identity() {
        assert_eq!(filter_status(rows(10), Some("all")).unwrap(), rows(10));
        assert_eq!(filter_status(rows(10), None).unwrap(), rows(10));
    }

    #[test]
    fn test_filter_status_unknown_value() {
        assert_matches!(
            filter_status(rows(3), Some("bounced")),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn test_apply_search_sort_and_page() {
        let query = ListQuery {
            search: Some("ROW-1".into()),
            sort: Some("-name".into()),
            per_page: Some(3),
            ..Default::default()
        };
        let page = apply(rows(20), &query).unwrap();
        let ids: Vec<usize> = page.items.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![19, 18, 17]);
        assert_eq!(page.total, 10);
        assert_eq!(page.total_pages, 4);
    }

    #[test]
    fn test_apply_rejects_unknown_sort() {
        let query = ListQuery {
            sort: Some("price".into()),
            ..Default::default()
        };
        assert_matches!(apply(rows(3), &query), Err(CoreError::Validation(_)));
    }
}
