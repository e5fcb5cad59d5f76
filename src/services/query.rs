//! List pipeline: search, entity filters, sort, paginate.
//!
//! Pure functions over record vectors so each stage can be tested without
//! the store's simulated latency.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use super::base_data::StoreEntity;
use super::data_interfaces::{FilterParams, PaginatedResult, PaginationParams, SortDirection};

/// Value a record exposes for a sortable field
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Number(f64),
    Text(String),
    Flag(bool),
    Date(DateTime<Utc>),
    Missing,
}

impl From<f64> for SortValue {
    fn from(value: f64) -> Self {
        SortValue::Number(value)
    }
}

impl From<u32> for SortValue {
    fn from(value: u32) -> Self {
        SortValue::Number(f64::from(value))
    }
}

impl From<bool> for SortValue {
    fn from(value: bool) -> Self {
        SortValue::Flag(value)
    }
}

impl From<&str> for SortValue {
    fn from(value: &str) -> Self {
        SortValue::Text(value.to_string())
    }
}

impl From<&String> for SortValue {
    fn from(value: &String) -> Self {
        SortValue::Text(value.clone())
    }
}

impl From<DateTime<Utc>> for SortValue {
    fn from(value: DateTime<Utc>) -> Self {
        SortValue::Date(value)
    }
}

impl<T: Into<SortValue>> From<Option<T>> for SortValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(SortValue::Missing, Into::into)
    }
}

/// Three-way comparison; values of different kinds (or missing) are equal
pub fn compare_values(a: &SortValue, b: &SortValue) -> Ordering {
    match (a, b) {
        (SortValue::Number(x), SortValue::Number(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        (SortValue::Text(x), SortValue::Text(y)) => x.cmp(y),
        (SortValue::Flag(x), SortValue::Flag(y)) => x.cmp(y),
        (SortValue::Date(x), SortValue::Date(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

/// Case-insensitive substring match over the record's searchable fields
pub fn matches_search<T: StoreEntity>(item: &T, term: &str) -> bool {
    let needle = term.to_lowercase();
    item.searchable_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

pub fn apply_filters<T: StoreEntity>(data: Vec<T>, filters: &FilterParams<T::Filter>) -> Vec<T> {
    data.into_iter()
        .filter(|item| match filters.search.as_deref() {
            Some(term) if !term.is_empty() => matches_search(item, term),
            _ => true,
        })
        .filter(|item| item.matches_filter(&filters.specific))
        .collect()
}

/// Stable sort, so records with equal keys keep their insertion order
pub fn apply_sorting<T: StoreEntity>(mut data: Vec<T>, sort_by: &str, direction: SortDirection) -> Vec<T> {
    data.sort_by(|a, b| {
        let ordering = compare_values(&a.sort_value(sort_by), &b.sort_value(sort_by));
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    data
}

pub fn paginate<T>(data: Vec<T>, pagination: Option<PaginationParams>) -> PaginatedResult<T> {
    let total = data.len();
    let Some(PaginationParams { page, page_size }) = pagination else {
        return PaginatedResult {
            data,
            total,
            page: 1,
            page_size: total,
            total_pages: 1,
        };
    };

    let total_pages = if page_size == 0 { 0 } else { total.div_ceil(page_size) };
    let data = match page.checked_sub(1).and_then(|p| p.checked_mul(page_size)) {
        Some(start) if page_size > 0 => data.into_iter().skip(start).take(page_size).collect(),
        _ => Vec::new(),
    };

    PaginatedResult {
        data,
        total,
        page,
        page_size,
        total_pages,
    }
}

/// Full list pipeline: filters, then sorting, then pagination
pub fn run_query<T: StoreEntity>(
    data: Vec<T>,
    pagination: Option<PaginationParams>,
    filters: Option<&FilterParams<T::Filter>>,
) -> PaginatedResult<T> {
    let mut data = data;
    if let Some(filters) = filters {
        data = apply_filters(data, filters);
        if let Some(sort_by) = filters.sort_by.as_deref() {
            data = apply_sorting(data, sort_by, filters.sort_direction.unwrap_or_default());
        }
    }
    paginate(data, pagination)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_values_mixed_kinds_are_equal() {
        assert_eq!(compare_values(&SortValue::Number(1.0), &SortValue::Number(2.0)), Ordering::Less);
        assert_eq!(compare_values(&"b".into(), &"a".into()), Ordering::Greater);
        assert_eq!(compare_values(&SortValue::Number(1.0), &"a".into()), Ordering::Equal);
        assert_eq!(compare_values(&SortValue::Missing, &SortValue::Number(0.0)), Ordering::Equal);
    }

    #[test]
    fn test_paginate_second_page() {
        let data: Vec<u32> = (0..10).collect();
        let result = paginate(data, Some(PaginationParams::new(2, 3)));
        assert_eq!(result.data, vec![3, 4, 5]);
        assert_eq!(result.total, 10);
        assert_eq!(result.total_pages, 4);
        assert_eq!(result.page, 2);
        assert_eq!(result.page_size, 3);
    }

    #[test]
    fn test_paginate_without_params() {
        let result = paginate(vec!['a', 'b'], None);
        assert_eq!(result.page, 1);
        assert_eq!(result.page_size, 2);
        assert_eq!(result.total_pages, 1);
        assert_eq!(result.data.len(), 2);
    }

    #[test]
    fn test_paginate_out_of_range() {
        let result = paginate(vec![1, 2, 3], Some(PaginationParams::new(5, 2)));
        assert!(result.data.is_empty());
        assert_eq!(result.total_pages, 2);

        let zero_page = paginate(vec![1, 2, 3], Some(PaginationParams::new(0, 2)));
        assert!(zero_page.data.is_empty());

        let zero_size = paginate(vec![1, 2, 3], Some(PaginationParams::new(1, 0)));
        assert!(zero_size.data.is_empty());
        assert_eq!(zero_size.total_pages, 0);
    }
}
