//! The filter → sort → paginate pipeline behind the merchant list.
//!
//! Everything here is a pure function of its inputs. [`MerchantQuery`]
//! bundles the three view parameters and [`MerchantQuery::run`] derives a
//! [`MerchantPage`] from a collection:
//!
//! ```rust
//! use merchant_admin::models::{SortField, seed_merchants};
//! use merchant_admin::query::MerchantQuery;
//!
//! let merchants = seed_merchants().unwrap();
//! let page = MerchantQuery::new()
//!     .search("wilson")
//!     .sort_by(SortField::Store)
//!     .run(&merchants);
//! assert_eq!(page.total_items, 2);
//! ```

use core::cmp::Ordering;

use feruca::Collator;
use serde::{Deserialize, Serialize};

use crate::models::{Merchant, SortField, SortOrder};

/// Number of merchants shown per page.
pub const PAGE_SIZE: usize = 5;

/// Number of page links shown around the current page.
const PAGE_WINDOW: usize = 3;

/// Active ordering of the merchant list: one field and a direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortConfig {
    /// Field compared between records.
    pub field: SortField,
    /// Direction of the comparison.
    pub order: SortOrder,
}

impl SortConfig {
    /// Creates a sort configuration.
    #[inline]
    #[must_use]
    pub const fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Returns the configuration after the user sorts by `field`.
    ///
    /// Sorting by the active field flips the direction; any other field
    /// starts ascending.
    #[inline]
    #[must_use]
    pub fn toggled(self, field: SortField) -> Self {
        let order = if self.field == field {
            self.order.flipped()
        } else {
            SortOrder::Asc
        };
        Self { field, order }
    }

    /// Compares two merchants under this configuration, collating their
    /// sort keys with the Unicode root collation.
    #[inline]
    #[must_use]
    pub fn compare(&self, a: &Merchant, b: &Merchant) -> Ordering {
        self.compare_with(&mut Collator::default(), a, b)
    }

    /// Same as [`SortConfig::compare`], reusing `collator` across calls.
    #[inline]
    #[must_use]
    pub fn compare_with(&self, collator: &mut Collator, a: &Merchant, b: &Merchant) -> Ordering {
        let key_a = a.sort_key(self.field);
        let key_b = b.sort_key(self.field);
        let ordering = collator.collate(key_a.as_str(), key_b.as_str());
        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// Returns `true` if `term` occurs, ignoring case, in the merchant's name,
/// email, or store. An empty term matches everything.
#[inline]
#[must_use]
pub fn matches_search(merchant: &Merchant, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    [&merchant.name, &merchant.email, &merchant.store]
        .into_iter()
        .any(|haystack| haystack.to_lowercase().contains(&needle))
}

/// Returns the merchants matching `term`, in collection order.
#[inline]
#[must_use]
pub fn filter<'src>(merchants: &'src [Merchant], term: &str) -> Vec<&'src Merchant> {
    merchants
        .iter()
        .filter(|merchant| matches_search(merchant, term))
        .collect()
}

/// Orders merchants in place. The sort is stable: records with equal keys
/// keep their relative order.
#[inline]
pub fn sort(merchants: &mut [&Merchant], config: SortConfig) {
    let mut collator = Collator::default();
    merchants.sort_by(|a, b| config.compare_with(&mut collator, a, b));
}

/// Returns the number of pages needed for `count` items (0 when empty).
#[inline]
#[must_use]
pub const fn total_pages(count: usize) -> usize {
    count.div_ceil(PAGE_SIZE)
}

/// Returns the items on 1-based `page`.
///
/// Page 0 is treated as page 1; a page past the end yields an empty vector.
#[inline]
#[must_use]
pub fn paginate<T: Clone>(items: &[T], page: usize) -> Vec<T> {
    let start = page.max(1).saturating_sub(1).saturating_mul(PAGE_SIZE);
    items.iter().skip(start).take(PAGE_SIZE).cloned().collect()
}

/// Returns the page numbers to offer as direct links: at most three, around
/// `current`, shifted left when `current` is near the end.
#[inline]
#[must_use]
pub fn page_window(current: usize, total: usize) -> Vec<usize> {
    let mut start = current.saturating_sub(1).max(1);
    let end = start.saturating_add(PAGE_WINDOW - 1).min(total);
    if end == total {
        start = end.saturating_sub(PAGE_WINDOW - 1).max(1);
    }
    (start..=end).collect()
}

/// View parameters of the merchant list: search term, ordering, and page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerchantQuery {
    /// Case-insensitive substring to look for.
    pub search: String,
    /// Ordering of the matching merchants.
    pub sort: SortConfig,
    /// 1-based page to return.
    pub page: usize,
}

impl Default for MerchantQuery {
    #[inline]
    fn default() -> Self {
        Self {
            search: String::new(),
            sort: SortConfig::default(),
            page: 1,
        }
    }
}

impl MerchantQuery {
    /// Creates a query for page 1 of all merchants ordered by name.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to merchants matching `term`.
    #[inline]
    #[must_use]
    pub fn search<T: Into<String>>(mut self, term: T) -> Self {
        self.search = term.into();
        self
    }

    /// Orders ascending by `field`.
    #[inline]
    #[must_use]
    pub const fn sort_by(mut self, field: SortField) -> Self {
        self.sort = SortConfig::new(field, SortOrder::Asc);
        self
    }

    /// Sets the full sort configuration.
    #[inline]
    #[must_use]
    pub const fn sort(mut self, config: SortConfig) -> Self {
        self.sort = config;
        self
    }

    /// Selects the 1-based page.
    #[inline]
    #[must_use]
    pub const fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    /// Returns every matching merchant in display order, across all pages.
    #[inline]
    #[must_use]
    pub fn ordered<'src>(&self, merchants: &'src [Merchant]) -> Vec<&'src Merchant> {
        let mut matching = filter(merchants, &self.search);
        sort(&mut matching, self.sort);
        matching
    }

    /// Runs the full pipeline and returns the requested page.
    #[inline]
    #[must_use]
    pub fn run(&self, merchants: &[Merchant]) -> MerchantPage {
        let ordered = self.ordered(merchants);
        let page = self.page.max(1);
        MerchantPage {
            items: paginate(&ordered, page).into_iter().cloned().collect(),
            page,
            total_pages: total_pages(ordered.len()),
            total_items: ordered.len(),
        }
    }
}

/// One page of the filtered and sorted merchant list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantPage {
    /// Merchants on this page, in display order.
    pub items: Vec<Merchant>,
    /// 1-based page number.
    pub page: usize,
    /// Number of pages for the current filter.
    pub total_pages: usize,
    /// Number of merchants matching the current filter.
    pub total_items: usize,
}

impl MerchantPage {
    /// Returns `true` if an earlier page exists.
    #[inline]
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Returns `true` if a later page exists.
    #[inline]
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Returns the 1-based, inclusive positions of the first and last
    /// merchant shown, or `None` if the page is empty.
    #[inline]
    #[must_use]
    pub fn showing(&self) -> Option<(usize, usize)> {
        if self.items.is_empty() {
            return None;
        }
        let first = self
            .page
            .saturating_sub(1)
            .saturating_mul(PAGE_SIZE)
            .saturating_add(1);
        let last = first.saturating_add(self.items.len()).saturating_sub(1);
        Some((first, last))
    }

    /// Returns the page numbers to link to from this page.
    #[inline]
    #[must_use]
    pub fn page_numbers(&self) -> Vec<usize> {
        page_window(self.page, self.total_pages)
    }

    /// Returns `true` if pages exist before the linked window.
    #[inline]
    #[must_use]
    pub fn has_leading_gap(&self) -> bool {
        self.page_numbers().first().is_some_and(|&first| first > 1)
    }

    /// Returns `true` if pages exist after the linked window.
    #[inline]
    #[must_use]
    pub fn has_trailing_gap(&self) -> bool {
        self.page_numbers()
            .last()
            .is_some_and(|&last| last < self.total_pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MerchantId, MerchantStatus, NaiveDate, seed_merchants};

    fn names(items: &[&Merchant]) -> Vec<String> {
        items.iter().map(|m| m.name.clone()).collect()
    }

    fn merchant(id: u64, name: &str, store: &str) -> Merchant {
        Merchant {
            id: MerchantId::new(id),
            name: name.to_owned(),
            email: format!("m{id}@example.com"),
            store: store.to_owned(),
            status: MerchantStatus::Active,
            join_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }

    #[test]
    fn filter_partitions_collection() {
        let merchants = seed_merchants().unwrap();
        for term in ["", "WILSON", "example", "shop", "zzz", "e"] {
            let kept = filter(&merchants, term);
            let needle = term.to_lowercase();
            let contains = |m: &Merchant| {
                m.name.to_lowercase().contains(&needle)
                    || m.email.to_lowercase().contains(&needle)
                    || m.store.to_lowercase().contains(&needle)
            };
            assert!(kept.iter().all(|m| contains(*m)), "term {term:?}");
            let excluded = merchants
                .iter()
                .filter(|m| !kept.iter().any(|k| k.id == m.id));
            assert!(excluded.clone().all(|m| !contains(m)), "term {term:?}");
            assert_eq!(kept.len() + excluded.count(), merchants.len());
        }
    }

    #[test]
    fn filter_matches_email_and_store() {
        let merchants = seed_merchants().unwrap();
        assert_eq!(names(&filter(&merchants, "sarah@")), vec!["Sarah Johnson"]);
        assert_eq!(names(&filter(&merchants, "book haven")), vec!["Anna Lee"]);
        assert!(filter(&merchants, "nobody").is_empty());
    }

    #[test]
    fn sort_by_name_ascending() {
        let merchants = seed_merchants().unwrap();
        let mut items = filter(&merchants, "");
        sort(&mut items, SortConfig::default());
        assert_eq!(
            names(&items),
            vec![
                "Alex Wilson",
                "Anna Lee",
                "Emma Davis",
                "John Smith",
                "Lisa Chen",
                "Mike Brown",
                "Sarah Johnson",
                "Tom Wilson",
            ]
        );
    }

    #[test]
    fn descending_reverses_ascending_without_ties() {
        let merchants = seed_merchants().unwrap();
        for field in [SortField::Name, SortField::Store, SortField::JoinDate] {
            let mut asc = filter(&merchants, "");
            sort(&mut asc, SortConfig::new(field, SortOrder::Asc));
            let mut desc = filter(&merchants, "");
            sort(&mut desc, SortConfig::new(field, SortOrder::Desc));
            asc.reverse();
            assert_eq!(names(&asc), names(&desc), "field {field}");
        }
    }

    #[test]
    fn sort_is_case_insensitive() {
        let merchants = vec![merchant(1, "bob", "x1"), merchant(2, "Alice", "x2"), merchant(3, "carol", "x3")];
        let mut items = filter(&merchants, "");
        sort(&mut items, SortConfig::default());
        assert_eq!(names(&items), vec!["Alice", "bob", "carol"]);
    }

    #[test]
    fn accented_names_collate_with_their_base_letter() {
        let merchants = vec![
            merchant(1, "Zoe Park", "s1"),
            merchant(2, "Élodie Martin", "s2"),
            merchant(3, "Bob", "s3"),
        ];
        let mut items = filter(&merchants, "");
        sort(&mut items, SortConfig::default());
        assert_eq!(names(&items), vec!["Bob", "Élodie Martin", "Zoe Park"]);

        sort(&mut items, SortConfig::new(SortField::Name, SortOrder::Desc));
        assert_eq!(names(&items), vec!["Zoe Park", "Élodie Martin", "Bob"]);

        let config = SortConfig::default();
        let elodie = merchants.get(1).unwrap();
        let zoe = merchants.first().unwrap();
        assert_eq!(config.compare(elodie, zoe), Ordering::Less);
    }

    #[test]
    fn sort_is_stable_for_ties() {
        let merchants = seed_merchants().unwrap();
        let mut items = filter(&merchants, "");
        sort(&mut items, SortConfig::new(SortField::Status, SortOrder::Asc));
        let ids: Vec<u64> = items.iter().map(|m| m.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 4, 5, 6, 8, 3, 7]);
    }

    #[test]
    fn join_date_orders_chronologically() {
        let merchants = seed_merchants().unwrap();
        let mut items = filter(&merchants, "");
        sort(&mut items, SortConfig::new(SortField::JoinDate, SortOrder::Desc));
        assert_eq!(items.first().map(|m| m.name.as_str()), Some("Anna Lee"));
        assert_eq!(items.last().map(|m| m.name.as_str()), Some("John Smith"));
    }

    #[test]
    fn toggle_flips_same_field_and_resets_new_field() {
        let config = SortConfig::default();
        let once = config.toggled(SortField::Name);
        assert_eq!(once, SortConfig::new(SortField::Name, SortOrder::Desc));
        assert_eq!(once.toggled(SortField::Name), SortConfig::default());
        assert_eq!(
            once.toggled(SortField::Store),
            SortConfig::new(SortField::Store, SortOrder::Asc)
        );
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(5), 1);
        assert_eq!(total_pages(6), 2);
        assert_eq!(total_pages(10), 2);
        assert_eq!(total_pages(11), 3);
    }

    #[test]
    fn paginate_slices_and_clamps() {
        let items: Vec<u32> = (1..=8).collect();
        assert_eq!(paginate(&items, 1), vec![1, 2, 3, 4, 5]);
        assert_eq!(paginate(&items, 2), vec![6, 7, 8]);
        assert!(paginate(&items, 3).is_empty());
        assert!(paginate(&items, usize::MAX).is_empty());
        assert_eq!(paginate(&items, 0), paginate(&items, 1));
        assert!(paginate::<u32>(&[], 1).is_empty());
    }

    #[test]
    fn seeded_first_page_by_name() {
        let merchants = seed_merchants().unwrap();
        let page = MerchantQuery::new().run(&merchants);
        let shown: Vec<&str> = page.items.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(
            shown,
            vec!["Alex Wilson", "Anna Lee", "Emma Davis", "John Smith", "Lisa Chen"]
        );
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.total_items, 8);
        assert_eq!(page.showing(), Some((1, 5)));
        assert!(page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn second_page_shows_remainder() {
        let merchants = seed_merchants().unwrap();
        let page = MerchantQuery::new().page(2).run(&merchants);
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.showing(), Some((6, 8)));
        assert!(!page.has_next());
        assert!(page.has_previous());
    }

    #[test]
    fn run_is_pure() {
        let merchants = seed_merchants().unwrap();
        let query = MerchantQuery::new()
            .search("o")
            .sort(SortConfig::new(SortField::Store, SortOrder::Desc))
            .page(2);
        assert_eq!(query.run(&merchants), query.run(&merchants));
    }

    #[test]
    fn out_of_range_page_is_empty() {
        let merchants = seed_merchants().unwrap();
        let page = MerchantQuery::new().page(9).run(&merchants);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.showing(), None);
    }

    #[test]
    fn empty_result_has_zero_pages() {
        let merchants = seed_merchants().unwrap();
        let page = MerchantQuery::new().search("nobody").run(&merchants);
        assert_eq!(page.total_pages, 0);
        assert!(page.page_numbers().is_empty());
        assert!(!page.has_leading_gap());
        assert!(!page.has_trailing_gap());
    }

    #[test]
    fn page_window_centres_and_shifts() {
        assert_eq!(page_window(1, 1), vec![1]);
        assert_eq!(page_window(1, 2), vec![1, 2]);
        assert_eq!(page_window(1, 10), vec![1, 2, 3]);
        assert_eq!(page_window(5, 10), vec![4, 5, 6]);
        assert_eq!(page_window(10, 10), vec![8, 9, 10]);
        assert_eq!(page_window(9, 10), vec![8, 9, 10]);
        assert!(page_window(1, 0).is_empty());
    }

    #[test]
    fn gaps_around_window() {
        let merchants: Vec<Merchant> = (1..=30)
            .map(|n| merchant(n, &format!("Merchant {n:02}"), "Store"))
            .collect();
        let page = MerchantQuery::new().page(3).run(&merchants);
        assert_eq!(page.total_pages, 6);
        assert_eq!(page.page_numbers(), vec![2, 3, 4]);
        assert!(page.has_leading_gap());
        assert!(page.has_trailing_gap());
    }
}
