//! Filter and page derivation over the blocklist.
//!
//! # Design
//! - Filtering is recomputed from the full list every time.
//! - The paginator stores only the page number and filter term; everything else is derived.

/// Entries shown per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Case-insensitive substring filter on the term as typed; an empty term keeps everything.
#[must_use]
pub fn filter_entries<'a>(items: &'a [String], term: &str) -> Vec<&'a String> {
    if term.is_empty() {
        return items.iter().collect();
    }
    let needle = term.to_lowercase();
    items
        .iter()
        .filter(|item| item.to_lowercase().contains(&needle))
        .collect()
}

/// Page count for `count` items, never below one.
#[must_use]
pub const fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 || count == 0 {
        return 1;
    }
    count.div_ceil(page_size)
}

/// Current page and filter term.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Paginator {
    page: usize,
    filter: String,
    page_size: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Paginator {
    /// Paginator on page one with no filter.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            filter: String::new(),
            page_size: page_size.max(1),
        }
    }

    /// One-based current page.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Filter term as typed.
    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Fixed page size.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Replace the filter term; a different term resets to page one.
    pub fn set_filter(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        if term == self.filter {
            return false;
        }
        self.filter = term;
        self.page = 1;
        true
    }

    /// Advance one page unless already on the last.
    pub fn next(&mut self, total_pages: usize) -> bool {
        if self.page >= total_pages {
            return false;
        }
        self.page += 1;
        true
    }

    /// Go back one page unless already on the first.
    pub fn prev(&mut self) -> bool {
        if self.page <= 1 {
            return false;
        }
        self.page -= 1;
        true
    }

    /// Pull the page back inside `[1, total_pages]` after the list shrank.
    pub fn reconcile(&mut self, total_pages: usize) -> bool {
        let clamped = self.page.clamp(1, total_pages.max(1));
        if clamped == self.page {
            return false;
        }
        self.page = clamped;
        true
    }

    /// Derive the visible page for `items`.
    #[must_use]
    pub fn view<'a>(&self, items: &'a [String]) -> PageView<'a> {
        let filtered = filter_entries(items, &self.filter);
        let total = total_pages(filtered.len(), self.page_size);
        let page = self.page.clamp(1, total);
        let start_index = (page - 1) * self.page_size;
        let filtered_count = filtered.len();
        let visible = filtered
            .into_iter()
            .skip(start_index)
            .take(self.page_size)
            .collect();
        PageView {
            items: visible,
            page,
            page_size: self.page_size,
            total_pages: total,
            filtered_count,
            total_count: items.len(),
            start_index,
        }
    }
}

/// Visible slice of a filtered list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageView<'a> {
    /// Entries on this page, in list order.
    pub items: Vec<&'a String>,
    /// One-based page shown.
    pub page: usize,
    /// Fixed page size.
    pub page_size: usize,
    /// Page count for the filtered list, at least one.
    pub total_pages: usize,
    /// Entries that match the filter.
    pub filtered_count: usize,
    /// Entries before filtering.
    pub total_count: usize,
    /// Zero-based index of the first visible entry within the filtered list.
    pub start_index: usize,
}

impl PageView<'_> {
    /// Visible entries as owned strings, for the selection controller.
    #[must_use]
    pub fn visible_ids(&self) -> Vec<String> {
        self.items.iter().map(|item| (*item).clone()).collect()
    }

    /// Nothing matches; render the empty state instead of a pager.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.filtered_count == 0
    }

    /// Pager is only worth rendering when there is more than one page of matches.
    #[must_use]
    pub const fn needs_pager(&self) -> bool {
        !self.is_empty() && self.total_pages > 1
    }

    /// One-based `(first, last)` positions of the visible entries within the filtered list.
    #[must_use]
    pub fn shown_range(&self) -> (usize, usize) {
        if self.items.is_empty() {
            return (0, 0);
        }
        (self.start_index + 1, self.start_index + self.items.len())
    }

    /// Previous page exists.
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Next page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(count: usize) -> Vec<String> {
        (1..=count).map(|n| format!("site{n}.com")).collect()
    }

    #[test]
    fn twenty_five_entries_span_three_pages() {
        let items = entries(25);
        let mut pager = Paginator::default();
        let first = pager.view(&items);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.items.first().map(|s| s.as_str()), Some("site1.com"));
        assert_eq!(first.items.len(), 10);

        assert!(pager.next(first.total_pages));
        assert!(pager.next(first.total_pages));
        let last = pager.view(&items);
        assert_eq!(last.items.len(), 5);
        assert_eq!(last.start_index, 20);
        assert_eq!(last.items.first().map(|s| s.as_str()), Some("site21.com"));
        assert_eq!(last.items.last().map(|s| s.as_str()), Some("site25.com"));

        assert!(!pager.next(last.total_pages));
        assert_eq!(pager.page(), 3);
    }

    #[test]
    fn prev_is_noop_on_first_page() {
        let mut pager = Paginator::default();
        assert!(!pager.prev());
        assert_eq!(pager.page(), 1);
    }

    #[test]
    fn filter_change_resets_page() {
        let items = entries(25);
        let mut pager = Paginator::default();
        pager.next(3);
        assert_eq!(pager.page(), 2);
        assert!(pager.set_filter("SITE2"));
        assert_eq!(pager.page(), 1);
        let view = pager.view(&items);
        assert_eq!(view.filtered_count, 7);
        assert_eq!(view.total_count, 25);
        assert!(!pager.set_filter("SITE2"));
    }

    #[test]
    fn empty_filter_matches_everything() {
        let items = entries(3);
        assert_eq!(filter_entries(&items, "").len(), 3);
        assert!(filter_entries(&items, "   ").is_empty());
        assert!(filter_entries(&items, "nomatch").is_empty());
    }

    #[test]
    fn term_is_matched_as_typed() {
        let items = vec!["ads.net".to_string(), "my ads.net".to_string()];
        assert_eq!(filter_entries(&items, " ads"), vec![&items[1]]);
        assert_eq!(filter_entries(&items, "ADS.NET").len(), 2);
    }

    #[test]
    fn empty_list_has_one_page_and_is_empty() {
        let pager = Paginator::default();
        let view = pager.view(&[]);
        assert_eq!(view.total_pages, 1);
        assert!(view.is_empty());
        assert!(!view.has_next());
        assert!(!view.has_prev());
    }

    #[test]
    fn pager_only_for_multiple_pages_of_matches() {
        let pager = Paginator::default();
        assert!(!pager.view(&[]).needs_pager());
        assert!(!pager.view(&entries(10)).needs_pager());
        assert!(pager.view(&entries(11)).needs_pager());
    }

    #[test]
    fn shown_range_covers_the_partial_last_page() {
        let items = entries(25);
        let mut pager = Paginator::default();
        assert_eq!(pager.view(&items).shown_range(), (1, 10));
        pager.next(3);
        pager.next(3);
        assert_eq!(pager.view(&items).shown_range(), (21, 25));
        assert_eq!(pager.view(&[]).shown_range(), (0, 0));
    }

    #[test]
    fn reconcile_clamps_after_shrink() {
        let mut pager = Paginator::default();
        pager.next(3);
        pager.next(3);
        assert!(pager.reconcile(2));
        assert_eq!(pager.page(), 2);
        assert!(!pager.reconcile(2));
        assert!(pager.reconcile(0));
        assert_eq!(pager.page(), 1);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
    }
}
