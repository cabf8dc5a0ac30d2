/// Query parameters for one `GET users` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserQuery {
    /// Zero-based page index.
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
}

impl UserQuery {
    pub(crate) fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        pairs
    }
}

/// Paging state for the users listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    page_size: u32,
    total: u64,
    search: String,
}

impl Pagination {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 0,
            page_size: page_size.max(1),
            total: 0,
            search: String::new(),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn go_to(&mut self, page: u32) {
        self.page = page;
    }

    /// Updates the search text. A different search starts over at page 0.
    pub fn set_search(&mut self, search: &str) -> bool {
        let search = search.trim();
        if search == self.search {
            return false;
        }
        self.search = search.to_string();
        self.page = 0;
        true
    }

    /// Records the total reported by the server.
    pub fn set_total(&mut self, total: u64) {
        self.total = total;
    }

    /// Number of pages; an empty listing still has one (empty) page.
    pub fn page_count(&self) -> u32 {
        let pages = self.total.div_ceil(u64::from(self.page_size)).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    pub fn has_next(&self) -> bool {
        self.page.saturating_add(1) < self.page_count()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    /// Nearest valid page index for `page`.
    pub fn clamp(&self, page: u32) -> u32 {
        page.min(self.page_count() - 1)
    }

    /// `"{from}–{to} of {total}"`, e.g. `"11–20 of 42"`. A page with no rows
    /// (empty listing or past the end) reads `"0–0 of {total}"`.
    pub fn range_label(&self) -> String {
        let size = u64::from(self.page_size);
        let offset = u64::from(self.page).saturating_mul(size);
        if offset >= self.total {
            return format!("0–0 of {}", self.total);
        }
        let to = offset.saturating_add(size).min(self.total);
        format!("{}–{to} of {}", offset + 1, self.total)
    }

    pub fn query(&self) -> UserQuery {
        UserQuery {
            page: self.page,
            limit: self.page_size,
            search: (!self.search.is_empty()).then(|| self.search.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paged(total: u64, page: u32) -> Pagination {
        let mut p = Pagination::new(10);
        p.set_total(total);
        p.go_to(page);
        p
    }

    #[test]
    fn test_page_count_rounds_up() {
        assert_eq!(paged(42, 0).page_count(), 5);
        assert_eq!(paged(40, 0).page_count(), 4);
        assert_eq!(paged(0, 0).page_count(), 1);
    }

    #[test]
    fn test_navigation_bounds() {
        let first = paged(42, 0);
        assert!(!first.has_previous());
        assert!(first.has_next());

        let last = paged(42, 4);
        assert!(last.has_previous());
        assert!(!last.has_next());
        assert_eq!(last.clamp(9), 4);
        assert_eq!(paged(0, 0).clamp(3), 0);
    }

    #[test]
    fn test_range_label() {
        assert_eq!(paged(42, 0).range_label(), "1–10 of 42");
        assert_eq!(paged(42, 4).range_label(), "41–42 of 42");
        assert_eq!(paged(0, 0).range_label(), "0–0 of 0");
    }

    #[test]
    fn test_range_label_past_last_page() {
        assert_eq!(paged(42, 9).range_label(), "0–0 of 42");
        assert_eq!(paged(40, 4).range_label(), "0–0 of 40");
        assert_eq!(paged(40, 3).range_label(), "31–40 of 40");
    }

    #[test]
    fn test_new_search_resets_page() {
        let mut p = paged(42, 3);
        assert!(!p.set_search(""));
        assert_eq!(p.page(), 3);

        assert!(p.set_search("  ana "));
        assert_eq!(p.page(), 0);
        assert_eq!(p.search(), "ana");
        assert!(!p.set_search("ana"));
    }

    #[test]
    fn test_query_omits_empty_search() {
        let mut p = Pagination::new(0);
        assert_eq!(p.page_size(), 1);
        assert_eq!(
            p.query().to_pairs(),
            vec![("page", "0".to_string()), ("limit", "1".to_string())]
        );

        p.set_search("lima");
        assert_eq!(p.query().search.as_deref(), Some("lima"));
    }
}
