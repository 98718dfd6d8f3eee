//! Admin list filter, search and pagination state.

use crate::domain::foundation::Rating;

/// Rows requested per page.
pub const PAGE_SIZE: u32 = 10;

/// Query parameters for one page of the review list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewQuery {
    pub rating: Option<Rating>,
    pub search: Option<String>,
    pub limit: u32,
    pub offset: u32,
}

impl ReviewQuery {
    /// Query-string pairs; rating and search only when set.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(4);
        if let Some(rating) = self.rating {
            params.push(("rating", rating.to_string()));
        }
        if let Some(search) = &self.search {
            params.push(("search", search.clone()));
        }
        params.push(("limit", self.limit.to_string()));
        params.push(("offset", self.offset.to_string()));
        params
    }
}

/// Filter state owned by the admin dashboard.
///
/// Page numbers start at 1 and changing the rating filter or search term
/// always returns to page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewFilter {
    rating: Option<Rating>,
    search_term: String,
    page: u32,
}

impl Default for ReviewFilter {
    fn default() -> Self {
        Self {
            rating: None,
            search_term: String::new(),
            page: 1,
        }
    }
}

impl ReviewFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rating(&self) -> Option<Rating> {
        self.rating
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// True when a rating filter or search term narrows the list.
    pub fn is_active(&self) -> bool {
        self.rating.is_some() || !self.search_term.is_empty()
    }

    pub fn set_rating(&mut self, rating: Option<Rating>) {
        self.rating = rating;
        self.page = 1;
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.page = 1;
    }

    /// Jumps to `page`, clamped to at least 1.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Moves forward unless the last fetched page was short.
    pub fn next_page(&mut self, last_page_len: usize, page_size: u32) -> bool {
        if Pagination::next_disabled(last_page_len, page_size) {
            return false;
        }
        self.page += 1;
        true
    }

    /// Moves back unless already on page 1.
    pub fn previous_page(&mut self) -> bool {
        if self.page <= 1 {
            return false;
        }
        self.page -= 1;
        true
    }

    pub fn offset(&self, page_size: u32) -> u32 {
        (self.page - 1) * page_size
    }

    pub fn query(&self, page_size: u32) -> ReviewQuery {
        ReviewQuery {
            rating: self.rating,
            search: (!self.search_term.is_empty()).then(|| self.search_term.clone()),
            limit: page_size,
            offset: self.offset(page_size),
        }
    }
}

/// Pagination controls derived from the current page and its row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub previous_disabled: bool,
    pub next_disabled: bool,
}

impl Pagination {
    pub fn new(page: u32, rows: usize, page_size: u32) -> Self {
        Self {
            page,
            previous_disabled: page <= 1,
            next_disabled: Self::next_disabled(rows, page_size),
        }
    }

    /// A short page is taken to be the last one.
    pub fn next_disabled(rows: usize, page_size: u32) -> bool {
        rows < page_size as usize
    }

    pub fn label(&self) -> String {
        format!("Page {}", self.page)
    }
}

/// Options offered by the rating filter control, "All Ratings" first.
pub fn rating_filter_options() -> Vec<(Option<Rating>, String)> {
    std::iter::once((None, "All Ratings".to_string()))
        .chain(Rating::ALL.iter().rev().map(|r| (Some(*r), r.label())))
        .collect()
}
