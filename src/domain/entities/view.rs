use crate::domain::entities::record::Record;

pub const DEFAULT_PAGE_SIZE: usize = 25;
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 25, 50, 100];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Filter, sort and pagination configuration for one display session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub filter_query: String,
    pub sort_field: Option<String>,
    pub sort_direction: SortDirection,
    pub page_size: usize,
    pub page_index: usize,
}

impl ViewState {
    pub fn new(sort_field: Option<String>, sort_direction: SortDirection, page_size: usize) -> Self {
        Self {
            filter_query: String::new(),
            sort_field,
            sort_direction,
            page_size: page_size.max(1),
            page_index: 0,
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(Some("score".to_string()), SortDirection::Desc, DEFAULT_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow {
    pub record: Record,
    pub display_rank: usize,
    /// Position in the loaded dataset.
    pub load_index: usize,
}

/// Enabled state of the first/prev/next/last controls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Navigation {
    pub first: bool,
    pub prev: bool,
    pub next: bool,
    pub last: bool,
}

impl Navigation {
    pub fn for_page(page_index: usize, total_pages: usize) -> Self {
        let has_prev = page_index > 0;
        let has_next = page_index + 1 < total_pages;
        Self {
            first: has_prev,
            prev: has_prev,
            next: has_next,
            last: has_next,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewPage {
    pub rows: Vec<DisplayRow>,
    pub page_index: usize,
    pub total_pages: usize,
    pub filtered_count: usize,
    pub total_count: usize,
    pub navigation: Navigation,
}

impl Default for ViewPage {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            page_index: 0,
            total_pages: 1,
            filtered_count: 0,
            total_count: 0,
            navigation: Navigation::default(),
        }
    }
}
