use grc_data::Record;
use serde::{Deserialize, Serialize};

/// Above this many pages the link strip collapses with gaps.
const FULL_STRIP_PAGES: usize = 7;

/// Rows whose string form of any field contains `query`, ignoring case.
/// An empty query keeps every row.
pub fn search<'a, R: Record>(rows: &'a [R], query: &str) -> Vec<&'a R> {
    if query.is_empty() {
        return rows.iter().collect();
    }
    let needle = query.to_lowercase();
    rows.iter()
        .filter(|row| {
            row.field_values()
                .iter()
                .any(|value| value.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Page count for `total` rows, never below 1.
pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// Clamps a requested 1-based page into `[1, pages]`.
pub fn clamp_page(page: usize, pages: usize) -> usize {
    page.clamp(1, pages.max(1))
}

/// Entry of the page-link strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "page", rename_all = "kebab-case")]
pub enum PageLink {
    /// Link to a page.
    Page(usize),
    /// Skipped pages.
    Gap,
}

/// Compact link strip: every page up to seven pages, otherwise the first
/// page, the current page and its neighbours, and the last page.
pub fn page_links(current: usize, pages: usize) -> Vec<PageLink> {
    if pages <= FULL_STRIP_PAGES {
        return (1..=pages).map(PageLink::Page).collect();
    }
    let mut links = vec![PageLink::Page(1)];
    if current > 3 {
        links.push(PageLink::Gap);
    }
    let lo = current.saturating_sub(1).max(2);
    let hi = (current + 1).min(pages - 1);
    links.extend((lo..=hi).map(PageLink::Page));
    if current + 2 < pages {
        links.push(PageLink::Gap);
    }
    links.push(PageLink::Page(pages));
    links
}

/// Position of a served page within the searched rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Rows matching the search.
    pub total: usize,
    /// Served page, 1-based and clamped.
    pub page: usize,
    /// Page count, at least 1.
    pub pages: usize,
    /// Rows per page.
    pub page_size: usize,
    /// 1-based index of the first row shown; 0 when nothing is shown.
    pub start: usize,
    /// 1-based index of the last row shown.
    pub end: usize,
    /// A previous page exists.
    pub has_prev: bool,
    /// A next page exists.
    pub has_next: bool,
    /// Page-link strip.
    pub links: Vec<PageLink>,
}

impl PageMeta {
    /// `start–end de total`, as shown next to the pager.
    pub fn range_label(&self) -> String {
        format!("{}–{} de {}", self.start, self.end, self.total)
    }
}

/// A slice of rows plus its position.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    /// Position metadata.
    pub meta: PageMeta,
    /// Rows of the served page.
    pub rows: &'a [T],
}

/// Serves `page` of `rows`, clamping the page into range.
pub fn paginate<T>(rows: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total = rows.len();
    let pages = page_count(total, page_size);
    let page = clamp_page(page, pages);
    let offset = (page - 1) * page_size;
    let slice = &rows[offset.min(total)..(offset + page_size).min(total)];
    let meta = PageMeta {
        total,
        page,
        pages,
        page_size,
        start: if slice.is_empty() { 0 } else { offset + 1 },
        end: offset + slice.len(),
        has_prev: page > 1,
        has_next: page < pages,
        links: page_links(page, pages),
    };
    Page { meta, rows: slice }
}
