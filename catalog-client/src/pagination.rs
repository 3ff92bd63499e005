//! Page strip math for paged lists

use shared::request::PageParams;

/// Pages shown without collapsing
const MAX_FULL_STRIP: u64 = 7;

/// One entry of the page strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u64),
    Ellipsis,
}

/// Pagination over `total` items, `page_size` per page, 1-based `current_page`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page_size: u64,
    pub total: u64,
    pub current_page: u64,
}

impl Pagination {
    pub fn new(page_size: u64, total: u64, current_page: u64) -> Self {
        Self {
            page_size: page_size.max(1),
            total,
            current_page: current_page.max(1),
        }
    }

    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(self.page_size).max(1)
    }

    /// 1-based index of the first item shown, 0 when empty
    pub fn range_start(&self) -> u64 {
        if self.total == 0 {
            0
        } else {
            self.skip() + 1
        }
    }

    pub fn range_end(&self) -> u64 {
        (self.current_page * self.page_size).min(self.total)
    }

    pub fn skip(&self) -> u64 {
        (self.current_page - 1) * self.page_size
    }

    /// Request parameters for the current page
    pub fn params(&self) -> PageParams {
        PageParams::new(
            i64::try_from(self.page_size).ok(),
            i64::try_from(self.skip()).ok(),
        )
    }

    /// Page strip: every page up to seven, otherwise first, neighbours of
    /// the current page and last, with ellipses for the gaps
    pub fn page_numbers(&self) -> Vec<PageItem> {
        let total_pages = self.total_pages();
        if total_pages <= MAX_FULL_STRIP {
            return (1..=total_pages).map(PageItem::Page).collect();
        }

        let p = self.current_page;
        let mut pages = vec![PageItem::Page(1)];
        if p > 3 {
            pages.push(PageItem::Ellipsis);
        }
        let from = p.saturating_sub(1).max(2);
        let to = (p + 1).min(total_pages - 1);
        pages.extend((from..=to).map(PageItem::Page));
        if p + 2 < total_pages {
            pages.push(PageItem::Ellipsis);
        }
        pages.push(PageItem::Page(total_pages));
        pages
    }
}
