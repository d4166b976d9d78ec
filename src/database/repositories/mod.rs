pub mod administrators;
pub mod condominiums;
pub mod financial_entries;
pub mod residents;
pub mod units;
pub mod users;

use crate::config;

/// Pagination window for scoped list queries, clamped to the configured
/// ceiling.
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    pub fn clamped(limit: Option<i64>, offset: Option<i64>) -> Self {
        let api = &config::config().api;
        let limit = limit
            .unwrap_or(api.default_page_size)
            .clamp(1, api.max_page_size);
        let offset = offset.unwrap_or(0).max(0);
        Self { limit, offset }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_defaults_and_clamps() {
        let page = Page::clamped(None, None);
        assert_eq!(page.limit, crate::config::config().api.default_page_size);
        assert_eq!(page.offset, 0);

        let page = Page::clamped(Some(0), Some(-5));
        assert_eq!(page.limit, 1);
        assert_eq!(page.offset, 0);

        let ceiling = crate::config::config().api.max_page_size;
        let page = Page::clamped(Some(ceiling + 1000), Some(20));
        assert_eq!(page.limit, ceiling);
        assert_eq!(page.offset, 20);
    }
}
