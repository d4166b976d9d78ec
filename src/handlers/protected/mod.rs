pub mod account;
pub mod condominiums;
pub mod financial_entries;
pub mod residents;
pub mod units;
pub mod users;

use serde::Deserialize;

/// Query parameters shared by every scoped list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PageParams {
    pub fn page(&self) -> crate::database::repositories::Page {
        crate::database::repositories::Page::clamped(self.limit, self.offset)
    }
}
