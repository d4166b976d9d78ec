pub mod administrator;
pub mod condominium;
pub mod financial_entry;
pub mod resident;
pub mod unit;
pub mod user;
