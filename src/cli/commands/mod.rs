pub mod accounts;
pub mod migrate;
