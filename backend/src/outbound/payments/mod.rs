//! Payment vendor adapter.

mod http_accounts;

pub use http_accounts::HttpPaymentAccounts;
