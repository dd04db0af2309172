//! Core business logic abstractions

pub mod config;
pub mod currency;
pub mod error;
pub mod log;
pub mod notify;
pub mod rate;

// Re-export main types for cleaner imports
pub use currency::CurrencyRateProvider;
pub use error::FetchError;
pub use notify::{Alert, Mailer};
pub use rate::RateRecord;
