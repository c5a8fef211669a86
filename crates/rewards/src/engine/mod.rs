//! Pure rewards engine: every function here is a synchronous,
//! allocation-fresh transformation over an in-memory transaction
//! snapshot. No I/O, no shared state, nothing to cancel.

pub mod aggregate;
pub mod calendar;
pub mod domain;
pub mod enrich;
pub mod filter;
pub mod points;

pub use aggregate::{aggregate_monthly, aggregate_total};
pub use calendar::MonthBucket;
pub use domain::{EnrichedTransaction, MonthlyRewardRecord, TotalRewardRecord, Transaction};
pub use enrich::{enrich, sort_by_date_descending};
pub use filter::{filter_by_range, unique_customer_names, unique_month_buckets};
pub use points::points_for;
