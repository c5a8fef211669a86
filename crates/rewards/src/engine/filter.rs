use super::calendar::MonthBucket;
use super::domain::EnrichedTransaction;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Transactions whose purchase date falls inside the closed interval
/// `[start, end]`. A `None` bound leaves that side unbounded, matching the
/// dashboard search fields where an empty "from" or "to" skips the
/// comparison entirely.
pub fn filter_by_range(
    transactions: &[EnrichedTransaction],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<EnrichedTransaction> {
    transactions
        .iter()
        .filter(|enriched| {
            let date = enriched.transaction.purchase_date;
            start.map_or(true, |from| date >= from) && end.map_or(true, |to| date <= to)
        })
        .cloned()
        .collect()
}

/// Distinct customer names, ascending lexical order.
pub fn unique_customer_names(transactions: &[EnrichedTransaction]) -> Vec<String> {
    let names: BTreeSet<String> = transactions
        .iter()
        .map(|enriched| enriched.transaction.customer_name.clone())
        .collect();
    names.into_iter().collect()
}

/// Distinct `MM/YYYY` buckets, descending lexical order.
///
/// The keys compare as strings, not chronologically: "12/2023" sorts after
/// "01/2024". This mirrors the existing month dropdown ordering.
pub fn unique_month_buckets(transactions: &[EnrichedTransaction]) -> Vec<String> {
    let buckets: BTreeSet<String> = transactions
        .iter()
        .map(|enriched| MonthBucket::of(enriched.transaction.purchase_date).key())
        .collect();
    buckets.into_iter().rev().collect()
}
