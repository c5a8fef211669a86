use super::calendar::{month_index, MonthBucket};
use super::domain::{EnrichedTransaction, MonthlyRewardRecord, TotalRewardRecord};
use std::collections::BTreeMap;

/// Roll enriched transactions up into one record per (customer, calendar
/// month) pair.
///
/// Accumulation runs over an ordered map keyed by the composite
/// `(customer_id, bucket)` tuple, so customer ids and month keys can never
/// collide the way concatenated string keys could. The first transaction
/// seen for a pair fixes the customer name and the month labels.
///
/// Emission order: year descending, then month descending within a year,
/// then customer name ascending (ordinal comparison) within a month.
pub fn aggregate_monthly(transactions: &[EnrichedTransaction]) -> Vec<MonthlyRewardRecord> {
    let mut by_customer_month: BTreeMap<(String, MonthBucket), MonthlyRewardRecord> =
        BTreeMap::new();

    for enriched in transactions {
        let transaction = &enriched.transaction;
        let bucket = MonthBucket::of(transaction.purchase_date);
        let record = by_customer_month
            .entry((transaction.customer_id.clone(), bucket))
            .or_insert_with(|| MonthlyRewardRecord {
                customer_id: transaction.customer_id.clone(),
                customer_name: transaction.customer_name.clone(),
                month: bucket.month_name(),
                year: bucket.year,
                month_year: bucket.key(),
                reward_points: 0,
            });
        record.reward_points += enriched.reward_points;
    }

    let mut records: Vec<MonthlyRewardRecord> = by_customer_month.into_values().collect();
    records.sort_by(|a, b| {
        b.year
            .cmp(&a.year)
            .then_with(|| month_index(b.month).cmp(&month_index(a.month)))
            .then_with(|| a.customer_name.cmp(&b.customer_name))
    });
    records
}

/// Roll enriched transactions up into one all-time record per customer,
/// highest point total first.
///
/// The accumulator map is ordered by customer id and the final sort is
/// stable, so customers with equal totals emit in ascending id order.
pub fn aggregate_total(transactions: &[EnrichedTransaction]) -> Vec<TotalRewardRecord> {
    let mut by_customer: BTreeMap<String, TotalRewardRecord> = BTreeMap::new();

    for enriched in transactions {
        let transaction = &enriched.transaction;
        let record = by_customer
            .entry(transaction.customer_id.clone())
            .or_insert_with(|| TotalRewardRecord {
                customer_id: transaction.customer_id.clone(),
                customer_name: transaction.customer_name.clone(),
                reward_points: 0,
            });
        record.reward_points += enriched.reward_points;
    }

    let mut records: Vec<TotalRewardRecord> = by_customer.into_values().collect();
    records.sort_by(|a, b| b.reward_points.cmp(&a.reward_points));
    records
}
