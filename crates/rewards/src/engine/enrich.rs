use super::domain::{EnrichedTransaction, Transaction};
use super::points::points_for;

/// Annotate every transaction with its computed reward points.
///
/// Same length and order as the input; the input itself is never touched.
pub fn enrich(transactions: &[Transaction]) -> Vec<EnrichedTransaction> {
    transactions
        .iter()
        .map(|transaction| EnrichedTransaction {
            transaction: transaction.clone(),
            reward_points: points_for(transaction.price),
        })
        .collect()
}

/// Newest-first copy of the transaction list for the dashboard listing.
/// The sort is stable, so transactions sharing a date keep their relative
/// snapshot order.
pub fn sort_by_date_descending(transactions: &[EnrichedTransaction]) -> Vec<EnrichedTransaction> {
    let mut sorted = transactions.to_vec();
    sorted.sort_by(|a, b| {
        b.transaction
            .purchase_date
            .cmp(&a.transaction.purchase_date)
    });
    sorted
}
