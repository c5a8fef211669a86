use crate::cli::ReportArgs;
use rewards::engine::{
    aggregate_monthly, aggregate_total, enrich, filter_by_range, sort_by_date_descending,
    EnrichedTransaction, MonthlyRewardRecord, TotalRewardRecord,
};
use rewards::error::AppError;
use rewards::snapshot::TransactionSnapshot;

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        transactions,
        from,
        to,
        list_transactions,
    } = args;

    let snapshot = TransactionSnapshot::from_path(&transactions)?;
    let enriched = enrich(&snapshot);
    let monthly = aggregate_monthly(&enriched);
    let totals = aggregate_total(&enriched);

    println!("Rewards dashboard report");
    println!(
        "Snapshot: {} ({} transactions)",
        transactions.display(),
        snapshot.len()
    );

    render_monthly(&monthly);
    render_totals(&totals);

    if list_transactions {
        let listing = filter_by_range(&sort_by_date_descending(&enriched), from, to);
        render_listing(&listing);
    }

    Ok(())
}

fn render_monthly(monthly: &[MonthlyRewardRecord]) {
    if monthly.is_empty() {
        println!("\nMonthly rewards: none");
        return;
    }

    println!("\nMonthly rewards");
    for record in monthly {
        println!(
            "- {} {} | {} | {} points",
            record.month, record.year, record.customer_name, record.reward_points
        );
    }
}

fn render_totals(totals: &[TotalRewardRecord]) {
    if totals.is_empty() {
        println!("\nTotal rewards: none");
        return;
    }

    println!("\nTotal rewards");
    for record in totals {
        println!("- {}: {} points", record.customer_name, record.reward_points);
    }
}

fn render_listing(listing: &[EnrichedTransaction]) {
    if listing.is_empty() {
        println!("\nTransactions: none in range");
        return;
    }

    println!("\nTransactions (newest first)");
    for enriched in listing {
        let transaction = &enriched.transaction;
        let price = if transaction.price.is_finite() {
            format!("${:.2}", transaction.price)
        } else {
            "$-".to_string()
        };
        println!(
            "- {} | {} | {} | {} | {} | {} points",
            transaction.id,
            transaction.customer_name,
            transaction.product_purchased,
            transaction.purchase_date,
            price,
            enriched.reward_points
        );
    }
}
