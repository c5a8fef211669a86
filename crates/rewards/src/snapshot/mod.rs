//! Transaction snapshot acquisition.
//!
//! The engine itself never performs I/O; these importers produce the
//! in-memory `Vec<Transaction>` it consumes, either from the JSON array
//! the upstream transactions API serves or from a CSV export of the same
//! table.

mod parser;

use crate::engine::domain::Transaction;
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read transaction snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid transaction JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid transaction CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("transaction {id}: {message}")]
    Date { id: String, message: String },
}

pub struct TransactionSnapshot;

impl TransactionSnapshot {
    /// Load a snapshot, picking the format from the file extension
    /// (`.csv` for CSV, anything else is treated as JSON).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Transaction>, SnapshotError> {
        let path = path.as_ref();
        let is_csv = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("csv"));
        let file = std::fs::File::open(path)?;
        if is_csv {
            Self::from_csv_reader(file)
        } else {
            Self::from_json_reader(file)
        }
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Vec<Transaction>, SnapshotError> {
        let transactions: Vec<Transaction> = serde_json::from_reader(reader)?;
        Ok(transactions)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Vec<Transaction>, SnapshotError> {
        parser::parse_records(reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn json_snapshot_parses_the_upstream_array() {
        let raw = r#"[
            {"id":"t-001","customerId":"c-001","customerName":"Ana","purchaseDate":"2024-01-15","productPurchased":"Laptop","price":120.0},
            {"id":"t-002","customerId":"c-002","customerName":"Bela","purchaseDate":"2024-01-25","productPurchased":"Monitor","price":150.0}
        ]"#;

        let transactions =
            TransactionSnapshot::from_json_reader(Cursor::new(raw)).expect("snapshot parses");
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[1].customer_name, "Bela");
    }

    #[test]
    fn json_snapshot_keeps_records_with_malformed_prices() {
        let raw = r#"[
            {"id":"t-001","customerId":"c-001","customerName":"Ana","purchaseDate":"2024-01-15","productPurchased":"Laptop","price":"not a number"}
        ]"#;

        let transactions =
            TransactionSnapshot::from_json_reader(Cursor::new(raw)).expect("record survives");
        assert!(transactions[0].price.is_nan());
    }

    #[test]
    fn json_snapshot_rejects_non_array_payloads() {
        let err = TransactionSnapshot::from_json_reader(Cursor::new(r#"{"status":"ok"}"#))
            .expect_err("object is not a snapshot");
        assert!(matches!(err, SnapshotError::Json(_)));
    }

    #[test]
    fn csv_snapshot_parses_the_export_headers() {
        let raw = "\
id,customerId,customerName,purchaseDate,productPurchased,price
t-001,c-001,Ana,2024-01-15,Laptop,120.00
t-002,c-002,Bela,2024-01-25,Monitor,150.75
";

        let transactions =
            TransactionSnapshot::from_csv_reader(Cursor::new(raw)).expect("csv parses");
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].price, 120.0);
        assert_eq!(transactions[1].product_purchased, "Monitor");
    }

    #[test]
    fn csv_snapshot_degrades_blank_price_to_nan() {
        let raw = "\
id,customerId,customerName,purchaseDate,productPurchased,price
t-001,c-001,Ana,2024-01-15,Laptop,
";

        let transactions =
            TransactionSnapshot::from_csv_reader(Cursor::new(raw)).expect("record survives");
        assert!(transactions[0].price.is_nan());
    }

    #[test]
    fn csv_snapshot_rejects_unparseable_dates() {
        let raw = "\
id,customerId,customerName,purchaseDate,productPurchased,price
t-001,c-001,Ana,01/15/2024,Laptop,120.00
";

        let err = TransactionSnapshot::from_csv_reader(Cursor::new(raw))
            .expect_err("bad date is a boundary error");
        match err {
            SnapshotError::Date { id, .. } => assert_eq!(id, "t-001"),
            other => panic!("expected date error, got {other:?}"),
        }
    }
}
