use super::SnapshotError;
use crate::engine::calendar::parse_date;
use crate::engine::domain::Transaction;
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<Transaction>, SnapshotError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut transactions = Vec::new();

    for record in csv_reader.deserialize::<TransactionRow>() {
        transactions.push(record?.into_transaction()?);
    }

    Ok(transactions)
}

#[derive(Debug, Deserialize)]
struct TransactionRow {
    #[serde(rename = "id")]
    id: String,
    #[serde(rename = "customerId")]
    customer_id: String,
    #[serde(rename = "customerName")]
    customer_name: String,
    #[serde(rename = "purchaseDate")]
    purchase_date: String,
    #[serde(rename = "productPurchased", default)]
    product_purchased: String,
    #[serde(rename = "price", default, deserialize_with = "empty_string_as_none")]
    price: Option<String>,
}

impl TransactionRow {
    fn into_transaction(self) -> Result<Transaction, SnapshotError> {
        // A price that does not parse earns zero points downstream; a date
        // that does not parse would corrupt the monthly grouping key, so it
        // is rejected here instead.
        let purchase_date =
            parse_date(&self.purchase_date).map_err(|message| SnapshotError::Date {
                id: self.id.clone(),
                message,
            })?;

        let price = self
            .price
            .as_deref()
            .and_then(|raw| raw.parse::<f64>().ok())
            .unwrap_or(f64::NAN);

        Ok(Transaction {
            id: self.id,
            customer_id: self.customer_id,
            customer_name: self.customer_name,
            purchase_date,
            product_purchased: self.product_purchased,
            price,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
