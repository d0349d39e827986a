//! Transaction display formatting

use crate::models::TransactionRecord;

/// Format transaction details for display ahead of the allocation prompt
pub fn format_transaction_details(record: &TransactionRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("  ID:      {}\n", record.id()));
    output.push_str(&format!("  Date:    {}\n", record.posted_text()));
    output.push_str(&format!("  Type:    {}\n", record.direction()));
    output.push_str(&format!("  Amount:  {}\n", record.amount()));
    output.push_str(&format!("  Name:    {}\n", record.description()));
    output.push_str(&format!("  Memo:    {}\n", record.memo().unwrap_or("")));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, RawEntry};
    use chrono::DateTime;

    #[test]
    fn test_format_details() {
        let record = TransactionRecord::from_raw(RawEntry {
            id: "Redacted3".into(),
            posted: DateTime::parse_from_rfc3339("2024-11-05T12:00:00+00:00").unwrap(),
            direction: "DEBIT".into(),
            amount: Money::parse("-15.96").unwrap(),
            description: "Transaction 3".into(),
            memo: Some("online".into()),
        })
        .unwrap();

        let output = format_transaction_details(&record);
        assert!(output.contains("ID:      Redacted3"));
        assert!(output.contains("Date:    2024-11-05T12:00:00+00:00"));
        assert!(output.contains("Type:    DEBIT"));
        assert!(output.contains("Amount:  -15.96"));
        assert!(output.contains("Memo:    online"));
    }
}
