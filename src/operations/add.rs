use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::bill::{BillDraft, BillStatus};
use crate::store::BillStore;

/// Parses a comma separated line into a validated draft:
/// `name, amount, due date(YYYY-MM-DD), category[, status][, note]`
pub fn parse_bill_draft(input: &str) -> Result<BillDraft, String> {
    // The note is the last field, so it may itself contain commas.
    let parts: Vec<&str> = input.splitn(6, ',').map(|s| s.trim()).collect();
    if parts.len() < 4 {
        return Err(format!(
            "Invalid number of details provided. Expected at least 4 details separated by commas but got {}",
            parts.len()
        ));
    }

    let name = parts[0].to_string();
    if name.is_empty() {
        return Err("Bill name cannot be empty.".to_string());
    }
    if name.len() > 255 {
        return Err("Bill name too long".to_string());
    }

    let amount = match parts[1].parse::<Decimal>() {
        Ok(parsed_amount) => parsed_amount,
        Err(_) => {
            return Err(format!(
                "Invalid amount format {}. Please provide a valid decimal number.",
                parts[1]
            ));
        }
    };
    if amount < Decimal::ZERO {
        return Err("Amount cannot be negative.".to_string());
    }

    let due_date = match NaiveDate::parse_from_str(parts[2], "%Y-%m-%d") {
        Ok(parsed_date) => parsed_date,
        Err(_) => {
            return Err("Invalid date format. Please use YYYY-MM-DD.".to_string());
        }
    };

    let category = parts[3].to_string();
    if category.is_empty() {
        return Err("Category cannot be empty.".to_string());
    }
    if category.len() > 50 {
        return Err("Category too long".to_string());
    }

    let status = match parts.get(4) {
        Some(raw) if !raw.is_empty() => Some(BillStatus::parse(raw)?),
        _ => None,
    };

    let note = parts.get(5).map(|raw| raw.to_string());

    Ok(BillDraft {
        name,
        amount,
        due_date,
        category,
        status,
        note,
    })
}

/// Parses the input line and appends the bill to the store, reporting the
/// assigned id.
pub fn add_bill(store: &mut BillStore, input: &str) -> Result<String, String> {
    let draft = parse_bill_draft(input)?;
    let bill = store.add(draft);
    Ok(format!("Added bill '{}' with id {}.", bill.name, bill.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parse_minimal_draft() {
        let draft = parse_bill_draft("Netflix, 15.99, 2024-08-27, Streaming").unwrap();
        assert_eq!(draft.name, "Netflix");
        assert_eq!(draft.amount, Decimal::from_str("15.99").unwrap());
        assert_eq!(
            draft.due_date,
            NaiveDate::from_ymd_opt(2024, 8, 27).unwrap()
        );
        assert_eq!(draft.category, "Streaming");
        assert!(draft.status.is_none());
        assert!(draft.note.is_none());
    }

    #[test]
    fn test_parse_draft_with_status_and_note() {
        let draft =
            parse_bill_draft("Car Insurance, 120.00, 2024-08-26, Insurance, overdue, Need to pay ASAP!")
                .unwrap();
        assert_eq!(draft.status, Some(BillStatus::Overdue));
        assert_eq!(draft.note.as_deref(), Some("Need to pay ASAP!"));
    }

    #[test]
    fn test_parse_rejects_wrong_field_count() {
        let err = parse_bill_draft("Netflix, 15.99").unwrap_err();
        assert!(err.contains("Expected at least 4 details"));
    }

    #[test]
    fn test_parse_keeps_commas_inside_the_note() {
        let draft =
            parse_bill_draft("Phone Bill, 45.00, 2024-08-28, Utilities, due, Call mom, then pay")
                .unwrap();
        assert_eq!(draft.status, Some(BillStatus::Due));
        assert_eq!(draft.note.as_deref(), Some("Call mom, then pay"));
    }

    #[test]
    fn test_parse_rejects_empty_name() {
        let err = parse_bill_draft(", 15.99, 2024-08-27, Streaming").unwrap_err();
        assert_eq!(err, "Bill name cannot be empty.");
    }

    #[test]
    fn test_parse_rejects_bad_amount() {
        let err = parse_bill_draft("Netflix, abc, 2024-08-27, Streaming").unwrap_err();
        assert!(err.contains("Invalid amount format"));
    }

    #[test]
    fn test_parse_rejects_negative_amount() {
        let err = parse_bill_draft("Netflix, -5.00, 2024-08-27, Streaming").unwrap_err();
        assert_eq!(err, "Amount cannot be negative.");
    }

    #[test]
    fn test_parse_rejects_bad_date() {
        let err = parse_bill_draft("Netflix, 15.99, 27-08-2024, Streaming").unwrap_err();
        assert!(err.contains("Invalid date format"));
    }

    #[test]
    fn test_parse_rejects_unknown_status() {
        let err = parse_bill_draft("Netflix, 15.99, 2024-08-27, Streaming, pending").unwrap_err();
        assert!(err.contains("Invalid status"));
    }

    #[test]
    fn test_add_bill_reports_assigned_id() {
        let mut store = BillStore::new();
        let message = add_bill(&mut store, "Netflix, 15.99, 2024-08-27, Streaming").unwrap();
        assert!(message.contains("id 1"));
        assert_eq!(store.len(), 1);
    }
}
