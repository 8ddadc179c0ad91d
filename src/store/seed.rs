use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::bill::{Bill, BillStatus};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

/// The six demo bills the app starts with unless --empty is given.
pub fn sample_bills() -> Vec<Bill> {
    vec![
        Bill::new(
            1,
            "Netflix".to_string(),
            Decimal::new(1599, 2),
            date(2024, 8, 27),
            "Streaming".to_string(),
            BillStatus::Due,
            String::new(),
        ),
        Bill::new(
            2,
            "Electric Bill".to_string(),
            Decimal::new(8950, 2),
            date(2024, 8, 24),
            "Utilities".to_string(),
            BillStatus::Paid,
            "Paid via autopay".to_string(),
        ),
        Bill::new(
            3,
            "Spotify".to_string(),
            Decimal::new(999, 2),
            date(2024, 8, 30),
            "Streaming".to_string(),
            BillStatus::Upcoming,
            String::new(),
        ),
        Bill::new(
            4,
            "Phone Bill".to_string(),
            Decimal::new(4500, 2),
            date(2024, 8, 28),
            "Utilities".to_string(),
            BillStatus::Due,
            "Call to negotiate rate".to_string(),
        ),
        Bill::new(
            5,
            "Gym Membership".to_string(),
            Decimal::new(2999, 2),
            date(2024, 9, 1),
            "Health".to_string(),
            BillStatus::Upcoming,
            String::new(),
        ),
        Bill::new(
            6,
            "Car Insurance".to_string(),
            Decimal::new(12000, 2),
            date(2024, 8, 26),
            "Insurance".to_string(),
            BillStatus::Overdue,
            "Need to pay ASAP!".to_string(),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::sort::sort_by_priority;
    use crate::operations::stats::compute_stats;
    use crate::store::BillStore;

    #[test]
    fn test_sample_bills_have_unique_ids() {
        let bills = sample_bills();
        let mut ids: Vec<u64> = bills.iter().map(|b| b.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), bills.len());
    }

    #[test]
    fn test_mark_first_bill_paid_scenario() {
        let mut store = BillStore::with_bills(sample_bills());
        assert_eq!(compute_stats(store.list()).paid_this_month, 1);

        store.set_status(1, BillStatus::Paid);

        let stats = compute_stats(store.list());
        assert_eq!(stats.paid_this_month, 2);

        let sorted = sort_by_priority(store.list());
        let order: Vec<u64> = sorted.iter().map(|b| b.id).collect();
        // Overdue, remaining due, upcoming pair, paid group. Bill 1 lands
        // before bill 2 because insertion order breaks the tie.
        assert_eq!(order, vec![6, 4, 3, 5, 1, 2]);

        let paid_tail: Vec<BillStatus> = sorted[4..].iter().map(|b| b.status).collect();
        assert_eq!(paid_tail, vec![BillStatus::Paid, BillStatus::Paid]);
    }
}
