use rust_decimal::Decimal;

use crate::models::bill::{Bill, BillStatus};

/// Summary numbers for the dashboard stat cards. Recomputed from the full
/// bill list on every read; nothing is cached.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    /// Sum of every bill's amount regardless of status.
    pub total_monthly: Decimal,
    pub due_soon: usize,
    pub paid_this_month: usize,
}

pub fn compute_stats(bills: &[Bill]) -> DashboardStats {
    let total_monthly = bills
        .iter()
        .fold(Decimal::ZERO, |acc, bill| acc + bill.amount);
    let due_soon = bills.iter().filter(|b| b.status == BillStatus::Due).count();
    let paid_this_month = bills
        .iter()
        .filter(|b| b.status == BillStatus::Paid)
        .count();

    DashboardStats {
        total_monthly,
        due_soon,
        paid_this_month,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn bill(id: u64, amount: &str, status: BillStatus) -> Bill {
        Bill::new(
            id,
            format!("Bill {}", id),
            Decimal::from_str(amount).unwrap(),
            NaiveDate::from_ymd_opt(2024, 8, 27).unwrap(),
            "Other".to_string(),
            status,
            String::new(),
        )
    }

    #[test]
    fn test_stats_over_mixed_statuses() {
        let bills = vec![
            bill(1, "15.99", BillStatus::Due),
            bill(2, "89.50", BillStatus::Paid),
            bill(3, "9.99", BillStatus::Upcoming),
        ];

        let stats = compute_stats(&bills);
        assert_eq!(stats.total_monthly, Decimal::from_str("115.48").unwrap());
        assert_eq!(stats.due_soon, 1);
        assert_eq!(stats.paid_this_month, 1);
    }

    #[test]
    fn test_stats_include_every_status_in_total() {
        let bills = vec![
            bill(1, "10.00", BillStatus::Overdue),
            bill(2, "20.00", BillStatus::Paid),
        ];
        let stats = compute_stats(&bills);
        assert_eq!(stats.total_monthly, Decimal::from_str("30.00").unwrap());
    }

    #[test]
    fn test_stats_empty_collection() {
        let stats = compute_stats(&[]);
        assert_eq!(stats.total_monthly, Decimal::ZERO);
        assert_eq!(stats.due_soon, 0);
        assert_eq!(stats.paid_this_month, 0);
    }
}
