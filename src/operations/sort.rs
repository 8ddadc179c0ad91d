use crate::models::bill::Bill;

/// Display ordering for the dashboard: overdue, due, upcoming, paid. The
/// sort is stable, so bills with the same status keep their insertion order.
pub fn sort_by_priority(bills: &[Bill]) -> Vec<Bill> {
    let mut sorted = bills.to_vec();
    sorted.sort_by_key(|b| b.status.priority_rank());
    sorted
}
