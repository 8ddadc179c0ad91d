pub mod seed;

use crate::models::bill::{Bill, BillDraft, BillStatus};

/// In-memory collection of bills. This is the only mutation surface: views
/// borrow bills for rendering and send every change back through these
/// methods. Nothing is persisted; state lives for one session.
#[derive(Debug)]
pub struct BillStore {
    bills: Vec<Bill>,
    next_id: u64,
}

impl BillStore {
    pub fn new() -> Self {
        Self {
            bills: Vec::new(),
            next_id: 1,
        }
    }

    /// Builds a store over an existing set of bills. The id counter resumes
    /// after the highest id present so later adds stay unique.
    pub fn with_bills(bills: Vec<Bill>) -> Self {
        let next_id = bills.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        Self { bills, next_id }
    }

    /// Assigns a fresh id, appends the bill and returns the created record.
    /// Missing status defaults to upcoming, missing note to empty.
    pub fn add(&mut self, draft: BillDraft) -> &Bill {
        let id = self.next_id;
        self.next_id += 1;

        let bill = Bill::new(
            id,
            draft.name,
            draft.amount,
            draft.due_date,
            draft.category,
            draft.status.unwrap_or(BillStatus::Upcoming),
            draft.note.unwrap_or_default(),
        );
        self.bills.push(bill);
        self.bills.last().expect("bill was just pushed")
    }

    /// Replaces only the status field. No-op when the id is unknown.
    pub fn set_status(&mut self, id: u64, status: BillStatus) {
        if let Some(bill) = self.bills.iter_mut().find(|b| b.id == id) {
            bill.status = status;
        }
    }

    /// Replaces only the note field. No-op when the id is unknown.
    pub fn set_note(&mut self, id: u64, note: &str) {
        if let Some(bill) = self.bills.iter_mut().find(|b| b.id == id) {
            bill.note = note.to_string();
        }
    }

    /// Edit: replaces the form-backed fields, keeping the id. Status and note
    /// stay untouched unless the draft carries them. No-op when the id is
    /// unknown.
    pub fn update(&mut self, id: u64, draft: BillDraft) {
        if let Some(bill) = self.bills.iter_mut().find(|b| b.id == id) {
            bill.name = draft.name;
            bill.amount = draft.amount;
            bill.due_date = draft.due_date;
            bill.category = draft.category;
            if let Some(status) = draft.status {
                bill.status = status;
            }
            if let Some(note) = draft.note {
                bill.note = note;
            }
        }
    }

    /// Permanent delete; idempotent. Confirmation prompts belong to the view
    /// layer, not here.
    pub fn remove(&mut self, id: u64) {
        self.bills.retain(|b| b.id != id);
    }

    /// Current contents in insertion order. Callers sort or filter as needed.
    pub fn list(&self) -> &[Bill] {
        &self.bills
    }

    pub fn get(&self, id: u64) -> Option<&Bill> {
        self.bills.iter().find(|b| b.id == id)
    }

    pub fn len(&self) -> usize {
        self.bills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bills.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn draft(name: &str) -> BillDraft {
        BillDraft {
            name: name.to_string(),
            amount: Decimal::new(1999, 2),
            due_date: NaiveDate::from_ymd_opt(2024, 8, 27).unwrap(),
            category: "Streaming".to_string(),
            status: None,
            note: None,
        }
    }

    #[test]
    fn test_add_assigns_unique_ids() {
        let mut store = BillStore::new();
        let a = store.add(draft("Netflix")).id;
        let b = store.add(draft("Spotify")).id;
        let c = store.add(draft("Gym")).id;
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_add_applies_defaults() {
        let mut store = BillStore::new();
        let bill = store.add(draft("Netflix"));
        assert_eq!(bill.status, BillStatus::Upcoming);
        assert_eq!(bill.note, "");
    }

    #[test]
    fn test_add_keeps_explicit_status_and_note() {
        let mut store = BillStore::new();
        let mut d = draft("Rent");
        d.status = Some(BillStatus::Overdue);
        d.note = Some("Pay first".to_string());
        let bill = store.add(d);
        assert_eq!(bill.status, BillStatus::Overdue);
        assert_eq!(bill.note, "Pay first");
    }

    #[test]
    fn test_with_bills_resumes_id_counter() {
        let seeded = seed::sample_bills();
        let mut store = BillStore::with_bills(seeded);
        let bill = store.add(draft("New"));
        assert_eq!(bill.id, 7);
    }

    #[test]
    fn test_set_status_touches_only_status() {
        let mut store = BillStore::new();
        let id = store.add(draft("Netflix")).id;
        let before = store.get(id).unwrap().clone();

        store.set_status(id, BillStatus::Paid);

        let after = store.get(id).unwrap();
        assert_eq!(after.status, BillStatus::Paid);
        assert_eq!(after.name, before.name);
        assert_eq!(after.amount, before.amount);
        assert_eq!(after.due_date, before.due_date);
        assert_eq!(after.category, before.category);
        assert_eq!(after.note, before.note);
    }

    #[test]
    fn test_set_status_unknown_id_is_noop() {
        let mut store = BillStore::new();
        store.add(draft("Netflix"));
        let before: Vec<Bill> = store.list().to_vec();

        store.set_status(999, BillStatus::Paid);

        assert_eq!(store.list(), before.as_slice());
    }

    #[test]
    fn test_set_note_replaces_note_only() {
        let mut store = BillStore::new();
        let id = store.add(draft("Netflix")).id;

        store.set_note(id, "Cancel next month");

        let bill = store.get(id).unwrap();
        assert_eq!(bill.note, "Cancel next month");
        assert_eq!(bill.status, BillStatus::Upcoming);
    }

    #[test]
    fn test_update_preserves_id() {
        let mut store = BillStore::new();
        let id = store.add(draft("Netflix")).id;

        let mut edited = draft("Netflix Premium");
        edited.amount = Decimal::new(2299, 2);
        store.update(id, edited);

        let bill = store.get(id).unwrap();
        assert_eq!(bill.id, id);
        assert_eq!(bill.name, "Netflix Premium");
        assert_eq!(bill.amount, Decimal::new(2299, 2));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut store = BillStore::new();
        let id = store.add(draft("Netflix")).id;
        store.add(draft("Spotify"));

        store.remove(id);
        assert_eq!(store.len(), 1);
        assert!(store.get(id).is_none());

        store.remove(id);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_list_tracks_adds_minus_removes() {
        let mut store = BillStore::new();
        let ids: Vec<u64> = (0..5).map(|i| store.add(draft(&format!("Bill {}", i))).id).collect();
        store.remove(ids[1]);
        store.remove(ids[3]);
        assert_eq!(store.len(), 3);
    }
}
