use crate::store::BillStore;

/// Parses a bill id and deletes it. The store delete itself is a silent
/// no-op on a missing id; the not-found message here is purely for the user.
pub fn remove_bill(store: &mut BillStore, input: &str) -> Result<String, String> {
    let raw = input.trim();
    if raw.is_empty() {
        return Err("Bill id cannot be empty.".to_string());
    }

    let id = raw
        .parse::<u64>()
        .map_err(|_| format!("Invalid bill id '{}'. Please provide a number.", raw))?;

    match store.get(id) {
        Some(bill) => {
            let name = bill.name.clone();
            store.remove(id);
            Ok(format!("Removed bill '{}' (id {}).", name, id))
        }
        None => Err(format!("Bill with id {} not found.", id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::add::add_bill;

    #[test]
    fn test_remove_existing_bill() {
        let mut store = BillStore::new();
        add_bill(&mut store, "Netflix, 15.99, 2024-08-27, Streaming").unwrap();

        let message = remove_bill(&mut store, "1").unwrap();
        assert!(message.contains("Netflix"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_unknown_id_reports_not_found() {
        let mut store = BillStore::new();
        let err = remove_bill(&mut store, "42").unwrap_err();
        assert!(err.contains("not found"));
    }

    #[test]
    fn test_remove_rejects_non_numeric_id() {
        let mut store = BillStore::new();
        let err = remove_bill(&mut store, "abc").unwrap_err();
        assert!(err.contains("Invalid bill id"));
    }
}
