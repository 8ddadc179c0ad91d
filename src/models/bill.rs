use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Lifecycle tag of a bill. Stored explicitly on the bill and only changed
/// through the store; never derived from the due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BillStatus {
    Paid,
    Due,
    Overdue,
    Upcoming,
}

impl BillStatus {
    /// Ordering weight for the dashboard: most urgent first.
    pub fn priority_rank(self) -> u8 {
        match self {
            BillStatus::Overdue => 0,
            BillStatus::Due => 1,
            BillStatus::Upcoming => 2,
            BillStatus::Paid => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BillStatus::Paid => "paid",
            BillStatus::Due => "due",
            BillStatus::Overdue => "overdue",
            BillStatus::Upcoming => "upcoming",
        }
    }

    /// Badge text shown next to a bill in the views.
    pub fn badge(self) -> &'static str {
        match self {
            BillStatus::Paid => "Paid ✓",
            BillStatus::Due => "Due Soon",
            BillStatus::Overdue => "Overdue!",
            BillStatus::Upcoming => "Upcoming",
        }
    }

    pub fn parse(input: &str) -> Result<BillStatus, String> {
        match input.trim().to_lowercase().as_str() {
            "paid" => Ok(BillStatus::Paid),
            "due" => Ok(BillStatus::Due),
            "overdue" => Ok(BillStatus::Overdue),
            "upcoming" => Ok(BillStatus::Upcoming),
            other => Err(format!(
                "Invalid status '{}'. Use 'paid', 'due', 'overdue' or 'upcoming'.",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bill {
    pub id: u64,
    pub name: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub category: String,
    pub status: BillStatus,
    pub note: String,
}

impl Bill {
    pub fn new(
        id: u64,
        name: String,
        amount: Decimal,
        due_date: NaiveDate,
        category: String,
        status: BillStatus,
        note: String,
    ) -> Self {
        Self {
            id,
            name,
            amount,
            due_date,
            category,
            status,
            note,
        }
    }
}

/// Validated form state for an add or edit, built by `operations::add` before
/// it ever touches the store. Status and note fall back to store defaults
/// (upcoming, empty) when not given.
#[derive(Debug, Clone, PartialEq)]
pub struct BillDraft {
    pub name: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub category: String,
    pub status: Option<BillStatus>,
    pub note: Option<String>,
}

/// Categories offered by the add form. The store itself does not constrain
/// the category string.
pub const KNOWN_CATEGORIES: [&str; 5] =
    ["Streaming", "Utilities", "Insurance", "Health", "Other"];
