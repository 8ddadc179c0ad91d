pub mod add;
pub mod calendar;
pub mod dashboard;
pub mod remove;
pub mod sort;
pub mod stats;
pub mod tips;

use ratatui::prelude::Color;

use crate::models::bill::BillStatus;

/// Badge color used by every view: overdue red, due yellow, upcoming blue,
/// paid green.
pub(crate) fn status_color(status: BillStatus) -> Color {
    match status {
        BillStatus::Overdue => Color::Red,
        BillStatus::Due => Color::Yellow,
        BillStatus::Upcoming => Color::Blue,
        BillStatus::Paid => Color::Green,
    }
}
