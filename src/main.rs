mod models;
mod operations;
mod store;

use chrono::NaiveDate;
use clap::Parser;
use std::io;

use crate::models::bill::{BillStatus, KNOWN_CATEGORIES};
use crate::operations::add::add_bill;
use crate::operations::calendar::run_calendar;
use crate::operations::dashboard::run_dashboard;
use crate::operations::remove::remove_bill;
use crate::operations::sort::sort_by_priority;
use crate::operations::stats::compute_stats;
use crate::operations::tips::run_tips;
use crate::store::{seed, BillStore};

#[derive(Parser)]
#[command(
    name = "billo",
    about = "Take control of your bills and subscriptions from the terminal"
)]
struct Cli {
    /// Start with an empty bill list instead of the sample bills
    #[arg(long)]
    empty: bool,

    /// Initial day selected in the calendar view (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    date: Option<NaiveDate>,
}

pub enum UserCommands {
    Add,
    Remove,
    Paid,
    Status,
    Note,
    Print,
    Dashboard,
    Calendar,
    Tips,
    Exit,
    Unknown,
}

fn main() {
    let cli = Cli::parse();

    let mut store = if cli.empty {
        BillStore::new()
    } else {
        BillStore::with_bills(seed::sample_bills())
    };

    println!("Welcome to the bill manager!");
    println!("Your personal assistant for bills and subscriptions.");

    loop {
        println!(
            "Please enter a command (add, remove, paid, status, note, print, dashboard, calendar, tips, exit):"
        );

        // read user input
        let input = match read_user_input() {
            Ok(cmd) => cmd,
            Err(e) => {
                println!("Error reading input: {}", e);
                continue;
            }
        };
        let parts: Vec<&str> = input.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }
        let command = check_for_command(parts[0]);
        match command {
            UserCommands::Add => {
                println!("Add command selected. Please enter bill details in the format:\nname, amount, due date(YYYY-MM-DD), category[, status][, note]");
                println!("Known categories: {}", KNOWN_CATEGORIES.join(", "));
                let input = match read_user_input() {
                    Ok(details) => details,
                    Err(e) => {
                        println!("Error reading input: {}", e);
                        continue;
                    }
                };
                match add_bill(&mut store, &input) {
                    Ok(message) => println!("{}", message),
                    Err(e) => {
                        println!("Error adding bill: {}", e);
                        println!("Please try again.");
                    }
                }
            }
            UserCommands::Remove => {
                println!("Remove command selected. Provide the bill id to remove:");
                let input = match read_user_input() {
                    Ok(details) => details,
                    Err(e) => {
                        println!("Error reading input: {}", e);
                        continue;
                    }
                };
                match remove_bill(&mut store, &input) {
                    Ok(message) => println!("{}", message),
                    Err(err) => println!("Error: {}", err),
                }
            }
            UserCommands::Paid => {
                println!("Paid command selected. Provide the bill id to mark as paid:");
                let input = match read_user_input() {
                    Ok(details) => details,
                    Err(e) => {
                        println!("Error reading input: {}", e);
                        continue;
                    }
                };
                match set_status_command(&mut store, &input, Some(BillStatus::Paid)) {
                    Ok(message) => println!("{}", message),
                    Err(err) => println!("Error: {}", err),
                }
            }
            UserCommands::Status => {
                println!("Status command selected. Provide: id, status(paid/due/overdue/upcoming)");
                let input = match read_user_input() {
                    Ok(details) => details,
                    Err(e) => {
                        println!("Error reading input: {}", e);
                        continue;
                    }
                };
                match set_status_command(&mut store, &input, None) {
                    Ok(message) => println!("{}", message),
                    Err(err) => println!("Error: {}", err),
                }
            }
            UserCommands::Note => {
                println!("Note command selected. Provide: id, note text (empty note clears)");
                let input = match read_user_input() {
                    Ok(details) => details,
                    Err(e) => {
                        println!("Error reading input: {}", e);
                        continue;
                    }
                };
                match set_note_command(&mut store, &input) {
                    Ok(message) => println!("{}", message),
                    Err(err) => println!("Error: {}", err),
                }
            }
            UserCommands::Print => {
                let stats = compute_stats(store.list());
                println!(
                    "Total monthly: ${:.2} | Due soon: {} | Paid: {}",
                    stats.total_monthly, stats.due_soon, stats.paid_this_month
                );
                if store.is_empty() {
                    println!("No bills yet. Use 'add' to create your first bill.");
                }
                for bill in sort_by_priority(store.list()) {
                    println!(
                        "[{}] {} | {} | due {} | ${} | {}{}",
                        bill.id,
                        bill.name,
                        bill.category,
                        bill.due_date.format("%Y-%m-%d"),
                        bill.amount,
                        bill.status.badge(),
                        if bill.note.is_empty() {
                            String::new()
                        } else {
                            format!(" | note: {}", bill.note)
                        }
                    );
                }
            }
            UserCommands::Dashboard => {
                if let Err(err) = run_dashboard(&mut store) {
                    println!("Error running dashboard: {}", err);
                }
            }
            UserCommands::Calendar => {
                let initial = cli.date.unwrap_or_else(|| chrono::Local::now().date_naive());
                if let Err(err) = run_calendar(store.list(), initial) {
                    println!("Error running calendar: {}", err);
                }
            }
            UserCommands::Tips => {
                if let Err(err) = run_tips() {
                    println!("Error running tips view: {}", err);
                }
            }
            UserCommands::Unknown => {
                println!("No valid command found. Please try again.");
            }
            UserCommands::Exit => {
                println!("Exiting the application.");
                break;
            }
        }
    }
}

fn set_status_command(
    store: &mut BillStore,
    input: &str,
    forced: Option<BillStatus>,
) -> Result<String, String> {
    let (id_part, status) = match forced {
        Some(status) => (input.trim(), status),
        None => {
            let (id_part, status_part) = input
                .split_once(',')
                .ok_or_else(|| "Expected: id, status".to_string())?;
            (id_part.trim(), BillStatus::parse(status_part)?)
        }
    };

    let id = id_part
        .parse::<u64>()
        .map_err(|_| format!("Invalid bill id '{}'. Please provide a number.", id_part))?;

    match store.get(id) {
        Some(bill) => {
            let name = bill.name.clone();
            store.set_status(id, status);
            Ok(format!("Marked '{}' (id {}) as {}.", name, id, status.label()))
        }
        None => Err(format!("Bill with id {} not found.", id)),
    }
}

fn set_note_command(store: &mut BillStore, input: &str) -> Result<String, String> {
    let (id_part, note) = match input.split_once(',') {
        Some((id_part, note)) => (id_part.trim(), note.trim()),
        None => (input.trim(), ""),
    };

    let id = id_part
        .parse::<u64>()
        .map_err(|_| format!("Invalid bill id '{}'. Please provide a number.", id_part))?;

    match store.get(id) {
        Some(bill) => {
            let name = bill.name.clone();
            store.set_note(id, note);
            if note.is_empty() {
                Ok(format!("Cleared note on '{}' (id {}).", name, id))
            } else {
                Ok(format!("Updated note on '{}' (id {}).", name, id))
            }
        }
        None => Err(format!("Bill with id {} not found.", id)),
    }
}

fn read_user_input() -> Result<String, String> {
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|_| "Failed to read line".to_string())?;
    Ok(input.trim().to_string())
}

fn check_for_command(input: &str) -> UserCommands {
    match input {
        "add" => UserCommands::Add,
        "remove" => UserCommands::Remove,
        "paid" => UserCommands::Paid,
        "status" => UserCommands::Status,
        "note" => UserCommands::Note,
        "print" => UserCommands::Print,
        "dashboard" => UserCommands::Dashboard,
        "calendar" => UserCommands::Calendar,
        "tips" => UserCommands::Tips,
        "exit" => UserCommands::Exit,
        _ => UserCommands::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed::sample_bills;

    #[test]
    fn test_set_status_command_marks_paid() {
        let mut store = BillStore::with_bills(sample_bills());
        let message = set_status_command(&mut store, "1", Some(BillStatus::Paid)).unwrap();
        assert!(message.contains("Netflix"));
        assert_eq!(store.get(1).unwrap().status, BillStatus::Paid);
    }

    #[test]
    fn test_set_status_command_parses_explicit_status() {
        let mut store = BillStore::with_bills(sample_bills());
        set_status_command(&mut store, "3, overdue", None).unwrap();
        assert_eq!(store.get(3).unwrap().status, BillStatus::Overdue);
    }

    #[test]
    fn test_set_status_command_unknown_id() {
        let mut store = BillStore::with_bills(sample_bills());
        let err = set_status_command(&mut store, "99", Some(BillStatus::Paid)).unwrap_err();
        assert!(err.contains("not found"));
    }

    #[test]
    fn test_set_note_command_updates_and_clears() {
        let mut store = BillStore::with_bills(sample_bills());

        set_note_command(&mut store, "1, Autopay next month").unwrap();
        assert_eq!(store.get(1).unwrap().note, "Autopay next month");

        let message = set_note_command(&mut store, "1").unwrap();
        assert!(message.contains("Cleared"));
        assert_eq!(store.get(1).unwrap().note, "");
    }
}
