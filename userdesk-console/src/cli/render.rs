//! Plain-text rendering of domain state for the terminal.

use std::fmt::Write;

use userdesk_core::ValidationResult;
use userdesk_model::User;

use crate::domains::user_management::Notice;

const COLUMNS: [&str; 5] = ["ID", "Name", "Email", "Phone", "Company"];

fn row(user: &User) -> [String; 5] {
    [
        user.id.map(|id| id.to_string()).unwrap_or_else(|| "-".into()),
        user.name.clone(),
        user.email.clone(),
        user.phone.clone(),
        user.company.name.clone(),
    ]
}

/// Aligned table of users, one per line, in the order given.
pub fn user_table(users: &[&User]) -> String {
    if users.is_empty() {
        return "No users found.\n".to_string();
    }

    let rows: Vec<[String; 5]> = users.iter().map(|u| row(u)).collect();
    let mut widths = COLUMNS.map(|c| c.chars().count());
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &COLUMNS.map(String::from), &widths);
    for cells in &rows {
        push_line(&mut out, cells, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let mut line = String::new();
    for (cell, width) in cells.iter().zip(widths) {
        let _ = write!(line, "{:<width$}  ", cell, width = width);
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

/// Every field of one user, labelled.
pub fn user_detail(user: &User) -> String {
    let mut out = String::new();
    let id = user.id.map(|id| id.to_string());
    let lines = [
        ("ID", id.as_deref().unwrap_or("-")),
        ("Name", user.name.as_str()),
        ("Username", user.username.as_str()),
        ("Email", user.email.as_str()),
        ("Phone", user.phone.as_str()),
        ("Street", user.address.street.as_str()),
        ("City", user.address.city.as_str()),
        ("Company", user.company.name.as_str()),
        ("Website", user.website.as_str()),
    ];
    for (label, value) in lines {
        let _ = writeln!(out, "{:<9} {}", format!("{label}:"), or_dash(value));
    }
    out
}

pub fn validation_errors(errors: &ValidationResult) -> String {
    let mut out = String::new();
    for (key, message) in errors.iter() {
        let _ = writeln!(out, "  {}: {}", key.label(), message);
    }
    out
}

pub fn notices(notices: &[Notice]) -> String {
    notices.iter().map(|n| format!("{n}\n")).collect()
}
