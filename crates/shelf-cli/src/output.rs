//! Table and date formatting for menu output.

use chrono::NaiveDate;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

use shelf_core::storage::{Book, Loan};

fn table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.to_vec());
    for row in rows {
        table.add_row(row);
    }
    table.to_string()
}

/// Long date used in issue confirmations, e.g. `15-Jan-2024`.
pub fn format_due(date: NaiveDate) -> String {
    date.format("%d-%b-%Y").to_string()
}

/// Search results.
pub fn books_table(books: &[Book]) -> String {
    let rows = books
        .iter()
        .map(|b| {
            vec![
                b.isbn.clone(),
                b.title.clone(),
                b.author.clone(),
                b.copies_available.to_string(),
            ]
        })
        .collect();
    table(&["ISBN", "Title", "Author", "Available"], rows)
}

/// Overdue list for librarians.
pub fn overdue_table(loans: &[Loan]) -> String {
    let rows = loans
        .iter()
        .map(|l| {
            vec![
                l.loan_id.to_string(),
                l.isbn.clone(),
                l.member_id.clone(),
                l.due_date.to_string(),
            ]
        })
        .collect();
    table(&["LoanID", "ISBN", "MemberID", "DueDate"], rows)
}

/// A member's own loan history.
pub fn member_loans_table(loans: &[Loan]) -> String {
    let rows = loans
        .iter()
        .map(|l| {
            vec![
                l.loan_id.to_string(),
                l.isbn.clone(),
                l.issue_date.to_string(),
                l.due_date.to_string(),
                l.return_date
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "No".to_string()),
            ]
        })
        .collect();
    table(&["LoanID", "ISBN", "IssueDate", "DueDate", "Returned"], rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_format_due() {
        assert_eq!(format_due(date("2024-01-15")), "15-Jan-2024");
    }

    #[test]
    fn test_books_table_contents() {
        let rendered = books_table(&[Book::new("9780132350884", "Clean Code", "Martin", 3)]);
        assert!(rendered.contains("Available"));
        assert!(rendered.contains("9780132350884"));
        assert!(rendered.contains("Clean Code"));
    }

    #[test]
    fn test_member_loans_marks_unreturned() {
        let mut returned = Loan::issue(1002, "222", "M1", date("2024-01-01")).unwrap();
        returned.return_date = Some(date("2024-01-05"));
        let active = Loan::issue(1001, "111", "M1", date("2024-01-01")).unwrap();
        let rendered = member_loans_table(&[active, returned]);
        assert!(rendered.contains("No"));
        assert!(rendered.contains("2024-01-05"));
    }

    #[test]
    fn test_overdue_table_contents() {
        let loan = Loan::issue(1001, "111", "M1", date("2023-12-18")).unwrap();
        let rendered = overdue_table(&[loan]);
        assert!(rendered.contains("1001"));
        assert!(rendered.contains("2024-01-01"));
    }
}
