use std::io::{self, Write};

use crate::{
    models::{Book, User},
    services::Catalogue,
};

const BOOK_RULE_WIDTH: usize = 110;
const USER_RULE_WIDTH: usize = 98;

fn rule(out: &mut impl Write, width: usize) -> io::Result<()> {
    writeln!(out, "{}", "-".repeat(width))
}

/// Column headers and opening rule of a book table
pub fn book_header(out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "{:<5} {:<40} {:<25} {:<15} {:<7} {:<10}",
        "ID", "Title", "Author", "Genre", "Rating", "Popularity"
    )?;
    rule(out, BOOK_RULE_WIDTH)
}

pub fn book_row(out: &mut impl Write, book: &Book) -> io::Result<()> {
    writeln!(
        out,
        "{:<5} {:<40} {:<25} {:<15} {:<7.1} {:<10}",
        book.id, book.title, book.author, book.genre, book.rating, book.popularity
    )
}

pub fn book_footer(out: &mut impl Write) -> io::Result<()> {
    rule(out, BOOK_RULE_WIDTH)
}

/// Renders a titled table of books
pub fn book_table<'a>(
    out: &mut impl Write,
    title: &str,
    books: impl IntoIterator<Item = &'a Book>,
) -> io::Result<()> {
    writeln!(out, "\n--- {} ---", title)?;
    book_header(out)?;
    for book in books {
        book_row(out, book)?;
    }
    book_footer(out)
}

/// `"Title" (ID: n)` for each preference, or `None`
pub fn preference_list(user: &User, catalogue: &Catalogue) -> String {
    if user.preferences().is_empty() {
        return "None".to_string();
    }
    user.preferences()
        .iter()
        .filter_map(|&i| catalogue.get(i))
        .map(|b| format!("\"{}\" (ID: {})", b.title, b.id))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders every user in directory order
pub fn user_table<'a>(
    out: &mut impl Write,
    users: impl IntoIterator<Item = &'a User>,
    catalogue: &Catalogue,
) -> io::Result<()> {
    writeln!(out, "\n--- Users ---")?;
    writeln!(out, "{:<5} {:<25} {:<40}", "ID", "Name", "Preferred Books")?;
    rule(out, USER_RULE_WIDTH)?;
    for user in users {
        writeln!(
            out,
            "{:<5} {:<25} {}",
            user.id,
            user.name,
            preference_list(user, catalogue)
        )?;
    }
    rule(out, USER_RULE_WIDTH)
}
