//! Styled terminal output.
//!
//! Status lines go through these helpers so every command looks the same.
//! Errors and warnings go to stderr; everything else goes to stdout.

use comfy_table::{ContentArrangement, Table};
use console::style;

/// Green check mark.
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Red cross, on stderr.
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Yellow warning sign, on stderr.
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Blue info sign.
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Dimmed hint.
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print account names as a numbered table, sorted alphabetically.
///
/// Vault order is unspecified, so sorting here keeps the listing stable.
pub fn print_accounts_table(usernames: &[String]) {
    if usernames.is_empty() {
        info("This vault has no accounts.");
        tip("Run `pwvault add <USERNAME>` to store one.");
        return;
    }

    let mut sorted: Vec<&str> = usernames.iter().map(String::as_str).collect();
    sorted.sort_unstable();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Account"]);

    for (i, name) in sorted.into_iter().enumerate() {
        table.add_row(vec![(i + 1).to_string(), name.to_string()]);
    }

    println!("{table}");
}
