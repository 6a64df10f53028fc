//! Migration name parser.
//!
//! Reads a snake_case name right to left: an optional trailing `table`, then
//! the table words up to the first connecting word. The first word of the
//! name is the action verb.

use tracing::debug;

use crate::ast::{Action, MigrationIntent};

/// Words that start a qualifier clause (`add_votes_to_users_table`).
const CONNECTING_WORDS: &[&str] = &["to", "from", "and", "with", "for", "in", "of", "on"];

/// Parse a migration name into its action and table.
///
/// Never fails; unrecognized verbs are kept as [`Action::Other`].
///
/// # Example
///
/// ```
/// use schemagen::ast::Action;
/// use schemagen::parser::parse_name;
///
/// let intent = parse_name("add_user_id_to_reports_table");
/// assert_eq!(intent.action, Action::Add);
/// assert_eq!(intent.table, "reports");
/// ```
pub fn parse_name(name: &str) -> MigrationIntent {
    let mut segments: Vec<&str> = name.split('_').rev().collect();

    if segments.first() == Some(&"table") {
        segments.remove(0);
    }

    let verb = segments.pop().unwrap_or_default();
    let action = Action::from_verb(verb);
    let table = table_name(&segments);

    debug!(migration = name, %action, table = %table, "parsed migration name");
    MigrationIntent { action, table }
}

/// Collect table words from reversed segments until a connecting word.
fn table_name(reversed: &[&str]) -> String {
    let mut words: Vec<&str> = reversed
        .iter()
        .take_while(|s| !is_connecting_word(s))
        .copied()
        .collect();
    words.reverse();
    words.join("_")
}

fn is_connecting_word(segment: &str) -> bool {
    CONNECTING_WORDS.contains(&segment)
}
