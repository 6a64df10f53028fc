//! # schemagen
//!
//! > **Type the columns once. Get the migration.**
//!
//! schemagen compiles a migration name and a compact column shorthand into
//! Laravel schema-builder statements.
//!
//! ## Quick Example
//!
//! ```rust
//! use schemagen::prelude::*;
//!
//! let intent = schemagen::parse_name("create_posts_table");
//! let schema = schemagen::parse_schema("title:string, user_id:integer:foreign");
//!
//! let fragments = SyntaxBuilder::default().create(&schema, &intent)?;
//! assert!(fragments.up.contains("$table->foreign('user_id')->references('id')->on('users');"));
//! assert_eq!(fragments.down, "Schema::dropIfExists('posts');");
//! # Ok::<(), GeneratorError>(())
//! ```
//!
//! ## Column Shorthand
//!
//! | Form               | Meaning                        | Output                          |
//! |--------------------|--------------------------------|---------------------------------|
//! | `name:type`        | Column                         | `$table->type('name')`          |
//! | `type(a,b)`        | Type arguments                 | `$table->type('name', a, b)`    |
//! | `:flag`            | Modifier without value         | `->flag()`                      |
//! | `:opt(value)`      | Modifier with raw value        | `->opt(value)`                  |
//! | `:foreign`         | Foreign key on `<plural>.id`   | extra `$table->foreign(...)`    |

pub mod ast;
pub mod builder;
pub mod config;
pub mod error;
pub mod inflect;
pub mod parser;
pub mod stub;
pub mod templates;

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::builder::{with_implicit_columns, SyntaxBuilder, ToBlueprint};
    pub use crate::config::Config;
    pub use crate::error::*;
    pub use crate::parser::{parse_name, parse_schema};
    pub use crate::stub::{MigrationStub, PivotMigration};
    pub use crate::templates::Templates;
}

/// Parse a migration name into its action and table.
///
/// # Example
///
/// ```
/// use schemagen::parse_name;
///
/// let intent = parse_name("create_yearly_reports_table");
/// assert_eq!(intent.table, "yearly_reports");
/// ```
pub fn parse_name(name: &str) -> ast::MigrationIntent {
    parser::parse_name(name)
}

/// Parse a column shorthand string into an ordered schema.
///
/// # Example
///
/// ```
/// use schemagen::parse_schema;
///
/// let schema = parse_schema("age:integer:nullable:default(21)");
/// assert_eq!(schema.len(), 1);
/// ```
pub fn parse_schema(schema: &str) -> ast::Schema {
    parser::parse_schema(schema)
}

/// Parse both inputs and build the `up`/`down` fragments with the built-in stubs.
pub fn generate(name: &str, schema: &str) -> error::GeneratorResult<(ast::MigrationIntent, ast::CodeFragments)> {
    let intent = parse_name(name);
    let fragments = builder::SyntaxBuilder::default().create(&parse_schema(schema), &intent)?;
    Ok((intent, fragments))
}
