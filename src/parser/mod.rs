//! Parsers for the two user inputs of a migration.
//!
//! ```text
//! add_user_id_to_reports_table      name:string, amount:decimal(5,2):nullable
//! ─┬─ ───┬─── ─┬ ───┬─── ──┬──      ────┬────── ──┬─── ──┬─────── ───┬────
//!  │     │     │    │      │            │         │      │           │
//!  │     │     │    │      └── dropped  │         │      │           └── Option
//!  │     │     │    └── Table           │         │      └── Arguments
//!  │     │     └── Connecting word      │         └── Type
//!  │     └── Qualifier (ignored)        └── Field
//!  └── Action
//! ```
//!
//! Both parsers are lenient: they never fail, and decompose whatever matches
//! their grammar.

pub mod name;
pub mod schema;

pub use name::parse_name;
pub use schema::parse_schema;
