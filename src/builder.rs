//! Schema-builder code generation.
//!
//! Turns a parsed [`Schema`] and [`MigrationIntent`] into the `up` and
//! `down` bodies of a migration.

use tracing::{debug, trace};

use crate::ast::*;
use crate::error::{GeneratorError, GeneratorResult};
use crate::templates::{fill, Templates, SCHEMA_UP};

/// Separator between statements inside a wrapper body.
const STATEMENT_SEPARATOR: &str = "\n            ";

/// Trait for rendering columns as schema-builder statements.
pub trait ToBlueprint {
    /// `$table->type('name', args)->option(value);`
    fn to_add_statement(&self) -> String;

    /// `$table->dropColumn('name');`
    ///
    /// Only the name is used, so a `foreign` companion drops its origin
    /// column a second time.
    fn to_drop_statement(&self) -> String;
}

impl ToBlueprint for Column {
    fn to_add_statement(&self) -> String {
        let spec = match self {
            Column::Timestamps => return "$table->timestamps();".to_string(),
            Column::Field(spec) => spec,
        };

        let mut args = Vec::with_capacity(spec.arguments.len() + 1);
        if !spec.name.is_empty() {
            args.push(format!("'{}'", spec.name));
        }
        args.extend(spec.arguments.iter().cloned());

        let mut stmt = format!("$table->{}({})", spec.column_type, args.join(", "));
        for (method, value) in spec.options.iter() {
            match value {
                OptionValue::Flag => stmt.push_str(&format!("->{}()", method)),
                OptionValue::Literal(v) => stmt.push_str(&format!("->{}({})", method, v)),
            }
        }
        stmt.push(';');
        stmt
    }

    fn to_drop_statement(&self) -> String {
        match self {
            Column::Timestamps => "$table->dropTimestamps();".to_string(),
            Column::Field(spec) => format!("$table->dropColumn('{}');", spec.name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Add,
    Drop,
}

/// Renders migration bodies from the wrapper templates.
///
/// Holds no per-call state; one builder can serve any number of calls.
#[derive(Debug, Clone, Default)]
pub struct SyntaxBuilder {
    templates: Templates,
}

impl SyntaxBuilder {
    pub fn new(templates: Templates) -> Self {
        Self { templates }
    }

    pub fn templates(&self) -> &Templates {
        &self.templates
    }

    /// Build the `up` and `down` fragments.
    ///
    /// # Errors
    ///
    /// [`GeneratorError::UnknownIntent`] when the action is not create, add
    /// or remove.
    ///
    /// # Example
    ///
    /// ```
    /// use schemagen::prelude::*;
    ///
    /// let intent = parse_name("create_posts_table");
    /// let schema = parse_schema("title:string");
    /// let fragments = SyntaxBuilder::default().create(&schema, &intent).unwrap();
    /// assert_eq!(fragments.down, "Schema::dropIfExists('posts');");
    /// ```
    pub fn create(&self, schema: &[Column], meta: &MigrationIntent) -> GeneratorResult<CodeFragments> {
        let up = self.up(schema, meta)?;
        let down = self.down(schema, meta)?;
        Ok(CodeFragments { up, down })
    }

    /// Fold extra columns into a pivot migration stub.
    ///
    /// Columns are rendered in add form without implicit columns and
    /// substituted for `{{schema_up}}`.
    pub fn create_pivot_schema(&self, schema: &[Column], stub: &str) -> String {
        fill(stub, SCHEMA_UP, &construct_schema(schema, Direction::Add))
    }

    fn up(&self, schema: &[Column], meta: &MigrationIntent) -> GeneratorResult<String> {
        let body = match &meta.action {
            Action::Create => {
                let fields = with_implicit_columns(schema);
                debug!(table = %meta.table, columns = fields.len(), "create wrapper");
                fill(&self.templates.schema_create, SCHEMA_UP, &construct_schema(&fields, Direction::Add))
            }
            Action::Add => {
                debug!(table = %meta.table, columns = schema.len(), "change wrapper, add");
                fill(&self.templates.schema_change, SCHEMA_UP, &construct_schema(schema, Direction::Add))
            }
            Action::Remove => {
                debug!(table = %meta.table, columns = schema.len(), "change wrapper, drop");
                fill(&self.templates.schema_change, SCHEMA_UP, &construct_schema(schema, Direction::Drop))
            }
            Action::Other(verb) => return Err(GeneratorError::unknown_intent(verb.as_str())),
        };
        Ok(body)
    }

    fn down(&self, schema: &[Column], meta: &MigrationIntent) -> GeneratorResult<String> {
        let body = match &meta.action {
            Action::Create => format!("Schema::dropIfExists('{}');", meta.table),
            Action::Add => fill(&self.templates.schema_change, SCHEMA_UP, &construct_schema(schema, Direction::Drop)),
            Action::Remove => fill(&self.templates.schema_change, SCHEMA_UP, &construct_schema(schema, Direction::Add)),
            Action::Other(verb) => return Err(GeneratorError::unknown_intent(verb.as_str())),
        };
        Ok(body)
    }
}

/// Add the `id` and timestamps columns a new table gets by default.
///
/// `id` is prepended unless a column is named `id`. The timestamps marker is
/// appended unless a `created_at` or `updated_at` column, or the marker
/// itself, is already present. Running this twice changes nothing.
pub fn with_implicit_columns(schema: &[Column]) -> Vec<Column> {
    let mut fields = Vec::with_capacity(schema.len() + 2);

    if !schema.iter().any(|c| c.is_named("id")) {
        fields.push(Column::Field(ColumnSpec::new("id", "increments")));
    }
    fields.extend(schema.iter().cloned());

    let has_timestamps = schema.iter().any(|c| {
        matches!(c, Column::Timestamps) || c.is_named("created_at") || c.is_named("updated_at")
    });
    if !has_timestamps {
        fields.push(Column::Timestamps);
    }

    fields
}

fn construct_schema(schema: &[Column], direction: Direction) -> String {
    schema
        .iter()
        .map(|c| {
            let stmt = match direction {
                Direction::Add => c.to_add_statement(),
                Direction::Drop => c.to_drop_statement(),
            };
            trace!(statement = %stmt, "rendered column");
            stmt
        })
        .collect::<Vec<_>>()
        .join(STATEMENT_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_schema;

    fn email_column() -> Column {
        ColumnSpec::new("email", "string")
            .with_arguments(&["100"])
            .with_flag("unique")
            .with_flag("nullable")
            .with_option("default", "\"foo@example.com\"")
            .into()
    }

    fn intent(action: Action) -> MigrationIntent {
        MigrationIntent::new(action, "posts")
    }

    #[test]
    fn test_add_statement() {
        assert_eq!(
            email_column().to_add_statement(),
            "$table->string('email', 100)->unique()->nullable()->default(\"foo@example.com\");"
        );
    }

    #[test]
    fn test_add_statement_for_timestamps_has_no_name() {
        assert_eq!(Column::Timestamps.to_add_statement(), "$table->timestamps();");
    }

    #[test]
    fn test_drop_statement_ignores_options() {
        assert_eq!(email_column().to_drop_statement(), "$table->dropColumn('email');");
    }

    #[test]
    fn test_foreign_companion_statement() {
        let schema = parse_schema("user_id:integer:foreign");
        assert_eq!(
            schema[1].to_add_statement(),
            "$table->foreign('user_id')->references('id')->on('users');"
        );
    }

    #[test]
    fn test_create_up_and_down() {
        let fragments = SyntaxBuilder::default()
            .create(&[email_column()], &intent(Action::Create))
            .unwrap();

        assert_eq!(
            fragments.up,
            "Schema::create('{{table}}', function (Blueprint $table) {
            $table->increments('id');
            $table->string('email', 100)->unique()->nullable()->default(\"foo@example.com\");
            $table->timestamps();
        });"
        );
        assert_eq!(fragments.down, "Schema::dropIfExists('posts');");
    }

    #[test]
    fn test_create_with_existing_id_does_not_duplicate() {
        let schema = vec![
            Column::Field(ColumnSpec::new("id", "increments")),
            email_column(),
        ];
        let fragments = SyntaxBuilder::default()
            .create(&schema, &intent(Action::Create))
            .unwrap();
        assert_eq!(fragments.up.matches("increments('id')").count(), 1);
    }

    #[test]
    fn test_create_with_created_at_skips_timestamps() {
        let schema = vec![Column::Field(ColumnSpec::new("created_at", "date"))];
        let fragments = SyntaxBuilder::default()
            .create(&schema, &intent(Action::Create))
            .unwrap();
        assert_eq!(
            fragments.up,
            "Schema::create('{{table}}', function (Blueprint $table) {
            $table->increments('id');
            $table->date('created_at');
        });"
        );
    }

    #[test]
    fn test_create_with_empty_schema_still_enriches() {
        let fragments = SyntaxBuilder::default()
            .create(&[], &intent(Action::Create))
            .unwrap();
        assert!(fragments.up.contains("$table->increments('id');\n            $table->timestamps();"));
    }

    #[test]
    fn test_implicit_columns_idempotent() {
        let once = with_implicit_columns(&[email_column()]);
        let twice = with_implicit_columns(&once);
        assert_eq!(once, twice);
        assert_eq!(once.len(), 3);
    }

    #[test]
    fn test_add_action() {
        let schema = parse_schema("votes:integer:nullable");
        let fragments = SyntaxBuilder::default()
            .create(&schema, &intent(Action::Add))
            .unwrap();
        assert_eq!(
            fragments.up,
            "Schema::table('{{table}}', function (Blueprint $table) {
            $table->integer('votes')->nullable();
        });"
        );
        assert_eq!(
            fragments.down,
            "Schema::table('{{table}}', function (Blueprint $table) {
            $table->dropColumn('votes');
        });"
        );
    }

    #[test]
    fn test_remove_action_restores_without_enrichment() {
        let schema = parse_schema("avatar:string:nullable");
        let fragments = SyntaxBuilder::default()
            .create(&schema, &intent(Action::Remove))
            .unwrap();
        assert!(fragments.up.contains("$table->dropColumn('avatar');"));
        assert!(fragments.down.contains("$table->string('avatar')->nullable();"));
        assert!(!fragments.down.contains("increments"));
        assert!(!fragments.down.contains("timestamps"));
    }

    #[test]
    fn test_remove_name_builds() {
        let intent = crate::parser::parse_name("remove_avatar_from_users_table");
        let fragments = SyntaxBuilder::default()
            .create(&parse_schema("avatar:string"), &intent)
            .unwrap();
        assert!(fragments.up.contains("$table->dropColumn('avatar');"));
        assert!(fragments.down.contains("$table->string('avatar');"));
    }

    #[test]
    fn test_add_foreign_down_drops_by_name() {
        let schema = parse_schema("user_id:integer:foreign");
        let fragments = SyntaxBuilder::default()
            .create(&schema, &intent(Action::Add))
            .unwrap();
        assert_eq!(fragments.down.matches("$table->dropColumn('user_id');").count(), 2);
    }

    #[test]
    fn test_unknown_action_fails() {
        let err = SyntaxBuilder::default()
            .create(&[], &intent(Action::Other("rename".into())))
            .unwrap_err();
        assert!(matches!(err, GeneratorError::UnknownIntent(ref verb) if verb == "rename"));
    }

    #[test]
    fn test_pivot_schema() {
        let schema = parse_schema("role:string, active:boolean:default(true)");
        let out = SyntaxBuilder::default().create_pivot_schema(&schema, "a\n            {{schema_up}}\nb");
        assert_eq!(
            out,
            "a
            $table->string('role');
            $table->boolean('active')->default(true);
b"
        );
    }
}
