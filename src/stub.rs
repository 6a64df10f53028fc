//! Full migration file rendering.
//!
//! The builder only produces the `up`/`down` bodies. This module names the
//! migration class and file and fills the outer migration stub.

use chrono::{DateTime, Local, TimeZone};

use crate::ast::{CodeFragments, Schema};
use crate::builder::SyntaxBuilder;
use crate::inflect::{singularize, to_pascal_case};
use crate::templates::{fill, Templates};

const TIMESTAMP_FORMAT: &str = "%Y_%m_%d_%H%M%S";

/// A named migration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStub {
    name: String,
    timestamp: String,
}

impl MigrationStub {
    /// A migration stamped with the current local time.
    pub fn new(name: impl Into<String>) -> Self {
        Self::at(name, Local::now())
    }

    /// A migration stamped with the given time.
    pub fn at<Tz: TimeZone>(name: impl Into<String>, time: DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            name: name.into(),
            timestamp: time.format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    /// `create_posts_table` -> `CreatePostsTable`.
    pub fn class_name(&self) -> String {
        to_pascal_case(&self.name)
    }

    /// `2024_01_31_120000_create_posts_table.php`.
    pub fn file_name(&self) -> String {
        format!("{}_{}.php", self.timestamp, self.name)
    }

    /// Fill the migration stub with the class, fragments and table name.
    ///
    /// `{{table}}` is substituted last so the token left in the wrapper
    /// fragments is resolved as well.
    pub fn render(&self, templates: &Templates, fragments: &CodeFragments, table: &str) -> String {
        let stub = fill(&templates.migration, "class", &self.class_name());
        let stub = fill(&stub, "schema_up", &fragments.up);
        let stub = fill(&stub, "schema_down", &fragments.down);
        fill(&stub, "table", table)
    }
}

/// A many-to-many join table migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PivotMigration {
    /// Both table names, lowercased and sorted.
    tables: [String; 2],
    timestamp: String,
}

impl PivotMigration {
    pub fn new(table_one: &str, table_two: &str) -> Self {
        Self::at(table_one, table_two, Local::now())
    }

    pub fn at<Tz: TimeZone>(table_one: &str, table_two: &str, time: DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        let mut tables = [table_one.to_lowercase(), table_two.to_lowercase()];
        tables.sort();
        Self {
            tables,
            timestamp: time.format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    fn singular_tables(&self) -> [String; 2] {
        [singularize(&self.tables[0]), singularize(&self.tables[1])]
    }

    /// `posts` + `tags` -> `post_tag`.
    pub fn table_name(&self) -> String {
        self.singular_tables().join("_")
    }

    /// `posts` + `tags` -> `CreatePostTagPivotTable`.
    pub fn class_name(&self) -> String {
        let name: String = self.singular_tables().iter().map(|t| to_pascal_case(t)).collect();
        format!("Create{}PivotTable", name)
    }

    pub fn file_name(&self) -> String {
        format!("{}_create_{}_pivot_table.php", self.timestamp, self.table_name())
    }

    /// Render the pivot migration, folding `schema` columns in when given.
    pub fn render(&self, builder: &SyntaxBuilder, schema: Option<&Schema>) -> String {
        let templates = builder.templates();
        let [column_one, column_two] = self.singular_tables();
        let [table_one, table_two] = &self.tables;

        let stub = match schema {
            Some(_) => &templates.pivot_schema,
            None => &templates.pivot,
        };
        let stub = fill(stub, "pivotTableName", &self.table_name());
        let stub = fill(&stub, "columnOne", &column_one);
        let stub = fill(&stub, "columnTwo", &column_two);
        let stub = fill(&stub, "tableOne", table_one);
        let stub = fill(&stub, "tableTwo", table_two);

        let stub = match schema {
            Some(schema) => builder.create_pivot_schema(schema, &stub),
            None => stub,
        };
        fill(&stub, "class", &self.class_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Action, MigrationIntent};
    use crate::parser::parse_schema;
    use chrono::Utc;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 31, 12, 5, 9).unwrap()
    }

    #[test]
    fn test_migration_names() {
        let stub = MigrationStub::at("create_posts_table", fixed_time());
        assert_eq!(stub.class_name(), "CreatePostsTable");
        assert_eq!(stub.file_name(), "2024_01_31_120509_create_posts_table.php");
    }

    #[test]
    fn test_migration_render_resolves_table() {
        let builder = SyntaxBuilder::default();
        let intent = MigrationIntent::new(Action::Create, "posts");
        let fragments = builder.create(&parse_schema("title:string"), &intent).unwrap();

        let stub = MigrationStub::at("create_posts_table", fixed_time());
        let out = stub.render(builder.templates(), &fragments, &intent.table);

        assert!(out.contains("class CreatePostsTable extends Migration"));
        assert!(out.contains("Schema::create('posts', function (Blueprint $table) {"));
        assert!(out.contains("$table->string('title');"));
        assert!(out.contains("Schema::dropIfExists('posts');"));
        assert!(!out.contains("{{"));
    }

    #[test]
    fn test_pivot_names_are_sorted_and_singular() {
        let pivot = PivotMigration::at("Tags", "posts", fixed_time());
        assert_eq!(pivot.table_name(), "post_tag");
        assert_eq!(pivot.class_name(), "CreatePostTagPivotTable");
        assert_eq!(
            pivot.file_name(),
            "2024_01_31_120509_create_post_tag_pivot_table.php"
        );
    }

    #[test]
    fn test_pivot_names_keep_stem_e() {
        let pivot = PivotMigration::at("students", "courses", fixed_time());
        assert_eq!(pivot.table_name(), "course_student");
        assert_eq!(pivot.class_name(), "CreateCourseStudentPivotTable");
    }

    #[test]
    fn test_pivot_render_without_schema() {
        let pivot = PivotMigration::at("tags", "posts", fixed_time());
        let out = pivot.render(&SyntaxBuilder::default(), None);

        assert!(out.contains("class CreatePostTagPivotTable extends Migration"));
        assert!(out.contains("Schema::create('post_tag'"));
        assert!(out.contains("$table->foreign('post_id')->references('id')->on('posts')"));
        assert!(out.contains("$table->foreign('tag_id')->references('id')->on('tags')"));
        assert!(!out.contains("{{"));
    }

    #[test]
    fn test_pivot_render_with_schema() {
        let pivot = PivotMigration::at("tags", "posts", fixed_time());
        let schema = parse_schema("weight:integer:default(0)");
        let out = pivot.render(&SyntaxBuilder::default(), Some(&schema));

        assert!(out.contains(
            "$table->primary(['post_id', 'tag_id']);\n            $table->integer('weight')->default(0);"
        ));
        assert!(!out.contains("increments"));
        assert!(!out.contains("{{"));
    }
}
