//! Stub templates with `{{placeholder}}` tokens.
//!
//! The built-in stubs are compiled into the binary. A stub directory can
//! override any of them file by file; missing files fall back to the
//! built-in text.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::error::GeneratorResult;

/// Placeholder the rendered column block is substituted into.
pub const SCHEMA_UP: &str = "schema_up";

const SCHEMA_CREATE: &str = include_str!("../stubs/schema-create.stub");
const SCHEMA_CHANGE: &str = include_str!("../stubs/schema-change.stub");
const MIGRATION: &str = include_str!("../stubs/migration.stub");
const PIVOT: &str = include_str!("../stubs/pivot.stub");
const PIVOT_SCHEMA: &str = include_str!("../stubs/pivot-schema.stub");

/// The stub set used by the builder and the file renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Templates {
    /// Wrapper for a new table (`Schema::create`).
    pub schema_create: String,
    /// Wrapper for an existing table (`Schema::table`).
    pub schema_change: String,
    /// Full migration file.
    pub migration: String,
    /// Pivot migration file without extra columns.
    pub pivot: String,
    /// Pivot migration file with a `{{schema_up}}` slot for extra columns.
    pub pivot_schema: String,
}

impl Default for Templates {
    fn default() -> Self {
        Self {
            schema_create: SCHEMA_CREATE.to_string(),
            schema_change: SCHEMA_CHANGE.to_string(),
            migration: MIGRATION.to_string(),
            pivot: PIVOT.to_string(),
            pivot_schema: PIVOT_SCHEMA.to_string(),
        }
    }
}

impl Templates {
    /// Load stubs from `dir`, falling back to the built-ins per file.
    pub fn load(dir: &Path) -> GeneratorResult<Self> {
        debug!(dir = %dir.display(), "loading stubs");
        Ok(Self {
            schema_create: read_or(dir, "schema-create.stub", SCHEMA_CREATE)?,
            schema_change: read_or(dir, "schema-change.stub", SCHEMA_CHANGE)?,
            migration: read_or(dir, "migration.stub", MIGRATION)?,
            pivot: read_or(dir, "pivot.stub", PIVOT)?,
            pivot_schema: read_or(dir, "pivot-schema.stub", PIVOT_SCHEMA)?,
        })
    }
}

fn read_or(dir: &Path, file: &str, builtin: &str) -> GeneratorResult<String> {
    match fs::read_to_string(dir.join(file)) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(builtin.to_string()),
        Err(e) => Err(e.into()),
    }
}

/// Replace every `{{placeholder}}` in `template` with `value`.
pub fn fill(template: &str, placeholder: &str, value: &str) -> String {
    template.replace(&format!("{{{{{}}}}}", placeholder), value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_replaces_all_occurrences() {
        let out = fill("{{a}} and {{a}} but not {{b}}", "a", "x");
        assert_eq!(out, "x and x but not {{b}}");
    }

    #[test]
    fn test_builtin_wrappers_have_schema_slot() {
        let t = Templates::default();
        assert!(t.schema_create.contains("{{schema_up}}"));
        assert!(t.schema_change.contains("{{schema_up}}"));
        assert!(t.pivot_schema.contains("{{schema_up}}"));
        assert!(!t.pivot.contains("{{schema_up}}"));
    }

    #[test]
    fn test_load_missing_dir_falls_back() {
        let dir = std::env::temp_dir().join("schemagen-no-such-stub-dir");
        let t = Templates::load(&dir).unwrap();
        assert_eq!(t, Templates::default());
    }

    #[test]
    fn test_load_overrides_single_stub() {
        let dir = std::env::temp_dir().join(format!("schemagen-stubs-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("schema-change.stub"), "alter {{table}}: {{schema_up}}").unwrap();

        let t = Templates::load(&dir).unwrap();
        assert_eq!(t.schema_change, "alter {{table}}: {{schema_up}}");
        assert_eq!(t.schema_create, Templates::default().schema_create);

        fs::remove_dir_all(&dir).unwrap();
    }
}
