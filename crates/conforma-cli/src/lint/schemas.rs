//! Bundled schema checks: references/schemas/*.json must parse

use crate::error::Result;
use crate::lint::report::{Category, LintReport};
use std::fs;
use std::path::Path;

/// Run the bundled-schema checks for a skill directory
///
/// This deliberately stops at "parses and looks like a schema"; it shares
/// nothing with the validator.
pub fn check(skill_dir: &Path, report: &mut LintReport) -> Result<()> {
    let schemas_dir = skill_dir.join("references").join("schemas");

    if !schemas_dir.exists() {
        // Schemas are optional
        return Ok(());
    }

    let mut names: Vec<String> = fs::read_dir(&schemas_dir)?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.ends_with(".json"))
        .collect();
    names.sort();

    for name in &names {
        let content = fs::read_to_string(schemas_dir.join(name))?;

        match serde_json::from_str::<serde_json::Value>(&content) {
            Ok(parsed) => {
                let looks_like_schema = parsed
                    .as_object()
                    .map(|obj| {
                        obj.contains_key("$schema")
                            || obj.contains_key("type")
                            || obj.contains_key("properties")
                    })
                    .unwrap_or(false);

                if looks_like_schema {
                    report.pass(Category::Schemas, format!("{}: valid JSON Schema", name));
                } else {
                    report.warn(
                        Category::Schemas,
                        format!("{}: valid JSON but may not be a schema", name),
                    );
                }
            }
            Err(e) => {
                report.fail(Category::Schemas, format!("{}: invalid JSON - {}", name, e));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn schemas_dir(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("references").join("schemas");
        fs::create_dir_all(&path).unwrap();
        path
    }

    #[test]
    fn valid_schema_files_pass() {
        let dir = tempfile::tempdir().unwrap();
        let schemas = schemas_dir(dir.path());
        fs::write(
            schemas.join("requirements.schema.json"),
            "{\"type\": \"object\", \"properties\": {}}",
        )
        .unwrap();

        let mut report = LintReport::new();
        check(dir.path(), &mut report).unwrap();
        assert_eq!(report.failure_count(), 0);
        assert!(report.findings()[0].message.contains("valid JSON Schema"));
    }

    #[test]
    fn json_without_schema_markers_warns() {
        let dir = tempfile::tempdir().unwrap();
        let schemas = schemas_dir(dir.path());
        fs::write(schemas.join("data.json"), "{\"rows\": []}").unwrap();

        let mut report = LintReport::new();
        check(dir.path(), &mut report).unwrap();
        assert_eq!(report.warning_count(), 1);
        assert!(report.findings()[0].message.contains("may not be a schema"));
    }

    #[test]
    fn unparseable_json_fails() {
        let dir = tempfile::tempdir().unwrap();
        let schemas = schemas_dir(dir.path());
        fs::write(schemas.join("broken.json"), "{not json").unwrap();

        let mut report = LintReport::new();
        check(dir.path(), &mut report).unwrap();
        assert_eq!(report.failure_count(), 1);
        assert!(report.findings()[0].message.contains("invalid JSON"));
    }
}
