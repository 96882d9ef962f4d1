//! Skill package linting
//!
//! A skill package is a directory with a `SKILL.md` (YAML front matter plus
//! a markdown body) and optional `scripts/` and `references/` trees. The
//! linter runs five independent check families over it and accumulates a
//! categorized PASS/WARN/FAIL report. It shares no state with the schema
//! validator and never invokes it.

pub mod content;
pub mod frontmatter;
pub mod report;
pub mod schemas;
pub mod scripts;
pub mod structure;

pub use report::{Category, Finding, LintReport, Status};

use crate::config::LintConfig;
use crate::error::Result;
use std::path::Path;

/// Run every check family over a skill directory
///
/// Returns the display name for the report (front-matter `name` when
/// present, directory basename otherwise) alongside the findings.
pub fn run(skill_dir: &Path, limits: &LintConfig) -> Result<(String, LintReport)> {
    let mut report = LintReport::new();

    let front = frontmatter::check(skill_dir, limits, &mut report)?;
    structure::check(skill_dir, limits, &mut report)?;
    content::check(skill_dir, front.as_ref(), &mut report)?;
    scripts::check(skill_dir, &mut report)?;
    schemas::check(skill_dir, &mut report)?;

    let skill_name = front
        .and_then(|f| f.name)
        .unwrap_or_else(|| {
            skill_dir
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| skill_dir.display().to_string())
        });

    tracing::info!(
        skill = %skill_name,
        failures = report.failure_count(),
        warnings = report.warning_count(),
        "lint run complete"
    );

    Ok((skill_name, report))
}
