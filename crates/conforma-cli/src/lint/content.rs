//! Content checks: voice, Overview section, Table of Contents

use crate::error::Result;
use crate::lint::frontmatter::Frontmatter;
use crate::lint::report::{Category, LintReport};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

static FIRST_PERSON: OnceLock<Vec<Regex>> = OnceLock::new();
static SECOND_PERSON: OnceLock<Vec<Regex>> = OnceLock::new();
static OVERVIEW_HEADING: OnceLock<Regex> = OnceLock::new();

fn first_person_patterns() -> &'static [Regex] {
    FIRST_PERSON.get_or_init(|| {
        vec![
            Regex::new(r"(?i)\bI\s+(can|will|am|have|do)\b").unwrap(),
            Regex::new(r"(?i)\bI'm\b").unwrap(),
            Regex::new(r"(?i)\bI've\b").unwrap(),
            Regex::new(r"(?i)\bmy\s+\w+").unwrap(),
        ]
    })
}

fn second_person_patterns() -> &'static [Regex] {
    SECOND_PERSON.get_or_init(|| {
        vec![
            Regex::new(r"(?i)\byou\s+(can|will|are|have|do)\b").unwrap(),
            Regex::new(r"(?i)\byou're\b").unwrap(),
            Regex::new(r"(?i)\byou've\b").unwrap(),
            Regex::new(r"(?i)\byour\s+\w+").unwrap(),
        ]
    })
}

/// Whether a description reads as third-person voice
pub fn is_third_person(text: &str) -> bool {
    let first = first_person_patterns();
    let second = second_person_patterns();

    first.iter().chain(second.iter()).all(|p| !p.is_match(text))
}

/// Run the content checks for a skill directory
pub fn check(
    skill_dir: &Path,
    frontmatter: Option<&Frontmatter>,
    report: &mut LintReport,
) -> Result<()> {
    let skill_md = skill_dir.join("SKILL.md");

    if !skill_md.exists() {
        return Ok(());
    }

    let content = fs::read_to_string(&skill_md)?;

    if let Some(description) = frontmatter.and_then(|f| f.description.as_deref()) {
        if is_third_person(description) {
            report.pass(Category::Content, "Third-person description");
        } else {
            report.warn(
                Category::Content,
                "Description may not be in third-person voice",
            );
        }
    }

    let overview = OVERVIEW_HEADING
        .get_or_init(|| Regex::new(r"(?m)^#{1,2}\s+Overview").unwrap());

    if overview.is_match(&content) {
        report.pass(Category::Content, "Overview section exists");
    } else {
        report.warn(Category::Content, "No Overview section found");
    }

    if content.to_lowercase().contains("table of contents") {
        report.pass(Category::Content, "Table of Contents exists");
    } else {
        report.warn(Category::Content, "No Table of Contents found");
    }

    Ok(())
}
