//! YAML front-matter extraction and checks for SKILL.md

use crate::config::LintConfig;
use crate::error::Result;
use crate::lint::report::{Category, LintReport};
use std::fs;
use std::path::Path;

/// Words that may not appear in a skill name
const RESERVED_NAME_WORDS: [&str; 2] = ["anthropic", "claude"];

/// The front-matter fields the linter cares about
#[derive(Debug, Clone, Default)]
pub struct Frontmatter {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Split a markdown document into its front-matter block and body
///
/// The document must begin with a `---` line; the block runs to the next
/// `---` line. Without such a block the whole document is the body.
pub fn split_document(content: &str) -> (Option<&str>, &str) {
    let Some(rest) = content.strip_prefix("---\n") else {
        return (None, content);
    };

    match rest.find("\n---") {
        Some(end) => {
            let block = &rest[..end];
            let after = &rest[end + "\n---".len()..];
            let body = after.strip_prefix('\n').unwrap_or(after);
            (Some(block), body)
        }
        None => (None, content),
    }
}

/// Parse the front-matter block into the fields the checks need
pub fn parse(block: &str) -> Option<Frontmatter> {
    let parsed: serde_yaml::Value = serde_yaml::from_str(block).ok()?;
    let mapping = parsed.as_mapping()?;

    let field = |name: &str| {
        mapping.iter().find_map(|(key, value)| {
            if key.as_str() == Some(name) {
                value.as_str().map(str::to_string)
            } else {
                None
            }
        })
    };

    Some(Frontmatter {
        name: field("name"),
        description: field("description"),
    })
}

/// Run the front-matter checks for a skill directory
pub fn check(
    skill_dir: &Path,
    limits: &LintConfig,
    report: &mut LintReport,
) -> Result<Option<Frontmatter>> {
    let skill_md = skill_dir.join("SKILL.md");

    if !skill_md.exists() {
        report.fail(Category::Frontmatter, "SKILL.md not found");
        return Ok(None);
    }

    let content = fs::read_to_string(&skill_md)?;
    let (block, _) = split_document(&content);

    let Some(block) = block else {
        report.fail(Category::Frontmatter, "No YAML frontmatter found");
        return Ok(None);
    };

    let Some(frontmatter) = parse(block) else {
        report.fail(Category::Frontmatter, "Frontmatter is not a YAML mapping");
        return Ok(None);
    };

    check_name(frontmatter.name.as_deref(), limits, report);
    check_description(frontmatter.description.as_deref(), limits, report);

    Ok(Some(frontmatter))
}

fn check_name(name: Option<&str>, limits: &LintConfig, report: &mut LintReport) {
    let Some(name) = name else {
        report.fail(Category::Frontmatter, "name field is missing");
        return;
    };

    let length = name.chars().count();
    let lowered = name.to_lowercase();

    if length > limits.max_name_length {
        report.fail(
            Category::Frontmatter,
            format!(
                "name exceeds {} characters ({} chars)",
                limits.max_name_length, length
            ),
        );
    } else if RESERVED_NAME_WORDS.iter().any(|word| lowered.contains(word)) {
        report.fail(
            Category::Frontmatter,
            "name contains reserved word (anthropic or claude)",
        );
    } else {
        report.pass(
            Category::Frontmatter,
            format!("name: valid ({} chars)", length),
        );
    }
}

fn check_description(description: Option<&str>, limits: &LintConfig, report: &mut LintReport) {
    let Some(description) = description else {
        report.fail(Category::Frontmatter, "description field is missing");
        return;
    };

    let length = description.chars().count();

    if length == 0 {
        report.fail(Category::Frontmatter, "description is empty");
    } else if length > limits.max_description_length {
        report.fail(
            Category::Frontmatter,
            format!(
                "description exceeds {} characters ({} chars)",
                limits.max_description_length, length
            ),
        );
    } else {
        report.pass(
            Category::Frontmatter,
            format!("description: valid ({} chars)", length),
        );
    }
}
