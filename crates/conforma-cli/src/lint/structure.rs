//! Directory-structure checks: SKILL.md presence, body size, references

use crate::config::LintConfig;
use crate::error::Result;
use crate::lint::frontmatter::split_document;
use crate::lint::report::{Category, LintReport};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

static MARKDOWN_LINK: OnceLock<Regex> = OnceLock::new();

/// A markdown link, `[text](href)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    #[allow(dead_code)]
    pub text: String,
    pub href: String,
}

/// Extract all markdown links from a document
pub fn extract_links(content: &str) -> Vec<Link> {
    let regex = MARKDOWN_LINK
        .get_or_init(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());

    regex
        .captures_iter(content)
        .map(|captures| Link {
            text: captures[1].to_string(),
            href: captures[2].to_string(),
        })
        .collect()
}

fn is_reference_href(href: &str) -> bool {
    href.starts_with("references/") || href.starts_with("./references/")
}

/// Run the structure checks for a skill directory
pub fn check(skill_dir: &Path, limits: &LintConfig, report: &mut LintReport) -> Result<()> {
    let skill_md = skill_dir.join("SKILL.md");

    if !skill_md.exists() {
        report.fail(Category::Structure, "SKILL.md does not exist");
        return Ok(());
    }

    report.pass(Category::Structure, "SKILL.md exists");

    let content = fs::read_to_string(&skill_md)?;
    let (_, body) = split_document(&content);
    let line_count = body.split('\n').count();

    if line_count >= limits.max_body_lines {
        report.fail(
            Category::Structure,
            format!(
                "SKILL.md body: {} lines (exceeds {})",
                line_count, limits.max_body_lines
            ),
        );
    } else {
        report.pass(
            Category::Structure,
            format!(
                "SKILL.md body: {} lines (under {})",
                line_count, limits.max_body_lines
            ),
        );
    }

    check_references(skill_dir, &content, report)?;

    Ok(())
}

/// Resolve `references/` links on disk and bound the reference depth
fn check_references(skill_dir: &Path, content: &str, report: &mut LintReport) -> Result<()> {
    let reference_links: Vec<Link> = extract_links(content)
        .into_iter()
        .filter(|link| is_reference_href(&link.href))
        .collect();

    let mut resolved_count = 0;
    let mut unresolved = Vec::new();

    for link in &reference_links {
        let relative = link.href.strip_prefix("./").unwrap_or(&link.href);
        let reference_path = skill_dir.join(relative);

        if !reference_path.exists() {
            unresolved.push(link.href.clone());
            continue;
        }
        resolved_count += 1;

        // One-level depth rule: referenced files must not chain further
        let reference_content = fs::read_to_string(&reference_path)?;
        let nested = extract_links(&reference_content)
            .into_iter()
            .any(|nested| is_reference_href(&nested.href) || nested.href.starts_with("../"));

        if nested {
            report.warn(
                Category::Structure,
                format!("{} contains nested references", link.href),
            );
        }
    }

    if !unresolved.is_empty() {
        report.fail(
            Category::Structure,
            format!("Unresolved references: {}", unresolved.join(", ")),
        );
    } else if !reference_links.is_empty() {
        report.pass(
            Category::Structure,
            format!("All references resolve ({} files)", resolved_count),
        );
    }

    report.pass(Category::Structure, "Reference depth: 1 level");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn extracts_text_and_href() {
        let links = extract_links("See [the guide](references/guide.md) and [home](https://example.com).");
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].text, "the guide");
        assert_eq!(links[0].href, "references/guide.md");
        assert_eq!(links[1].href, "https://example.com");
    }

    #[test]
    fn missing_skill_md_fails_immediately() {
        let dir = tempfile::tempdir().unwrap();
        let mut report = LintReport::new();
        check(dir.path(), &LintConfig::default(), &mut report).unwrap();
        assert_eq!(report.failure_count(), 1);
        assert!(report.findings()[0].message.contains("does not exist"));
    }

    #[test]
    fn unresolved_reference_links_fail() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("SKILL.md"),
            "---\nname: s\ndescription: d\n---\nSee [guide](references/guide.md).\n",
        )
        .unwrap();

        let mut report = LintReport::new();
        check(dir.path(), &LintConfig::default(), &mut report).unwrap();
        assert!(report.has_failures());
        assert!(report
            .findings()
            .iter()
            .any(|f| f.message.contains("Unresolved references: references/guide.md")));
    }

    #[test]
    fn resolving_references_pass_and_nested_ones_warn() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("references")).unwrap();
        fs::write(
            dir.path().join("references/guide.md"),
            "Chains to [deeper](references/deeper.md).\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("SKILL.md"),
            "---\nname: s\ndescription: d\n---\nSee [guide](./references/guide.md).\n",
        )
        .unwrap();

        let mut report = LintReport::new();
        check(dir.path(), &LintConfig::default(), &mut report).unwrap();
        assert!(!report.has_failures());
        assert_eq!(report.warning_count(), 1);
        assert!(report
            .findings()
            .iter()
            .any(|f| f.message.contains("nested references")));
    }

    #[test]
    fn oversized_body_fails() {
        let dir = tempfile::tempdir().unwrap();
        let body = "line\n".repeat(600);
        fs::write(
            dir.path().join("SKILL.md"),
            format!("---\nname: s\ndescription: d\n---\n{}", body),
        )
        .unwrap();

        let mut report = LintReport::new();
        check(dir.path(), &LintConfig::default(), &mut report).unwrap();
        assert!(report
            .findings()
            .iter()
            .any(|f| f.message.contains("exceeds 500")));
    }
}
