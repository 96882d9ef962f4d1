//! Lint findings and the accumulated report

use serde::Serialize;
use std::fmt;

/// Outcome of one individual check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pass,
    Warn,
    Fail,
}

/// The check families, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    Frontmatter,
    Structure,
    Content,
    Scripts,
    Schemas,
}

impl Category {
    /// Fixed rendering order of the report sections
    pub const ALL: [Category; 5] = [
        Category::Frontmatter,
        Category::Structure,
        Category::Content,
        Category::Scripts,
        Category::Schemas,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Frontmatter => "Frontmatter",
            Category::Structure => "Structure",
            Category::Content => "Content",
            Category::Scripts => "Scripts",
            Category::Schemas => "Schemas",
        };
        f.write_str(name)
    }
}

/// One check result
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub category: Category,
    pub status: Status,
    pub message: String,
}

/// All findings for one lint run
#[derive(Debug, Default, Serialize)]
pub struct LintReport {
    findings: Vec<Finding>,
}

impl LintReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a passing check
    pub fn pass(&mut self, category: Category, message: impl Into<String>) {
        self.add(category, Status::Pass, message);
    }

    /// Record a warning
    pub fn warn(&mut self, category: Category, message: impl Into<String>) {
        self.add(category, Status::Warn, message);
    }

    /// Record a failing check
    pub fn fail(&mut self, category: Category, message: impl Into<String>) {
        self.add(category, Status::Fail, message);
    }

    fn add(&mut self, category: Category, status: Status, message: impl Into<String>) {
        self.findings.push(Finding {
            category,
            status,
            message: message.into(),
        });
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Findings of one category with one status, in recorded order
    pub fn in_category(
        &self,
        category: Category,
        status: Status,
    ) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(move |f| f.category == category && f.status == status)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Status::Warn)
    }

    pub fn failure_count(&self) -> usize {
        self.count(Status::Fail)
    }

    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }

    fn count(&self, status: Status) -> usize {
        self.findings.iter().filter(|f| f.status == status).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_track_recorded_findings() {
        let mut report = LintReport::new();
        report.pass(Category::Frontmatter, "name: valid (10 chars)");
        report.warn(Category::Content, "No Overview section found");
        report.fail(Category::Structure, "SKILL.md not found");
        report.fail(Category::Scripts, "check.js: syntax error");

        assert_eq!(report.warning_count(), 1);
        assert_eq!(report.failure_count(), 2);
        assert!(report.has_failures());
        assert_eq!(
            report
                .in_category(Category::Structure, Status::Fail)
                .count(),
            1
        );
    }

    #[test]
    fn empty_report_has_no_failures() {
        assert!(!LintReport::new().has_failures());
    }
}
