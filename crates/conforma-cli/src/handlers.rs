//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

use crate::cli::{CompletionsArgs, LintArgs, OutputFormat, ValidateArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::lint::{self, Category, Finding, LintReport, Status};
use crate::output::OutputWriter;
use clap::CommandFactory;
use colored::Colorize;
use conforma_core::{ValidationError, Validator};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Machine-readable result of a validate run
#[derive(Serialize)]
struct ValidationReport<'a> {
    valid: bool,
    errors: &'a [ValidationError],
}

/// Machine-readable result of a lint run
#[derive(Serialize)]
struct LintSummary<'a> {
    skill: &'a str,
    passed: bool,
    warnings: usize,
    failures: usize,
    findings: &'a [Finding],
}

/// Handle the validate command
pub fn handle_validate(
    args: ValidateArgs,
    _config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    info!(
        schema = %args.schema.display(),
        instance = %args.instance.display(),
        "Starting validation"
    );
    output.info(&format!(
        "Validating {} against {}",
        args.instance.display(),
        args.schema.display()
    ))?;

    let schema_document = load_document(&args.schema)?;
    let instance = load_document(&args.instance)?;

    let mut validator = Validator::compile(&schema_document)?;
    if let Some(limit) = args.max_depth {
        validator = validator.with_max_depth(limit);
    }

    let errors = validator.validate(&instance)?;
    debug!(errors = errors.len(), "Validation walk finished");

    match output.format() {
        OutputFormat::Human => {
            if errors.is_empty() {
                output.success(&format!(
                    "✓ Validation successful: {} conforms to {}",
                    args.instance.display(),
                    args.schema.display()
                ))?;
            } else {
                output.error(&format!(
                    "✗ Validation failed: {} error(s) found",
                    errors.len()
                ))?;
                output.writeln("")?;
                for (index, error) in errors.iter().enumerate() {
                    output.writeln(&format!("  {}. {}", index + 1, error))?;
                }
            }

            if args.detailed {
                output.section("Instance")?;
                output.data(&instance)?;
            }
        }
        _ => {
            output.data(&ValidationReport {
                valid: errors.is_empty(),
                errors: &errors,
            })?;
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        warn!(errors = errors.len(), "Instance does not conform");
        Err(Error::ValidationFailed {
            count: errors.len(),
        })
    }
}

/// Handle the lint command
pub fn handle_lint(args: LintArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let skill_dir = &args.skill_dir;

    if !skill_dir.exists() {
        return Err(Error::DirectoryNotFound {
            path: skill_dir.clone(),
        });
    }
    if !skill_dir.is_dir() {
        return Err(Error::NotADirectory {
            path: skill_dir.clone(),
        });
    }

    info!(skill_dir = %skill_dir.display(), "Starting lint run");
    let (skill_name, report) = lint::run(skill_dir, &config.lint)?;

    match output.format() {
        OutputFormat::Human => render_lint_report(output, &skill_name, &report)?,
        _ => output.data(&LintSummary {
            skill: &skill_name,
            passed: !report.has_failures(),
            warnings: report.warning_count(),
            failures: report.failure_count(),
            findings: report.findings(),
        })?,
    }

    if report.has_failures() {
        Err(Error::LintFailed {
            failures: report.failure_count(),
        })
    } else {
        Ok(())
    }
}

/// Handle the completions command
pub fn handle_completions(args: CompletionsArgs) -> Result<()> {
    use clap_complete::generate;
    use std::io;

    let mut cmd = crate::cli::Cli::command();
    let name = cmd.get_name().to_string();

    generate(args.shell.to_clap_shell(), &mut cmd, name, &mut io::stdout());

    Ok(())
}

/// Load a JSON or YAML document, selecting the parser by file extension
fn load_document(path: &Path) -> Result<serde_json::Value> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;

    let is_yaml = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s == "yaml" || s == "yml")
        .unwrap_or(false);

    if is_yaml {
        serde_yaml::from_str(&content).map_err(|e| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "YAML".to_string(),
            detail: e.to_string(),
        })
    } else {
        serde_json::from_str(&content).map_err(|e| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "JSON".to_string(),
            detail: e.to_string(),
        })
    }
}

/// Render the categorized lint report for human reading
fn render_lint_report(
    output: &mut OutputWriter,
    skill_name: &str,
    report: &LintReport,
) -> Result<()> {
    let title = format!("Skill Validation Report: {}", skill_name);
    output.writeln("")?;
    if output.use_color() {
        output.writeln(&title.bold().to_string())?;
    } else {
        output.writeln(&title)?;
    }
    output.writeln(&"=".repeat(title.chars().count()))?;

    let statuses = [Status::Pass, Status::Warn, Status::Fail];

    for category in Category::ALL {
        let count: usize = statuses
            .iter()
            .map(|status| report.in_category(category, *status).count())
            .sum();
        if count == 0 {
            continue;
        }

        output.writeln("")?;
        output.writeln(&format!("{}:", category))?;

        for status in statuses {
            for finding in report.in_category(category, status) {
                output.writeln(&format!(
                    "  {} {}",
                    status_tag(status, output.use_color()),
                    finding.message
                ))?;
            }
        }
    }

    output.writeln("")?;
    if report.has_failures() {
        output.error("Overall: FAIL")?;
    } else {
        output.success("Overall: PASS")?;
    }

    let warnings = report.warning_count();
    if warnings > 0 {
        output.warning(&format!(
            "({} warning{})",
            warnings,
            if warnings > 1 { "s" } else { "" }
        ))?;
    }

    let failures = report.failure_count();
    if failures > 0 {
        output.error(&format!(
            "({} error{})",
            failures,
            if failures > 1 { "s" } else { "" }
        ))?;
    }

    output.writeln("")?;

    Ok(())
}

fn status_tag(status: Status, use_color: bool) -> String {
    let tag = match status {
        Status::Pass => "[PASS]",
        Status::Warn => "[WARN]",
        Status::Fail => "[FAIL]",
    };

    if use_color {
        match status {
            Status::Pass => tag.green().to_string(),
            Status::Warn => tag.yellow().to_string(),
            Status::Fail => tag.red().to_string(),
        }
    } else {
        tag.to_string()
    }
}
