use std::fs;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use semadiff_engine::{detect_format, semantic_diff, DiffFormat, SemanticDiffResult};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Diff(args) => cmd_diff(args, &cli.format),
        Command::Detect(args) => cmd_detect(args, &cli.format),
    }
}

fn cmd_diff(args: DiffArgs, output: &OutputFormat) -> anyhow::Result<()> {
    let label = match &args.label {
        Some(label) => label.clone(),
        None => display_label(&args),
    };

    let base = read_optional(&args.base)?;
    let head = read_optional(&args.head)?;
    let result = semantic_diff(&label, base.as_deref(), head.as_deref());

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => print_text(&result),
    }
    Ok(())
}

fn cmd_detect(args: DetectArgs, output: &OutputFormat) -> anyhow::Result<()> {
    let format = detect_format(&args.path);
    match output {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "path": args.path, "format": format }))
        }
        OutputFormat::Text => println!("{format}"),
    }
    Ok(())
}

/// The display path for the diff: the head file's name, or the base's
/// when the head side is the one that no longer exists.
fn display_label(args: &DiffArgs) -> String {
    for candidate in [&args.head, &args.base] {
        if let Some(name) = Path::new(candidate).file_name().and_then(|n| n.to_str()) {
            return name.to_string();
        }
    }
    args.head.clone()
}

/// Read a file, mapping "does not exist" to `None` so the engine can
/// distinguish a missing revision from an empty file.
fn read_optional(path: &str) -> anyhow::Result<Option<Vec<u8>>> {
    if !Path::new(path).exists() {
        return Ok(None);
    }
    let bytes = fs::read(path).with_context(|| format!("failed to read {path}"))?;
    Ok(Some(bytes))
}

fn print_text(result: &SemanticDiffResult) {
    let style = match result.format {
        DiffFormat::Unified | DiffFormat::Fallback => "unified diff",
        _ => "semantic diff",
    };
    println!("{}", format!("Format: {} ({style})", result.format).bold());

    if let Some(message) = &result.message {
        println!("{}", format!("warning: {message}").yellow());
    }

    for line in result.diff.lines() {
        if line.starts_with('+') && !line.starts_with("+++") {
            println!("{}", line.green());
        } else if line.starts_with('-') && !line.starts_with("---") {
            println!("{}", line.red());
        } else {
            println!("{line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_absent() {
        let result = read_optional("/nonexistent/semadiff-test-file").unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn label_prefers_head_file_name() {
        let args = DiffArgs {
            base: "/tmp/old/config.json".into(),
            head: "/tmp/new/config.json".into(),
            label: None,
        };
        assert_eq!(display_label(&args), "config.json");
    }
}
