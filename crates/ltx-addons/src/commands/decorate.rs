/*
 * decorate.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Decorate command implementation
 */

//! Decorate command implementation.
//!
//! A single file is written to `--output` or stdout. A directory is walked
//! for `.html` files, which are written under `--output` at the same
//! relative paths; a failed file does not stop the batch.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};
use walkdir::WalkDir;

use ltx_addons_core::{AddonsConfig, AddonsError, PaperInfo, decorate_source};
use ltx_error_reporting::{DiagnosticKind, SourceFile};

/// Arguments for the decorate command
#[derive(Debug)]
pub struct DecorateArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub id: Option<String>,
    pub submission: bool,
    pub quiet: bool,
    pub diagnostics_json: bool,
}

/// Execute the decorate command
pub fn execute(args: DecorateArgs) -> Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input path does not exist: {}", args.input.display());
    }

    let (config, config_path) = AddonsConfig::discover(&args.input, args.config.as_deref())
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    if let Some(path) = &config_path {
        debug!("Using config: {}", path.display());
    }

    if args.input.is_dir() {
        let output_dir = args
            .output
            .as_deref()
            .context("Decorating a directory requires --output DIR")?;
        return decorate_directory(&args.input, output_dir, &config, &args);
    }

    if !decorate_one(&args.input, args.output.as_deref(), &config, &args)? {
        std::process::exit(1);
    }
    Ok(())
}

fn decorate_directory(
    input_dir: &Path,
    output_dir: &Path,
    config: &AddonsConfig,
    args: &DecorateArgs,
) -> Result<()> {
    fs::create_dir_all(output_dir).with_context(|| {
        format!("Failed to create output directory {}", output_dir.display())
    })?;
    // Compare canonical paths so an output directory inside the input is skipped.
    let input_dir = input_dir.canonicalize()?;
    let output_abs = output_dir.canonicalize()?;

    let html_files: Vec<PathBuf> = WalkDir::new(&input_dir)
        .into_iter()
        .filter_entry(|e| !is_hidden(e) && e.path() != output_abs)
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "html"))
        .map(|e| e.path().to_path_buf())
        .collect();

    debug!("Found {} .html files", html_files.len());

    let mut success_count = 0;
    let mut error_count = 0;
    for path in &html_files {
        let relative = path.strip_prefix(&input_dir).unwrap_or(path);
        let output_path = output_dir.join(relative);
        match decorate_one(path, Some(&output_path), config, args) {
            Ok(true) => success_count += 1,
            Ok(false) => error_count += 1,
            Err(e) => {
                eprintln!("✗ Error processing {}: {:#}", path.display(), e);
                error_count += 1;
            }
        }
    }

    if !args.quiet {
        info!(
            "Processed {} files: {} succeeded, {} failed",
            success_count + error_count,
            success_count,
            error_count
        );
    }
    if error_count > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

/// Which paper `path` belongs to, honoring `--id` and `--submission`.
fn paper_for(path: &Path, args: &DecorateArgs) -> PaperInfo {
    if args.submission {
        PaperInfo::submission()
    } else if let Some(id) = &args.id {
        PaperInfo::new(id.as_str())
    } else {
        PaperInfo::from_path(path)
    }
}

/// Decorate one file. Returns `Ok(false)` if the input could not be parsed.
fn decorate_one(
    path: &Path,
    output: Option<&Path>,
    config: &AddonsConfig,
    args: &DecorateArgs,
) -> Result<bool> {
    debug!("Decorating: {}", path.display());

    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let source = match String::from_utf8(bytes) {
        Ok(source) => source,
        Err(err) => {
            let utf8 = err.utf8_error();
            let diagnostic = ltx_html::Error::InvalidUtf8 {
                message: utf8.to_string(),
                valid_up_to: utf8.valid_up_to(),
            }
            .to_diagnostic();
            super::report(&[diagnostic], None, args.diagnostics_json);
            return Ok(false);
        }
    };

    let name = path.display().to_string();
    let paper = paper_for(path, args);
    let decorated = match decorate_source(&name, &source, config, &paper) {
        Ok(output) => output,
        Err(AddonsError::Parse(parse_error)) => {
            if args.diagnostics_json {
                super::report(&parse_error.diagnostics, None, true);
            } else {
                // Rendered diagnostics carry their own "Error:" prefix.
                eprintln!("{}", parse_error);
            }
            return Ok(false);
        }
        Err(e) => return Err(anyhow::anyhow!("{}", e)),
    };

    if !args.quiet {
        let shown: Vec<_> = decorated
            .diagnostics
            .into_iter()
            .filter(|d| args.diagnostics_json || d.kind != DiagnosticKind::Info)
            .collect();
        let file = SourceFile::new(name, source);
        super::report(&shown, Some(&file), args.diagnostics_json);
    }

    match output {
        Some(output_path) => {
            if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory {}", parent.display())
                })?;
            }
            fs::write(output_path, decorated.html.as_bytes())
                .with_context(|| format!("Failed to write {}", output_path.display()))?;
            if !args.quiet {
                info!("Output: {}", output_path.display());
            }
        }
        None => print!("{}", decorated.html),
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(input: &Path) -> DecorateArgs {
        DecorateArgs {
            input: input.to_path_buf(),
            output: None,
            config: None,
            id: None,
            submission: false,
            quiet: true,
            diagnostics_json: false,
        }
    }

    #[test]
    fn test_paper_for() {
        let path = Path::new("/papers/2401.00001/paper.html");
        let mut a = args(path);
        assert_eq!(paper_for(path, &a).identifier.as_deref(), Some("2401.00001"));

        a.id = Some("2312.99999v3".to_string());
        assert_eq!(paper_for(path, &a).identifier.as_deref(), Some("2312.99999v3"));

        a.submission = true;
        assert!(paper_for(path, &a).is_submission);
    }

    #[test]
    fn test_decorate_one_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.html");
        let output = dir.path().join("out/in.html");
        fs::write(&input, "<html><body><p>x</p></body></html>").unwrap();

        let ok = decorate_one(&input, Some(&output), &AddonsConfig::default(), &args(&input)).unwrap();
        assert!(ok);
        let html = fs::read_to_string(&output).unwrap();
        assert!(html.contains(r#"class="ltx_cite_modal""#));
    }

    #[test]
    fn test_decorate_one_reports_parse_failure() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("empty.html");
        fs::write(&input, "no markup here").unwrap();

        let ok = decorate_one(&input, None, &AddonsConfig::default(), &args(&input)).unwrap();
        assert!(!ok);
    }
}
