use std::path::{Path, PathBuf};

use crate::{
    FixCodeBlocksArgs, config::DocfixConfig, discover::find_markdown_files, normalize::normalize,
};

pub async fn run(args: &FixCodeBlocksArgs) -> Result<(), anyhow::Error> {
    // Determine the config file path
    let config_path = args
        .config_file
        .clone()
        .unwrap_or_else(|| "docfix.yaml".into());
    let config_path = if config_path.is_relative() {
        std::env::current_dir()?.join(&config_path)
    } else {
        config_path
    };

    let config = DocfixConfig::load(&config_path)?;

    // Relative content roots resolve against the config file's directory
    let root = if config.content.root.is_relative() {
        base_path(&config_path).join(&config.content.root)
    } else {
        config.content.root.clone()
    };

    println!("Searching for markdown files in {}...", root.display());
    let files = find_markdown_files(&root, &config.content.exclude)?;
    println!("Found {} markdown file(s)", files.len());

    let mut fixed = 0usize;
    let mut failed = 0usize;

    for file in &files {
        println!("Processing {}...", file.display());
        match fix_file(file, args.dry_run).await {
            Ok(true) => {
                if args.dry_run {
                    println!("Would fix code blocks in {}", file.display());
                } else {
                    println!("Fixed code blocks in {}", file.display());
                }
                fixed += 1;
            }
            Ok(false) => {}
            Err(e) => {
                // One broken file must not sink the batch
                eprintln!("Warning: skipping {}: {}", file.display(), e);
                failed += 1;
            }
        }
    }

    println!();
    if fixed > 0 {
        if args.dry_run {
            println!("Would fix code blocks in {fixed} file(s)");
        } else {
            println!("Fixed code blocks in {fixed} file(s)");
        }
    } else if failed == 0 {
        println!("No code block issues were found.");
    }

    if failed > 0 {
        return Err(anyhow::anyhow!("{failed} file(s) could not be processed"));
    }

    Ok(())
}

/// Normalize one file, writing it back only when something changed.
async fn fix_file(path: &Path, dry_run: bool) -> Result<bool, anyhow::Error> {
    let content = tokio::fs::read_to_string(path).await?;
    let normalized = normalize(&content);

    if normalized.changed && !dry_run {
        tokio::fs::write(path, &normalized.text).await?;
    }

    Ok(normalized.changed)
}

/// Get the base path from a config file path (its parent directory).
fn base_path(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}
