mod cli;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use tidywin::roots::{PathRoots, SystemRoots};
use tidywin::session::{self, Session};
use tidywin::{categories, disk_info, large_files, output, utils, ScanReport, Settings};

fn init_logging(verbose: bool) {
    let default = if verbose {
        "warn,tidywin=debug"
    } else {
        "warn,tidywin=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = Settings::load(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Command::Scan { json, save, source } => run_scan(settings, json, save, source),
        Command::Clean {
            items,
            confirm,
            json,
        } => run_clean(settings, items, confirm, json),
        Command::LargeFiles { path, min_size } => run_large_files(path, &min_size),
        Command::Disk => {
            output::print_disk_usage(&disk_info::disk_usage());
            Ok(())
        }
    }
}

fn run_scan(settings: Settings, json: bool, save: Option<PathBuf>, source: Option<String>) -> Result<()> {
    let kind = match source.as_deref() {
        Some(name) => match categories::find_source(name) {
            Some(s) => Some(s.kind()),
            None => bail!(
                "unknown source '{name}', expected one of: {}",
                categories::all_source_names().join(", ")
            ),
        },
        None => None,
    };

    if !json {
        output::print_banner();
    }

    let session = Session::system(settings);
    let mut report: ScanReport = (*session.scan()).clone();
    if let Some(kind) = kind {
        report.items.retain(|i| i.kind == kind);
        report.total_scannable_size = report.items.iter().map(|i| i.size_bytes).sum();
    }

    if let Some(path) = &save {
        let text = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let home = SystemRoots.home_dir();
        output::print_scan_report(&report, home.as_deref());
        output::print_disk_usage(&disk_info::disk_usage());
        if let Some(path) = &save {
            output::print_info(&format!("Report saved to {}", path.display()));
        }
        output::print_scan_footer();
    }

    if let Some(error) = &report.error {
        bail!("scan failed: {error}");
    }
    Ok(())
}

fn run_clean(settings: Settings, items_path: PathBuf, confirm: bool, json: bool) -> Result<()> {
    let items = session::load_approved_items(&items_path)
        .with_context(|| format!("reading {}", items_path.display()))?;
    let session = Session::system(settings);

    if !confirm {
        if !json {
            output::print_no_confirm_warning();
        }
        let preview = session.preview(&items)?;
        if json {
            println!("{}", serde_json::to_string_pretty(&preview)?);
        } else {
            output::print_clean_preview(&preview);
        }
        return Ok(());
    }

    let outcome = session.clean(&items)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        output::print_clean_outcome(&outcome);
    }
    Ok(())
}

fn run_large_files(path: Option<PathBuf>, min_size: &str) -> Result<()> {
    let min_bytes = utils::parse_size(min_size)?;
    let home = SystemRoots.home_dir();
    let root = match path.or_else(|| home.clone()) {
        Some(root) => root,
        None => bail!("could not determine home directory, pass --path"),
    };
    if !root.exists() {
        bail!("path does not exist: {}", root.display());
    }

    output::print_banner();
    let files = large_files::find_large_files(&root, min_bytes);
    if files.is_empty() {
        output::print_info(&format!(
            "No files of {} or more under {}",
            utils::format_size(min_bytes),
            root.display()
        ));
        return Ok(());
    }
    output::print_large_files(&files, home.as_deref());
    Ok(())
}
