use std::path::Path;

use colored::Colorize;

use crate::cleaner::{CleanOutcome, ItemKind, ScanReport};
use crate::disk_info::DiskInfo;
use crate::executor::CleanPreview;
use crate::large_files::LargeFile;
use crate::utils::{display_path, format_size};

pub fn print_banner() {
    println!(
        "{}",
        concat!("tidywin - disk cleanup v", env!("CARGO_PKG_VERSION"))
            .bold()
            .cyan()
    );
    println!();
}

pub fn print_scan_header(label: &str) {
    println!("{}", format!("=== {label} ===").bold().white());
}

pub fn print_scan_entry(path: &str, size: &str, age_days: Option<u64>) {
    match age_days {
        Some(days) => println!(
            "  {}  {}  {}",
            path.dimmed(),
            size.yellow(),
            format!("{days}d old").dimmed()
        ),
        None => println!("  {}  {}", path.dimmed(), size.yellow()),
    }
}

pub fn print_category_total(label: &str, total: &str) {
    println!("  {} {}", format!("{label} total:").bold(), total.green());
    println!();
}

pub fn print_separator() {
    println!("  {}", "─".repeat(45).dimmed());
}

pub fn print_scan_report(report: &ScanReport, home: Option<&Path>) {
    if let Some(error) = &report.error {
        print_warning(&format!("Scan failed: {error}"));
        return;
    }

    for kind in ItemKind::ALL {
        let items: Vec<_> = report.items_of(kind).collect();
        if items.is_empty() {
            continue;
        }
        print_scan_header(kind.label());
        for item in &items {
            print_scan_entry(
                &display_path(&item.absolute_path, home),
                &format_size(item.size_bytes),
                item.age_days,
            );
        }
        let total: u64 = items.iter().map(|i| i.size_bytes).sum();
        print_category_total(kind.label(), &format_size(total));
    }

    println!("{}", "=== Summary ===".bold().white());
    for kind in ItemKind::ALL {
        let total: u64 = report.items_of(kind).map(|i| i.size_bytes).sum();
        println!("  {:<30} {}", kind.label(), format_size(total).green());
    }
    print_separator();
    println!(
        "  {:<30} {}",
        "Total reclaimable:".bold(),
        format_size(report.total_scannable_size).green().bold()
    );
    let skipped = report.skipped;
    if skipped.total() > 0 {
        println!(
            "  {}",
            format!(
                "skipped {} small, {} recent, {} unreadable",
                skipped.too_small, skipped.too_recent, skipped.inaccessible
            )
            .dimmed()
        );
    }
    println!();
}

pub fn print_scan_footer() {
    println!(
        "{}",
        "Nothing was deleted. Save with `tidywin scan --save FILE`, edit the list, then run `tidywin clean --items FILE --confirm`."
            .yellow()
            .bold()
    );
}

pub fn print_disk_usage(disks: &[DiskInfo]) {
    print_scan_header("Disks");
    for disk in disks {
        println!(
            "  {:<30} {} free of {}  {}",
            disk.mount_point.display(),
            format_size(disk.available).green(),
            format_size(disk.total),
            format!("({:.1}% used)", disk.usage_percent()).dimmed()
        );
    }
    println!();
}

pub fn print_large_files(files: &[LargeFile], home: Option<&Path>) {
    print_scan_header("Large Files");
    for file in files {
        print_scan_entry(
            &display_path(&file.path, home),
            &format_size(file.size_bytes),
            None,
        );
    }
    let total: u64 = files.iter().map(|f| f.size_bytes).sum();
    println!(
        "  {:<30} {}  {}",
        format!("{} file(s)", files.len()),
        format_size(total).green(),
        "[report only]".dimmed()
    );
    println!();
}

pub fn print_clean_preview(preview: &CleanPreview) {
    println!(
        "{} {} item(s), {} would be freed.",
        "Validated:".cyan().bold(),
        preview.item_count,
        format_size(preview.total_bytes)
    );
}

pub fn print_clean_outcome(outcome: &CleanOutcome) {
    for err in &outcome.errors {
        println!("  {} {}", "Failed".red().bold(), err.red());
    }
    if outcome.error_count == 0 {
        println!("{} {}", "Cleaned!".green().bold(), outcome.message.green());
    } else {
        println!("{} {}", "Partially cleaned.".yellow().bold(), outcome.message);
    }
}

pub fn print_warning(msg: &str) {
    println!("{} {}", "Warning:".red().bold(), msg.red());
}

pub fn print_info(msg: &str) {
    println!("{} {}", "Info:".cyan().bold(), msg);
}

pub fn print_no_confirm_warning() {
    println!(
        "{}",
        "No --confirm flag provided. Validating only, nothing will be deleted."
            .yellow()
            .bold()
    );
    println!();
}
