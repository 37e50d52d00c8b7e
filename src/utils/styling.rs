//! Terminal styling utilities for the static report

use console::{style, Emoji};
use std::path::Path;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static GIFT: Emoji<'_, '_> = Emoji("🎁 ", "");
pub static CHART: Emoji<'_, '_> = Emoji("📊 ", "");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static LOCK: Emoji<'_, '_> = Emoji("🔒 ", "");
pub static TROPHY: Emoji<'_, '_> = Emoji("🏆 ", "");
pub static MONEY: Emoji<'_, '_> = Emoji("💰 ", "$ ");
pub static LINK: Emoji<'_, '_> = Emoji("📈 ", "");
pub static PIN: Emoji<'_, '_> = Emoji("📌 ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    println!();
    println!(
        "    {}{}",
        GIFT,
        style("POLA SELF-REWARD PADA MAHASISWA GEN Z").cyan().bold()
    );
    println!(
        "    {}",
        style("Analisis sederhana terhadap data pola reward mahasiswa berdasarkan survei.").dim()
    );
    println!("    {}", style(format!("rewardlens v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print the run configuration card
pub fn print_config(input: &Path, top_n: usize, bins: usize, private_filter: bool) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("⚙️  Configuration").cyan().bold(),
        " ".repeat(box_width - 20)
    );
    println!("    ├{}┤", line);
    println!("    │  {} Input:      {:<35}│", FOLDER, truncate_path(input, 34));
    println!(
        "    │  {} Top N:      {:<35}│",
        TROPHY,
        style(top_n).yellow()
    );
    println!("    │  {} Bins:       {:<35}│", CHART, style(bins).yellow());
    println!(
        "    │  {} Privacy:    {:<35}│",
        LOCK,
        style(if private_filter { "filter" } else { "keep all" }).yellow()
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a section header with styling
pub fn print_section_header(icon: &Emoji<'_, '_>, title: &str) {
    println!();
    println!("    {}{}", icon, style(title).white().bold());
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print the closing caption
pub fn print_footer() {
    println!();
    println!("    {}", style("─".repeat(50)).dim());
    println!(
        "    {}{}",
        PIN,
        style("Dashboard ini menampilkan distribusi dan korelasi sederhana dari pola reward mahasiswa. Semua data bersifat anonim.").dim()
    );
    println!();
}

/// Print a styled count message
pub fn print_count(description: &str, count: usize, detail: Option<&str>) {
    if let Some(info) = detail {
        println!(
            "      Found {} {} {}",
            style(count).yellow().bold(),
            description,
            style(info).dim()
        );
    } else {
        println!("      Found {} {}", style(count).yellow().bold(), description);
    }
}

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

/// Shorten to at most `max_len` characters, keeping the tail
pub fn truncate_string(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else {
        let keep = max_len.saturating_sub(3);
        let tail: String = chars[chars.len() - keep..].iter().collect();
        format!("...{}", tail)
    }
}
