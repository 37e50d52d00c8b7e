//! Static terminal rendering of a dashboard pass

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::{strip_group_prefix, BoxStats, DashboardData};
use crate::report::charts::{
    bounds, box_line, coolwarm_rgb, format_rupiah, format_thousands, scatter_grid, sparkline,
    text_bar,
};
use crate::utils::{print_section_header, CHART, LINK, MONEY, TROPHY};

const BAR_WIDTH: usize = 30;
const BOX_WIDTH: usize = 50;
const SCATTER_WIDTH: usize = 50;
const SCATTER_HEIGHT: usize = 14;

/// Printable view over one [`DashboardData`] pass
pub struct DashboardReport<'a> {
    data: &'a DashboardData,
}

impl<'a> DashboardReport<'a> {
    pub fn new(data: &'a DashboardData) -> Self {
        Self { data }
    }

    pub fn display(&self) {
        self.display_metrics();
        self.display_preview();
        self.display_distributions();
        self.display_categories();
        self.display_comparisons();
        self.display_correlation();
    }

    fn display_metrics(&self) {
        let m = &self.data.metrics;

        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("RINGKASAN").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = new_table();
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("📋 Jumlah Responden"),
            Cell::new(m.respondents)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![
            Cell::new("💰 Median Budget Reward"),
            Cell::new(or_dash(m.median_budget.map(format_rupiah))),
        ]);
        table.add_row(vec![
            Cell::new("📅 Rata-rata Frekuensi Reward"),
            Cell::new(or_dash(m.mean_frequency.map(|v| format!("{:.2}", v)))),
        ]);
        table.add_row(vec![
            Cell::new("⭐ Rata-rata Skala Penting"),
            Cell::new(or_dash(m.mean_importance.map(|v| match m.importance_percent {
                Some(pct) => format!("{:.2} ({:.2}%)", v, pct),
                None => format!("{:.2}", v),
            })))
            .fg(Color::Cyan),
        ]);

        print_indented(&table);
    }

    fn display_preview(&self) {
        let preview = &self.data.preview;
        print_section_header(
            &CHART,
            &format!("Lihat Data ({} Baris Pertama)", preview.rows.len()),
        );

        if preview.columns.is_empty() {
            println!("      (kosong)");
            return;
        }

        let mut table = new_table();
        table.set_header(
            preview
                .columns
                .iter()
                .map(|c| Cell::new(c).add_attribute(Attribute::Bold)),
        );
        for row in &preview.rows {
            table.add_row(row.iter().map(Cell::new));
        }

        print_indented(&table);
    }

    fn display_distributions(&self) {
        print_section_header(&CHART, "Distribusi Numerik");

        for dist in &self.data.distributions {
            println!();
            println!("      {}", style(format!("Distribusi {}", dist.column)).bold());
            match &dist.histogram {
                Some(hist) => {
                    println!("      {}", style(sparkline(&hist.counts)).cyan());
                    let lo = hist.edges.first().copied().unwrap_or(0.0);
                    let hi = hist.edges.last().copied().unwrap_or(0.0);
                    println!(
                        "      {}",
                        style(format!(
                            "{} .. {}  ({} bins, puncak {} responden)",
                            format_number(lo),
                            format_number(hi),
                            hist.counts.len(),
                            hist.max_count()
                        ))
                        .dim()
                    );
                }
                None => println!("      {}", style("(tidak ada data)").dim()),
            }
        }

        if let Some(stats) = &self.data.budget_box {
            print_section_header(&MONEY, "Boxplot Budget Reward");
            let lo = stats.min();
            let hi = stats.max();
            println!("      {}", style(box_line(stats, lo, hi, BOX_WIDTH)).cyan());
            println!(
                "      {}",
                style(format!(
                    "{} .. {}",
                    format_thousands(lo),
                    format_thousands(hi)
                ))
                .dim()
            );
            println!("      {}", five_number_text(stats));
        }
    }

    fn display_categories(&self) {
        for chart in &self.data.categories {
            print_section_header(&TROPHY, &chart.title);

            if chart.counts.is_empty() {
                println!("      {}", style("(tidak ada kolom)").dim());
                continue;
            }

            let max = chart.counts.first().map(|(_, c)| *c).unwrap_or(0.0);
            let label_width = chart
                .counts
                .iter()
                .map(|(name, _)| strip_group_prefix(name, &chart.prefix).chars().count())
                .max()
                .unwrap_or(0)
                .min(45);

            for (name, count) in &chart.counts {
                let label = strip_group_prefix(name, &chart.prefix);
                println!(
                    "      {:<width$}  {:>5}  {}",
                    crate::utils::truncate_string(label, label_width),
                    format_number(*count),
                    style(text_bar(*count, max, BAR_WIDTH)).cyan(),
                    width = label_width
                );
            }
        }
    }

    fn display_comparisons(&self) {
        if self.data.comparisons.is_empty() {
            return;
        }
        print_section_header(&MONEY, "Perbandingan Budget per Tipe Reward");

        for cmp in &self.data.comparisons {
            println!();
            println!("      {}", style(format!("Budget Reward untuk: {}", cmp.label)).bold());

            let all: Vec<&BoxStats> = [cmp.selected.as_ref(), cmp.not_selected.as_ref()]
                .into_iter()
                .flatten()
                .collect();
            let (lo, hi) = bounds(
                all.iter()
                    .flat_map(|s| [s.min(), s.max()].into_iter()),
            );

            for (label, stats) in [("Pilih", &cmp.selected), ("Tidak Pilih", &cmp.not_selected)] {
                match stats {
                    Some(s) => println!(
                        "      {:<12} {}  {}",
                        label,
                        style(box_line(s, lo, hi, BOX_WIDTH)).cyan(),
                        style(format!("n={} median={}", s.count, format_thousands(s.median))).dim()
                    ),
                    None => println!("      {:<12} {}", label, style("(tidak ada responden)").dim()),
                }
            }
        }
    }

    fn display_correlation(&self) {
        let matrix = &self.data.correlation;
        print_section_header(&LINK, "Korelasi Numerik Sederhana");

        if !matrix.is_empty() {
            let mut table = new_table();
            let mut header = vec![Cell::new("")];
            header.extend(
                matrix
                    .columns
                    .iter()
                    .map(|c| Cell::new(c).add_attribute(Attribute::Bold)),
            );
            table.set_header(header);

            for (name, row) in matrix.columns.iter().zip(&matrix.values) {
                let mut cells = vec![Cell::new(name).add_attribute(Attribute::Bold)];
                cells.extend(row.iter().map(|value| match value {
                    Some(v) => {
                        let (r, g, b) = coolwarm_rgb(*v);
                        Cell::new(format!("{:.2}", v))
                            .bg(Color::Rgb { r, g, b })
                            .fg(Color::Black)
                    }
                    None => Cell::new("-"),
                }));
                table.add_row(cells);
            }

            print_indented(&table);
        }

        let scatter = &self.data.scatter;
        println!();
        println!(
            "      {}",
            style(format!("Scatter: {} vs {}", scatter.x_label, scatter.y_label)).bold()
        );
        let grid = scatter_grid(&scatter.points, SCATTER_WIDTH, SCATTER_HEIGHT);
        if grid.is_empty() {
            println!("      {}", style("(tidak ada data)").dim());
            return;
        }
        let (x_lo, x_hi) = bounds(scatter.points.iter().map(|p| p.0));
        let (y_lo, y_hi) = bounds(scatter.points.iter().map(|p| p.1));
        println!("      {:>8} ┐", format_number(y_hi));
        for line in grid {
            println!("      {:>8} │{}", "", style(line).cyan());
        }
        println!("      {:>8} └{}", format_number(y_lo), "─".repeat(SCATTER_WIDTH));
        println!(
            "      {:>8}  {:<w$}{}",
            "",
            format_number(x_lo),
            format_number(x_hi),
            w = SCATTER_WIDTH.saturating_sub(format_number(x_hi).len())
        );
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table
}

fn print_indented(table: &Table) {
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}

fn or_dash(value: Option<String>) -> String {
    value.unwrap_or_else(|| "-".to_string())
}

/// Integers without decimals, everything else with two
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

pub fn five_number_text(stats: &BoxStats) -> String {
    format!(
        "min={} q1={} median={} q3={} max={} outliers={}",
        format_thousands(stats.lower_whisker),
        format_thousands(stats.q1),
        format_thousands(stats.median),
        format_thousands(stats.q3),
        format_thousands(stats.upper_whisker),
        stats.outliers.len()
    )
}
