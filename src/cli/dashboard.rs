//! Interactive dashboard using ratatui
//!
//! Five sections mirror the survey dashboard navigation: summary cards,
//! numeric distributions, categorical top counts, budget comparison and
//! correlation. `r` runs a fresh render pass over the cached dataset.

use std::io::{self, stdout};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use polars::prelude::DataFrame;
use ratatui::{
    prelude::*,
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Cell, Chart, Dataset, GraphType, List,
        ListItem, ListState, Paragraph, Row, Table, Tabs, Wrap,
    },
};
use tracing::debug;

use crate::config::SurveySchema;
use crate::pipeline::{strip_group_prefix, DashboardData};
use crate::report::{
    bounds, box_line, coolwarm_rgb, format_number, format_rupiah, format_thousands,
    five_number_text,
};

/// Dashboard sections in navigation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Summary,
    Distribution,
    Categories,
    Comparison,
    Correlation,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Summary,
        Section::Distribution,
        Section::Categories,
        Section::Comparison,
        Section::Correlation,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::Summary => "Ringkasan",
            Section::Distribution => "Distribusi",
            Section::Categories => "Kategori",
            Section::Comparison => "Perbandingan",
            Section::Correlation => "Korelasi",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Dashboard state: the current render pass plus navigation
pub struct DashboardApp<'a> {
    df: &'a DataFrame,
    schema: &'a SurveySchema,
    pub data: DashboardData,
    pub section: Section,
    /// Selected numeric column in the distribution section
    pub distribution: ListState,
    /// Number of render passes computed so far
    pub passes: usize,
}

impl<'a> DashboardApp<'a> {
    pub fn new(df: &'a DataFrame, schema: &'a SurveySchema) -> Result<Self> {
        let data = DashboardData::compute(df, schema)?;
        let mut distribution = ListState::default();
        if !data.distributions.is_empty() {
            distribution.select(Some(0));
        }
        Ok(Self {
            df,
            schema,
            data,
            section: Section::Summary,
            distribution,
            passes: 1,
        })
    }

    /// Recompute every statistic from the unmodified dataset
    pub fn refresh(&mut self) -> Result<()> {
        self.data = DashboardData::compute(self.df, self.schema)?;
        self.passes += 1;
        debug!(passes = self.passes, "dashboard refreshed");
        Ok(())
    }

    /// Apply one key press. Returns `true` when the dashboard should close.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(true),
            KeyCode::Tab | KeyCode::Right => self.section = self.section.next(),
            KeyCode::BackTab | KeyCode::Left => self.section = self.section.prev(),
            KeyCode::Char(c @ '1'..='5') => {
                let idx = c as usize - '1' as usize;
                self.section = Section::ALL[idx];
            }
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Char('r') | KeyCode::Char('R') => self.refresh()?,
            _ => {}
        }
        Ok(false)
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.data.distributions.len();
        if len == 0 || self.section != Section::Distribution {
            return;
        }
        let current = self.distribution.selected().unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len as isize) as usize;
        self.distribution.select(Some(next));
    }
}

/// Run the interactive dashboard until the user quits
pub fn run_dashboard(df: &DataFrame, schema: &SurveySchema) -> Result<()> {
    let mut app = DashboardApp::new(df, schema)?;

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut DashboardApp<'_>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| draw_ui(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.handle_key(key.code)? {
                return Ok(());
            }
        }
    }
}

pub fn draw_ui(frame: &mut Frame, app: &mut DashboardApp<'_>) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(8),
        Constraint::Length(1),
    ])
    .split(frame.area());

    let header = Paragraph::new(Line::from(vec![
        Span::styled("🎁 ", Style::default()),
        Span::styled(
            "DASHBOARD POLA SELF-REWARD PADA MAHASISWA GEN Z",
            Style::default().fg(Color::White).bold(),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue))
            .style(Style::default().bg(Color::Rgb(30, 58, 138))),
    );
    frame.render_widget(header, chunks[0]);

    let titles: Vec<Line> = Section::ALL
        .iter()
        .enumerate()
        .map(|(i, s)| Line::from(format!("{} {}", i + 1, s.title())))
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.section.index())
        .block(Block::default().borders(Borders::ALL).title(" Navigasi "))
        .highlight_style(Style::default().fg(Color::Cyan).bold());
    frame.render_widget(tabs, chunks[1]);

    match app.section {
        Section::Summary => draw_summary(frame, &app.data, chunks[2]),
        Section::Distribution => draw_distribution(frame, app, chunks[2]),
        Section::Categories => draw_categories(frame, &app.data, chunks[2]),
        Section::Comparison => draw_comparison(frame, &app.data, chunks[2]),
        Section::Correlation => draw_correlation(frame, &app.data, chunks[2]),
    }

    let help = Line::from(vec![
        Span::styled(" ←/→", Style::default().fg(Color::Cyan)),
        Span::styled(" section  ", Style::default().fg(Color::DarkGray)),
        Span::styled("↑/↓", Style::default().fg(Color::Cyan)),
        Span::styled(" column  ", Style::default().fg(Color::DarkGray)),
        Span::styled("r", Style::default().fg(Color::Cyan)),
        Span::styled(" refresh  ", Style::default().fg(Color::DarkGray)),
        Span::styled("q", Style::default().fg(Color::Cyan)),
        Span::styled(" quit", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("   pass #{}", app.passes),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(help), chunks[3]);
}

fn titled(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", title))
        .title_style(Style::default().fg(Color::Cyan).bold())
}

fn draw_summary(frame: &mut Frame, data: &DashboardData, area: Rect) {
    let rows = Layout::vertical([Constraint::Length(4), Constraint::Min(3)]).split(area);
    let cards = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(rows[0]);

    let m = &data.metrics;
    let dash = || "-".to_string();
    let values = [
        ("📋 Jumlah Responden", m.respondents.to_string()),
        (
            "💰 Median Budget",
            m.median_budget.map(format_rupiah).unwrap_or_else(dash),
        ),
        (
            "📅 Rata-rata Frekuensi",
            m.mean_frequency
                .map(|v| format!("{:.2}", v))
                .unwrap_or_else(dash),
        ),
        (
            "⭐ Skala Penting",
            m.importance_percent
                .map(|v| format!("{:.2}%", v))
                .unwrap_or_else(dash),
        ),
    ];

    for ((label, value), card) in values.into_iter().zip(cards.iter()) {
        let widget = Paragraph::new(Line::from(Span::styled(
            value,
            Style::default().fg(Color::Yellow).bold(),
        )))
        .alignment(Alignment::Center)
        .block(titled(label));
        frame.render_widget(widget, *card);
    }

    let preview = &data.preview;
    let header = Row::new(
        preview
            .columns
            .iter()
            .map(|c| Cell::from(c.clone()).style(Style::default().bold())),
    );
    let body = preview
        .rows
        .iter()
        .map(|r| Row::new(r.iter().map(|v| Cell::from(v.clone()))));
    let widths = vec![Constraint::Min(10); preview.columns.len().max(1)];
    let table = Table::new(body, widths)
        .header(header)
        .block(titled("Lihat Data"));
    frame.render_widget(table, rows[1]);
}

fn draw_distribution(frame: &mut Frame, app: &mut DashboardApp<'_>, area: Rect) {
    let cols = Layout::horizontal([Constraint::Length(24), Constraint::Min(20)]).split(area);

    let items: Vec<ListItem> = app
        .data
        .distributions
        .iter()
        .map(|d| ListItem::new(d.column.clone()))
        .collect();
    let list = List::new(items)
        .block(titled("Kolom"))
        .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan))
        .highlight_symbol("› ");
    frame.render_stateful_widget(list, cols[0], &mut app.distribution);

    let right = Layout::vertical([Constraint::Min(6), Constraint::Length(5)]).split(cols[1]);

    let selected = app
        .distribution
        .selected()
        .and_then(|i| app.data.distributions.get(i));
    match selected.and_then(|d| d.histogram.as_ref().map(|h| (d, h))) {
        Some((dist, hist)) => {
            let bars: Vec<Bar> = hist
                .counts
                .iter()
                .zip(hist.edges.iter())
                .map(|(count, edge)| {
                    Bar::default()
                        .value(*count as u64)
                        .label(Line::from(format_number(*edge)))
                })
                .collect();
            let inner_width = right[0].width.saturating_sub(2) as usize;
            let bar_width = (inner_width / hist.counts.len().max(1)).saturating_sub(1).max(1);
            let chart = BarChart::default()
                .block(titled(&format!("Distribusi {}", dist.column)))
                .bar_width(bar_width as u16)
                .bar_gap(1)
                .bar_style(Style::default().fg(Color::LightBlue))
                .value_style(Style::default().fg(Color::Black).bg(Color::LightBlue))
                .data(BarGroup::default().bars(&bars));
            frame.render_widget(chart, right[0]);
        }
        None => {
            frame.render_widget(
                Paragraph::new("(tidak ada data)").block(titled("Distribusi")),
                right[0],
            );
        }
    }

    let box_text = match &app.data.budget_box {
        Some(stats) => {
            let width = right[1].width.saturating_sub(2) as usize;
            vec![
                Line::from(Span::styled(
                    box_line(stats, stats.min(), stats.max(), width),
                    Style::default().fg(Color::Cyan),
                )),
                Line::from(Span::styled(
                    five_number_text(stats),
                    Style::default().fg(Color::DarkGray),
                )),
            ]
        }
        None => vec![Line::from("(tidak ada data)")],
    };
    frame.render_widget(
        Paragraph::new(box_text).block(titled("Boxplot Budget Reward")),
        right[1],
    );
}

fn draw_categories(frame: &mut Frame, data: &DashboardData, area: Rect) {
    if data.categories.is_empty() {
        frame.render_widget(Paragraph::new("(tidak ada kategori)"), area);
        return;
    }

    let palette = [Color::Blue, Color::Yellow, Color::Magenta];
    let n = data.categories.len() as u32;
    let constraints: Vec<Constraint> = (0..n).map(|_| Constraint::Ratio(1, n)).collect();
    let cols = Layout::horizontal(constraints).split(area);

    for (i, (chart, col)) in data.categories.iter().zip(cols.iter()).enumerate() {
        let color = palette[i % palette.len()];
        let bars: Vec<Bar> = chart
            .counts
            .iter()
            .map(|(name, count)| {
                Bar::default()
                    .value(count.round().max(0.0) as u64)
                    .text_value(format_number(*count))
                    .label(Line::from(strip_group_prefix(name, &chart.prefix).to_string()))
            })
            .collect();

        let widget = BarChart::default()
            .block(titled(&chart.title))
            .direction(Direction::Horizontal)
            .bar_width(1)
            .bar_gap(0)
            .bar_style(Style::default().fg(color))
            .value_style(Style::default().fg(Color::Black).bg(color))
            .data(BarGroup::default().bars(&bars));
        frame.render_widget(widget, *col);
    }
}

fn draw_comparison(frame: &mut Frame, data: &DashboardData, area: Rect) {
    if data.comparisons.is_empty() {
        frame.render_widget(
            Paragraph::new("(kolom perbandingan tidak ditemukan)")
                .block(titled("Perbandingan Budget per Tipe Reward")),
            area,
        );
        return;
    }

    let width = area.width.saturating_sub(18) as usize;
    let mut lines = Vec::new();
    for cmp in &data.comparisons {
        let (lo, hi) = bounds(
            [cmp.selected.as_ref(), cmp.not_selected.as_ref()]
                .into_iter()
                .flatten()
                .flat_map(|s| [s.min(), s.max()].into_iter()),
        );

        lines.push(Line::from(Span::styled(
            cmp.label.clone(),
            Style::default().fg(Color::White).bold(),
        )));
        for (label, stats) in [("Pilih", &cmp.selected), ("Tidak", &cmp.not_selected)] {
            let body = match stats {
                Some(s) => Span::styled(box_line(s, lo, hi, width), Style::default().fg(Color::Cyan)),
                None => Span::styled("(tidak ada responden)", Style::default().fg(Color::DarkGray)),
            };
            lines.push(Line::from(vec![Span::raw(format!("  {:<12} ", label)), body]));
        }
        lines.push(Line::from(Span::styled(
            format!("  {:<12} {} .. {}", "", format_thousands(lo), format_thousands(hi)),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(titled("Perbandingan Budget per Tipe Reward")),
        area,
    );
}

fn draw_correlation(frame: &mut Frame, data: &DashboardData, area: Rect) {
    let matrix = &data.correlation;
    let table_height = (matrix.len() as u16).saturating_add(3);
    let rows = Layout::vertical([Constraint::Length(table_height), Constraint::Min(6)]).split(area);

    let mut header_cells = vec![Cell::from("")];
    header_cells.extend(
        matrix
            .columns
            .iter()
            .map(|c| Cell::from(c.clone()).style(Style::default().bold())),
    );
    let body = matrix.columns.iter().zip(&matrix.values).map(|(name, row)| {
        let mut cells = vec![Cell::from(name.clone()).style(Style::default().bold())];
        cells.extend(row.iter().map(|v| match v {
            Some(v) => {
                let (r, g, b) = coolwarm_rgb(*v);
                Cell::from(format!("{:>6.2}", v))
                    .style(Style::default().fg(Color::Black).bg(Color::Rgb(r, g, b)))
            }
            None => Cell::from("     -"),
        }));
        Row::new(cells)
    });
    let widths = vec![Constraint::Min(8); matrix.len() + 1];
    let table = Table::new(body, widths)
        .header(Row::new(header_cells))
        .block(titled("Korelasi Numerik"));
    frame.render_widget(table, rows[0]);

    let scatter = &data.scatter;
    let (x_lo, x_hi) = bounds(scatter.points.iter().map(|p| p.0));
    let (y_lo, y_hi) = bounds(scatter.points.iter().map(|p| p.1));
    let dataset = Dataset::default()
        .marker(symbols::Marker::Dot)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(Color::LightBlue))
        .data(&scatter.points);
    let chart = Chart::new(vec![dataset])
        .block(titled(&format!(
            "Scatter: {} vs {}",
            scatter.x_label, scatter.y_label
        )))
        .x_axis(
            Axis::default()
                .title(scatter.x_label.clone())
                .bounds([x_lo, x_hi.max(x_lo + 1.0)])
                .labels(vec![format_number(x_lo), format_number(x_hi)]),
        )
        .y_axis(
            Axis::default()
                .title(scatter.y_label.clone())
                .bounds([y_lo, y_hi.max(y_lo + 1.0)])
                .labels(vec![format_number(y_lo), format_number(y_hi)]),
        );
    frame.render_widget(chart, rows[1]);
}
