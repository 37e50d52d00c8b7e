//! Text chart primitives shared by the static report and the TUI

use crate::pipeline::BoxStats;

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Group digits in thousands with `,`, rounding to whole units
pub fn format_thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if rounded < 0.0 {
        format!("-{}", out)
    } else {
        out
    }
}

pub fn format_rupiah(value: f64) -> String {
    format!("Rp{}", format_thousands(value))
}

/// Horizontal bar proportional to `value / max`
pub fn text_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * width as f64).round() as usize;
    "█".repeat(len.clamp(1, width))
}

/// One character per histogram bin, height proportional to the bin count
pub fn sparkline(counts: &[usize]) -> String {
    let max = counts.iter().copied().max().unwrap_or(0);
    counts
        .iter()
        .map(|&c| {
            if max == 0 || c == 0 {
                ' '
            } else {
                let level = (c * (SPARK_LEVELS.len() - 1) + max - 1) / max;
                SPARK_LEVELS[level.min(SPARK_LEVELS.len() - 1)]
            }
        })
        .collect()
}

/// Map `value` in `[lo, hi]` onto a column in `0..width`
fn scale(value: f64, lo: f64, hi: f64, width: usize) -> usize {
    if width == 0 {
        return 0;
    }
    if hi <= lo {
        return width / 2;
    }
    let pos = ((value - lo) / (hi - lo) * (width - 1) as f64).round();
    (pos.max(0.0) as usize).min(width - 1)
}

/// Horizontal boxplot drawn on a `[lo, hi]` axis `width` characters wide.
///
/// Whiskers are `─`, the box `▒`, the median `┃` and outliers `•`.
pub fn box_line(stats: &BoxStats, lo: f64, hi: f64, width: usize) -> String {
    let mut cells = vec![' '; width];
    if width == 0 {
        return String::new();
    }

    let lw = scale(stats.lower_whisker, lo, hi, width);
    let q1 = scale(stats.q1, lo, hi, width);
    let med = scale(stats.median, lo, hi, width);
    let q3 = scale(stats.q3, lo, hi, width);
    let uw = scale(stats.upper_whisker, lo, hi, width);

    for cell in cells.iter_mut().take(q1).skip(lw) {
        *cell = '─';
    }
    for cell in cells.iter_mut().take(uw + 1).skip(q3 + 1) {
        *cell = '─';
    }
    for cell in cells.iter_mut().take(q3 + 1).skip(q1) {
        *cell = '▒';
    }
    cells[lw] = '├';
    cells[uw] = '┤';
    cells[med] = '┃';

    for &o in &stats.outliers {
        cells[scale(o, lo, hi, width)] = '•';
    }

    cells.into_iter().collect()
}

/// Plot points on a character grid, top row = largest y
pub fn scatter_grid(points: &[(f64, f64)], width: usize, height: usize) -> Vec<String> {
    if points.is_empty() || width == 0 || height == 0 {
        return Vec::new();
    }

    let (x_lo, x_hi) = bounds(points.iter().map(|p| p.0));
    let (y_lo, y_hi) = bounds(points.iter().map(|p| p.1));

    let mut grid = vec![vec![' '; width]; height];
    for &(x, y) in points {
        let col = scale(x, x_lo, x_hi, width);
        let row = height - 1 - scale(y, y_lo, y_hi, height);
        grid[row][col] = match grid[row][col] {
            ' ' => '•',
            _ => '●',
        };
    }

    grid.into_iter().map(|r| r.into_iter().collect()).collect()
}

/// Min and max of the values; `(0.0, 0.0)` when empty
pub fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if lo.is_finite() && hi.is_finite() {
        (lo, hi)
    } else {
        (0.0, 0.0)
    }
}

/// Diverging blue-white-red color for a correlation in `[-1, 1]`
pub fn coolwarm_rgb(value: f64) -> (u8, u8, u8) {
    let v = value.clamp(-1.0, 1.0);
    let blue = (59.0, 76.0, 192.0);
    let white = (221.0, 221.0, 221.0);
    let red = (180.0, 4.0, 38.0);

    let (from, to, t) = if v < 0.0 {
        (white, blue, -v)
    } else {
        (white, red, v)
    };
    let lerp = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    (lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}
