//! Start screen: the HYDRATE title drawn as a glass filled to today's progress,
//! with the goal and streak underneath.

use crate::domain::format_volume;
use crate::usecases::Dashboard;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{self, Write, stdout};
use tracing::debug;

const WATER: Color = Color::Rgb {
    r: 0x22,
    g: 0xd3,
    b: 0xee,
};
const EMPTY_GLASS: Color = Color::DarkGrey;

fn title_art() -> Vec<String> {
    let art = FIGfont::standard()
        .ok()
        .and_then(|font| font.convert("HYDRATE").map(|figure| figure.to_string()))
        .unwrap_or_else(|| "HYDRATE".to_string());
    art.lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Number of rows, counted from the bottom, that sit under the water line.
fn filled_rows(rows: usize, fill: f64) -> usize {
    let fill = if fill.is_nan() { 0.0 } else { fill.clamp(0.0, 1.0) };
    (fill * rows as f64).round() as usize
}

fn status_line(dash: Option<&Dashboard>) -> String {
    match dash {
        Some(d) => format!(
            "{} of {} today · 🔥 {} day streak (best {})",
            format_volume(d.today_total),
            format_volume(f64::from(d.goal)),
            d.streaks.current_streak,
            d.streaks.best_streak
        ),
        None => "Let's work out your daily goal.".to_string(),
    }
}

fn write_banner(out: &mut impl Write, dash: Option<&Dashboard>) -> io::Result<()> {
    let art = title_art();
    let fill = dash.map_or(0.0, |d| d.progress_percent / 100.0);
    let water_line = art.len() - filled_rows(art.len(), fill);

    for (row, line) in art.iter().enumerate() {
        let color = if row >= water_line { WATER } else { EMPTY_GLASS };
        queue!(
            out,
            SetForegroundColor(color),
            Print(line),
            ResetColor,
            Print("\r\n")
        )?;
    }
    queue!(
        out,
        SetForegroundColor(WATER),
        Print(format!(
            "v{} · {}\r\n",
            env!("CARGO_PKG_VERSION"),
            status_line(dash)
        )),
        ResetColor
    )?;
    out.flush()
}

/// Print the start screen. `None` before the first profile exists.
pub fn print_banner(dash: Option<&Dashboard>) {
    if let Err(e) = write_banner(&mut stdout(), dash) {
        debug!(error = %e, "banner not printed");
    }
}
