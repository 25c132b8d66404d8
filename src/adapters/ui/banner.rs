//! Gradient ASCII banner (EMAIL TRIAGE).

use crate::domain::Rgb;
use crate::usecases::presenter::category_color;
use crossterm::QueueableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{self, Write, stdout};

const TITLE: &str = "EMAIL TRIAGE";

/// Gradient stops: the CURRICULO accent fading into the FINANCEIRO accent.
fn gradient_stops() -> (Rgb, Rgb) {
    (category_color("CURRICULO"), category_color("FINANCEIRO"))
}

/// Colour of row `row` out of `rows`, spread evenly between the two stops.
fn row_color(from: Rgb, to: Rgb, row: usize, rows: usize) -> Rgb {
    let t = if rows <= 1 {
        1.0
    } else {
        row as f64 / (rows - 1) as f64
    };
    let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
    Rgb(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

fn fg(rgb: Rgb) -> SetForegroundColor {
    SetForegroundColor(Color::Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    })
}

fn render(out: &mut impl Write, art: &str) -> io::Result<()> {
    let (from, to) = gradient_stops();
    let rows: Vec<&str> = art.lines().collect();
    for (i, row) in rows.iter().enumerate() {
        out.queue(fg(row_color(from, to, i, rows.len())))?
            .queue(Print(row))?
            .queue(ResetColor)?
            .queue(Print("\n"))?;
    }
    out.queue(fg(to))?
        .queue(Print(format!(
            "v{} · análise de emails (PDF/TXT ou texto)\n",
            env!("CARGO_PKG_VERSION")
        )))?
        .queue(ResetColor)?;
    out.flush()
}

/// Prints the title in the standard figlet font, falling back to plain text.
pub fn print_welcome() {
    let art = FIGfont::standard()
        .ok()
        .and_then(|font| font.convert(TITLE).map(|f| f.to_string()))
        .unwrap_or_else(|| TITLE.to_string());
    let _ = render(&mut stdout(), &art);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_runs_from_first_to_last_stop() {
        let (from, to) = gradient_stops();
        assert_eq!(row_color(from, to, 0, 6), from);
        assert_eq!(row_color(from, to, 5, 6), to);
        assert_eq!(row_color(from, to, 0, 1), to);
    }

    #[test]
    fn every_row_is_coloured() {
        let mut buf = Vec::new();
        render(&mut buf, "AB\nCD").unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("38;2;124;58;237"));
        assert!(out.contains("38;2;0;140;255"));
        assert!(out.contains("análise de emails"));
    }
}
