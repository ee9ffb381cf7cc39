//! Terminal output: turns styled ratatui `Line`s into printable text.
//!
//! Nothing here draws through a ratatui `Terminal`; the table is plain
//! scrollback output. Styled spans are written with crossterm's ANSI
//! styling when color is on, and as bare text otherwise.

use std::ffi::OsStr;
use std::io::{self, IsTerminal};

use ratatui::crossterm::style::{self as ansi, Stylize};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;

use crate::cli::ColorChoice;

/// Resolves `--color` against the environment.
///
/// `auto` colors only an interactive stdout and honours `NO_COLOR` and
/// `TERM=dumb`.
pub fn color_enabled(choice: ColorChoice) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => auto_color(
            io::stdout().is_terminal(),
            std::env::var_os("NO_COLOR").as_deref(),
            std::env::var_os("TERM").as_deref(),
        ),
    }
}

/// The `auto` decision given the stdout TTY flag and the `NO_COLOR` and
/// `TERM` variables. An empty `NO_COLOR` does not disable color.
fn auto_color(is_tty: bool, no_color: Option<&OsStr>, term: Option<&OsStr>) -> bool {
    let no_color = no_color.is_some_and(|v| !v.is_empty());
    let dumb = term.is_some_and(|t| t == "dumb");
    is_tty && !no_color && !dumb
}

/// Flattens a line to text. With `color` off every style is dropped, so the
/// result has exactly the cells of the plain content.
pub fn line_to_string(line: &Line<'_>, color: bool) -> String {
    let mut rendered = String::new();
    for span in &line.spans {
        let style = line.style.patch(span.style);
        if color && style != Style::default() {
            rendered.push_str(&styled(&span.content, style).to_string());
        } else {
            rendered.push_str(&span.content);
        }
    }
    rendered
}

fn styled(content: &str, style: Style) -> ansi::StyledContent<&str> {
    let mut content = ansi::style(content);
    if let Some(fg) = style.fg {
        content = content.with(ansi_color(fg));
    }
    if let Some(bg) = style.bg {
        content = content.on(ansi_color(bg));
    }
    if style.add_modifier.contains(Modifier::BOLD) {
        content = content.bold();
    }
    if style.add_modifier.contains(Modifier::DIM) {
        content = content.dim();
    }
    if style.add_modifier.contains(Modifier::UNDERLINED) {
        content = content.underlined();
    }
    content
}

/// Maps ratatui's palette names onto crossterm's. ratatui's plain names are
/// the normal-intensity ANSI colors, which crossterm calls `Dark*`.
pub fn ansi_color(color: Color) -> ansi::Color {
    match color {
        Color::Reset => ansi::Color::Reset,
        Color::Black => ansi::Color::Black,
        Color::Red => ansi::Color::DarkRed,
        Color::Green => ansi::Color::DarkGreen,
        Color::Yellow => ansi::Color::DarkYellow,
        Color::Blue => ansi::Color::DarkBlue,
        Color::Magenta => ansi::Color::DarkMagenta,
        Color::Cyan => ansi::Color::DarkCyan,
        Color::Gray => ansi::Color::Grey,
        Color::DarkGray => ansi::Color::DarkGrey,
        Color::LightRed => ansi::Color::Red,
        Color::LightGreen => ansi::Color::Green,
        Color::LightYellow => ansi::Color::Yellow,
        Color::LightBlue => ansi::Color::Blue,
        Color::LightMagenta => ansi::Color::Magenta,
        Color::LightCyan => ansi::Color::Cyan,
        Color::White => ansi::Color::White,
        Color::Rgb(r, g, b) => ansi::Color::Rgb { r, g, b },
        Color::Indexed(i) => ansi::Color::AnsiValue(i),
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
