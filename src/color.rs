//! Thin capability shim over the terminal color backend.
//!
//! The renderer asks for a role, not a color; the palette decides what
//! that means. When no terminal is attached the no-op palette is
//! selected, and a backend write failure degrades to the uncolored text
//! rather than an error.

use std::io::Write;

use termcolor::{Ansi, Color, ColorSpec, WriteColor};

/// Semantic role of a colored fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// A passing unit.
    Affirmative,
    /// A failing or erroring unit.
    Negative,
    /// A skipped unit.
    Cautionary,
}

impl Role {
    fn color(self) -> Color {
        match self {
            Role::Affirmative => Color::Green,
            Role::Negative => Color::Red,
            Role::Cautionary => Color::Yellow,
        }
    }
}

/// Paints text for a role. Implementations must never fail; the worst
/// allowed outcome is returning the text unchanged.
pub trait Palette {
    fn paint(&self, text: &str, role: Role) -> String;
}

/// Passthrough palette used when no color backend is available.
#[derive(Debug, Default)]
pub struct MonoPalette;

impl Palette for MonoPalette {
    fn paint(&self, text: &str, _role: Role) -> String {
        text.to_string()
    }
}

/// ANSI palette backed by `termcolor`.
#[derive(Debug, Default)]
pub struct AnsiPalette;

impl Palette for AnsiPalette {
    fn paint(&self, text: &str, role: Role) -> String {
        match wrap_ansi(text, role.color()) {
            Ok(painted) => painted,
            Err(_) => text.to_string(),
        }
    }
}

fn wrap_ansi(text: &str, color: Color) -> std::io::Result<String> {
    let mut out = Ansi::new(Vec::new());
    out.set_color(ColorSpec::new().set_fg(Some(color)))?;
    out.write_all(text.as_bytes())?;
    out.reset()?;
    Ok(String::from_utf8_lossy(&out.into_inner()).into_owned())
}

/// Selects the ANSI palette when stdout is a terminal, the passthrough
/// palette otherwise.
pub fn auto_palette() -> Box<dyn Palette> {
    if atty::is(atty::Stream::Stdout) {
        Box::new(AnsiPalette)
    } else {
        Box::new(MonoPalette)
    }
}
