//! Style roles for terminal output
//!
//! Each logical style is a variant of `StyleRole` mapped to an optional
//! `colored::Color`. Colouring is applied only when the `enabled` flag passed
//! to `paint()` is true, so nothing here depends on global state.
//!
//! ```
//! use toastline::core::styles::StyleRole;
//! assert_eq!(StyleRole::Title.paint("Saved", false), "Saved");
//! assert!(StyleRole::Title.paint("Saved", true).starts_with("\x1b["));
//! ```

use clap::builder::styling::AnsiColor;
use colored::Color;

macro_rules! style {
    ( $( $variant:ident => $color:expr, bold = $bold:expr ),+ $(,)? ) => {
        #[derive(Copy, Clone, Debug, PartialEq, Eq)]
        pub enum StyleRole { $( $variant ),+ }

        impl StyleRole {
            pub fn color(self) -> Option<Color> {
                match self { $( StyleRole::$variant => $color ),+ }
            }

            pub fn is_bold(self) -> bool {
                match self { $( StyleRole::$variant => $bold ),+ }
            }
        }
    }
}

style! {
    // clap help
    Header      => Some(Color::Yellow), bold = true,
    Literal     => Some(Color::Cyan), bold = false,
    Placeholder => Some(Color::Green), bold = false,
    Valid       => Some(Color::Green), bold = false,
    Invalid     => Some(Color::Red), bold = false,
    Error       => Some(Color::BrightRed), bold = false,
    // notifications
    Title       => Some(Color::BrightWhite), bold = true,
    Body        => None, bold = false,
    Sticky      => Some(Color::Magenta), bold = false,
    Image       => Some(Color::Cyan), bold = false,
    Dismissed   => Some(Color::BrightBlack), bold = false,
}

impl StyleRole {
    /// SGR parameters for this role, e.g. `"1;33"`
    pub fn ansi_code(self) -> Option<String> {
        let color = self.color().and_then(map_color_code);
        match (self.is_bold(), color) {
            (true, Some(code)) => Some(format!("1;{}", code)),
            (true, None) => Some("1".to_string()),
            (false, code) => code,
        }
    }

    pub fn paint(self, text: &str, enabled: bool) -> String {
        if !enabled {
            return text.to_string();
        }
        match self.ansi_code() {
            Some(code) => format!("\x1b[{}m{}\x1b[0m", code, text),
            None => text.to_string(),
        }
    }
}

fn map_color_code(c: Color) -> Option<String> {
    use Color::*;
    let code = match c {
        Black => "30",
        Red => "31",
        Green => "32",
        Yellow => "33",
        Blue => "34",
        Magenta => "35",
        Cyan => "36",
        White => "37",
        BrightBlack => "90",
        BrightRed => "91",
        BrightGreen => "92",
        BrightYellow => "93",
        BrightBlue => "94",
        BrightMagenta => "95",
        BrightCyan => "96",
        BrightWhite => "97",
        TrueColor { r, g, b } => return Some(format!("38;2;{};{};{}", r, g, b)),
        #[allow(unreachable_patterns)]
        _ => return None,
    };
    Some(code.to_string())
}

fn color_to_ansi(c: Color) -> Option<AnsiColor> {
    use self::AnsiColor as A;
    use Color::*;
    Some(match c {
        Black => A::Black,
        Red => A::Red,
        Green => A::Green,
        Yellow => A::Yellow,
        Blue => A::Blue,
        Magenta => A::Magenta,
        Cyan => A::Cyan,
        White => A::White,
        BrightBlack => A::BrightBlack,
        BrightRed => A::BrightRed,
        BrightGreen => A::BrightGreen,
        BrightYellow => A::BrightYellow,
        BrightBlue => A::BrightBlue,
        BrightMagenta => A::BrightMagenta,
        BrightCyan => A::BrightCyan,
        BrightWhite => A::BrightWhite,
        _ => return None,
    })
}

/// clap help styles built from the same roles
pub fn palette_to_clap(enabled: bool) -> clap::builder::Styles {
    use clap::builder::styling::{Color as ClapColor, Style};
    if !enabled {
        return clap::builder::Styles::plain();
    }

    let style = |role: StyleRole| {
        let mut s = Style::new();
        if let Some(col) = role.color().and_then(color_to_ansi) {
            s = s.fg_color(Some(ClapColor::Ansi(col)));
        }
        if role.is_bold() {
            s = s.bold();
        }
        s
    };

    clap::builder::Styles::styled()
        .header(style(StyleRole::Header))
        .usage(style(StyleRole::Header))
        .literal(style(StyleRole::Literal))
        .placeholder(style(StyleRole::Placeholder))
        .valid(style(StyleRole::Valid))
        .invalid(style(StyleRole::Invalid))
        .error(style(StyleRole::Error))
}
