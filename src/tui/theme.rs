// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Anthem-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Anthem and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::{env, error::Error, fmt};

use ratatui::style::{Color, Modifier, Style};

use crate::view::{ElementStyle, Rgb, Treatment};

const PALETTE_ENV_VARS: [&str; 2] = ["ANTHEM_TUI_PALETTE", "ANTHEM_PALETTE"];

/// Terminal colors. Without a palette override, marks blend toward black.
#[derive(Debug, Clone, Default)]
pub(crate) struct TuiTheme {
    palette: Option<TuiPalette>,
}

impl TuiTheme {
    pub(crate) fn from_env() -> Result<Self, ThemeError> {
        for name in PALETTE_ENV_VARS {
            match env::var(name) {
                Ok(value) if value.trim().is_empty() => return Ok(Self::default()),
                Ok(value) => {
                    let palette = TuiPalette::parse_csv(value.trim()).map_err(|error| {
                        ThemeError::InvalidEnv {
                            name: name.to_owned(),
                            value: format!("{} ({error})", value.trim()),
                        }
                    })?;
                    return Ok(Self { palette: Some(palette) });
                }
                Err(env::VarError::NotPresent) => continue,
                Err(env::VarError::NotUnicode(_)) => {
                    return Err(ThemeError::InvalidEnv {
                        name: name.to_owned(),
                        value: "<non-unicode>".to_owned(),
                    });
                }
            }
        }
        Ok(Self::default())
    }

    pub(crate) fn base_style(&self) -> Style {
        match &self.palette {
            Some(palette) => Style::default().fg(palette.fg).bg(palette.bg),
            None => Style::default(),
        }
    }

    fn ansi_color(&self, color: Ansi16) -> Color {
        match &self.palette {
            Some(palette) => palette.ansi[color as usize],
            None => color.into(),
        }
    }

    pub(crate) fn panel_border_style(&self, focused: bool) -> Style {
        if focused {
            self.base_style().fg(self.ansi_color(Ansi16::BrightGreen))
        } else {
            self.base_style()
        }
    }

    pub(crate) fn cursor_style(&self) -> Style {
        self.base_style().add_modifier(Modifier::REVERSED)
    }

    pub(crate) fn selected_style(&self) -> Style {
        self.base_style().fg(self.ansi_color(Ansi16::BrightYellow)).add_modifier(Modifier::BOLD)
    }

    pub(crate) fn muted_style(&self) -> Style {
        self.base_style().fg(self.ansi_color(Ansi16::BrightBlack))
    }

    pub(crate) fn key_style(&self) -> Style {
        self.base_style().fg(self.ansi_color(Ansi16::Cyan))
    }

    pub(crate) fn error_style(&self) -> Style {
        self.base_style().fg(self.ansi_color(Ansi16::Red))
    }

    pub(crate) fn coastline_color(&self) -> Color {
        self.ansi_color(Ansi16::BrightBlack)
    }

    pub(crate) fn fill_color(&self, fill: Rgb) -> Color {
        Color::Rgb(fill.0, fill.1, fill.2)
    }

    /// Fill faded toward the background by the element's current opacity.
    pub(crate) fn mark_color(&self, fill: Rgb, style: &ElementStyle) -> Color {
        let opacity = style.opacity.clamp(0.0, 1.0);
        let (br, bg, bb) = self.background_rgb();
        let blend = |channel: u8, background: u8| -> u8 {
            (f64::from(background) + (f64::from(channel) - f64::from(background)) * opacity).round()
                as u8
        };
        Color::Rgb(blend(fill.0, br), blend(fill.1, bg), blend(fill.2, bb))
    }

    pub(crate) fn label_style(&self, fill: Rgb, treatment: Treatment) -> Style {
        let style = self.base_style().fg(self.fill_color(fill));
        match treatment {
            Treatment::Highlighted => style.add_modifier(Modifier::BOLD),
            Treatment::Base | Treatment::Dimmed => style,
        }
    }

    fn background_rgb(&self) -> (u8, u8, u8) {
        match self.palette.as_ref().map(|palette| palette.bg) {
            Some(Color::Rgb(r, g, b)) => (r, g, b),
            _ => (0, 0, 0),
        }
    }
}

#[derive(Debug, Clone)]
struct TuiPalette {
    fg: Color,
    bg: Color,
    ansi: [Color; 16],
}

impl TuiPalette {
    const CSV_LEN: usize = 18;

    /// `fg,bg` followed by the 16 ANSI colors in terminal order.
    fn parse_csv(value: &str) -> Result<Self, String> {
        let parts = value.split(',').map(str::trim).collect::<Vec<_>>();
        if parts.len() != Self::CSV_LEN {
            return Err(format!(
                "expected {} comma-separated colors (fg,bg, then 16 ansi colors), got {}",
                Self::CSV_LEN,
                parts.len()
            ));
        }

        let mut colors = parts.iter().map(|part| parse_palette_color(part));
        let fg = colors.next().unwrap_or(Ok(Color::Reset))?;
        let bg = colors.next().unwrap_or(Ok(Color::Reset))?;
        let mut ansi = [Color::Reset; 16];
        for (slot, color) in ansi.iter_mut().zip(colors) {
            *slot = color?;
        }
        Ok(Self { fg, bg, ansi })
    }
}

/// Accepts `#rrggbb`, `0xrrggbb`, bare `rrggbb` and xterm `rgb:rr/gg/bb` (2 or 4 digit channels).
fn parse_palette_color(value: &str) -> Result<Color, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("empty color".to_owned());
    }

    let lower = trimmed.to_ascii_lowercase();
    if let Some(rest) = lower.strip_prefix("rgb:") {
        let channels =
            rest.split('/').map(parse_hex_channel).collect::<Result<Vec<_>, String>>()?;
        return match channels.as_slice() {
            [r, g, b] => Ok(Color::Rgb(*r, *g, *b)),
            _ => Err(format!("invalid rgb: value: {trimmed}")),
        };
    }

    let hex = lower.strip_prefix('#').or_else(|| lower.strip_prefix("0x")).unwrap_or(&lower);
    Rgb::from_hex(hex)
        .map(|rgb| Color::Rgb(rgb.0, rgb.1, rgb.2))
        .ok_or_else(|| format!("invalid hex color: {trimmed} (expected #RRGGBB)"))
}

fn parse_hex_channel(value: &str) -> Result<u8, String> {
    let value = value.trim();
    match value.len() {
        2 => u8::from_str_radix(value, 16).map_err(|_| format!("invalid rgb: component {value}")),
        4 => u16::from_str_radix(value, 16)
            .map(|wide| (wide >> 8) as u8)
            .map_err(|_| format!("invalid rgb: component {value}")),
        _ => Err(format!("invalid rgb: component {value} (expected 2 or 4 hex digits)")),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
enum Ansi16 {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl From<Ansi16> for Color {
    fn from(value: Ansi16) -> Self {
        match value {
            Ansi16::Black => Color::Black,
            Ansi16::Red => Color::Red,
            Ansi16::Green => Color::Green,
            Ansi16::Yellow => Color::Yellow,
            Ansi16::Blue => Color::Blue,
            Ansi16::Magenta => Color::Magenta,
            Ansi16::Cyan => Color::Cyan,
            Ansi16::White => Color::Gray,
            Ansi16::BrightBlack => Color::DarkGray,
            Ansi16::BrightRed => Color::LightRed,
            Ansi16::BrightGreen => Color::LightGreen,
            Ansi16::BrightYellow => Color::LightYellow,
            Ansi16::BrightBlue => Color::LightBlue,
            Ansi16::BrightMagenta => Color::LightMagenta,
            Ansi16::BrightCyan => Color::LightCyan,
            Ansi16::BrightWhite => Color::White,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) enum ThemeError {
    InvalidEnv { name: String, value: String },
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEnv { name, value } => write!(f, "invalid env {name}={value}"),
        }
    }
}

impl Error for ThemeError {}
