//! Theme palettes
//!
//! A [`ThemePalette`] is the closed set of color tokens the calendar, timeline
//! and chrome components style themselves with. Palettes are derived from a
//! [`ThemeName`] by [`derive_palette`]; they are never persisted.

use crate::theme::ThemeName;
use recall_core::Color;
use std::collections::HashMap;
use std::fmt::Write as _;

/// Swatches for the dark theme
pub mod dark {
    use recall_core::Color;

    pub const INK: Color = Color::rgb(15.0 / 255.0, 17.0 / 255.0, 21.0 / 255.0);
    pub const SURFACE: Color = Color::rgb(24.0 / 255.0, 27.0 / 255.0, 32.0 / 255.0);
    pub const SURFACE_MUTED: Color = Color::rgb(27.0 / 255.0, 30.0 / 255.0, 36.0 / 255.0);
    pub const LINE: Color = Color::rgb(38.0 / 255.0, 42.0 / 255.0, 48.0 / 255.0);
    pub const ROW_ODD: Color = Color::rgb(22.0 / 255.0, 24.0 / 255.0, 29.0 / 255.0);
    pub const ROW_EVEN: Color = Color::rgb(20.0 / 255.0, 22.0 / 255.0, 26.0 / 255.0);
    pub const INVERSE: Color = Color::rgb(31.0 / 255.0, 35.0 / 255.0, 42.0 / 255.0);
    pub const INVERSE_LINE: Color = Color::rgb(48.0 / 255.0, 52.0 / 255.0, 58.0 / 255.0);

    pub const TEXT: Color = Color::WHITE;
    pub const SUBTEXT: Color = Color::rgb(160.0 / 255.0, 160.0 / 255.0, 160.0 / 255.0);
    pub const MUTED: Color = Color::rgb(128.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0);
    pub const ICON_IDLE: Color = Color::rgb(102.0 / 255.0, 108.0 / 255.0, 114.0 / 255.0);

    pub const MINT: Color = Color::rgb(61.0 / 255.0, 234.0 / 255.0, 149.0 / 255.0);
    pub const MINT_DEEP: Color = Color::rgb(45.0 / 255.0, 148.0 / 255.0, 103.0 / 255.0);
    pub const MINT_GLOW: Color = Color::rgba(61.0 / 255.0, 234.0 / 255.0, 149.0 / 255.0, 0.25);
    pub const MINT_CLEAR: Color = Color::rgba(61.0 / 255.0, 234.0 / 255.0, 149.0 / 255.0, 0.0);
    pub const AMBER: Color = Color::rgb(245.0 / 255.0, 166.0 / 255.0, 35.0 / 255.0);
    pub const CORAL: Color = Color::rgb(248.0 / 255.0, 113.0 / 255.0, 113.0 / 255.0);
}

/// Swatches for the light theme
pub mod light {
    use recall_core::Color;

    pub const PAPER: Color = Color::WHITE;
    pub const SURFACE: Color = Color::rgb(248.0 / 255.0, 249.0 / 255.0, 250.0 / 255.0);
    pub const SURFACE_MUTED: Color = Color::rgb(242.0 / 255.0, 243.0 / 255.0, 245.0 / 255.0);
    pub const LINE: Color = Color::rgb(220.0 / 255.0, 220.0 / 255.0, 220.0 / 255.0);
    pub const ROW_ODD: Color = Color::rgb(250.0 / 255.0, 250.0 / 255.0, 250.0 / 255.0);
    pub const ROW_EVEN: Color = Color::rgb(245.0 / 255.0, 245.0 / 255.0, 245.0 / 255.0);
    pub const INVERSE: Color = Color::rgb(233.0 / 255.0, 236.0 / 255.0, 240.0 / 255.0);
    pub const INVERSE_LINE: Color = Color::rgb(203.0 / 255.0, 210.0 / 255.0, 217.0 / 255.0);

    pub const TEXT: Color = Color::rgb(26.0 / 255.0, 26.0 / 255.0, 26.0 / 255.0);
    pub const SUBTEXT: Color = Color::rgb(102.0 / 255.0, 102.0 / 255.0, 102.0 / 255.0);
    pub const MUTED: Color = Color::rgb(153.0 / 255.0, 153.0 / 255.0, 153.0 / 255.0);
    pub const ICON_IDLE: Color = Color::rgb(154.0 / 255.0, 160.0 / 255.0, 166.0 / 255.0);

    pub const MINT: Color = Color::rgb(33.0 / 255.0, 206.0 / 255.0, 153.0 / 255.0);
    pub const MINT_DEEP: Color = Color::rgb(22.0 / 255.0, 168.0 / 255.0, 121.0 / 255.0);
    pub const MINT_GLOW: Color = Color::rgba(33.0 / 255.0, 206.0 / 255.0, 153.0 / 255.0, 0.2);
    pub const MINT_CLEAR: Color = Color::rgba(33.0 / 255.0, 206.0 / 255.0, 153.0 / 255.0, 0.0);
    pub const AMBER: Color = Color::rgb(245.0 / 255.0, 166.0 / 255.0, 35.0 / 255.0);
    pub const CRIMSON: Color = Color::rgb(229.0 / 255.0, 72.0 / 255.0, 77.0 / 255.0);
}

/// Palette token keys for dynamic access
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum PaletteToken {
    // Surfaces
    Background,
    Surface,
    SurfaceMuted,
    Border,

    // Text
    TextPrimary,
    TextSecondary,
    TextMuted,

    // Accent
    Accent,
    AccentMuted,
    AccentForeground,
    IconActive,
    IconInactive,

    // Tables
    TableHeaderBg,
    TableRowOdd,
    TableRowEven,

    // Charts
    ChartFillTop,
    ChartFillBottom,
    Grid,
    Axis,

    // Status
    Success,
    Warn,
    Error,

    // Inverse (tooltips, toasts)
    InverseBackground,
    InverseBorder,
    InverseForeground,
}

impl PaletteToken {
    /// Every token, in declaration order
    pub const ALL: [PaletteToken; 25] = [
        Self::Background,
        Self::Surface,
        Self::SurfaceMuted,
        Self::Border,
        Self::TextPrimary,
        Self::TextSecondary,
        Self::TextMuted,
        Self::Accent,
        Self::AccentMuted,
        Self::AccentForeground,
        Self::IconActive,
        Self::IconInactive,
        Self::TableHeaderBg,
        Self::TableRowOdd,
        Self::TableRowEven,
        Self::ChartFillTop,
        Self::ChartFillBottom,
        Self::Grid,
        Self::Axis,
        Self::Success,
        Self::Warn,
        Self::Error,
        Self::InverseBackground,
        Self::InverseBorder,
        Self::InverseForeground,
    ];

    /// CSS custom property name, without the `--` prefix
    pub fn name(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Surface => "surface",
            Self::SurfaceMuted => "surface-muted",
            Self::Border => "border",
            Self::TextPrimary => "text-primary",
            Self::TextSecondary => "text-secondary",
            Self::TextMuted => "text-muted",
            Self::Accent => "accent",
            Self::AccentMuted => "accent-muted",
            Self::AccentForeground => "accent-foreground",
            Self::IconActive => "icon-active",
            Self::IconInactive => "icon-inactive",
            Self::TableHeaderBg => "table-header-bg",
            Self::TableRowOdd => "table-row-odd",
            Self::TableRowEven => "table-row-even",
            Self::ChartFillTop => "chart-fill-top",
            Self::ChartFillBottom => "chart-fill-bottom",
            Self::Grid => "grid",
            Self::Axis => "axis",
            Self::Success => "success",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::InverseBackground => "inverse-background",
            Self::InverseBorder => "inverse-border",
            Self::InverseForeground => "inverse-foreground",
        }
    }
}

/// Complete set of palette colors for one theme
#[derive(Clone, Debug, PartialEq)]
pub struct ThemePalette {
    // Surfaces
    pub background: Color,
    pub surface: Color,
    pub surface_muted: Color,
    pub border: Color,

    // Text
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    // Accent
    pub accent: Color,
    pub accent_muted: Color,
    pub accent_foreground: Color,
    pub icon_active: Color,
    pub icon_inactive: Color,

    // Tables
    pub table_header_bg: Color,
    pub table_row_odd: Color,
    pub table_row_even: Color,

    // Charts
    pub chart_fill_top: Color,
    pub chart_fill_bottom: Color,
    pub grid: Color,
    pub axis: Color,

    // Status
    pub success: Color,
    pub warn: Color,
    pub error: Color,

    // Inverse
    pub inverse_background: Color,
    pub inverse_border: Color,
    pub inverse_foreground: Color,
}

impl ThemePalette {
    /// Get a color by token key
    pub fn get(&self, token: PaletteToken) -> Color {
        match token {
            PaletteToken::Background => self.background,
            PaletteToken::Surface => self.surface,
            PaletteToken::SurfaceMuted => self.surface_muted,
            PaletteToken::Border => self.border,
            PaletteToken::TextPrimary => self.text_primary,
            PaletteToken::TextSecondary => self.text_secondary,
            PaletteToken::TextMuted => self.text_muted,
            PaletteToken::Accent => self.accent,
            PaletteToken::AccentMuted => self.accent_muted,
            PaletteToken::AccentForeground => self.accent_foreground,
            PaletteToken::IconActive => self.icon_active,
            PaletteToken::IconInactive => self.icon_inactive,
            PaletteToken::TableHeaderBg => self.table_header_bg,
            PaletteToken::TableRowOdd => self.table_row_odd,
            PaletteToken::TableRowEven => self.table_row_even,
            PaletteToken::ChartFillTop => self.chart_fill_top,
            PaletteToken::ChartFillBottom => self.chart_fill_bottom,
            PaletteToken::Grid => self.grid,
            PaletteToken::Axis => self.axis,
            PaletteToken::Success => self.success,
            PaletteToken::Warn => self.warn,
            PaletteToken::Error => self.error,
            PaletteToken::InverseBackground => self.inverse_background,
            PaletteToken::InverseBorder => self.inverse_border,
            PaletteToken::InverseForeground => self.inverse_foreground,
        }
    }

    /// The dark palette
    pub fn dark() -> Self {
        use self::dark::*;
        Self {
            background: INK,
            surface: SURFACE,
            surface_muted: SURFACE_MUTED,
            border: LINE,
            text_primary: TEXT,
            text_secondary: SUBTEXT,
            text_muted: MUTED,
            accent: MINT,
            accent_muted: MINT_DEEP,
            accent_foreground: INK,
            icon_active: MINT,
            icon_inactive: ICON_IDLE,
            table_header_bg: SURFACE_MUTED,
            table_row_odd: ROW_ODD,
            table_row_even: ROW_EVEN,
            chart_fill_top: MINT_GLOW,
            chart_fill_bottom: MINT_CLEAR,
            grid: LINE,
            axis: SUBTEXT,
            success: MINT,
            warn: AMBER,
            error: CORAL,
            inverse_background: INVERSE,
            inverse_border: INVERSE_LINE,
            inverse_foreground: TEXT,
        }
    }

    /// The light palette
    pub fn light() -> Self {
        use self::light::*;
        Self {
            background: PAPER,
            surface: SURFACE,
            surface_muted: SURFACE_MUTED,
            border: LINE,
            text_primary: TEXT,
            text_secondary: SUBTEXT,
            text_muted: MUTED,
            accent: MINT,
            accent_muted: MINT_DEEP,
            accent_foreground: PAPER,
            icon_active: MINT,
            icon_inactive: ICON_IDLE,
            table_header_bg: SURFACE_MUTED,
            table_row_odd: ROW_ODD,
            table_row_even: ROW_EVEN,
            chart_fill_top: MINT_GLOW,
            chart_fill_bottom: MINT_CLEAR,
            grid: LINE,
            axis: SUBTEXT,
            success: MINT,
            warn: AMBER,
            error: CRIMSON,
            inverse_background: INVERSE,
            inverse_border: INVERSE_LINE,
            inverse_foreground: TEXT,
        }
    }

    // ========== CSS Variable Generation ==========

    /// `(name, value)` pairs for every token, in token order
    ///
    /// Names carry no `--` prefix; values are CSS color strings.
    pub fn css_variables(&self) -> Vec<(&'static str, String)> {
        PaletteToken::ALL
            .iter()
            .map(|&token| (token.name(), self.get(token).to_css()))
            .collect()
    }

    /// CSS variable map keyed by token name
    ///
    /// ```ignore
    /// let vars = derive_palette(ThemeName::Dark).css_variable_map();
    /// // vars["background"] == "#0f1115"
    /// ```
    pub fn css_variable_map(&self) -> HashMap<String, String> {
        self.css_variables()
            .into_iter()
            .map(|(name, value)| (name.to_owned(), value))
            .collect()
    }

    /// Render a CSS rule declaring every token as a custom property
    pub fn to_css_block(&self, selector: &str) -> String {
        let mut css = String::with_capacity(64 + PaletteToken::ALL.len() * 40);
        css.push_str(selector);
        css.push_str(" {\n");
        for (name, value) in self.css_variables() {
            // Writing into a String cannot fail
            let _ = writeln!(css, "  --{name}: {value};");
        }
        css.push('}');
        css
    }
}

/// Derive the palette for a theme
///
/// Pure and total: every [`ThemeName`] maps to a fully populated palette, and a
/// new theme without a palette arm fails to compile.
pub fn derive_palette(theme: ThemeName) -> ThemePalette {
    match theme {
        ThemeName::Dark => ThemePalette::dark(),
        ThemeName::Light => ThemePalette::light(),
    }
}
