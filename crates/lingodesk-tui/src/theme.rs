use lingodesk_config::ThemeConfig;
use ratatui::style::{Color, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub accent: Color,
    pub bg: Color,
    pub fg: Color,
    pub header: Style,
    pub status_bar: Style,
    pub selection: Style,
    pub border: Style,
    pub border_active: Style,
    pub text_dim: Style,
    pub overlay: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,
    pub input: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Self {
        let palette = config.palette();
        let color = |s: &str| parse_color(s).unwrap_or(Color::Reset);

        let header_bg = color(&palette.header_bg);
        let header_fg = color(&palette.header_fg);

        Self {
            accent: color(&palette.accent),
            bg: color(&palette.bg),
            fg: color(&palette.fg),
            header: Style::default().fg(header_fg).bg(header_bg),
            status_bar: Style::default().fg(header_fg).bg(header_bg),
            selection: Style::default().fg(color(&palette.selection_fg)).bg(color(&palette.selection_bg)),
            border: Style::default().fg(color(&palette.border)),
            border_active: Style::default().fg(color(&palette.border_active)),
            text_dim: Style::default().fg(color(&palette.text_dim)),
            overlay: Style::default().bg(color(&palette.overlay_bg)),
            success: Style::default().fg(color(&palette.success)),
            warning: Style::default().fg(color(&palette.warning)),
            error: Style::default().fg(color(&palette.error)),
            input: Style::default().fg(color(&palette.input_fg)).bg(color(&palette.input_bg)),
        }
    }
}

/// Parse a color string into a ratatui `Color`.
///
/// Accepts `#rrggbb`, `rgb(r,g,b)`, the sixteen named terminal colors and `default`.
pub fn parse_color(s: &str) -> anyhow::Result<Color> {
    let s = s.trim();

    if s.eq_ignore_ascii_case("default") {
        return Ok(Color::Reset);
    }

    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            anyhow::bail!("invalid hex color \"{s}\": expected 6 hex digits after '#'");
        }
        let channel = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| anyhow::anyhow!("invalid hex color \"{s}\": bad {name} component"))
        };
        return Ok(Color::Rgb(channel(0..2, "red")?, channel(2..4, "green")?, channel(4..6, "blue")?));
    }

    if let Some(inner) = s.strip_prefix("rgb(").and_then(|s| s.strip_suffix(')')) {
        let parts: Vec<&str> = inner.split(',').collect();
        if parts.len() != 3 {
            anyhow::bail!("invalid rgb color \"{s}\": expected rgb(r,g,b)");
        }
        let channel = |i: usize| {
            parts[i].trim().parse::<u8>().map_err(|_| anyhow::anyhow!("invalid rgb color \"{s}\": bad value \"{}\"", parts[i].trim()))
        };
        return Ok(Color::Rgb(channel(0)?, channel(1)?, channel(2)?));
    }

    match s.to_lowercase().replace('_', "").as_str() {
        "black" => Ok(Color::Black),
        "red" => Ok(Color::Red),
        "green" => Ok(Color::Green),
        "yellow" => Ok(Color::Yellow),
        "blue" => Ok(Color::Blue),
        "magenta" => Ok(Color::Magenta),
        "cyan" => Ok(Color::Cyan),
        "gray" | "grey" => Ok(Color::Gray),
        "darkgray" | "darkgrey" => Ok(Color::DarkGray),
        "lightred" => Ok(Color::LightRed),
        "lightgreen" => Ok(Color::LightGreen),
        "lightyellow" => Ok(Color::LightYellow),
        "lightblue" => Ok(Color::LightBlue),
        "lightmagenta" => Ok(Color::LightMagenta),
        "lightcyan" => Ok(Color::LightCyan),
        "white" => Ok(Color::White),
        _ => anyhow::bail!(
            "unknown color \"{s}\": expected hex (#rrggbb), rgb(r,g,b), a named color (red, blue, ...), or \"default\""
        ),
    }
}
