use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreset {
    #[default]
    Dark,
    Light,
}

/// Colour strings for every styled element of the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub accent: String,
    pub bg: String,
    pub fg: String,
    pub header_bg: String,
    pub header_fg: String,
    pub selection_bg: String,
    pub selection_fg: String,
    pub border: String,
    pub border_active: String,
    pub text_dim: String,
    pub overlay_bg: String,
    pub success: String,
    pub warning: String,
    pub error: String,
    pub input_bg: String,
    pub input_fg: String,
}

impl Palette {
    fn preset(preset: ThemePreset) -> Self {
        let [accent, bg, fg, header_bg, header_fg, selection_bg, selection_fg, border, border_active, text_dim, overlay_bg, success, warning, error, input_bg, input_fg] =
            match preset {
                ThemePreset::Dark => [
                    "#89b4fa", "default", "#cdd6f4", "#1e1e2e", "#cdd6f4", "#45475a", "#cdd6f4", "#585b70", "#89b4fa",
                    "#6c7086", "#1e1e2e", "#a6e3a1", "#f9e2af", "#f38ba8", "#a6e3a1", "#1e1e2e",
                ],
                ThemePreset::Light => [
                    "#1e66f5", "default", "#4c4f69", "#e6e9ef", "#4c4f69", "#ccd0da", "#4c4f69", "#9ca0b0", "#1e66f5",
                    "#8c8fa1", "#eff1f5", "#40a02b", "#df8e1d", "#d20f39", "#40a02b", "#eff1f5",
                ],
            };
        let s = |v: &str| v.to_string();
        Self {
            accent: s(accent),
            bg: s(bg),
            fg: s(fg),
            header_bg: s(header_bg),
            header_fg: s(header_fg),
            selection_bg: s(selection_bg),
            selection_fg: s(selection_fg),
            border: s(border),
            border_active: s(border_active),
            text_dim: s(text_dim),
            overlay_bg: s(overlay_bg),
            success: s(success),
            warning: s(warning),
            error: s(error),
            input_bg: s(input_bg),
            input_fg: s(input_fg),
        }
    }
}

/// `[theme]`: a named preset plus optional per-colour overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ThemeConfig {
    pub preset: ThemePreset,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ThemeConfig {
    /// The preset palette with overrides applied. `accent` also colours the active border.
    pub fn palette(&self) -> Palette {
        let mut palette = Palette::preset(self.preset);
        if let Some(accent) = &self.accent {
            palette.accent = accent.clone();
            palette.border_active = accent.clone();
        }
        if let Some(header) = &self.header {
            palette.header_bg = header.clone();
        }
        if let Some(selection) = &self.selection {
            palette.selection_bg = selection.clone();
        }
        if let Some(success) = &self.success {
            palette.success = success.clone();
            palette.input_bg = success.clone();
        }
        if let Some(error) = &self.error {
            palette.error = error.clone();
        }
        palette
    }
}
