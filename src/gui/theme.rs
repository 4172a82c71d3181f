use std::collections::BTreeMap;

use eframe::egui::{
    self,
    style::{
        Selection,
        WidgetVisuals,
        Widgets,
    },
    Color32,
    Id,
    Stroke,
    Visuals,
};

use crate::persistence::Storage;

pub const THEME_STORAGE_KEY: &str = "theme";

/// Flat property map, e.g. `"--bg-color" => "#fbf3db"`.
pub type ThemeValues = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeType {
    #[default]
    Light,
    Dark,
}

impl ThemeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeType::Light => "LIGHT",
            ThemeType::Dark => "DARK",
        }
    }

    /// Anything but `"DARK"` reads as light.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("DARK") => ThemeType::Dark,
            _ => ThemeType::Light,
        }
    }

    pub fn other(&self) -> Self {
        match self {
            ThemeType::Light => ThemeType::Dark,
            ThemeType::Dark => ThemeType::Light,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ThemeType::Light => "🌞",
            ThemeType::Dark => "🌙",
        }
    }
}

fn values(pairs: &[(&str, &str)]) -> ThemeValues {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

// Selenized based palettes
pub fn light_values() -> ThemeValues {
    values(&[
        ("--bg-color", "#fbf3db"),
        ("--text-color", "#002b36"),
        ("--link-color", "#0000ee"),
        ("--visited-link", "#551a8b"),
        ("--active-link", "#ff0000"),
        ("--input-bg", "#fefeee"),
        ("--correct-answer-bg", "lightgreen"),
        ("--incorrect-answer-bg", "pink"),
        ("--input-bg-focus", "#ffffff"),
    ])
}

pub fn dark_values() -> ThemeValues {
    values(&[
        ("--bg-color", "#103c48"),
        ("--text-color", "#ebc13d"),
        ("--link-color", "#84c747"),
        ("--visited-link", "#bd96ba"),
        ("--active-link", "#58a3ff"),
        ("--input-bg", "#103c48"),
        ("--correct-answer-bg", "#489100"),
        ("--incorrect-answer-bg", "#82111d"),
        ("--input-bg-focus", "#2d5b69"),
    ])
}

/// Receives style properties. The egui implementation is [`EguiStyle`].
pub trait StyleSink {
    fn remove_property(&mut self, key: &str);
    fn set_property(&mut self, key: &str, value: &str);
}

#[derive(Debug, Clone)]
pub struct ThemeProvider {
    current: ThemeType,
    light: ThemeValues,
    dark: ThemeValues,
}

impl ThemeProvider {
    pub fn load(storage: &dyn Storage) -> Self {
        let stored = storage.get(THEME_STORAGE_KEY);
        Self {
            current: ThemeType::from_stored(stored.as_deref()),
            light: light_values(),
            dark: dark_values(),
        }
    }

    pub fn current(&self) -> ThemeType {
        self.current
    }

    pub fn values(&self, theme: ThemeType) -> &ThemeValues {
        match theme {
            ThemeType::Light => &self.light,
            ThemeType::Dark => &self.dark,
        }
    }

    pub fn toggle(&mut self) {
        self.current = self.current.other();
    }

    pub fn set_theme_values(&mut self, theme: ThemeType, values: ThemeValues) {
        match theme {
            ThemeType::Light => self.light = values,
            ThemeType::Dark => self.dark = values,
        }
    }

    /// Persists the current theme name, clears the other theme's keys from
    /// `sink`, then writes every key of the current theme.
    pub fn apply(&self, sink: &mut dyn StyleSink, storage: &mut dyn Storage) {
        if let Err(e) = storage.set(THEME_STORAGE_KEY, self.current.as_str()) {
            tracing::warn!("Failed to persist theme: {e}");
        }

        for key in self.values(self.current.other()).keys() {
            sink.remove_property(key);
        }

        for (key, value) in self.values(self.current) {
            sink.set_property(key, value);
        }
    }
}

/// Colors resolved from the active property map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color32,
    pub text: Color32,
    pub link: Color32,
    pub visited_link: Color32,
    pub active_link: Color32,
    pub input_bg: Color32,
    pub input_bg_focus: Color32,
    pub correct_bg: Color32,
    pub incorrect_bg: Color32,
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_values(&light_values())
    }
}

impl Palette {
    pub fn from_values(values: &ThemeValues) -> Self {
        let color = |key: &str, fallback: Color32| {
            values.get(key).and_then(|value| parse_color(value)).unwrap_or(fallback)
        };
        Self {
            background: color("--bg-color", Color32::from_rgb(0xfb, 0xf3, 0xdb)),
            text: color("--text-color", Color32::from_rgb(0x00, 0x2b, 0x36)),
            link: color("--link-color", Color32::from_rgb(0x00, 0x00, 0xee)),
            visited_link: color("--visited-link", Color32::from_rgb(0x55, 0x1a, 0x8b)),
            active_link: color("--active-link", Color32::from_rgb(0xff, 0x00, 0x00)),
            input_bg: color("--input-bg", Color32::from_rgb(0xfe, 0xfe, 0xee)),
            input_bg_focus: color("--input-bg-focus", Color32::WHITE),
            correct_bg: color("--correct-answer-bg", Color32::from_rgb(0x90, 0xee, 0x90)),
            incorrect_bg: color("--incorrect-answer-bg", Color32::from_rgb(0xff, 0xc0, 0xcb)),
        }
    }

    pub fn of(ctx: &egui::Context) -> Self {
        ctx.data(|d| d.get_temp::<Palette>(palette_id())).unwrap_or_default()
    }
}

fn palette_id() -> Id {
    Id::new("gaku_palette")
}

/// Accepts `#rrggbb` and the few named colors the palettes use.
pub fn parse_color(value: &str) -> Option<Color32> {
    let value = value.trim();
    if value.starts_with('#') {
        return Color32::from_hex(value).ok();
    }
    match value.to_ascii_lowercase().as_str() {
        "lightgreen" => Some(Color32::from_rgb(0x90, 0xee, 0x90)),
        "pink" => Some(Color32::from_rgb(0xff, 0xc0, 0xcb)),
        "white" => Some(Color32::WHITE),
        "black" => Some(Color32::BLACK),
        _ => {
            tracing::warn!(value, "unknown color");
            None
        }
    }
}

pub fn blend_colors(color_a: Color32, color_b: Color32, t: f32) -> Color32 {
    let blend_channel = |a: u8, b: u8| ((1.0 - t) * (a as f32) + t * (b as f32)).round() as u8;
    Color32::from_rgba_unmultiplied(
        blend_channel(color_a.r(), color_b.r()),
        blend_channel(color_a.g(), color_b.g()),
        blend_channel(color_a.b(), color_b.b()),
        blend_channel(color_a.a(), color_b.a()),
    )
}

/// `StyleSink` that collects properties and turns them into egui visuals.
#[derive(Debug, Clone, Default)]
pub struct EguiStyle {
    properties: ThemeValues,
}

impl StyleSink for EguiStyle {
    fn remove_property(&mut self, key: &str) {
        self.properties.remove(key);
    }

    fn set_property(&mut self, key: &str, value: &str) {
        self.properties.insert(key.to_string(), value.to_string());
    }
}

impl EguiStyle {
    pub fn properties(&self) -> &ThemeValues {
        &self.properties
    }

    pub fn palette(&self) -> Palette {
        Palette::from_values(&self.properties)
    }

    pub fn install(&self, ctx: &egui::Context, theme: ThemeType) {
        let palette = self.palette();
        let is_dark = theme == ThemeType::Dark;
        let variant = if is_dark { egui::Theme::Dark } else { egui::Theme::Light };

        ctx.set_visuals_of(variant, visuals(&palette, is_dark));
        ctx.set_theme(variant);
        ctx.data_mut(|d| d.insert_temp(palette_id(), palette));
    }
}

pub fn visuals(palette: &Palette, is_dark: bool) -> Visuals {
    let default = if is_dark { Visuals::dark() } else { Visuals::light() };
    let raised = blend_colors(palette.background, palette.text, 0.08);
    let border = blend_colors(palette.background, palette.text, 0.35);

    let widget = |base: WidgetVisuals, fill: Color32, stroke: Color32| WidgetVisuals {
        bg_fill: fill,
        weak_bg_fill: fill,
        bg_stroke: Stroke { color: stroke, ..base.bg_stroke },
        fg_stroke: Stroke { color: palette.text, ..base.fg_stroke },
        ..base
    };

    Visuals {
        dark_mode: is_dark,
        override_text_color: Some(palette.text),
        widgets: Widgets {
            noninteractive: widget(default.widgets.noninteractive, palette.background, border),
            inactive: widget(default.widgets.inactive, raised, border),
            hovered: widget(default.widgets.hovered, palette.input_bg_focus, palette.link),
            active: widget(default.widgets.active, palette.input_bg_focus, palette.active_link),
            open: widget(default.widgets.open, raised, palette.visited_link),
        },
        selection: Selection {
            bg_fill: blend_colors(palette.background, palette.link, 0.35),
            stroke: Stroke { color: palette.text, ..default.selection.stroke },
        },
        hyperlink_color: palette.link,
        faint_bg_color: raised,
        extreme_bg_color: palette.input_bg,
        code_bg_color: raised,
        error_fg_color: palette.active_link,
        window_fill: palette.background,
        window_stroke: Stroke { color: border, ..default.window_stroke },
        panel_fill: palette.background,
        ..default
    }
}
