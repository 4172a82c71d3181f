use std::{
    path::Path,
    sync::Arc,
};

use eframe::egui;

const CJK_FONT_NAME: &str = "cjk";

/// System fonts with Japanese coverage, most preferred first.
const CJK_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/noto/NotoSansJP-Regular.ttf",
    "/usr/share/fonts/truetype/droid/DroidSansFallbackFull.ttf",
    "/System/Library/Fonts/ヒラギノ角ゴシック W3.ttc",
    "/System/Library/Fonts/Hiragino Sans GB.ttc",
    "/Library/Fonts/Arial Unicode.ttf",
    "C:\\Windows\\Fonts\\YuGothM.ttc",
    "C:\\Windows\\Fonts\\meiryo.ttc",
    "C:\\Windows\\Fonts\\msgothic.ttc",
];

fn find_cjk_font() -> Option<(&'static str, Vec<u8>)> {
    CJK_FONT_CANDIDATES
        .iter()
        .filter(|path| Path::new(path).is_file())
        .find_map(|path| match std::fs::read(path) {
            Ok(bytes) => Some((*path, bytes)),
            Err(e) => {
                tracing::debug!("Failed to read font {path}: {e}");
                None
            }
        })
}

/// Adds a Japanese-capable fallback font behind egui's defaults. The default
/// fonts stay first so their symbol glyphs keep priority.
pub fn setup_fonts(ctx: &egui::Context) {
    let Some((path, bytes)) = find_cjk_font() else {
        tracing::warn!("No Japanese font found, kana and kanji may not render");
        return;
    };
    tracing::info!(path, "using Japanese font");

    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert(CJK_FONT_NAME.to_owned(), Arc::new(egui::FontData::from_owned(bytes)));

    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts.families.entry(family).or_default().push(CJK_FONT_NAME.to_owned());
    }

    ctx.set_fonts(fonts);
}
