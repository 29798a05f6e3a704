//! Style and font setup for the dashboard UI.

use egui::{Color32, FontData, FontDefinitions, FontFamily};

// Background colors
pub const COLOR_BG_DARK: Color32 = Color32::from_rgb(30, 30, 30);
pub const COLOR_BG_MEDIUM: Color32 = Color32::from_rgb(45, 45, 45);
pub const COLOR_BG_LIGHT: Color32 = Color32::from_rgb(60, 60, 60);

// Text colors
pub const COLOR_TEXT_PRIMARY: Color32 = Color32::from_rgb(220, 220, 220);
pub const COLOR_ERROR: Color32 = Color32::from_rgb(255, 100, 100);

/// Setup Chinese font support
pub fn setup_chinese_fonts(ctx: &egui::Context) {
    let mut fonts = FontDefinitions::default();

    let font_paths: &[&str] = if cfg!(target_os = "windows") {
        &[
            "C:\\Windows\\Fonts\\msyh.ttc",
            "C:\\Windows\\Fonts\\simsun.ttc",
        ]
    } else if cfg!(target_os = "macos") {
        &["/System/Library/Fonts/PingFang.ttc"]
    } else {
        &[
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
            "/usr/share/fonts/wenquanyi/wqy-microhei/wqy-microhei.ttc",
        ]
    };

    for path in font_paths {
        if let Ok(font_data) = std::fs::read(path) {
            fonts.font_data.insert(
                "chinese".to_owned(),
                FontData::from_owned(font_data).into(),
            );
            fonts
                .families
                .entry(FontFamily::Proportional)
                .or_default()
                .insert(0, "chinese".to_owned());
            fonts
                .families
                .entry(FontFamily::Monospace)
                .or_default()
                .push("chinese".to_owned());
            break;
        }
    }

    ctx.set_fonts(fonts);
}

/// Apply dark theme to egui context
pub fn apply_dark_theme(ctx: &egui::Context) {
    setup_chinese_fonts(ctx);

    let mut style = (*ctx.style()).clone();

    style.visuals = egui::Visuals::dark();
    style.visuals.window_fill = COLOR_BG_DARK;
    style.visuals.panel_fill = COLOR_BG_MEDIUM;
    style.visuals.faint_bg_color = COLOR_BG_LIGHT;

    style.visuals.widgets.inactive.bg_fill = COLOR_BG_MEDIUM;
    style.visuals.widgets.hovered.bg_fill = COLOR_BG_LIGHT;
    style.visuals.widgets.active.bg_fill = Color32::from_rgb(80, 80, 80);

    style.visuals.widgets.inactive.fg_stroke.color = COLOR_TEXT_PRIMARY;
    style.visuals.widgets.hovered.fg_stroke.color = Color32::WHITE;
    style.visuals.widgets.active.fg_stroke.color = Color32::WHITE;

    ctx.set_style(style);
}
