use eframe::egui;

// --- Sizing ---
pub const EDITOR_MIN: f32 = 280.0;
pub const EDITOR_DEFAULT: f32 = 440.0;
pub const GRID_STEP: f32 = 16.0;

// --- Timing ---
pub const STATUS_TIMEOUT_SECS: u64 = 3;
pub const LOADING_REPAINT_MS: u64 = 100;

// --- Preview limits ---
pub const RASTER_SCALE: f32 = 2.0;
pub const RASTER_MAX_DIM: f32 = 2048.0;
pub const HIGHLIGHT_LINE_LIMIT: usize = 1000;

// --- Modals ---
pub const MODAL_MIN_WIDTH: f32 = 300.0;
pub const MODAL_MAX_WIDTH: f32 = 520.0;
pub const MODAL_WIDTH_RATIO: f32 = 0.6;
pub const MODAL_HEIGHT_RATIO: f32 = 0.8;

// --- Colors ---
pub const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(0xf8, 0x51, 0x49);
pub const WARN_COLOR: egui::Color32 = egui::Color32::from_rgb(0xd2, 0x99, 0x22);
pub const GRID_COLOR: egui::Color32 = egui::Color32::from_rgba_premultiplied(60, 60, 60, 60);

// --- Helper functions ---

pub fn modal_width(ctx: &egui::Context) -> f32 {
    let width = ctx.input(|i| {
        i.viewport()
            .inner_rect
            .map(|r| r.width())
            .unwrap_or(800.0)
    });
    (width * MODAL_WIDTH_RATIO).clamp(MODAL_MIN_WIDTH, MODAL_MAX_WIDTH)
}

pub fn modal_max_height(ctx: &egui::Context) -> f32 {
    let height = ctx.input(|i| {
        i.viewport()
            .inner_rect
            .map(|r| r.height())
            .unwrap_or(600.0)
    });
    height * MODAL_HEIGHT_RATIO
}

pub fn truncated_label(
    ui: &mut egui::Ui,
    text: impl Into<egui::WidgetText>,
) -> egui::Response {
    ui.add(egui::Label::new(text).truncate())
}
