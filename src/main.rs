use eframe::egui;

mod api;
mod app;
mod config;
mod export;
mod i18n;
mod input;
mod io;
mod refresh;
mod storage;
mod style;
mod svg;
mod templates;
mod view;

use app::Nowplay;

/// Window icon, rasterized from the bundled SVG.
fn load_icon() -> Option<egui::IconData> {
    let source = include_str!("../assets/icon.svg");
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(source, &options).ok()?;

    let size = 64;
    let mut pixmap = tiny_skia::Pixmap::new(size, size)?;
    let scale = size as f32 / tree.size().width().max(tree.size().height());
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    Some(egui::IconData {
        rgba: pixmap.take(),
        width: size,
        height: size,
    })
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size([1180.0, 760.0])
        .with_min_inner_size([820.0, 520.0])
        .with_title("Nowplay");
    if let Some(icon) = load_icon() {
        viewport = viewport.with_icon(icon);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Nowplay",
        options,
        Box::new(|cc| Ok(Box::new(Nowplay::new(cc)))),
    )
}
