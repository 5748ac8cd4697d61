// Main window panels: toolbar, editor, preview, status bar.

use crate::app::{Modal, Nowplay, Preview, StatusKind};
use crate::i18n::Language;
use crate::style;
use crate::templates::display_name;
use eframe::egui;

impl Nowplay {
    pub(crate) fn render_top_bar(&mut self, ctx: &egui::Context) {
        let tr = self.tr();
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(tr.app_title).strong());
                ui.separator();

                ui.label(tr.select_template);
                let mut selected = None;
                egui::ComboBox::from_id_salt("template_select")
                    .selected_text(display_name(&self.registry.current))
                    .show_ui(ui, |ui| {
                        for id in &self.registry.templates {
                            let active = *id == self.registry.current;
                            if ui.selectable_label(active, display_name(id)).clicked() {
                                selected = Some(id.clone());
                            }
                        }
                    });
                if let Some(id) = selected {
                    self.select_template(id);
                }
                if self.registry.degraded {
                    ui.label(egui::RichText::new("⚠").color(style::WARN_COLOR))
                        .on_hover_text(tr.offline_list);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mut switch_to = None;
                    for (label, language) in [("中文", Language::Zh), ("EN", Language::En)] {
                        if ui
                            .selectable_label(self.language == language, label)
                            .clicked()
                        {
                            switch_to = Some(language);
                        }
                    }
                    if let Some(language) = switch_to {
                        self.set_language(language);
                    }
                    ui.separator();
                    if ui.button(tr.settings).clicked() {
                        self.open_settings();
                    }
                    if ui.button(tr.api_docs).clicked() {
                        self.open_api_docs();
                    }
                });
            });
            ui.add_space(4.0);
        });
    }

    pub(crate) fn render_status_bar(&mut self, ctx: &egui::Context) {
        let tr = self.tr();
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                match self.status.get() {
                    Some((message, StatusKind::Error)) => {
                        ui.colored_label(style::ERROR_COLOR, message);
                    }
                    Some((message, _)) => {
                        ui.label(message);
                    }
                    None => {
                        ui.label(tr.ready);
                    }
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if self.timer.is_armed() {
                        ui.label(
                            egui::RichText::new(format!("⟳ {}s", self.settings.refresh_interval))
                                .weak(),
                        );
                        ui.separator();
                    }
                    style::truncated_label(
                        ui,
                        format!("{}: {}", tr.current_template, self.registry.current),
                    );
                });
            });
        });
    }

    pub(crate) fn render_editor_panel(&mut self, ctx: &egui::Context) {
        let tr = self.tr();
        egui::SidePanel::left("editor_panel")
            .resizable(true)
            .default_width(style::EDITOR_DEFAULT)
            .min_width(style::EDITOR_MIN)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    ui.heading(tr.svg_editor);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button(tr.reset_template).clicked() {
                            self.reset_template();
                        }
                        if ui.button(tr.apply_changes).clicked() {
                            let editor_ctx = ui.ctx().clone();
                            self.apply_edited(&editor_ctx);
                        }
                    });
                });
                ui.separator();

                egui::ScrollArea::vertical()
                    .id_salt("editor_scroll")
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui.add(
                            egui::TextEdit::multiline(&mut self.editor)
                                .code_editor()
                                .hint_text(tr.edit_placeholder)
                                .desired_width(f32::INFINITY)
                                .desired_rows(30),
                        );
                    });
            });
    }

    pub(crate) fn render_preview_panel(&mut self, ctx: &egui::Context) {
        let tr = self.tr();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.heading(tr.live_preview);
                ui.label(egui::RichText::new(display_name(&self.registry.current)).weak());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button(tr.save_template).clicked() {
                        self.open_save_prompt();
                    }
                    if ui.button(tr.my_templates).clicked() {
                        self.modal = Some(Modal::CustomTemplates);
                    }
                    if ui.button(tr.export_png).clicked() {
                        self.export_png();
                    }
                    if ui.button(tr.export_svg).clicked() {
                        self.export_svg();
                    }
                    if ui.button(tr.refresh_preview).clicked() {
                        self.refresh_preview();
                    }
                });
            });
            ui.separator();

            egui::ScrollArea::both()
                .id_salt("preview_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| match &self.preview {
                    Preview::Idle => {
                        ui.centered_and_justified(|ui| {
                            ui.label(egui::RichText::new(tr.ready).weak());
                        });
                    }
                    Preview::Loading => {
                        ui.centered_and_justified(|ui| {
                            ui.add(egui::Spinner::new().size(28.0));
                        });
                    }
                    Preview::Svg { texture, .. } => {
                        let response = ui.add(
                            egui::Image::new(texture)
                                .fit_to_original_size(1.0 / style::RASTER_SCALE)
                                .max_size(ui.available_size()),
                        );
                        if self.settings.show_grid {
                            draw_grid(ui.painter(), response.rect);
                        }
                    }
                    Preview::Raw { markup } => {
                        ui.label(self.highlighter.layout_markup(markup));
                    }
                    Preview::Failed { message } => {
                        render_preview_error(ui, tr.preview_failed, message);
                    }
                });
        });
    }
}

/// Inline error block shown in place of the preview.
fn render_preview_error(ui: &mut egui::Ui, title: &str, message: &str) {
    ui.centered_and_justified(|ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(20.0);
            ui.colored_label(style::ERROR_COLOR, title);
            ui.label(egui::RichText::new(message).small().weak());
        });
    });
}

fn draw_grid(painter: &egui::Painter, rect: egui::Rect) {
    let stroke = egui::Stroke::new(0.5, style::GRID_COLOR);
    let mut x = rect.left();
    while x <= rect.right() {
        painter.line_segment(
            [egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())],
            stroke,
        );
        x += style::GRID_STEP;
    }
    let mut y = rect.top();
    while y <= rect.bottom() {
        painter.line_segment(
            [egui::pos2(rect.left(), y), egui::pos2(rect.right(), y)],
            stroke,
        );
        y += style::GRID_STEP;
    }
}
