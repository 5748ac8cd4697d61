// Modal windows: settings, the save-template prompt, the template browser.

use crate::app::{Modal, Nowplay, SettingsForm};
use crate::style;
use bytesize::ByteSize;
use eframe::egui;

enum SettingsAction {
    Save,
    Reset,
    Close,
}

impl Nowplay {
    pub(crate) fn render_settings_modal(&mut self, ctx: &egui::Context) {
        let mut form = match &self.modal {
            Some(Modal::Settings(form)) => form.clone(),
            _ => return,
        };
        let tr = self.tr();
        let mut action = None;

        egui::Window::new(tr.settings)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .default_width(style::modal_width(ctx))
            .show(ctx, |ui| {
                egui::Grid::new("settings_grid")
                    .num_columns(2)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        ui.label(tr.api_endpoint);
                        let response = ui.add(
                            egui::TextEdit::singleline(&mut form.api_endpoint)
                                .hint_text(tr.api_endpoint_hint),
                        );
                        if self.focus_input {
                            response.request_focus();
                            self.focus_input = false;
                        }
                        ui.end_row();

                        ui.label(tr.refresh_interval);
                        ui.add(
                            egui::DragValue::new(&mut form.refresh_interval)
                                .range(1..=3600)
                                .suffix(" s"),
                        );
                        ui.end_row();

                        ui.label("");
                        ui.checkbox(&mut form.auto_refresh, tr.auto_refresh);
                        ui.end_row();

                        ui.label("");
                        ui.checkbox(&mut form.show_grid, tr.show_grid);
                        ui.end_row();
                    });

                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    if ui.button(tr.save_settings).clicked() {
                        action = Some(SettingsAction::Save);
                    }
                    if ui.button(tr.reset_settings).clicked() {
                        action = Some(SettingsAction::Reset);
                    }
                    if ui.button(tr.cancel).clicked() {
                        action = Some(SettingsAction::Close);
                    }
                });
            });

        match action {
            Some(SettingsAction::Save) => {
                self.modal = None;
                self.apply_settings(form);
            }
            Some(SettingsAction::Reset) => {
                self.modal = None;
                self.reset_settings();
            }
            Some(SettingsAction::Close) => self.modal = None,
            None => {
                if let Some(Modal::Settings(stored)) = &mut self.modal {
                    *stored = form;
                }
            }
        }
    }

    pub(crate) fn render_save_modal(&mut self, ctx: &egui::Context) {
        let mut name = match &self.modal {
            Some(Modal::SaveTemplate { name }) => name.clone(),
            _ => return,
        };
        let tr = self.tr();
        let mut save = false;
        let mut close = false;

        egui::Window::new(tr.save_template)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .default_width(style::modal_width(ctx))
            .show(ctx, |ui| {
                ui.label(tr.template_name_prompt);
                ui.add_space(5.0);
                let response = ui.text_edit_singleline(&mut name);
                if self.focus_input {
                    response.request_focus();
                    self.focus_input = false;
                }
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    let valid = !name.trim().is_empty();
                    if ui.add_enabled(valid, egui::Button::new(tr.save)).clicked()
                        || (submitted && valid)
                    {
                        save = true;
                    }
                    if ui.button(tr.cancel).clicked() {
                        close = true;
                    }
                });
            });

        if save {
            self.modal = None;
            let name = name.trim().to_string();
            self.save_custom_template(name);
        } else if close {
            self.modal = None;
        } else if let Some(Modal::SaveTemplate { name: stored }) = &mut self.modal {
            *stored = name;
        }
    }

    pub(crate) fn render_custom_templates_modal(&mut self, ctx: &egui::Context) {
        if !matches!(self.modal, Some(Modal::CustomTemplates)) {
            return;
        }
        let tr = self.tr();
        let mut load = None;
        let mut close = false;

        egui::Window::new(tr.my_templates)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .default_width(style::modal_width(ctx))
            .show(ctx, |ui| {
                ui.set_max_height(style::modal_max_height(ctx));

                if self.custom.is_empty() {
                    ui.label(egui::RichText::new(tr.no_custom_templates).weak());
                } else {
                    use egui_extras::{Column, TableBuilder};

                    TableBuilder::new(ui)
                        .striped(true)
                        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                        .column(Column::remainder())
                        .column(Column::auto().at_least(70.0))
                        .column(Column::auto().at_least(60.0))
                        .header(20.0, |mut header| {
                            header.col(|ui| {
                                ui.label(tr.name_column);
                            });
                            header.col(|ui| {
                                ui.label(tr.size_column);
                            });
                            header.col(|_ui| {});
                        })
                        .body(|mut body| {
                            for (name, markup) in self.custom.iter() {
                                body.row(22.0, |mut row| {
                                    row.col(|ui| {
                                        style::truncated_label(ui, name);
                                    });
                                    row.col(|ui| {
                                        ui.label(ByteSize(markup.len() as u64).to_string());
                                    });
                                    row.col(|ui| {
                                        if ui.button(tr.load_template).clicked() {
                                            load = Some(name.clone());
                                        }
                                    });
                                });
                            }
                        });
                }

                ui.add_space(10.0);
                if ui.button(tr.close).clicked() {
                    close = true;
                }
            });

        if let Some(name) = load {
            if let Some(markup) = self.custom.get(&name).cloned() {
                self.editor = markup;
                self.modal = None;
                self.apply_edited(ctx);
                self.status.info(format!("{}: \"{name}\"", tr.template_applied));
            } else {
                self.modal = None;
            }
        } else if close {
            self.modal = None;
        }
    }
}
