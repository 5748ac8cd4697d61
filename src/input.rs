// Keyboard shortcuts, mirroring the toolbar: save, refresh, export, and
// Escape to close whichever modal is open.

use crate::app::Nowplay;
use eframe::egui;

const SAVE_TEMPLATE: egui::KeyboardShortcut =
    egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S);
const REFRESH: egui::KeyboardShortcut =
    egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::R);
const EXPORT: egui::KeyboardShortcut =
    egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::E);

impl Nowplay {
    pub fn handle_input(&mut self, ctx: &egui::Context) {
        if ctx.input_mut(|i| i.consume_shortcut(&SAVE_TEMPLATE)) {
            self.open_save_prompt();
        }
        if ctx.input_mut(|i| i.consume_shortcut(&REFRESH)) {
            self.refresh_preview();
        }
        if ctx.input_mut(|i| i.consume_shortcut(&EXPORT)) {
            self.export_svg();
        }
        if self.modal.is_some() && ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.close_modal();
        }
    }
}
