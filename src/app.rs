use crate::config::Settings;
use crate::i18n::{Language, Translation};
use crate::io::{spawn_worker, ApiCommand, ApiEvent};
use crate::refresh::{PreviewSequence, RefreshTimer};
use crate::storage::{KvStore, KEY_LANGUAGE};
use crate::style;
use crate::svg::{extract_svg_element, Rasterizer};
use crate::templates::{CustomTemplates, TemplateRegistry};
use crate::view::Highlighter;
use crate::{api, export};
use bytesize::ByteSize;
use chrono::Local;
use eframe::egui;
use std::sync::mpsc::{Receiver, Sender};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// What the preview pane is currently showing.
///
/// Single-shot lifecycle: idle, then loading, then one of the displayed
/// variants until the next refresh replaces it.
pub enum Preview {
    Idle,
    Loading,
    /// A rasterized `<svg>` element plus the markup it came from.
    Svg {
        markup: String,
        texture: egui::TextureHandle,
    },
    /// Markup without an svg element, shown as literal text.
    Raw { markup: String },
    Failed { message: String },
}

impl Preview {
    /// The markup an export would serialize, when something is displayed.
    pub fn markup(&self) -> Option<&str> {
        match self {
            Preview::Svg { markup, .. } | Preview::Raw { markup } => Some(markup),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
pub enum StatusKind {
    Info,
    Error,
}

/// Transient status-bar message, auto-cleared after a fixed delay.
#[derive(Default)]
pub struct StatusLine {
    current: Option<(String, StatusKind, Instant)>,
}

impl StatusLine {
    pub fn info(&mut self, message: impl Into<String>) {
        self.current = Some((message.into(), StatusKind::Info, Instant::now()));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.current = Some((message.into(), StatusKind::Error, Instant::now()));
    }

    pub fn clear_expired(&mut self, timeout: Duration) {
        if let Some((_, _, since)) = &self.current {
            if since.elapsed() >= timeout {
                self.current = None;
            }
        }
    }

    pub fn get(&self) -> Option<(&str, StatusKind)> {
        self.current
            .as_ref()
            .map(|(message, kind, _)| (message.as_str(), *kind))
    }
}

/// Working copy of the settings shown in the settings panel. Nothing is
/// applied until the user hits save.
#[derive(Clone)]
pub struct SettingsForm {
    pub api_endpoint: String,
    pub auto_refresh: bool,
    pub refresh_interval: u32,
    pub show_grid: bool,
}

impl SettingsForm {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            api_endpoint: settings.api_endpoint.clone(),
            auto_refresh: settings.auto_refresh,
            refresh_interval: settings.refresh_interval,
            show_grid: settings.show_grid,
        }
    }

    pub fn into_settings(self) -> Settings {
        Settings {
            api_endpoint: self.api_endpoint,
            auto_refresh: self.auto_refresh,
            refresh_interval: self.refresh_interval.max(1),
            show_grid: self.show_grid,
        }
    }
}

pub enum Modal {
    Settings(SettingsForm),
    SaveTemplate { name: String },
    CustomTemplates,
}

/// The whole application. Owned by the eframe entry point; every component
/// hangs off this struct instead of module-level state.
pub struct Nowplay {
    pub store: KvStore,
    pub settings: Settings,
    pub language: Language,
    pub registry: TemplateRegistry,
    pub custom: CustomTemplates,

    /// Raw markup in the editor pane.
    pub editor: String,
    pub preview: Preview,
    pub modal: Option<Modal>,
    pub status: StatusLine,
    /// One-shot focus request for the modal that just opened.
    pub focus_input: bool,

    pub timer: RefreshTimer,
    seq: PreviewSequence,
    rasterizer: Rasterizer,
    pub highlighter: Highlighter,

    command_tx: Sender<ApiCommand>,
    event_rx: Receiver<ApiEvent>,
}

impl Nowplay {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let store = KvStore::open();
        let settings = Settings::load(&store);
        let language = store.get(KEY_LANGUAGE).unwrap_or_default();
        let custom = CustomTemplates::load(&store);
        let (command_tx, event_rx) = spawn_worker(cc.egui_ctx.clone());

        let mut app = Self {
            store,
            settings,
            language,
            registry: TemplateRegistry::new(),
            custom,
            editor: String::new(),
            preview: Preview::Idle,
            modal: None,
            status: StatusLine::default(),
            focus_input: false,
            timer: RefreshTimer::disarmed(),
            seq: PreviewSequence::default(),
            rasterizer: Rasterizer::new(),
            highlighter: Highlighter::new(),
            command_tx,
            event_rx,
        };

        app.rearm_timer();
        app.status.info(app.tr().loading_templates);
        app.request_template_list();
        app.load_current_template();
        app.refresh_preview();
        app
    }

    pub fn tr(&self) -> &'static Translation {
        self.language.texts()
    }

    fn send(&self, command: ApiCommand) {
        if self.command_tx.send(command).is_err() {
            warn!("network worker is gone");
        }
    }

    pub fn request_template_list(&mut self) {
        self.send(ApiCommand::ListTemplates {
            endpoint: self.settings.api_endpoint.clone(),
        });
    }

    /// Fetch the current template's source into the editor.
    pub fn load_current_template(&mut self) {
        self.send(ApiCommand::FetchTemplate {
            endpoint: self.settings.api_endpoint.clone(),
            id: self.registry.current.clone(),
        });
    }

    pub fn select_template(&mut self, id: String) {
        self.registry.select(id);
        self.load_current_template();
        self.refresh_preview();
    }

    /// Ask the service to render the current template. A refresh while one
    /// is outstanding just issues a newer tag; the older response is
    /// dropped when it lands.
    pub fn refresh_preview(&mut self) {
        let seq = self.seq.issue();
        self.preview = Preview::Loading;
        self.send(ApiCommand::RenderPreview {
            endpoint: self.settings.api_endpoint.clone(),
            template: self.registry.current.clone(),
            seq,
        });
    }

    /// Show the editor's markup without asking the server.
    pub fn apply_edited(&mut self, ctx: &egui::Context) {
        let markup = self.editor.clone();
        self.show_markup(ctx, markup);
        self.status.info(self.tr().svg_applied);
    }

    /// Best effort display: rasterize the svg element if there is one,
    /// otherwise show the literal text. Never rejects input.
    fn show_markup(&mut self, ctx: &egui::Context, markup: String) {
        self.preview = match extract_svg_element(&markup) {
            Some(element) => match self.rasterizer.render(element) {
                Ok(image) => {
                    let texture =
                        ctx.load_texture("preview", image, egui::TextureOptions::LINEAR);
                    Preview::Svg {
                        markup: element.to_string(),
                        texture,
                    }
                }
                Err(e) => {
                    debug!("rasterization failed, showing raw markup: {e}");
                    Preview::Raw { markup }
                }
            },
            None => Preview::Raw { markup },
        };
    }

    pub fn reset_template(&mut self) {
        self.load_current_template();
        self.status.info(self.tr().template_reset);
    }

    pub fn export_svg(&mut self) {
        let tr = self.tr();
        let Some(markup) = self.preview.markup() else {
            self.status.error(tr.nothing_to_export);
            return;
        };
        let file_name = export::svg_file_name(&self.registry.current);
        match export::write_export(&export::export_dir(), &file_name, markup.as_bytes()) {
            Ok(path) => {
                let size = ByteSize(markup.len() as u64);
                self.status
                    .info(format!("{}: {} ({size})", tr.svg_exported, path.display()));
            }
            Err(e) => self.status.error(format!("{}: {e}", tr.export_failed)),
        }
    }

    pub fn export_png(&mut self) {
        let tr = self.tr();
        let Some(markup) = self.preview.markup() else {
            self.status.error(tr.nothing_to_export);
            return;
        };
        let file_name = export::png_file_name(&self.registry.current);
        match self.rasterizer.encode_png(markup) {
            Ok(png) => match export::write_export(&export::export_dir(), &file_name, &png) {
                Ok(path) => {
                    let size = ByteSize(png.len() as u64);
                    self.status
                        .info(format!("{}: {} ({size})", tr.png_exported, path.display()));
                }
                Err(e) => self.status.error(format!("{}: {e}", tr.export_failed)),
            },
            Err(e) => self.status.error(format!("{}: {e}", tr.export_failed)),
        }
    }

    pub fn open_save_prompt(&mut self) {
        let name = format!("custom-{}", Local::now().format("%Y%m%d-%H%M%S"));
        self.modal = Some(Modal::SaveTemplate { name });
        self.focus_input = true;
    }

    /// `name` must be non-empty; the prompt enforces that before calling.
    pub fn save_custom_template(&mut self, name: String) {
        self.custom.insert(name.clone(), self.editor.clone());
        self.custom.save(&self.store);
        self.status
            .info(format!("{}: \"{name}\"", self.tr().template_saved));
    }

    pub fn open_settings(&mut self) {
        self.modal = Some(Modal::Settings(SettingsForm::from_settings(&self.settings)));
        self.focus_input = true;
    }

    pub fn apply_settings(&mut self, form: SettingsForm) {
        let endpoint_changed = form.api_endpoint != self.settings.api_endpoint;
        self.settings = form.into_settings();
        self.settings.save(&self.store);
        self.rearm_timer();
        if endpoint_changed {
            self.request_template_list();
            self.load_current_template();
        }
        self.refresh_preview();
        self.status.info(self.tr().settings_saved);
    }

    pub fn reset_settings(&mut self) {
        let endpoint_changed = self.settings.api_endpoint != crate::config::DEFAULT_ENDPOINT;
        self.settings = Settings::reset(&self.store);
        self.rearm_timer();
        if endpoint_changed {
            self.request_template_list();
            self.load_current_template();
        }
        self.refresh_preview();
        self.status.info(self.tr().settings_reset);
    }

    /// Single owned timer: whatever the previous state was, after this call
    /// there is exactly one deadline or none.
    fn rearm_timer(&mut self) {
        if self.settings.auto_refresh {
            self.timer.rearm(self.settings.interval());
        } else {
            self.timer.disarm();
        }
    }

    pub fn set_language(&mut self, language: Language) {
        if language != self.language {
            self.language = language;
            self.store.set(KEY_LANGUAGE, &language);
        }
    }

    pub fn open_api_docs(&mut self) {
        let url = format!("{}/docs", api::base_url(&self.settings.api_endpoint));
        if let Err(e) = open::that(&url) {
            self.status.error(format!("{}: {e}", self.tr().open_failed));
        }
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    fn pump_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                ApiEvent::TemplatesListed(result) => {
                    let tr = self.tr();
                    let failed = result.is_err();
                    self.registry.apply_list(result);
                    if failed {
                        self.status.error(tr.error_loading_templates);
                    } else {
                        self.status.info(format!(
                            "{} {}",
                            self.registry.templates.len(),
                            tr.templates_loaded
                        ));
                    }
                }
                ApiEvent::TemplateFetched { id, result } => match result {
                    Ok(content) => {
                        // The selection may have moved on while this was in
                        // flight.
                        if id == self.registry.current {
                            self.editor = content;
                        }
                    }
                    Err(e) => {
                        warn!("template content fetch failed for {id}: {e}");
                        self.status
                            .error(format!("{}: {e}", self.tr().error_loading_content));
                    }
                },
                ApiEvent::PreviewRendered { seq, result } => {
                    if !self.seq.is_latest(seq) {
                        debug!("discarding stale preview response #{seq}");
                        continue;
                    }
                    match result {
                        Ok(markup) => {
                            self.show_markup(ctx, markup);
                            self.status.info(self.tr().preview_updated);
                        }
                        Err(e) => {
                            self.preview = Preview::Failed {
                                message: e.to_string(),
                            };
                            self.status.error(self.tr().preview_failed);
                        }
                    }
                }
            }
        }
    }
}

impl eframe::App for Nowplay {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.pump_events(ctx);
        self.status
            .clear_expired(Duration::from_secs(style::STATUS_TIMEOUT_SECS));

        let now = Instant::now();
        if self.timer.fire(now) {
            self.refresh_preview();
        }

        self.handle_input(ctx);

        self.render_top_bar(ctx);
        self.render_status_bar(ctx);
        self.render_editor_panel(ctx);
        self.render_preview_panel(ctx);
        self.render_settings_modal(ctx);
        self.render_save_modal(ctx);
        self.render_custom_templates_modal(ctx);

        // Keep repainting while something is pending: a loading spinner, the
        // next auto-refresh tick, or a status message waiting to expire.
        if matches!(self.preview, Preview::Loading) {
            ctx.request_repaint_after(Duration::from_millis(style::LOADING_REPAINT_MS));
        } else if let Some(remaining) = self.timer.remaining(now) {
            ctx.request_repaint_after(remaining);
        }
        if self.status.get().is_some() {
            ctx.request_repaint_after(Duration::from_millis(500));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_status_line_expires() {
        let mut status = StatusLine::default();
        status.info("saved");
        assert_eq!(status.get().map(|(m, _)| m), Some("saved"));

        thread::sleep(Duration::from_millis(30));
        status.clear_expired(Duration::from_millis(10));
        assert!(status.get().is_none());
    }

    #[test]
    fn test_status_line_replaces_previous_message() {
        let mut status = StatusLine::default();
        status.info("first");
        status.error("second");
        let (message, kind) = status.get().unwrap();
        assert_eq!(message, "second");
        assert!(kind == StatusKind::Error);
    }

    #[test]
    fn test_settings_form_clamps_interval() {
        let mut form = SettingsForm::from_settings(&Settings::default());
        form.refresh_interval = 0;
        assert_eq!(form.into_settings().refresh_interval, 1);
    }
}
