use crate::api::{ApiError, Client};
use eframe::egui;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

pub enum ApiCommand {
    ListTemplates {
        endpoint: String,
    },
    FetchTemplate {
        endpoint: String,
        id: String,
    },
    RenderPreview {
        endpoint: String,
        template: String,
        seq: u64,
    },
}

pub enum ApiEvent {
    TemplatesListed(Result<Vec<String>, ApiError>),
    TemplateFetched {
        id: String,
        result: Result<String, ApiError>,
    },
    PreviewRendered {
        seq: u64,
        result: Result<String, ApiError>,
    },
}

/// Network worker: commands in, events out.
///
/// Each request runs on its own short-lived thread, so a slow response
/// never blocks the queue and completions can arrive out of order. Nothing
/// in flight is ever cancelled; preview events carry the sequence tag they
/// were issued with and the app discards stale ones on arrival.
pub fn spawn_worker(ctx: egui::Context) -> (Sender<ApiCommand>, Receiver<ApiEvent>) {
    let (cmd_tx, cmd_rx) = channel::<ApiCommand>();
    let (event_tx, event_rx) = channel();

    thread::spawn(move || {
        let client = Client::new();
        while let Ok(cmd) = cmd_rx.recv() {
            let client = client.clone();
            let event_tx = event_tx.clone();
            let ctx = ctx.clone();
            thread::spawn(move || {
                let event = match cmd {
                    ApiCommand::ListTemplates { endpoint } => {
                        ApiEvent::TemplatesListed(client.list_templates(&endpoint))
                    }
                    ApiCommand::FetchTemplate { endpoint, id } => {
                        let result = client.template_content(&endpoint, &id);
                        ApiEvent::TemplateFetched { id, result }
                    }
                    ApiCommand::RenderPreview {
                        endpoint,
                        template,
                        seq,
                    } => {
                        let result = client.render_preview(&endpoint, &template);
                        ApiEvent::PreviewRendered { seq, result }
                    }
                };
                let _ = event_tx.send(event);
                ctx.request_repaint();
            });
        }
    });

    (cmd_tx, event_rx)
}
