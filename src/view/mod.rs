pub mod modals;
pub mod panels;

use crate::style;
use eframe::egui;
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

/// Read-only syntax highlighting for raw markup display.
pub struct Highlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl Highlighter {
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    /// Lay out `text` as highlighted XML. Long inputs are capped at a fixed
    /// number of lines to keep the frame time flat.
    pub fn layout_markup(&self, text: &str) -> egui::text::LayoutJob {
        let syntax = self
            .syntax_set
            .find_syntax_by_extension("xml")
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());
        let theme = &self.theme_set.themes["base16-ocean.dark"];
        let mut highlighter = HighlightLines::new(syntax, theme);

        let mut job = egui::text::LayoutJob::default();
        for line in LinesWithEndings::from(text).take(style::HIGHLIGHT_LINE_LIMIT) {
            let ranges = highlighter
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_default();
            for (piece_style, fragment) in ranges {
                let color = egui::Color32::from_rgb(
                    piece_style.foreground.r,
                    piece_style.foreground.g,
                    piece_style.foreground.b,
                );
                job.append(
                    fragment,
                    0.0,
                    egui::TextFormat {
                        font_id: egui::FontId::monospace(12.0),
                        color,
                        ..Default::default()
                    },
                );
            }
        }
        job
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}
