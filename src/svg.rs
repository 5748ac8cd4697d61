// SVG element extraction and rasterization for the preview pane.

use crate::style;
use eframe::egui;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid SVG: {0}")]
    Parse(usvg::Error),
    #[error("SVG has an empty canvas")]
    EmptyCanvas,
    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

/// Pull the first `<svg>` element out of arbitrary markup.
///
/// Works like pulling the element out of a parsed document: any prolog,
/// doctype or surrounding prose is dropped and only the element span is
/// returned. `None` means the text has no svg element at all; an element
/// that is never closed runs to the end of the input.
pub fn extract_svg_element(markup: &str) -> Option<&str> {
    let bytes = markup.as_bytes();
    let start = (0..bytes.len().saturating_sub(3)).find(|&pos| {
        bytes[pos..pos + 4].eq_ignore_ascii_case(b"<svg")
            && match bytes.get(pos + 4) {
                // Skip tags that merely start with "svg", e.g. <svgfoo>.
                Some(&next) => next == b'>' || next == b'/' || next.is_ascii_whitespace(),
                None => true,
            }
    })?;

    let close = bytes[start..]
        .windows(6)
        .enumerate()
        .filter(|(_, w)| w.eq_ignore_ascii_case(b"</svg>"))
        .map(|(i, _)| start + i + 6)
        .next_back();

    Some(&markup[start..close.unwrap_or(markup.len())])
}

/// Rasterizes SVG text into images the GUI can display or export.
/// System fonts are loaded once so text elements render.
pub struct Rasterizer {
    options: usvg::Options<'static>,
}

impl Rasterizer {
    pub fn new() -> Self {
        let mut options = usvg::Options::default();
        options.fontdb_mut().load_system_fonts();
        Self { options }
    }

    fn pixmap(&self, svg: &str) -> Result<tiny_skia::Pixmap, RenderError> {
        let tree = usvg::Tree::from_str(svg, &self.options).map_err(RenderError::Parse)?;
        let size = tree.size();
        if size.width() <= 0.0 || size.height() <= 0.0 {
            return Err(RenderError::EmptyCanvas);
        }

        let scale = style::RASTER_SCALE
            .min(style::RASTER_MAX_DIM / size.width())
            .min(style::RASTER_MAX_DIM / size.height());
        let width = (size.width() * scale).ceil().max(1.0) as u32;
        let height = (size.height() * scale).ceil().max(1.0) as u32;

        let mut pixmap =
            tiny_skia::Pixmap::new(width, height).ok_or(RenderError::EmptyCanvas)?;
        resvg::render(
            &tree,
            tiny_skia::Transform::from_scale(scale, scale),
            &mut pixmap.as_mut(),
        );
        Ok(pixmap)
    }

    pub fn render(&self, svg: &str) -> Result<egui::ColorImage, RenderError> {
        let pixmap = self.pixmap(svg)?;
        let size = [pixmap.width() as usize, pixmap.height() as usize];
        Ok(egui::ColorImage::from_rgba_premultiplied(size, pixmap.data()))
    }

    pub fn encode_png(&self, svg: &str) -> Result<Vec<u8>, RenderError> {
        self.pixmap(svg)?
            .encode_png()
            .map_err(|e| RenderError::Encode(e.to_string()))
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECT: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="20"><rect width="40" height="20" fill="#123456"/></svg>"##;

    #[test]
    fn test_extract_plain_element() {
        assert_eq!(extract_svg_element(RECT), Some(RECT));
    }

    #[test]
    fn test_extract_strips_prolog_and_prose() {
        let markup = format!("<?xml version=\"1.0\"?>\n<!-- card -->\n{RECT}\ntrailing text");
        assert_eq!(extract_svg_element(&markup), Some(RECT));
    }

    #[test]
    fn test_extract_is_case_insensitive() {
        let markup = "<SVG viewBox=\"0 0 1 1\"></SVG>";
        assert_eq!(extract_svg_element(markup), Some(markup));
    }

    #[test]
    fn test_plain_text_has_no_element() {
        assert_eq!(extract_svg_element("just some text"), None);
        assert_eq!(extract_svg_element("<svgfoo></svgfoo>"), None);
    }

    #[test]
    fn test_extract_skips_lookalike_tags() {
        let markup = "<svgfoo/> <svg><rect/></svg>";
        assert_eq!(extract_svg_element(markup), Some("<svg><rect/></svg>"));
    }

    #[test]
    fn test_unclosed_element_runs_to_end() {
        let markup = "prefix <svg><rect/>";
        assert_eq!(extract_svg_element(markup), Some("<svg><rect/>"));
    }

    #[test]
    fn test_rasterize_rect() {
        let image = Rasterizer::new().render(RECT).unwrap();
        assert_eq!(image.size, [80, 40]);
    }

    #[test]
    fn test_rasterize_rejects_garbage() {
        assert!(Rasterizer::new().render("not svg at all").is_err());
    }

    #[test]
    fn test_png_export_has_signature() {
        let png = Rasterizer::new().encode_png(RECT).unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
    }
}
