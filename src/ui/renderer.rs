//! Card grid rendering
//!
//! Draws the candidate cards with tiny-skia. Layout calculation is kept
//! apart from rendering so placement can be tested without pixels. Text
//! needs a font; without one, grey bars stand in for the lines.

use std::fs;
use std::path::Path;

use ab_glyph::{Font, FontVec, InvalidFont, PxScale, ScaleFont, point};
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, PremultipliedColorU8, Rect as SkiaRect, Stroke, Transform};
use tracing::debug;

use crate::config::CardGridConfig;
use crate::domain::CandidateCard;

/// Rendering errors
#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    #[error("Failed to create {width}x{height} pixmap for rendering")]
    PixmapCreationFailed { width: u32, height: u32 },

    #[error("Font data is not a usable TrueType/OpenType font")]
    InvalidFont(#[from] InvalidFont),

    #[error("PNG encoding failed: {0}")]
    PngEncoding(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

const BACKGROUND: [u8; 3] = [246, 244, 239];
const CARD_FILL: [u8; 3] = [255, 255, 255];
const CARD_BORDER: [u8; 3] = [214, 208, 196];
const AVATAR_FILL: [u8; 3] = [232, 98, 60];
const AVATAR_TEXT: [u8; 3] = [255, 255, 255];
const TITLE_TEXT: [u8; 3] = [33, 33, 33];
const SUBTITLE_TEXT: [u8; 3] = [110, 110, 110];

fn opaque([r, g, b]: [u8; 3]) -> Color {
    Color::from_rgba8(r, g, b, 255)
}

/// Where one card and its parts go on the canvas
#[derive(Debug, Clone)]
pub struct CardPlacement {
    pub card_rect: SkiaRect,
    pub avatar_x: f32,
    pub avatar_y: f32,
    pub avatar_radius: f32,
    pub initial: Option<char>,
    pub title: String,
    pub subtitle: String,
    pub text_x: f32,
    pub text_max_x: f32,
    pub title_baseline: f32,
    pub subtitle_baseline: f32,
}

/// Pre-calculated layout for the whole card grid
#[derive(Debug, Clone)]
pub struct CardLayout {
    /// Cards in list order, newest first
    pub cards: Vec<CardPlacement>,
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub title_size: f32,
    pub subtitle_size: f32,
}

impl CardLayout {
    /// Lays cards out row by row in list order
    pub fn from_cards<'a, I>(cards: I, config: &CardGridConfig, scale: f32) -> Self
    where
        I: IntoIterator<Item = &'a CandidateCard>,
    {
        let config = config.sanitized();
        let scale = scale.max(0.5);
        let cards: Vec<&CandidateCard> = cards.into_iter().collect();

        let (width, height) = config.canvas_size(cards.len());
        let card_w = config.card_width as f32 * scale;
        let card_h = config.card_height as f32 * scale;
        let gap = config.gap as f32 * scale;
        let padding = (card_h * 0.15).max(4.0);
        let avatar_radius = (card_h / 2.0 - padding).max(4.0);

        let mut layout = Self {
            cards: Vec::with_capacity(cards.len()),
            canvas_width: width as f32 * scale,
            canvas_height: height as f32 * scale,
            title_size: (18.0 * scale).max(10.0),
            subtitle_size: (14.0 * scale).max(8.0),
        };

        let columns = config.columns as usize;
        for (index, card) in cards.into_iter().enumerate() {
            let col = (index % columns) as f32;
            let row = (index / columns) as f32;
            let x = gap + col * (card_w + gap);
            let y = gap + row * (card_h + gap);

            let Some(card_rect) = SkiaRect::from_xywh(x, y, card_w, card_h) else {
                continue;
            };

            let avatar_x = x + padding + avatar_radius;
            let avatar_y = y + card_h / 2.0;
            let text_x = avatar_x + avatar_radius + padding;

            layout.cards.push(CardPlacement {
                card_rect,
                avatar_x,
                avatar_y,
                avatar_radius,
                initial: card.initial(),
                title: card.leader_name.clone(),
                subtitle: card.party_name.clone(),
                text_x,
                text_max_x: x + card_w - padding,
                title_baseline: avatar_y - 4.0 * scale,
                subtitle_baseline: avatar_y + layout.subtitle_size,
            });
        }

        layout
    }
}

/// Card grid renderer using tiny-skia, with optional ab_glyph text
pub struct CardRenderer {
    font: Option<FontVec>,
}

impl CardRenderer {
    /// Renderer without a font; text is drawn as placeholder bars
    pub fn new() -> Self {
        Self { font: None }
    }

    pub fn with_font_bytes(data: Vec<u8>) -> Result<Self, RendererError> {
        let font = FontVec::try_from_vec(data)?;
        Ok(Self { font: Some(font) })
    }

    pub fn with_font_file(path: impl AsRef<Path>) -> Result<Self, RendererError> {
        Self::with_font_bytes(fs::read(path)?)
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Render a card layout to a pixmap
    pub fn render_layout(&self, layout: &CardLayout) -> Result<Pixmap, RendererError> {
        let width = layout.canvas_width.ceil() as u32;
        let height = layout.canvas_height.ceil() as u32;
        let mut pixmap =
            Pixmap::new(width, height).ok_or(RendererError::PixmapCreationFailed { width, height })?;

        pixmap.fill(opaque(BACKGROUND));

        for placement in &layout.cards {
            self.render_card(&mut pixmap, placement, layout);
        }

        debug!(width, height, cards = layout.cards.len(), "Rendered card grid");
        Ok(pixmap)
    }

    /// Render and write the result as a PNG file
    pub fn render_to_png(&self, layout: &CardLayout, path: impl AsRef<Path>) -> Result<(), RendererError> {
        let pixmap = self.render_layout(layout)?;
        let data = pixmap
            .encode_png()
            .map_err(|e| RendererError::PngEncoding(e.to_string()))?;
        fs::write(path, data)?;
        Ok(())
    }

    fn render_card(&self, pixmap: &mut Pixmap, placement: &CardPlacement, layout: &CardLayout) {
        let card_path = PathBuilder::from_rect(placement.card_rect);
        pixmap.fill_path(&card_path, &paint(opaque(CARD_FILL)), FillRule::Winding, Transform::identity(), None);
        pixmap.stroke_path(
            &card_path,
            &paint(opaque(CARD_BORDER)),
            &Stroke::default(),
            Transform::identity(),
            None,
        );

        if let Some(avatar) =
            PathBuilder::from_circle(placement.avatar_x, placement.avatar_y, placement.avatar_radius)
        {
            pixmap.fill_path(&avatar, &paint(opaque(AVATAR_FILL)), FillRule::Winding, Transform::identity(), None);
        }

        match &self.font {
            Some(font) => {
                if let Some(initial) = placement.initial {
                    draw_centered_char(
                        pixmap,
                        font,
                        initial,
                        (placement.avatar_x, placement.avatar_y),
                        placement.avatar_radius * 1.2,
                        opaque(AVATAR_TEXT),
                    );
                }
                draw_text(
                    pixmap,
                    font,
                    &placement.title,
                    (placement.text_x, placement.title_baseline),
                    placement.text_max_x,
                    layout.title_size,
                    opaque(TITLE_TEXT),
                );
                draw_text(
                    pixmap,
                    font,
                    &placement.subtitle,
                    (placement.text_x, placement.subtitle_baseline),
                    placement.text_max_x,
                    layout.subtitle_size,
                    opaque(SUBTITLE_TEXT),
                );
            }
            None => {
                placeholder_bar(
                    pixmap,
                    placement,
                    placement.title_baseline,
                    layout.title_size,
                    placement.title.chars().count(),
                );
                placeholder_bar(
                    pixmap,
                    placement,
                    placement.subtitle_baseline,
                    layout.subtitle_size,
                    placement.subtitle.chars().count(),
                );
            }
        }
    }
}

impl Default for CardRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;
    paint
}

/// Grey bar roughly as long as the text would be
fn placeholder_bar(pixmap: &mut Pixmap, placement: &CardPlacement, baseline: f32, size: f32, chars: usize) {
    let height = size * 0.6;
    let width = (chars as f32 * size * 0.5).min(placement.text_max_x - placement.text_x);
    if let Some(rect) = SkiaRect::from_xywh(placement.text_x, baseline - height, width, height) {
        pixmap.fill_rect(rect, &paint(opaque(CARD_BORDER)), Transform::identity(), None);
    }
}

fn draw_text(
    pixmap: &mut Pixmap,
    font: &FontVec,
    text: &str,
    (x, baseline): (f32, f32),
    max_x: f32,
    size: f32,
    color: Color,
) {
    let scaled = font.as_scaled(PxScale::from(size));
    let mut caret = x;
    let mut previous = None;

    for ch in text.chars() {
        let mut glyph = scaled.scaled_glyph(ch);
        if let Some(prev) = previous {
            caret += scaled.kern(prev, glyph.id);
        }
        if caret >= max_x {
            break;
        }
        glyph.position = point(caret, baseline);
        caret += scaled.h_advance(glyph.id);
        previous = Some(glyph.id);

        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px = bounds.min.x as i32 + gx as i32;
                if (px as f32) < max_x {
                    blend_pixel(pixmap, px, bounds.min.y as i32 + gy as i32, color, coverage);
                }
            });
        }
    }
}

fn draw_centered_char(pixmap: &mut Pixmap, font: &FontVec, ch: char, (cx, cy): (f32, f32), size: f32, color: Color) {
    let glyph = font.as_scaled(PxScale::from(size)).scaled_glyph(ch);
    let Some(outlined) = font.outline_glyph(glyph) else {
        return;
    };

    let bounds = outlined.px_bounds();
    let left = (cx - bounds.width() / 2.0).round() as i32;
    let top = (cy - bounds.height() / 2.0).round() as i32;
    outlined.draw(|gx, gy, coverage| {
        blend_pixel(pixmap, left + gx as i32, top + gy as i32, color, coverage);
    });
}

/// Source-over blend of `color` at `coverage` into one pixel
fn blend_pixel(pixmap: &mut Pixmap, x: i32, y: i32, color: Color, coverage: f32) {
    if x < 0 || y < 0 || x as u32 >= pixmap.width() || y as u32 >= pixmap.height() {
        return;
    }

    let index = y as usize * pixmap.width() as usize + x as usize;
    let pixels = pixmap.pixels_mut();
    let dst = pixels[index];

    let alpha = color.alpha() * coverage.clamp(0.0, 1.0);
    let inv = 1.0 - alpha;
    let mix = |src: f32, dst: u8| (src * alpha * 255.0 + dst as f32 * inv).round().clamp(0.0, 255.0) as u8;

    let a = mix(1.0, dst.alpha());
    let r = mix(color.red(), dst.red()).min(a);
    let g = mix(color.green(), dst.green()).min(a);
    let b = mix(color.blue(), dst.blue()).min(a);

    if let Some(blended) = PremultipliedColorU8::from_rgba(r, g, b, a) {
        pixels[index] = blended;
    }
}
