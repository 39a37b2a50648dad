//! Layout elements built on top of `genpdf` primitives.
//!
//! `genpdf` ships paragraphs, tables and images but nothing for rules, fixed spacing, icon rows or
//! keeping a block on one page.  The elements below fill those gaps for the résumé layout.

use std::path::Path;

use image::{DynamicImage, GenericImageView, ImageBuffer, Rgb};

use genpdf::elements::{Image, Paragraph, StyledElement};
use genpdf::error::{Context as _, Error};
use genpdf::fonts::FontCache;
use genpdf::style::{Color, Style, StyledString};
use genpdf::{render, Alignment, Element, Mm, Position, RenderResult, Scale, Size};

use crate::pages::{PageTracker, SectionMarker};

const DEFAULT_IMAGE_DPI: f64 = 300.0;
const MM_PER_INCH: f64 = 25.4;
const POINTS_PER_INCH: f64 = 72.0;
const PAGE_TOP_TOLERANCE_MM: f64 = 0.01;

pub(crate) fn mm_from_f64(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

pub(crate) fn mm_to_f64(value: Mm) -> f64 {
    let mm: printpdf::Mm = value.into();
    mm.0
}

/// Converts typographic points into millimetres.
pub fn pt(points: f64) -> Mm {
    mm_from_f64(points * MM_PER_INCH / POINTS_PER_INCH)
}

/// Builds a single styled paragraph with the given alignment.
pub fn text(
    content: impl Into<String>,
    style: Style,
    alignment: Alignment,
) -> StyledElement<Paragraph> {
    let content: String = content.into();
    let mut paragraph = Paragraph::new(content);
    paragraph.set_alignment(alignment);
    paragraph.styled(style)
}

fn estimated_image_size(image: &DynamicImage, dpi: f64) -> Size {
    let (px_width, px_height) = image.dimensions();
    let width_mm = MM_PER_INCH * (px_width as f64) / dpi;
    let height_mm = MM_PER_INCH * (px_height as f64) / dpi;
    Size::new(mm_from_f64(width_mm), mm_from_f64(height_mm))
}

/// Loads an image from the given path using the [`image`] crate with descriptive errors.
pub fn decode_image_from_path(path: impl AsRef<Path>) -> Result<DynamicImage, Error> {
    let path = path.as_ref();
    let reader = image::io::Reader::open(path)
        .with_context(|| format!("Failed to open image file {}", path.display()))?;
    reader
        .with_guessed_format()
        .context("Unable to determine image format")?
        .decode()
        .with_context(|| format!("Failed to decode image file {}", path.display()))
}

/// Composites transparent pixels onto white; `genpdf` refuses images with an alpha channel.
pub fn flatten_alpha(image: DynamicImage) -> DynamicImage {
    if !image.color().has_alpha() {
        return image;
    }

    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let flattened = ImageBuffer::from_fn(width, height, |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let alpha = u16::from(a);
        let blend = |channel: u8| {
            ((u16::from(channel) * alpha + 255 * (255 - alpha)) / 255) as u8
        };
        Rgb([blend(r), blend(g), blend(b)])
    });
    DynamicImage::ImageRgb8(flattened)
}

/// Turns a decoded image into a square icon of `side` length.
pub fn icon_from_dynamic(image: DynamicImage, side: Mm) -> Result<Image, Error> {
    let image = flatten_alpha(image);
    let natural = estimated_image_size(&image, DEFAULT_IMAGE_DPI);
    let natural_width = mm_to_f64(natural.width);
    let natural_height = mm_to_f64(natural.height);
    if natural_width <= f64::EPSILON || natural_height <= f64::EPSILON {
        return Err(Error::new(
            "Icon image has no pixels",
            genpdf::error::ErrorKind::InvalidData,
        ));
    }

    let desired = mm_to_f64(side);
    let mut icon = Image::from_dynamic_image(image)?;
    icon.set_scale(Scale::new(desired / natural_width, desired / natural_height));
    Ok(icon)
}

/// Loads the icon at `path` and scales it to a square of `side` length.
pub fn load_icon(path: impl AsRef<Path>, side: Mm) -> Result<Image, Error> {
    let dynamic = decode_image_from_path(path)?;
    icon_from_dynamic(dynamic, side)
}

/// A full-width horizontal line.
///
/// `genpdf` draws lines with a fixed stroke width, so `thickness` only sets the vertical space the
/// rule takes up.  The line is drawn through its middle.
#[derive(Clone, Copy, Debug)]
pub struct HorizontalRule {
    thickness: Mm,
    color: Color,
}

impl HorizontalRule {
    pub fn new(thickness: Mm, color: Color) -> Self {
        Self { thickness, color }
    }

    /// Vertical space the rule occupies.
    pub fn thickness(&self) -> Mm {
        self.thickness
    }
}

impl Element for HorizontalRule {
    fn render(
        &mut self,
        _context: &genpdf::Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();
        if self.thickness > area.size().height {
            result.has_more = true;
            return Ok(result);
        }

        let width = area.size().width;
        let y = self.thickness / 2.0;
        area.draw_line(
            vec![Position::new(0, y), Position::new(width, y)],
            Style::new().with_color(self.color),
        );

        result.size = Size::new(width, self.thickness);
        Ok(result)
    }
}

/// Fixed vertical gap.
///
/// At the bottom of a page the gap is truncated instead of pushing content to the next page.
#[derive(Clone, Copy, Debug)]
pub struct VerticalSpace {
    height: Mm,
}

impl VerticalSpace {
    pub fn new(height: Mm) -> Self {
        Self { height }
    }

    /// Gap expressed in points.
    pub fn points(points: f64) -> Self {
        Self::new(pt(points))
    }
}

impl Element for VerticalSpace {
    fn render(
        &mut self,
        _context: &genpdf::Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let available = area.size().height;
        let mut result = RenderResult::default();
        result.size = Size::new(0, if self.height > available { available } else { self.height });
        Ok(result)
    }
}

/// Section title sandwiched between two rules.
///
/// The heading is never split: when the remaining area is too small it is moved to the next page
/// as a whole.  Once rendered it records its page through the [`SectionMarker`].
pub struct SectionHeading {
    title: StyledElement<Paragraph>,
    title_style: Style,
    rule: HorizontalRule,
    gap: Mm,
    space_after: Mm,
    marker: Option<SectionMarker>,
}

impl SectionHeading {
    /// Creates a centered, upper-cased heading.
    pub fn new(title: &str, title_style: Style, rule: HorizontalRule) -> Self {
        Self {
            title: text(title.to_uppercase(), title_style, Alignment::Center),
            title_style,
            rule,
            gap: pt(2.0),
            space_after: pt(8.0),
            marker: None,
        }
    }

    /// Attaches a marker that records the page the heading is drawn on.
    pub fn with_marker(mut self, marker: SectionMarker) -> Self {
        self.marker = Some(marker);
        self
    }

    fn height(&self, font_cache: &FontCache, style: Style) -> Mm {
        let line_height = style.and(self.title_style).line_height(font_cache);
        self.rule.thickness() * 2.0 + self.gap * 2.0 + line_height + self.space_after
    }
}

impl Element for SectionHeading {
    fn render(
        &mut self,
        context: &genpdf::Context,
        mut area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();
        let height = self.height(&context.font_cache, style);
        if height > area.size().height {
            result.has_more = true;
            return Ok(result);
        }

        let width = area.size().width;
        self.rule.render(context, area.clone(), style)?;
        area.add_offset(Position::new(0, self.rule.thickness() + self.gap));

        let title = self.title.render(context, area.clone(), style)?;
        area.add_offset(Position::new(0, title.size.height + self.gap));
        self.rule.render(context, area, style)?;

        if let Some(marker) = &self.marker {
            marker.mark();
        }

        result.size = Size::new(width, height);
        Ok(result)
    }
}

/// Right-aligned text followed by a fixed-width icon column.
pub struct IconLine {
    text: StyledElement<Paragraph>,
    text_style: Style,
    icon: Option<Image>,
    icon_size: Mm,
    gap: Mm,
}

impl IconLine {
    /// Creates a line without icon; the text spans the full width.
    pub fn new(content: &str, text_style: Style) -> Self {
        Self {
            text: text(content, text_style, Alignment::Right),
            text_style,
            icon: None,
            icon_size: Mm::default(),
            gap: Mm::default(),
        }
    }

    /// Adds an icon of `size` drawn `gap` to the right of the text.
    pub fn with_icon(mut self, icon: Image, size: Mm, gap: Mm) -> Self {
        self.icon = Some(icon);
        self.icon_size = size;
        self.gap = gap;
        self
    }
}

impl Element for IconLine {
    fn render(
        &mut self,
        context: &genpdf::Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();
        let width = area.size().width;

        let Some(icon) = &mut self.icon else {
            return self.text.render(context, area, style);
        };

        if self.icon_size > area.size().height {
            result.has_more = true;
            return Ok(result);
        }

        // Center the text line against the icon.
        let line_height = style.and(self.text_style).line_height(&context.font_cache);
        let text_offset = if self.icon_size > line_height {
            (self.icon_size - line_height) / 2.0
        } else {
            Mm::default()
        };

        let mut text_area = area.clone();
        text_area.add_offset(Position::new(0, text_offset));
        text_area.set_width(width - self.icon_size - self.gap);
        let text_result = self.text.render(context, text_area, style)?;

        let mut icon_area = area.clone();
        icon_area.add_offset(Position::new(width - self.icon_size, 0));
        icon_area.set_width(self.icon_size);
        let icon_result = icon.render(context, icon_area, style)?;

        result.size = Size::new(
            width,
            (text_result.size.height + text_offset).max(icon_result.size.height),
        );
        result.has_more = text_result.has_more || icon_result.has_more;
        Ok(result)
    }
}

/// A line of text used to estimate the height of a [`KeepTogether`] block.
#[derive(Clone, Debug)]
pub struct MeasuredLine {
    text: String,
    style: Style,
    indent: Mm,
}

impl MeasuredLine {
    pub fn new(text: impl Into<String>, style: Style, indent: Mm) -> Self {
        Self {
            text: text.into(),
            style,
            indent,
        }
    }
}

/// Moves its content to the next page when it would otherwise be split.
///
/// The height is estimated from the measured lines because `genpdf` cannot lay out an element
/// without drawing it.  The block is deferred at most once and never from the top of a page, so
/// content taller than a page still renders and splits normally.
pub struct KeepTogether<E> {
    inner: E,
    lines: Vec<MeasuredLine>,
    extra: Mm,
    tracker: PageTracker,
    started: bool,
}

impl<E: Element> KeepTogether<E> {
    /// Wraps `inner`, estimating its height from `lines` plus `extra` fixed space.
    pub fn new(inner: E, lines: Vec<MeasuredLine>, extra: Mm, tracker: PageTracker) -> Self {
        Self {
            inner,
            lines,
            extra,
            tracker,
            started: false,
        }
    }

    /// Estimated rendered height for the given width.
    pub fn estimated_height(&self, font_cache: &FontCache, base: Style, width: Mm) -> Mm {
        self.lines.iter().fold(self.extra, |height, line| {
            let style = base.and(line.style);
            let available = mm_to_f64(width - line.indent).max(1.0);
            let measured = StyledString::new(line.text.clone(), style).width(font_cache);
            let rows = (mm_to_f64(measured) / available).ceil().max(1.0);
            height + style.line_height(font_cache) * rows
        })
    }
}

impl<E: Element> Element for KeepTogether<E> {
    fn render(
        &mut self,
        context: &genpdf::Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        if !self.started {
            self.started = true;
            let available = area.size().height;
            let at_page_top = mm_to_f64(self.tracker.body_height()) - mm_to_f64(available)
                <= PAGE_TOP_TOLERANCE_MM;
            let needed = self.estimated_height(&context.font_cache, style, area.size().width);
            if !at_page_top && needed > available {
                log::debug!(
                    "deferring block of {:.1} mm to page {}",
                    mm_to_f64(needed),
                    self.tracker.current_page() + 1
                );
                let mut result = RenderResult::default();
                result.has_more = true;
                return Ok(result);
            }
        }

        self.inner.render(context, area, style)
    }
}
