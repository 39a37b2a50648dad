//! Document construction and the end-to-end résumé generator.

use std::fs;
use std::path::PathBuf;

use genpdf::error::{Error, ErrorKind};
use genpdf::style;
use genpdf::{self, Alignment, Element, Margins, Mm, PageDecorator, PaperSize, Position, Size};
use log::{info, warn};

use crate::config::GeneratorConfig;
use crate::elements::{pt, text};
use crate::error::ResumeError;
use crate::fonts;
use crate::layout::{self, Story};
use crate::model::Resume;
use crate::naming;
use crate::pages::{PageTracker, SectionPage};
use crate::theme::{Theme, PAGE_MARGIN_PT};

/// Bottom margin below the footer line, in points.
const FOOTER_BOTTOM_MARGIN_PT: f64 = 16.0;
/// Height reserved for the footer, in points.
const FOOTER_HEIGHT_PT: f64 = 14.0;
/// Distance between the right margin and the page number, in points.
const FOOTER_RIGHT_INSET_PT: f64 = 10.0;
/// Base font size of the document.
const BASE_FONT_SIZE: u8 = 9;

type ElementFactory = dyn Fn(usize) -> Box<dyn Element>;

/// Builder for `genpdf::Document` instances with page decoration and page tracking.
#[derive(Default)]
pub struct DocumentBuilder {
    paper_size: Option<Size>,
    margins: Option<Margins>,
    title: Option<String>,
    font_size: Option<u8>,
    footer: Option<FooterSpec>,
    tracker: PageTracker,
}

impl DocumentBuilder {
    /// Creates a new builder instance with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the paper size used for newly created documents.
    pub fn with_paper_size(mut self, paper_size: impl Into<Size>) -> Self {
        self.paper_size = Some(paper_size.into());
        self
    }

    /// Sets the margins applied through the page decorator.
    pub fn with_margins(mut self, margins: impl Into<Margins>) -> Self {
        self.margins = Some(margins.into());
        self
    }

    /// Sets the title stored in the PDF metadata.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the base font size in points.
    pub fn with_font_size(mut self, font_size: u8) -> Self {
        self.font_size = Some(font_size);
        self
    }

    /// Configures a footer callback with a fixed height that is invoked for every page.
    pub fn with_footer<F, E>(mut self, height: impl Into<Mm>, footer: F) -> Self
    where
        F: Fn(usize) -> E + 'static,
        E: Element + 'static,
    {
        self.footer = Some(FooterSpec::new(height, footer));
        self
    }

    /// Uses `tracker` for page numbering instead of a fresh one.
    pub fn with_tracker(mut self, tracker: PageTracker) -> Self {
        self.tracker = tracker;
        self
    }

    /// Returns the tracker shared with the page decorator.
    pub fn tracker(&self) -> &PageTracker {
        &self.tracker
    }

    /// Builds a fully configured `genpdf::Document` instance.
    pub fn build(self) -> Result<genpdf::Document, ResumeError> {
        let font_family = fonts::default_font_family().map_err(ResumeError::FontLoad)?;
        let mut document = genpdf::Document::new(font_family);

        if let Some(title) = self.title {
            document.set_title(title);
        }

        if let Some(paper_size) = self.paper_size {
            document.set_paper_size(paper_size);
        }

        if let Some(font_size) = self.font_size {
            document.set_font_size(font_size);
        }

        let decorator = ConfiguredPageDecorator::new(self.margins, self.footer, self.tracker);
        document.set_page_decorator(decorator);

        Ok(document)
    }

    /// Paginates `story` into PDF bytes.
    pub fn render(self, story: Story) -> Result<RenderedPdf, ResumeError> {
        let tracker = self.tracker.clone();
        let mut document = self.build()?;
        for block in story {
            document.push(block);
        }

        let mut bytes = Vec::new();
        document.render(&mut bytes).map_err(ResumeError::Render)?;

        Ok(RenderedPdf {
            bytes,
            page_count: tracker.current_page(),
            sections: tracker.section_pages(),
        })
    }
}

/// Definition of a footer rendered through the page decorator.
pub struct FooterSpec {
    height: Mm,
    factory: Box<ElementFactory>,
}

impl FooterSpec {
    /// Creates a new footer specification.
    pub fn new<F, E>(height: impl Into<Mm>, factory: F) -> Self
    where
        F: Fn(usize) -> E + 'static,
        E: Element + 'static,
    {
        Self {
            height: height.into(),
            factory: Box::new(move |page| Box::new(factory(page)) as Box<dyn Element>),
        }
    }
}

struct ConfiguredPageDecorator {
    margins: Option<Margins>,
    footer: Option<FooterSpec>,
    tracker: PageTracker,
}

impl ConfiguredPageDecorator {
    fn new(margins: Option<Margins>, footer: Option<FooterSpec>, tracker: PageTracker) -> Self {
        Self {
            margins,
            footer,
            tracker,
        }
    }
}

impl PageDecorator for ConfiguredPageDecorator {
    fn decorate_page<'a>(
        &mut self,
        context: &genpdf::Context,
        mut area: genpdf::render::Area<'a>,
        style: style::Style,
    ) -> Result<genpdf::render::Area<'a>, Error> {
        if let Some(margins) = self.margins {
            area.add_margins(margins);
        }

        let mut body_height = area.size().height;
        let page = self.tracker.current_page() + 1;

        if let Some(footer) = &self.footer {
            let available = area.size().height;
            if footer.height > available {
                return Err(Error::new(
                    "Footer height exceeds available space",
                    ErrorKind::InvalidData,
                ));
            }

            let mut footer_area = area.clone();
            footer_area.add_offset(Position::new(0, available - footer.height));
            let mut element = (footer.factory)(page);
            let result = element.render(context, footer_area, style)?;
            if result.has_more {
                return Err(Error::new(
                    "Footer element does not fit into the reserved space",
                    ErrorKind::PageSizeExceeded,
                ));
            }

            body_height = available - footer.height;
            area.set_height(body_height);
        }

        self.tracker.start_page(body_height);
        Ok(area)
    }
}

/// Output of a render pass.
#[derive(Clone, Debug)]
pub struct RenderedPdf {
    /// Complete PDF file contents.
    pub bytes: Vec<u8>,
    /// Number of pages produced.
    pub page_count: usize,
    /// Page each section heading landed on.
    pub sections: Vec<SectionPage>,
}

/// Runs the whole pipeline: content, story, pagination and the final file write.
pub struct ResumeGenerator {
    resume: Resume,
    theme: Theme,
    config: GeneratorConfig,
}

impl ResumeGenerator {
    /// Creates a generator for `resume` with the default theme.
    pub fn new(resume: Resume, config: GeneratorConfig) -> Self {
        Self {
            resume,
            theme: Theme::default(),
            config,
        }
    }

    /// Replaces the theme and returns the updated generator.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Title stored in the PDF metadata.
    pub fn title(&self) -> String {
        naming::document_title(self.resume.name(), self.config.date())
    }

    /// Path the résumé is written to by [`ResumeGenerator::generate`].
    pub fn output_path(&self) -> PathBuf {
        self.config
            .output_dir()
            .join(naming::output_file_name(self.resume.name(), self.config.date()))
    }

    fn document_builder(&self) -> DocumentBuilder {
        let footer_style = self.theme.footer;
        DocumentBuilder::new()
            .with_paper_size(PaperSize::A4)
            .with_margins(Margins::trbl(
                pt(PAGE_MARGIN_PT),
                pt(PAGE_MARGIN_PT),
                pt(FOOTER_BOTTOM_MARGIN_PT),
                pt(PAGE_MARGIN_PT),
            ))
            .with_title(self.title())
            .with_font_size(BASE_FONT_SIZE)
            .with_footer(pt(FOOTER_HEIGHT_PT), move |page| {
                text(format!("Page {}", page), footer_style, Alignment::Right)
                    .padded(Margins::trbl(pt(2.0), pt(FOOTER_RIGHT_INSET_PT), 0, 0))
            })
    }

    /// Renders the résumé into memory.
    pub fn render(&self) -> Result<RenderedPdf, ResumeError> {
        let builder = self.document_builder();
        let story = layout::build_story(
            &self.resume,
            &self.theme,
            self.config.icons(),
            builder.tracker(),
        )?;
        let rendered = builder.render(story)?;
        self.finish(rendered)
    }

    #[cfg(feature = "bookmarks")]
    fn finish(&self, mut rendered: RenderedPdf) -> Result<RenderedPdf, ResumeError> {
        if self.config.bookmarks() {
            rendered.bytes =
                crate::bookmarks::apply_section_bookmarks(&rendered.bytes, &rendered.sections)?;
        }
        Ok(rendered)
    }

    #[cfg(not(feature = "bookmarks"))]
    fn finish(&self, rendered: RenderedPdf) -> Result<RenderedPdf, ResumeError> {
        if self.config.bookmarks() {
            warn!("bookmarks requested but the `bookmarks` feature is disabled; skipping outline");
        }
        Ok(rendered)
    }

    /// Renders the résumé and writes it to [`ResumeGenerator::output_path`].
    pub fn generate(&self) -> Result<PathBuf, ResumeError> {
        let rendered = self.render()?;
        let path = self.output_path();

        fs::write(&path, &rendered.bytes).map_err(|source| ResumeError::Io {
            path: path.clone(),
            source,
        })?;

        info!(
            "wrote {} ({} bytes, {} page{})",
            path.display(),
            rendered.bytes.len(),
            rendered.page_count,
            if rendered.page_count == 1 { "" } else { "s" }
        );
        for section in rendered.sections.iter().filter(|s| s.page.is_none()) {
            warn!("section {} was not rendered", section.title);
        }

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use genpdf::render::Area;
    use genpdf::RenderResult;

    use super::*;
    use crate::elements::{HorizontalRule, KeepTogether, VerticalSpace};
    use crate::layout::Block;
    use crate::pages::PageTracker;

    /// Rigid block that records the page it is drawn on.
    struct PageRecorder {
        height: Mm,
        tracker: PageTracker,
        pages: Rc<RefCell<Vec<usize>>>,
    }

    impl PageRecorder {
        fn new(height: impl Into<Mm>, tracker: &PageTracker) -> Self {
            Self {
                height: height.into(),
                tracker: tracker.clone(),
                pages: Rc::default(),
            }
        }
    }

    impl Element for PageRecorder {
        fn render(
            &mut self,
            _context: &genpdf::Context,
            area: Area<'_>,
            _style: style::Style,
        ) -> Result<RenderResult, Error> {
            let mut result = RenderResult::default();
            if self.height > area.size().height {
                result.has_more = true;
                return Ok(result);
            }
            self.pages.borrow_mut().push(self.tracker.current_page());
            result.size = Size::new(area.size().width, self.height);
            Ok(result)
        }
    }

    fn a4_builder() -> DocumentBuilder {
        DocumentBuilder::new()
            .with_paper_size(PaperSize::A4)
            .with_margins(Margins::trbl(10, 10, 10, 10))
    }

    fn render_or_skip(builder: DocumentBuilder, story: Story) -> Option<RenderedPdf> {
        match builder.render(story) {
            Ok(rendered) => Some(rendered),
            Err(ResumeError::FontLoad(err)) => {
                eprintln!("Skipping rendering assertions: {}", err);
                None
            }
            Err(other) => panic!("render story: {other}"),
        }
    }

    #[test]
    fn footer_receives_every_page_number() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let footer_pages = Rc::clone(&seen);
        let builder = a4_builder().with_footer(10, move |page| {
            footer_pages.borrow_mut().push(page);
            VerticalSpace::new(Mm::default())
        });
        let tracker = builder.tracker().clone();
        let story = (0..3)
            .map(|_| Block::new(PageRecorder::new(200, &tracker)))
            .collect();

        let Some(rendered) = render_or_skip(builder, story) else {
            return;
        };

        assert_eq!(rendered.page_count, 3);
        assert_eq!(*seen.borrow(), [1, 2, 3]);
    }

    #[test]
    fn kept_block_moves_to_next_page_instead_of_splitting() {
        let builder = a4_builder();
        let tracker = builder.tracker().clone();
        let recorder = PageRecorder::new(20, &tracker);
        let pages = Rc::clone(&recorder.pages);
        // 20 mm would still fit below the filler, but the estimate asks for 150 mm.
        let kept = KeepTogether::new(recorder, Vec::new(), Mm::from(150), tracker.clone());
        let story = vec![
            Block::new(PageRecorder::new(200, &tracker)),
            Block::new(kept),
        ];

        let Some(rendered) = render_or_skip(builder, story) else {
            return;
        };

        assert_eq!(rendered.page_count, 2);
        assert_eq!(*pages.borrow(), [2]);
    }

    #[test]
    fn kept_block_is_not_deferred_from_page_top() {
        let builder = a4_builder();
        let tracker = builder.tracker().clone();
        let recorder = PageRecorder::new(20, &tracker);
        let pages = Rc::clone(&recorder.pages);
        let kept = KeepTogether::new(recorder, Vec::new(), Mm::from(400), tracker.clone());

        let Some(rendered) = render_or_skip(builder, vec![Block::new(kept)]) else {
            return;
        };

        assert_eq!(rendered.page_count, 1);
        assert_eq!(*pages.borrow(), [1]);
    }

    #[test]
    fn rule_thickness_reserves_vertical_space() {
        let builder = a4_builder();
        let rule = HorizontalRule::new(Mm::from(150), style::Color::Rgb(0, 0, 0));
        let story = vec![Block::new(rule), Block::new(rule)];

        let Some(rendered) = render_or_skip(builder, story) else {
            return;
        };

        assert_eq!(rendered.page_count, 2);
    }
}
