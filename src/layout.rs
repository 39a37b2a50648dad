//! Block builders that turn a [`Resume`] into the ordered story handed to the renderer.

use genpdf::elements::{LinearLayout, TableLayout};
use genpdf::error::Error;
use genpdf::style::Style;
use genpdf::{render, Alignment, Element, Margins, Mm, RenderResult};
use log::debug;

use crate::config::IconPolicy;
use crate::elements::{
    load_icon, pt, text, HorizontalRule, IconLine, KeepTogether, MeasuredLine, SectionHeading,
    VerticalSpace,
};
use crate::error::ResumeError;
use crate::model::{Education, Job, Language, Resume, ToolGroup};
use crate::pages::PageTracker;
use crate::theme::{Theme, ICON_GAP_PT, ICON_SIZE_PT, SUB_BULLET_INDENT_PT};

pub const SKILLS_TITLE: &str = "Skills";
pub const TOOLS_TITLE: &str = "Tools & Technologies";
pub const EXPERIENCE_TITLE: &str = "Work Experience";
pub const CERTIFICATIONS_TITLE: &str = "Certifications";
pub const EDUCATION_TITLE: &str = "Education";
pub const LANGUAGES_TITLE: &str = "Languages";

const SKILL_COLUMNS: usize = 3;
const CERTIFICATION_COLUMNS: usize = 2;
const LANGUAGE_COLUMNS: usize = 2;

/// One top-level block of the story.
///
/// `genpdf` only accepts sized elements, so the boxed element is forwarded through this wrapper.
pub struct Block(Box<dyn Element>);

impl Block {
    pub fn new(element: impl Element + 'static) -> Self {
        Self(Box::new(element))
    }
}

impl Element for Block {
    fn render(
        &mut self,
        context: &genpdf::Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        self.0.render(context, area, style)
    }
}

/// Ordered list of blocks rendered top to bottom.
pub type Story = Vec<Block>;

fn boxed(element: impl Element + 'static) -> Block {
    Block::new(element)
}

fn bottom(space: Mm) -> Margins {
    Margins::trbl(0, 0, space, 0)
}

/// Splits `items` into rows of `columns` cells, padding the last row with `None`.
pub fn grid_rows<T>(items: &[T], columns: usize) -> Vec<Vec<Option<&T>>> {
    if columns == 0 {
        return Vec::new();
    }

    items
        .chunks(columns)
        .map(|chunk| {
            let mut row: Vec<_> = chunk.iter().map(Some).collect();
            row.resize(columns, None);
            row
        })
        .collect()
}

/// Builds a table of equal-width columns from `items` using `cell` for filled slots.
fn grid<T, E, F>(
    items: &[T],
    columns: usize,
    context: &str,
    mut cell: F,
) -> Result<TableLayout, ResumeError>
where
    E: Element + 'static,
    F: FnMut(&T) -> E,
{
    let mut table = TableLayout::new(vec![1; columns]);
    for row in grid_rows(items, columns) {
        let mut table_row = table.row();
        for slot in row {
            table_row = match slot {
                Some(item) => table_row.element(cell(item)),
                None => table_row.element(VerticalSpace::new(Mm::default())),
            };
        }
        table_row
            .push()
            .map_err(|source| ResumeError::layout(context, source))?;
    }
    Ok(table)
}

/// Two-column header: name, headline and summary left; contact lines with icons right.
pub fn header_block(
    resume: &Resume,
    theme: &Theme,
    icons: &IconPolicy,
) -> Result<TableLayout, ResumeError> {
    let mut left = LinearLayout::vertical();
    left.push(text(resume.name(), theme.name, Alignment::Left).padded(bottom(pt(8.0))));
    if !resume.headline().is_empty() {
        left.push(
            text(resume.headline(), theme.headline, Alignment::Left).padded(bottom(pt(10.0))),
        );
    }
    if !resume.summary().is_empty() {
        left.push(text(resume.summary(), theme.summary, Alignment::Left));
    }

    let mut right = LinearLayout::vertical();
    for contact in resume.contacts() {
        let mut line = IconLine::new(contact.text(), theme.contact);
        if let Some(path) = icons.icon_path(contact.kind()) {
            let icon = load_icon(&path, pt(ICON_SIZE_PT))
                .map_err(|source| ResumeError::Icon { path, source })?;
            line = line.with_icon(icon, pt(ICON_SIZE_PT), pt(ICON_GAP_PT));
        }
        right.push(line.padded(bottom(pt(10.0))));
    }

    // 60% / 40%
    let mut table = TableLayout::new(vec![3, 2]);
    table
        .row()
        .element(left.padded(Margins::trbl(0, pt(12.0), 0, 0)))
        .element(right)
        .push()
        .map_err(|source| ResumeError::layout("header", source))?;
    Ok(table)
}

/// Sandwiched section title that reports its page to `tracker`.
pub fn section_heading(title: &str, theme: &Theme, tracker: &PageTracker) -> SectionHeading {
    let rule = HorizontalRule::new(theme.rule_thickness, theme.rule_color);
    SectionHeading::new(title, theme.section_title, rule)
        .with_marker(tracker.register(title.to_uppercase()))
}

/// Three-column skills grid.
pub fn skills_grid(skills: &[String], theme: &Theme) -> Result<TableLayout, ResumeError> {
    grid(skills, SKILL_COLUMNS, "skills grid", |skill| {
        text(skill.as_str(), theme.skill, Alignment::Left)
            .padded(Margins::trbl(0, pt(20.0), pt(6.0), pt(20.0)))
    })
}

/// Two-column certifications grid.
pub fn certifications_grid(
    certifications: &[String],
    theme: &Theme,
) -> Result<TableLayout, ResumeError> {
    grid(
        certifications,
        CERTIFICATION_COLUMNS,
        "certifications grid",
        |name| text(name.as_str(), theme.certification, Alignment::Left).padded(bottom(pt(6.0))),
    )
}

/// Label/value table; the label column takes 110 of 510 points.
pub fn tools_table(tools: &[ToolGroup], theme: &Theme) -> Result<TableLayout, ResumeError> {
    let mut table = TableLayout::new(vec![11, 40]);
    for group in tools {
        table
            .row()
            .element(
                text(group.label(), theme.tool_label, Alignment::Left).padded(bottom(pt(4.0))),
            )
            .element(
                text(group.value(), theme.tool_value, Alignment::Left).padded(bottom(pt(4.0))),
            )
            .push()
            .map_err(|source| ResumeError::layout("tools table", source))?;
    }
    Ok(table)
}

/// Collects the paragraphs of a kept-together entry together with their measurements.
struct EntryBuilder {
    layout: LinearLayout,
    lines: Vec<MeasuredLine>,
    extra: Mm,
}

impl EntryBuilder {
    fn new() -> Self {
        Self {
            layout: LinearLayout::vertical(),
            lines: Vec::new(),
            extra: Mm::default(),
        }
    }

    fn line(&mut self, content: String, style: Style, indent: Mm, space_after: Mm) {
        self.layout.push(
            text(content.as_str(), style, Alignment::Left)
                .padded(Margins::trbl(0, 0, space_after, indent)),
        );
        self.lines.push(MeasuredLine::new(content, style, indent));
        self.extra += space_after;
    }

    fn space(&mut self, height: Mm) {
        self.layout.push(VerticalSpace::new(height));
        self.extra += height;
    }

    fn finish(self, tracker: &PageTracker) -> KeepTogether<LinearLayout> {
        KeepTogether::new(self.layout, self.lines, self.extra, tracker.clone())
    }
}

/// Job title, company, period and bullets, kept on one page when possible.
pub fn job_entry(job: &Job, theme: &Theme, tracker: &PageTracker) -> KeepTogether<LinearLayout> {
    let mut entry = EntryBuilder::new();
    entry.line(job.title().to_owned(), theme.job_title, Mm::default(), pt(1.0));
    entry.line(job.company().to_owned(), theme.company, Mm::default(), pt(1.0));
    entry.line(job.period().to_owned(), theme.period, Mm::default(), pt(4.0));

    for bullet in job.bullets() {
        entry.line(format!("• {}", bullet.text()), theme.bullet, Mm::default(), pt(2.0));
        for item in bullet.sub_items() {
            let indent = pt(SUB_BULLET_INDENT_PT);
            entry.line(format!("– {}", item), theme.bullet, indent, pt(2.0));
        }
    }

    entry.space(pt(12.0));
    entry.finish(tracker)
}

/// Degree, institution and period lines for each education entry.
pub fn education_block(education: &[Education], theme: &Theme) -> LinearLayout {
    let mut layout = LinearLayout::vertical();
    for entry in education {
        layout.push(
            text(entry.degree(), theme.job_title, Alignment::Left).padded(bottom(pt(1.0))),
        );
        layout.push(
            text(entry.institution(), theme.company, Alignment::Left).padded(bottom(pt(1.0))),
        );
        layout.push(text(entry.period(), theme.period, Alignment::Left).padded(bottom(pt(4.0))));
        layout.push(VerticalSpace::points(10.0));
    }
    layout
}

/// Two-column table with the language name in bold above its proficiency.
pub fn languages_table(
    languages: &[Language],
    theme: &Theme,
) -> Result<TableLayout, ResumeError> {
    grid(languages, LANGUAGE_COLUMNS, "languages table", |language| {
        let mut cell = LinearLayout::vertical();
        cell.push(text(language.name(), theme.company.bold(), Alignment::Left));
        cell.push(text(language.proficiency(), theme.period, Alignment::Left));
        cell.padded(Margins::trbl(0, pt(20.0), 0, 0))
    })
}

/// Builds the complete story: header followed by every non-empty section.
pub fn build_story(
    resume: &Resume,
    theme: &Theme,
    icons: &IconPolicy,
    tracker: &PageTracker,
) -> Result<Story, ResumeError> {
    let mut story: Story = Vec::new();

    story.push(boxed(header_block(resume, theme, icons)?));
    story.push(boxed(VerticalSpace::points(15.0)));

    if !resume.skills().is_empty() {
        story.push(boxed(section_heading(SKILLS_TITLE, theme, tracker)));
        story.push(boxed(skills_grid(resume.skills(), theme)?));
        story.push(boxed(VerticalSpace::points(10.0)));
    }

    if !resume.tools().is_empty() {
        story.push(boxed(section_heading(TOOLS_TITLE, theme, tracker)));
        story.push(boxed(tools_table(resume.tools(), theme)?));
        story.push(boxed(VerticalSpace::points(10.0)));
    }

    if !resume.jobs().is_empty() {
        story.push(boxed(section_heading(EXPERIENCE_TITLE, theme, tracker)));
        for job in resume.jobs() {
            story.push(boxed(job_entry(job, theme, tracker)));
        }
    }

    if !resume.certifications().is_empty() {
        story.push(boxed(section_heading(CERTIFICATIONS_TITLE, theme, tracker)));
        story.push(boxed(certifications_grid(resume.certifications(), theme)?));
        story.push(boxed(VerticalSpace::points(10.0)));
    }

    if !resume.education().is_empty() {
        story.push(boxed(section_heading(EDUCATION_TITLE, theme, tracker)));
        story.push(boxed(education_block(resume.education(), theme)));
    }

    if !resume.languages().is_empty() {
        story.push(boxed(section_heading(LANGUAGES_TITLE, theme, tracker)));
        story.push(boxed(languages_table(resume.languages(), theme)?));
    }

    debug!("built story with {} blocks", story.len());
    Ok(story)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::sample_resume;
    use crate::model::ContactKind;
    use image::DynamicImage;

    #[test]
    fn grid_rows_pads_last_row() {
        let items = ["a", "b", "c", "d"];
        let rows = grid_rows(&items, 3);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], [Some(&"a"), Some(&"b"), Some(&"c")]);
        assert_eq!(rows[1], [Some(&"d"), None, None]);
    }

    #[test]
    fn grid_rows_handles_exact_and_empty_input() {
        let items = ["a", "b"];
        assert_eq!(grid_rows(&items, 2), [[Some(&"a"), Some(&"b")]]);
        assert!(grid_rows::<&str>(&[], 3).is_empty());
        assert!(grid_rows(&items, 0).is_empty());
    }

    #[test]
    fn story_registers_sections_in_order() {
        let tracker = PageTracker::new();
        let story = build_story(
            &sample_resume(),
            &Theme::default(),
            &IconPolicy::Disabled,
            &tracker,
        )
        .expect("story builds without icons");

        let titles: Vec<_> = tracker
            .section_pages()
            .into_iter()
            .map(|section| section.title)
            .collect();
        assert_eq!(
            titles,
            [
                "SKILLS",
                "TOOLS & TECHNOLOGIES",
                "WORK EXPERIENCE",
                "CERTIFICATIONS",
                "EDUCATION",
                "LANGUAGES",
            ]
        );
        // header + spacer, three blocks for skills/tools/certifications, four jobs plus heading,
        // two blocks each for education and languages
        assert_eq!(story.len(), 2 + 3 * 3 + 5 + 2 + 2);
    }

    #[test]
    fn empty_sections_are_skipped() {
        let tracker = PageTracker::new();
        let resume = Resume::new("Only Name").with_skills(["Rust"]);
        build_story(&resume, &Theme::default(), &IconPolicy::Disabled, &tracker)
            .expect("story builds");
        let pages = tracker.section_pages();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].title, "SKILLS");
    }

    #[test]
    fn header_loads_icons_from_directory() {
        let dir = tempfile::tempdir().expect("create temp dir");
        for kind in ContactKind::ALL {
            DynamicImage::new_rgba8(32, 32)
                .save(dir.path().join(format!("{}.png", kind.icon_name())))
                .expect("write icon");
        }

        let policy = IconPolicy::Directory(dir.path().to_path_buf());
        assert!(header_block(&sample_resume(), &Theme::default(), &policy).is_ok());
    }

    #[test]
    fn missing_icon_names_the_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let policy = IconPolicy::Directory(dir.path().to_path_buf());

        match header_block(&sample_resume(), &Theme::default(), &policy) {
            Err(ResumeError::Icon { path, .. }) => {
                assert_eq!(path, dir.path().join("mail.png"));
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("header built without icon files"),
        }
    }
}
