//! Colours, font sizes and spacing used across the résumé layout.

use genpdf::style::{Color, Style};
use genpdf::Mm;

use crate::elements::pt;

/// Dark navy used for the name and section headings.
pub const DARK_BLUE: Color = Color::Rgb(0x30, 0x3c, 0x4f);

/// Gray used for the headline and date lines.
pub const GRAY_TEXT: Color = Color::Rgb(0x67, 0x66, 0x66);

/// Neutral gray of the page footer.
pub const FOOTER_GRAY: Color = Color::Rgb(0x80, 0x80, 0x80);

/// Page margin on every side, in points.
pub const PAGE_MARGIN_PT: f64 = 30.0;

/// Side length of contact icons, in points.
pub const ICON_SIZE_PT: f64 = 15.0;

/// Gap between a contact line and its icon, in points.
pub const ICON_GAP_PT: f64 = 6.0;

/// Indentation of nested job bullets, in points.
pub const SUB_BULLET_INDENT_PT: f64 = 14.0;

/// Text styles for every kind of paragraph in the résumé.
///
/// All styles are relative: they are merged with the document base style when rendered.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: Style,
    pub headline: Style,
    pub summary: Style,
    pub contact: Style,
    pub section_title: Style,
    pub job_title: Style,
    pub company: Style,
    pub period: Style,
    pub bullet: Style,
    pub skill: Style,
    pub certification: Style,
    pub tool_label: Style,
    pub tool_value: Style,
    pub footer: Style,
    /// Colour of the rules above and below section titles.
    pub rule_color: Color,
    /// Thickness of section rules.
    pub rule_thickness: Mm,
}

impl Default for Theme {
    fn default() -> Self {
        let body = Style::new().with_font_size(9).with_line_spacing(1.15);

        Self {
            name: Style::new().with_font_size(24).with_color(DARK_BLUE),
            headline: Style::new().with_font_size(14).with_color(GRAY_TEXT),
            summary: body.with_color(Color::Rgb(0, 0, 0)),
            contact: Style::new().with_font_size(9).with_line_spacing(1.4),
            section_title: Style::new()
                .bold()
                .with_font_size(12)
                .with_color(DARK_BLUE),
            job_title: Style::new().bold().with_font_size(11),
            company: Style::new().with_font_size(10),
            period: Style::new()
                .italic()
                .with_font_size(9)
                .with_color(GRAY_TEXT),
            bullet: Style::new().with_font_size(9).with_line_spacing(1.25),
            skill: body,
            certification: Style::new().with_font_size(10).with_line_spacing(1.15),
            tool_label: Style::new().bold().with_font_size(9),
            tool_value: body,
            footer: Style::new()
                .italic()
                .with_font_size(9)
                .with_color(FOOTER_GRAY),
            rule_color: DARK_BLUE,
            rule_thickness: pt(1.0),
        }
    }
}
