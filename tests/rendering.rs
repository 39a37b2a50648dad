use std::path::Path;

use chrono::NaiveDate;
use image::DynamicImage;
use resume_pdf::content::sample_resume;
use resume_pdf::model::{ContactKind, Job, Resume};
use resume_pdf::{GeneratorConfig, IconPolicy, RenderedPdf, ResumeError, ResumeGenerator};
use sha2::{Digest, Sha256};

fn fixed_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date")
}

fn text_only_config() -> GeneratorConfig {
    GeneratorConfig::new()
        .with_icons(IconPolicy::Disabled)
        .with_date(fixed_date())
}

fn render(resume: Resume, config: GeneratorConfig) -> Option<RenderedPdf> {
    match ResumeGenerator::new(resume, config).render() {
        Ok(rendered) => Some(rendered),
        Err(ResumeError::FontLoad(err)) => {
            eprintln!(
                "Skipping rendering assertions: {}. Set RESUME_FONTS_DIR to a Liberation Sans directory.",
                err
            );
            None
        }
        Err(other) => panic!("render résumé: {other}"),
    }
}

fn write_icons(dir: &Path) {
    for kind in ContactKind::ALL {
        DynamicImage::new_rgba8(48, 48)
            .save(dir.join(format!("{}.png", kind.icon_name())))
            .expect("write icon");
    }
}

fn scrub_pdf(bytes: &[u8]) -> Vec<u8> {
    fn scrub_segment(data: &mut [u8], tag: &[u8], terminator: u8) {
        let mut index = 0;
        while index + tag.len() < data.len() {
            if data[index..].starts_with(tag) {
                let mut cursor = index + tag.len();
                while cursor < data.len() {
                    let byte = data[cursor];
                    if byte == terminator {
                        break;
                    }
                    if terminator == b')' {
                        data[cursor] = b'0';
                    } else if !matches!(byte, b'<' | b'>' | b' ' | b'\n' | b'\r' | b'\t') {
                        data[cursor] = b'0';
                    }
                    cursor += 1;
                }
                index = cursor;
            } else {
                index += 1;
            }
        }
    }

    fn scrub_xml(data: &mut [u8], start: &[u8], end: &[u8]) {
        let mut offset = 0;
        while offset + start.len() < data.len() {
            let Some(start_pos) = data[offset..]
                .windows(start.len())
                .position(|window| window == start)
            else {
                break;
            };
            let start_index = offset + start_pos + start.len();
            let Some(end_pos) = data[start_index..]
                .windows(end.len())
                .position(|window| window == end)
            else {
                break;
            };
            for byte in &mut data[start_index..start_index + end_pos] {
                if !matches!(*byte, b'<' | b'>' | b'/' | b' ' | b'\n' | b'\r' | b'\t') {
                    *byte = b'0';
                }
            }
            offset = start_index + end_pos + end.len();
        }
    }

    let mut normalized = bytes.to_vec();
    let literals: [&[u8]; 3] = [b"/CreationDate(", b"/ModDate(", b"/Producer("];
    for tag in literals {
        scrub_segment(&mut normalized, tag, b')');
    }
    scrub_segment(&mut normalized, b"/ID[", b']');
    let xmp_tags: [(&[u8], &[u8]); 6] = [
        (b"<xmp:CreateDate>", b"</xmp:CreateDate>"),
        (b"<xmp:ModifyDate>", b"</xmp:ModifyDate>"),
        (b"<xmp:MetadataDate>", b"</xmp:MetadataDate>"),
        (b"<xmpMM:DocumentID>", b"</xmpMM:DocumentID>"),
        (b"<xmpMM:InstanceID>", b"</xmpMM:InstanceID>"),
        (b"<xmpMM:VersionID>", b"</xmpMM:VersionID>"),
    ];
    for (start, end) in xmp_tags {
        scrub_xml(&mut normalized, start, end);
    }
    normalized
}

fn normalized_hash(bytes: &[u8]) -> [u8; 32] {
    Sha256::digest(scrub_pdf(bytes)).into()
}

#[test]
fn renders_every_section() {
    let Some(rendered) = render(sample_resume(), text_only_config()) else {
        return;
    };

    assert!(rendered.bytes.starts_with(b"%PDF-"), "output should be a PDF");
    assert!(rendered.page_count >= 1);
    assert_eq!(rendered.sections.len(), 6);
    for section in &rendered.sections {
        let page = section.page.unwrap_or_else(|| panic!("{} not rendered", section.title));
        assert!(page <= rendered.page_count);
    }
}

#[test]
fn rendering_is_deterministic() {
    let Some(first) = render(sample_resume(), text_only_config()) else {
        return;
    };
    let Some(second) = render(sample_resume(), text_only_config()) else {
        return;
    };

    assert_eq!(first.bytes.len(), second.bytes.len(), "PDF sizes should match");
    assert_eq!(
        normalized_hash(&first.bytes),
        normalized_hash(&second.bytes),
        "PDF renders must be deterministic after metadata normalization"
    );
}

#[test]
fn long_experience_spills_onto_later_pages() {
    let mut resume = sample_resume();
    for year in 1990..2010 {
        resume = resume.with_job(
            Job::new("Support Engineer", "CompanyXYZ", format!("{} - {}", year, year + 1))
                .with_bullets([
                    "Handled escalations across several product lines and time zones.",
                    "Documented recurring incidents and shared the fixes with the wider team.",
                    "Reviewed monitoring alerts and tuned thresholds with the operations group.",
                ]),
        );
    }

    let Some(rendered) = render(resume, text_only_config()) else {
        return;
    };

    assert!(rendered.page_count > 1, "twenty extra jobs should need more than one page");
    let pages: Vec<_> = rendered.sections.iter().filter_map(|s| s.page).collect();
    assert!(pages.windows(2).all(|pair| pair[0] <= pair[1]));
    assert!(pages.last().copied().unwrap_or(0) > 1);
}

#[test]
fn generate_writes_dated_file_with_icons() {
    let icons = tempfile::tempdir().expect("icons dir");
    write_icons(icons.path());
    let output = tempfile::tempdir().expect("output dir");

    let config = GeneratorConfig::new()
        .with_icons(IconPolicy::Directory(icons.path().to_path_buf()))
        .with_output_dir(output.path())
        .with_date(fixed_date());
    let generator = ResumeGenerator::new(sample_resume(), config);

    match generator.generate() {
        Ok(path) => {
            assert_eq!(
                path,
                output.path().join("Candidate Name - CV - October-2026.pdf")
            );
            let bytes = std::fs::read(&path).expect("read generated PDF");
            assert!(bytes.starts_with(b"%PDF-"));
        }
        Err(ResumeError::FontLoad(err)) => eprintln!("Skipping generate assertions: {}", err),
        Err(other) => panic!("generate résumé: {other}"),
    }
}

#[test]
fn missing_icons_fail_before_rendering() {
    let empty = tempfile::tempdir().expect("icons dir");
    let config = GeneratorConfig::new()
        .with_icons(IconPolicy::Directory(empty.path().to_path_buf()))
        .with_date(fixed_date());

    match ResumeGenerator::new(sample_resume(), config).render() {
        Err(ResumeError::Icon { path, .. }) => assert_eq!(path, empty.path().join("mail.png")),
        Err(other) => panic!("expected icon error, got {other}"),
        Ok(_) => panic!("rendering succeeded without icon files"),
    }
}

#[cfg(feature = "bookmarks")]
#[test]
fn bookmarks_add_outline() {
    let config = text_only_config().with_bookmarks(true);
    let Some(rendered) = render(sample_resume(), config) else {
        return;
    };

    let document = lopdf::Document::load_mem(&rendered.bytes).expect("parse bookmarked PDF");
    let catalog = document
        .trailer
        .get(b"Root")
        .and_then(lopdf::Object::as_reference)
        .and_then(|id| document.get_object(id))
        .and_then(lopdf::Object::as_dict)
        .expect("catalog dictionary");
    assert!(catalog.get(b"Outlines").is_ok());
}
