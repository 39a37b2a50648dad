//! Renders the résumé without contact icons into `target/demos`.

use std::error::Error;
use std::fs;

use resume_pdf::content::sample_resume;
use resume_pdf::{GeneratorConfig, IconPolicy, ResumeGenerator};

const OUTPUT_DIR: &str = "target/demos";

fn main() -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(OUTPUT_DIR)?;

    let config = GeneratorConfig::new()
        .with_output_dir(OUTPUT_DIR)
        .with_icons(IconPolicy::Disabled);
    let generator = ResumeGenerator::new(sample_resume(), config);

    let rendered = generator.render()?;
    for section in &rendered.sections {
        match section.page {
            Some(page) => println!("{:<24} page {}", section.title, page),
            None => println!("{:<24} not rendered", section.title),
        }
    }

    let path = generator.output_path();
    fs::write(&path, &rendered.bytes)?;
    println!(
        "Generated {} ({} bytes, {} pages)",
        path.display(),
        rendered.bytes.len(),
        rendered.page_count
    );
    Ok(())
}
