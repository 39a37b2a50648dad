use std::error::Error;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use resume_pdf::{content, GeneratorConfig, IconPolicy, ResumeGenerator};
use tracing_subscriber::EnvFilter;

/// Renders the compiled-in résumé to `<name> - CV - <Month-Year>.pdf`.
///
/// Fonts are looked up in `RESUME_FONTS_DIR`, `assets/fonts` next to the binary or the crate,
/// then in the usual system locations of Liberation Sans.
#[derive(Parser)]
#[command(author, version, about = "Render the résumé PDF")]
struct Cli {
    /// Directory the PDF is written to.
    #[arg(long, env = "RESUME_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Directory holding mail.png, tel.png, location.png and linkedin.png.
    #[arg(long, env = "RESUME_ICONS_DIR", default_value = resume_pdf::config::DEFAULT_ICONS_DIR)]
    icons_dir: PathBuf,

    /// Render contact lines without icons; takes precedence over --icons-dir.
    #[arg(long)]
    no_icons: bool,

    /// Date used for the file name and title instead of today (YYYY-MM-DD).
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Embed a section outline (requires the `bookmarks` feature).
    #[arg(long)]
    bookmarks: bool,

    /// Log debug output unless RUST_LOG is set.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> GeneratorConfig {
        let icons = if self.no_icons {
            IconPolicy::Disabled
        } else {
            IconPolicy::Directory(self.icons_dir.clone())
        };

        let mut config = GeneratorConfig::new()
            .with_output_dir(&self.output_dir)
            .with_icons(icons)
            .with_bookmarks(self.bookmarks);
        if let Some(date) = self.date {
            config = config.with_date(date);
        }
        config
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let generator = ResumeGenerator::new(content::sample_resume(), cli.config());
    match generator.generate() {
        Ok(path) => println!("Generated {}", path.display()),
        Err(err) => {
            eprintln!("Error: {}", err);
            print_error_sources(&err);
            std::process::exit(1);
        }
    }
}

fn print_error_sources(error: &(dyn Error + 'static)) {
    for source in error_sources(error) {
        eprintln!("  caused by: {}", source);
    }
}

fn error_sources(mut error: &(dyn Error + 'static)) -> Vec<String> {
    let mut sources = Vec::new();
    while let Some(source) = error.source() {
        sources.push(source.to_string());
        error = source;
    }
    sources
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_icons_disables_icon_loading() {
        let cli = Cli::parse_from(["resume", "--no-icons", "--date", "2026-10-18"]);
        let config = cli.config();
        assert_eq!(config.icons(), &IconPolicy::Disabled);
        assert_eq!(
            config.date(),
            NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date")
        );
    }

    #[test]
    fn icons_dir_flag_is_used() {
        let cli = Cli::parse_from(["resume", "--icons-dir", "art", "--output-dir", "out"]);
        let config = cli.config();
        assert_eq!(config.icons(), &IconPolicy::Directory(PathBuf::from("art")));
        assert_eq!(config.output_dir(), std::path::Path::new("out"));
    }

    #[test]
    fn error_sources_skip_the_top_level_message() {
        let err = resume_pdf::ResumeError::Io {
            path: PathBuf::from("out/cv.pdf"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        };
        assert_eq!(err.to_string(), "failed to write out/cv.pdf");
        assert_eq!(error_sources(&err), ["read-only"]);
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
