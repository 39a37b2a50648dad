//! Options for one generator run.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};

use crate::model::ContactKind;

/// Directory searched for contact icons when none is configured.
pub const DEFAULT_ICONS_DIR: &str = "assets/icons";

/// Where the header icons come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IconPolicy {
    /// Load `<dir>/<icon name>.png` for every contact kind; a missing file is an error.
    Directory(PathBuf),
    /// Render contact lines as text only.
    Disabled,
}

impl IconPolicy {
    /// Path of the icon for `kind`, or `None` when icons are disabled.
    pub fn icon_path(&self, kind: ContactKind) -> Option<PathBuf> {
        match self {
            IconPolicy::Directory(dir) => Some(dir.join(format!("{}.png", kind.icon_name()))),
            IconPolicy::Disabled => None,
        }
    }
}

impl Default for IconPolicy {
    fn default() -> Self {
        IconPolicy::Directory(PathBuf::from(DEFAULT_ICONS_DIR))
    }
}

/// Settings for [`crate::builder::ResumeGenerator`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    output_dir: PathBuf,
    icons: IconPolicy,
    date: NaiveDate,
    bookmarks: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            icons: IconPolicy::default(),
            date: Local::now().date_naive(),
            bookmarks: false,
        }
    }
}

impl GeneratorConfig {
    /// Creates a configuration writing to the working directory, dated today.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn icons(&self) -> &IconPolicy {
        &self.icons
    }

    /// Date used for the file name and title.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Whether a section outline is embedded after rendering.
    pub fn bookmarks(&self) -> bool {
        self.bookmarks
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_icons(mut self, icons: IconPolicy) -> Self {
        self.icons = icons;
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    pub fn with_bookmarks(mut self, bookmarks: bool) -> Self {
        self.bookmarks = bookmarks;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_paths_use_kind_names() {
        let policy = IconPolicy::Directory(PathBuf::from("icons"));
        assert_eq!(
            policy.icon_path(ContactKind::Phone),
            Some(PathBuf::from("icons/tel.png"))
        );
        assert_eq!(IconPolicy::Disabled.icon_path(ContactKind::Email), None);
    }

    #[test]
    fn defaults_point_at_working_directory() {
        let config = GeneratorConfig::new();
        assert_eq!(config.output_dir(), Path::new("."));
        assert_eq!(
            config.icons(),
            &IconPolicy::Directory(PathBuf::from(DEFAULT_ICONS_DIR))
        );
        assert!(!config.bookmarks());
    }
}
