//! Error type shared by the résumé generator.

use std::path::PathBuf;

/// Errors that can occur while assembling or rendering the résumé.
#[derive(Debug, thiserror::Error)]
pub enum ResumeError {
    /// No usable font family could be located or loaded.
    #[error("failed to load fonts")]
    FontLoad(#[source] genpdf::error::Error),

    /// An icon image could not be read or decoded.
    #[error("failed to load icon {}", path.display())]
    Icon {
        path: PathBuf,
        #[source]
        source: genpdf::error::Error,
    },

    /// A layout block could not be assembled.
    #[error("failed to build layout: {context}")]
    Layout {
        context: String,
        #[source]
        source: genpdf::error::Error,
    },

    /// The page-flow engine failed while paginating the document.
    #[error("failed to render PDF")]
    Render(#[source] genpdf::error::Error),

    /// Writing the rendered document failed.
    #[error("failed to write {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Embedding the section outline failed.
    #[cfg(feature = "bookmarks")]
    #[error("failed to embed section bookmarks")]
    Bookmarks(#[from] crate::bookmarks::BookmarkError),
}

impl ResumeError {
    pub(crate) fn layout(context: impl Into<String>, source: genpdf::error::Error) -> Self {
        Self::Layout {
            context: context.into(),
            source,
        }
    }
}
