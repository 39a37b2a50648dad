//! Shared page bookkeeping between the page decorator and layout elements.
//!
//! `genpdf` does not expose page numbers to elements, so the decorator bumps a shared counter for
//! every new page and elements read it while they render.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use genpdf::Mm;

/// Page on which a tracked section heading was rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionPage {
    /// Heading text as shown in the document.
    pub title: String,
    /// 1-indexed page number, `None` if the heading was never rendered.
    pub page: Option<usize>,
}

/// Cheaply clonable handle to the page counter of one render pass.
#[derive(Clone, Debug, Default)]
pub struct PageTracker {
    current: Rc<Cell<usize>>,
    body_height: Rc<Cell<Mm>>,
    sections: Rc<RefCell<Vec<SectionPage>>>,
}

impl PageTracker {
    /// Creates a tracker positioned before the first page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances to the next page and returns its 1-indexed number.
    pub fn start_page(&self, body_height: Mm) -> usize {
        let page = self.current.get() + 1;
        self.current.set(page);
        self.body_height.set(body_height);
        page
    }

    /// Returns the page currently being rendered, `0` before rendering starts.
    pub fn current_page(&self) -> usize {
        self.current.get()
    }

    /// Height available to content on the current page once margins and footer are removed.
    pub fn body_height(&self) -> Mm {
        self.body_height.get()
    }

    /// Registers a section heading and returns the marker it records its page with.
    pub fn register(&self, title: impl Into<String>) -> SectionMarker {
        let mut sections = self.sections.borrow_mut();
        sections.push(SectionPage {
            title: title.into(),
            page: None,
        });
        SectionMarker {
            tracker: self.clone(),
            index: sections.len() - 1,
        }
    }

    /// Returns the recorded section pages in registration order.
    pub fn section_pages(&self) -> Vec<SectionPage> {
        self.sections.borrow().clone()
    }
}

/// Records the first page a section heading lands on.
#[derive(Clone, Debug)]
pub struct SectionMarker {
    tracker: PageTracker,
    index: usize,
}

impl SectionMarker {
    /// Stores the current page for this section unless one was recorded already.
    pub fn mark(&self) {
        let page = self.tracker.current_page();
        if let Some(entry) = self.tracker.sections.borrow_mut().get_mut(self.index) {
            entry.page.get_or_insert(page);
        }
    }
}
