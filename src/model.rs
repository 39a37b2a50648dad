//! Plain data describing the résumé content.
//!
//! The types here carry literal values only.  They hold no reference to the rendering crate so the
//! content can be assembled, inspected and tested without loading fonts.  Layout decisions live in
//! [`crate::layout`].

/// Kind of contact detail shown in the header, which also selects its icon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContactKind {
    /// E-mail address.
    Email,
    /// Telephone number.
    Phone,
    /// City and country.
    Location,
    /// LinkedIn profile URL.
    LinkedIn,
}

impl ContactKind {
    /// All kinds in header order.
    pub const ALL: [ContactKind; 4] = [
        ContactKind::Email,
        ContactKind::Phone,
        ContactKind::Location,
        ContactKind::LinkedIn,
    ];

    /// Base name of the icon file drawn next to this contact kind.
    pub fn icon_name(self) -> &'static str {
        match self {
            ContactKind::Email => "mail",
            ContactKind::Phone => "tel",
            ContactKind::Location => "location",
            ContactKind::LinkedIn => "linkedin",
        }
    }
}

/// One line in the header contact column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contact {
    kind: ContactKind,
    text: String,
}

impl Contact {
    /// Creates a contact line.
    pub fn new(kind: ContactKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Returns the contact kind.
    pub fn kind(&self) -> ContactKind {
        self.kind
    }

    /// Returns the displayed text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A labelled group in the tools table, e.g. `Platforms:` followed by a list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolGroup {
    label: String,
    value: String,
}

impl ToolGroup {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A bullet in a job entry, optionally carrying nested sub-bullets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Bullet {
    /// A single line item.
    Item(String),
    /// A lead item followed by indented sub-items.
    Group { text: String, items: Vec<String> },
}

impl Bullet {
    /// Convenience helper for a plain item.
    pub fn item(text: impl Into<String>) -> Self {
        Self::Item(text.into())
    }

    /// Convenience helper for a lead item with sub-items.
    pub fn group<I, S>(text: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Group {
            text: text.into(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the lead text of the bullet.
    pub fn text(&self) -> &str {
        match self {
            Bullet::Item(text) | Bullet::Group { text, .. } => text,
        }
    }

    /// Returns nested sub-items, empty for plain items.
    pub fn sub_items(&self) -> &[String] {
        match self {
            Bullet::Item(_) => &[],
            Bullet::Group { items, .. } => items,
        }
    }
}

impl From<&str> for Bullet {
    fn from(text: &str) -> Self {
        Bullet::item(text)
    }
}

/// A position held, rendered as one kept-together block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Job {
    title: String,
    company: String,
    period: String,
    bullets: Vec<Bullet>,
}

impl Job {
    /// Creates a job without bullets.
    pub fn new(
        title: impl Into<String>,
        company: impl Into<String>,
        period: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            company: company.into(),
            period: period.into(),
            bullets: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn period(&self) -> &str {
        &self.period
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    /// Appends a bullet and returns the updated job.
    pub fn with_bullet(mut self, bullet: impl Into<Bullet>) -> Self {
        self.bullets.push(bullet.into());
        self
    }

    /// Extends the job with several bullets and returns the updated instance.
    pub fn with_bullets<I>(mut self, bullets: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Bullet>,
    {
        self.bullets.extend(bullets.into_iter().map(Into::into));
        self
    }
}

/// A degree or diploma.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Education {
    degree: String,
    institution: String,
    period: String,
}

impl Education {
    pub fn new(
        degree: impl Into<String>,
        institution: impl Into<String>,
        period: impl Into<String>,
    ) -> Self {
        Self {
            degree: degree.into(),
            institution: institution.into(),
            period: period.into(),
        }
    }

    pub fn degree(&self) -> &str {
        &self.degree
    }

    pub fn institution(&self) -> &str {
        &self.institution
    }

    pub fn period(&self) -> &str {
        &self.period
    }
}

/// A spoken language and the proficiency level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Language {
    name: String,
    proficiency: String,
}

impl Language {
    pub fn new(name: impl Into<String>, proficiency: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            proficiency: proficiency.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn proficiency(&self) -> &str {
        &self.proficiency
    }
}

/// Complete résumé content.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resume {
    name: String,
    headline: String,
    summary: String,
    contacts: Vec<Contact>,
    skills: Vec<String>,
    tools: Vec<ToolGroup>,
    jobs: Vec<Job>,
    certifications: Vec<String>,
    education: Vec<Education>,
    languages: Vec<Language>,
}

impl Resume {
    /// Creates an empty résumé for the given candidate.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns the candidate name, also used for the output file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headline(&self) -> &str {
        &self.headline
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn tools(&self) -> &[ToolGroup] {
        &self.tools
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn certifications(&self) -> &[String] {
        &self.certifications
    }

    pub fn education(&self) -> &[Education] {
        &self.education
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    /// Sets the headline shown under the name.
    pub fn with_headline(mut self, headline: impl Into<String>) -> Self {
        self.headline = headline.into();
        self
    }

    /// Sets the summary paragraph.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_contact(mut self, kind: ContactKind, text: impl Into<String>) -> Self {
        self.contacts.push(Contact::new(kind, text));
        self
    }

    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills.extend(skills.into_iter().map(Into::into));
        self
    }

    pub fn with_tool_group(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.tools.push(ToolGroup::new(label, value));
        self
    }

    pub fn with_job(mut self, job: Job) -> Self {
        self.jobs.push(job);
        self
    }

    pub fn with_certifications<I, S>(mut self, certifications: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.certifications
            .extend(certifications.into_iter().map(Into::into));
        self
    }

    pub fn with_education(mut self, education: Education) -> Self {
        self.education.push(education);
        self
    }

    pub fn with_language(
        mut self,
        name: impl Into<String>,
        proficiency: impl Into<String>,
    ) -> Self {
        self.languages.push(Language::new(name, proficiency));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{Bullet, ContactKind, Job};

    #[test]
    fn group_bullet_exposes_sub_items() {
        let bullet = Bullet::group("Lead", ["one", "two"]);
        assert_eq!(bullet.text(), "Lead");
        assert_eq!(bullet.sub_items(), ["one".to_string(), "two".to_string()]);
        assert!(Bullet::item("plain").sub_items().is_empty());
    }

    #[test]
    fn job_keeps_bullet_order() {
        let job = Job::new("Title", "Company", "2020 - 2021")
            .with_bullets(["first", "second"])
            .with_bullet(Bullet::group("third", ["nested"]));

        let texts: Vec<_> = job.bullets().iter().map(Bullet::text).collect();
        assert_eq!(texts, ["first", "second", "third"]);
    }

    #[test]
    fn every_contact_kind_has_distinct_icon() {
        let mut names: Vec<_> = ContactKind::ALL.iter().map(|k| k.icon_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ContactKind::ALL.len());
    }
}
