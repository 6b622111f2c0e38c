//! Tool configurations: the leaves of a page.

use crate::error::{SiteError, SiteErrorExt};
use crate::lazy::Lazy;
use crate::ordered::Identifiable;
use crate::properties::PropertyBag;
use crate::services::{SiteServices, ToolRecord, ToolRegistration, ToolRegistry};
use tracing::debug;

/// Non-owning reference from a tool to the page (and site) holding it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRef {
    pub page_id: String,
    pub site_id: Option<String>,
}

impl PageRef {
    pub fn new(page_id: impl Into<String>, site_id: Option<String>) -> Self {
        Self { page_id: page_id.into(), site_id }
    }
}

/// One tool placed on a page.
#[derive(Debug, Clone)]
pub struct ConfigurationNode {
    id: String,
    page: PageRef,
    registration_id: Option<String>,
    title: Option<String>,
    layout_hints: Option<String>,
    properties: Lazy<PropertyBag>,
    services: SiteServices,
}

impl ConfigurationNode {
    /// A fresh tool with a generated id and no registration.
    pub fn new(page: PageRef, services: &SiteServices) -> Self {
        Self::with_id(services.generate_id(), page, services)
    }

    pub fn with_registration(
        page: PageRef,
        registration_id: &str,
        services: &SiteServices,
    ) -> Self {
        let mut tool = Self::new(page, services);
        tool.set_registration_id(registration_id);
        tool
    }

    /// A fresh tool for a registered tool, titled after it.
    pub fn from_registration(
        page: PageRef,
        registration: &ToolRegistration,
        services: &SiteServices,
    ) -> Self {
        let mut tool = Self::with_registration(page, &registration.id, services);
        tool.set_title(&registration.title);
        tool
    }

    /// Rebuilds a persisted tool. Properties are read from storage on first access.
    pub fn reconstruct(page: PageRef, record: ToolRecord, services: &SiteServices) -> Self {
        Self {
            id: record.id,
            page,
            registration_id: record.registration_id.as_deref().and_then(non_blank),
            title: record.title.as_deref().and_then(non_blank),
            layout_hints: record.layout_hints.as_deref().and_then(non_blank),
            properties: Lazy::unloaded(),
            services: services.clone(),
        }
    }

    pub(crate) fn with_id(id: String, page: PageRef, services: &SiteServices) -> Self {
        Self {
            id,
            page,
            registration_id: None,
            title: None,
            layout_hints: None,
            properties: Lazy::loaded(PropertyBag::new()),
            services: services.clone(),
        }
    }

    /// Copies `source` onto `page`, keeping its id and property values.
    ///
    /// # Errors
    /// Returns [`SiteError::Storage`] if the source properties cannot be loaded.
    pub fn clone_exact(source: &mut Self, page: PageRef) -> Result<Self, SiteError> {
        let mut properties = PropertyBag::new();
        properties.add_all(source.properties()?);
        Ok(Self {
            id: source.id.clone(),
            page,
            properties: Lazy::loaded(properties),
            ..source.shell()
        })
    }

    /// Copies `source` onto `page` under a new id, rewriting the old site id inside
    /// property values to the site id of `page`.
    ///
    /// # Errors
    /// Returns [`SiteError::Storage`] if the source properties cannot be loaded.
    pub fn clone_replacing_site(source: &mut Self, page: PageRef) -> Result<Self, SiteError> {
        let from = source.page.site_id.clone().unwrap_or_default();
        let to = page.site_id.clone().unwrap_or_default();
        let properties = source.properties()?.replacing_in_values(&from, &to);
        Ok(Self {
            id: source.services.generate_id(),
            page,
            properties: Lazy::loaded(properties),
            ..source.shell()
        })
    }

    /// Scalar fields of `self`; id, page and properties are meant to be overridden.
    fn shell(&self) -> Self {
        Self {
            id: String::new(),
            page: PageRef::default(),
            registration_id: self.registration_id.clone(),
            title: self.title.clone(),
            layout_hints: self.layout_hints.clone(),
            properties: Lazy::unloaded(),
            services: self.services.clone(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub const fn page(&self) -> &PageRef {
        &self.page
    }

    pub fn page_id(&self) -> &str {
        &self.page.page_id
    }

    pub fn site_id(&self) -> Option<&str> {
        self.page.site_id.as_deref()
    }

    pub fn registration_id(&self) -> Option<&str> {
        self.registration_id.as_deref()
    }

    /// Sets the registration id; blank input clears it.
    pub fn set_registration_id(&mut self, registration_id: &str) {
        self.registration_id = non_blank(registration_id);
    }

    /// The registered tool this configuration runs, if known to `registry`.
    pub fn registration(&self, registry: &dyn ToolRegistry) -> Option<ToolRegistration> {
        registry.tool(self.registration_id.as_deref()?)
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The configured title, else the registered tool's title.
    pub fn display_title(&self) -> Option<String> {
        self.title.clone().or_else(|| self.registration(self.services.registry()).map(|r| r.title))
    }

    /// Sets the title; blank input clears it.
    pub fn set_title(&mut self, title: &str) {
        self.title = non_blank(title);
    }

    pub fn layout_hints(&self) -> Option<&str> {
        self.layout_hints.as_deref()
    }

    /// Sets the `"row,col"` hints; blank input clears them.
    pub fn set_layout_hints(&mut self, hints: Option<&str>) {
        self.layout_hints = hints.and_then(non_blank);
    }

    /// Parses `"row,col"` layout hints. Extra parts are ignored.
    pub fn parse_layout_hints(&self) -> Option<(i32, i32)> {
        let mut parts = self.layout_hints.as_deref()?.split(',');
        let row = parts.next()?.trim().parse().ok()?;
        let col = parts.next()?.trim().parse().ok()?;
        Some((row, col))
    }

    pub(crate) fn column(&self) -> i32 {
        self.parse_layout_hints().map_or(0, |(_, col)| col)
    }

    /// The tool properties, read from storage on first access.
    ///
    /// # Errors
    /// Returns [`SiteError::Storage`] if the storage read fails; the next call retries.
    pub fn properties(&mut self) -> Result<&mut PropertyBag, SiteError> {
        let Self { id, properties, services, .. } = self;
        properties
            .materialize(|| {
                debug!(tool_id = %id, "Loading tool properties");
                services.storage().read_tool_properties(id)
            })
            .context("Failed to read tool properties")
    }

    /// Properties if already loaded; never touches storage.
    pub const fn loaded_properties(&self) -> Option<&PropertyBag> {
        self.properties.get()
    }

    pub(crate) fn set_loaded_properties(&mut self, properties: PropertyBag) {
        self.properties = Lazy::loaded(properties);
    }

    pub const fn services(&self) -> &SiteServices {
        &self.services
    }
}

/// Trimmed `value`, or `None` when nothing is left.
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}

impl Identifiable for ConfigurationNode {
    fn id(&self) -> &str {
        &self.id
    }
}

impl PartialEq for ConfigurationNode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.registration_id == other.registration_id
            && self.title == other.title
            && self.layout_hints == other.layout_hints
            && self.properties == other.properties
    }
}
