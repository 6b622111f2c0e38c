//! Collaborators the page tree calls out to, and their default implementations.
//!
//! A [`SiteServices`] handle bundles one implementation of each trait. It is cheap to clone
//! and shared by every page and tool built from it.

use crate::error::SiteError;
use crate::properties::PropertyBag;
use fxhash::FxHashMap;
use portico_domain::config::PorticoConfig;
use std::fmt;
use std::sync::Arc;

/// Persisted scalar fields of a tool; its properties stay in storage until first access.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolRecord {
    pub id: String,
    pub registration_id: Option<String>,
    pub title: Option<String>,
    pub layout_hints: Option<String>,
}

/// Persisted scalar fields of a page; properties and tools stay in storage until first access.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRecord {
    pub id: String,
    pub title: Option<String>,
    /// Raw layout value as stored (`"0"` or `"1"`).
    pub layout: String,
    pub popup: bool,
}

/// Backend that fills lazy property bags and tool lists.
pub trait PageStorage: Send + Sync {
    /// # Errors
    /// Returns [`SiteError::Storage`] when the backend cannot be read.
    fn read_page_properties(&self, page_id: &str) -> Result<PropertyBag, SiteError>;

    /// Tool records of a page, in display order.
    ///
    /// # Errors
    /// Returns [`SiteError::Storage`] when the backend cannot be read.
    fn read_page_tools(&self, page_id: &str) -> Result<Vec<ToolRecord>, SiteError>;

    /// # Errors
    /// Returns [`SiteError::Storage`] when the backend cannot be read.
    fn read_tool_properties(&self, tool_id: &str) -> Result<PropertyBag, SiteError>;
}

pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Default page category for a tool placed on a page of a given site type.
pub trait CategoryLookup: Send + Sync {
    fn category_for(&self, site_type: &str, tool_id: &str) -> Option<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolRegistration {
    pub id: String,
    pub title: String,
}

pub trait ToolRegistry: Send + Sync {
    fn tool(&self, id: &str) -> Option<ToolRegistration>;
}

/// Storage for trees that never persisted anything: every read is empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStorage;

impl PageStorage for NullStorage {
    fn read_page_properties(&self, _page_id: &str) -> Result<PropertyBag, SiteError> {
        Ok(PropertyBag::new())
    }

    fn read_page_tools(&self, _page_id: &str) -> Result<Vec<ToolRecord>, SiteError> {
        Ok(Vec::new())
    }

    fn read_tool_properties(&self, _tool_id: &str) -> Result<PropertyBag, SiteError> {
        Ok(PropertyBag::new())
    }
}

/// Random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Category defaults keyed by site type, then tool id.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredCategories {
    by_site_type: FxHashMap<String, FxHashMap<String, String>>,
}

impl ConfiguredCategories {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(
        mut self,
        site_type: impl Into<String>,
        tool_id: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        self.by_site_type
            .entry(site_type.into())
            .or_default()
            .insert(tool_id.into(), category.into());
        self
    }

    pub fn from_config(config: &PorticoConfig) -> Self {
        let by_site_type = config
            .categories
            .iter()
            .map(|(site_type, tools)| {
                let tools = tools.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
                (site_type.clone(), tools)
            })
            .collect();
        Self { by_site_type }
    }
}

impl CategoryLookup for ConfiguredCategories {
    fn category_for(&self, site_type: &str, tool_id: &str) -> Option<String> {
        self.by_site_type.get(site_type)?.get(tool_id).cloned()
    }
}

/// A fixed set of registered tools.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    tools: FxHashMap<String, ToolRegistration>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, id: impl Into<String>, title: impl Into<String>) -> Self {
        let id = id.into();
        self.tools.insert(id.clone(), ToolRegistration { id, title: title.into() });
        self
    }

    pub fn from_config(config: &PorticoConfig) -> Self {
        config.tools.iter().fold(Self::new(), |registry, entry| {
            registry.with(entry.id.clone(), entry.title.clone())
        })
    }
}

impl ToolRegistry for StaticRegistry {
    fn tool(&self, id: &str) -> Option<ToolRegistration> {
        self.tools.get(id).cloned()
    }
}

struct ServicesInner {
    storage: Arc<dyn PageStorage>,
    ids: Arc<dyn IdGenerator>,
    categories: Arc<dyn CategoryLookup>,
    registry: Arc<dyn ToolRegistry>,
    portal_url: String,
}

/// Shared handle to the collaborators used by pages and tools.
#[derive(Clone)]
pub struct SiteServices {
    inner: Arc<ServicesInner>,
}

impl SiteServices {
    pub fn builder() -> SiteServicesBuilder {
        SiteServicesBuilder::default()
    }

    /// Services wired from configuration: empty storage, UUID ids, configured categories,
    /// registered tools and portal URL.
    pub fn from_config(config: &PorticoConfig) -> Self {
        Self::builder()
            .categories(Arc::new(ConfiguredCategories::from_config(config)))
            .registry(Arc::new(StaticRegistry::from_config(config)))
            .portal_url(config.portal.url.clone())
            .build()
    }

    pub fn storage(&self) -> &dyn PageStorage {
        self.inner.storage.as_ref()
    }

    pub fn ids(&self) -> &dyn IdGenerator {
        self.inner.ids.as_ref()
    }

    pub fn categories(&self) -> &dyn CategoryLookup {
        self.inner.categories.as_ref()
    }

    pub fn registry(&self) -> &dyn ToolRegistry {
        self.inner.registry.as_ref()
    }

    pub fn portal_url(&self) -> &str {
        &self.inner.portal_url
    }

    pub fn generate_id(&self) -> String {
        self.inner.ids.generate()
    }
}

impl Default for SiteServices {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for SiteServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SiteServices")
            .field("portal_url", &self.inner.portal_url)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
pub struct SiteServicesBuilder {
    storage: Option<Arc<dyn PageStorage>>,
    ids: Option<Arc<dyn IdGenerator>>,
    categories: Option<Arc<dyn CategoryLookup>>,
    registry: Option<Arc<dyn ToolRegistry>>,
    portal_url: Option<String>,
}

impl fmt::Debug for SiteServicesBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SiteServicesBuilder")
            .field("storage", &self.storage.is_some())
            .field("portal_url", &self.portal_url)
            .finish_non_exhaustive()
    }
}

impl SiteServicesBuilder {
    #[must_use]
    pub fn storage(mut self, storage: Arc<dyn PageStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    #[must_use]
    pub fn ids(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = Some(ids);
        self
    }

    #[must_use]
    pub fn categories(mut self, categories: Arc<dyn CategoryLookup>) -> Self {
        self.categories = Some(categories);
        self
    }

    #[must_use]
    pub fn registry(mut self, registry: Arc<dyn ToolRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    #[must_use]
    pub fn portal_url(mut self, url: impl Into<String>) -> Self {
        self.portal_url = Some(url.into());
        self
    }

    /// Fills every unset collaborator with its default.
    pub fn build(self) -> SiteServices {
        let inner = ServicesInner {
            storage: self.storage.unwrap_or_else(|| Arc::new(NullStorage)),
            ids: self.ids.unwrap_or_else(|| Arc::new(UuidGenerator)),
            categories: self.categories.unwrap_or_else(|| Arc::new(ConfiguredCategories::new())),
            registry: self.registry.unwrap_or_else(|| Arc::new(StaticRegistry::new())),
            portal_url: self
                .portal_url
                .unwrap_or_else(|| portico_domain::config::PortalConfig::default().url),
        };
        SiteServices { inner: Arc::new(inner) }
    }
}
