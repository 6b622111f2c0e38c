//! Site pages: an ordered list of tool configurations plus page-level settings.
//!
//! Both the page properties and the tool list may come from storage lazily. Every accessor
//! that needs them takes `&mut self` and returns a `Result`, since the first access reads
//! storage and a failed read is reported to whoever triggered it.

use crate::error::{SiteError, SiteErrorExt};
use crate::lazy::Lazy;
use crate::ordered::{Identifiable, OrderedEntityList};
use crate::properties::PropertyBag;
use crate::services::{PageRecord, SiteServices, ToolRegistration};
use crate::site::{SiteContainer, SiteLink};
use crate::tool::{ConfigurationNode, PageRef, non_blank};
use portico_domain::constants::{PAGE_CATEGORY_PROP, SITE_REFERENCE_ROOT};
use std::sync::Arc;
use tracing::{debug, warn};

/// Column layout of a page. The discriminants are the persisted values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PageLayout {
    #[default]
    SingleColumn = 0,
    DoubleColumn = 1,
}

impl PageLayout {
    pub const fn value(self) -> i32 {
        self as i32
    }

    pub const fn from_value(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::SingleColumn),
            1 => Some(Self::DoubleColumn),
            _ => None,
        }
    }

    /// Parses a persisted layout value; anything unrecognized is single column.
    pub fn parse_or_default(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.trim().parse().ok())
            .and_then(Self::from_value)
            .unwrap_or_default()
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::SingleColumn => "Single Column",
            Self::DoubleColumn => "Double Column",
        }
    }
}

/// Editing lifecycle: `Inactive -> Active -> Closed`. `Closed` is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Inactive,
    Active,
    Closed,
}

pub type ToolList = OrderedEntityList<ConfigurationNode>;

#[derive(Debug, Clone)]
pub struct PageNode {
    id: String,
    title: Option<String>,
    layout: PageLayout,
    popup: bool,
    properties: Lazy<PropertyBag>,
    tools: Lazy<ToolList>,
    edit: EditState,
    site: SiteLink,
    services: SiteServices,
}

impl PageNode {
    /// A fresh, empty page with a generated id.
    pub fn new(site: SiteLink, services: &SiteServices) -> Self {
        Self::with_id(services.generate_id(), site, services)
    }

    pub(crate) fn with_id(id: String, site: SiteLink, services: &SiteServices) -> Self {
        Self {
            id,
            title: None,
            layout: PageLayout::default(),
            popup: false,
            properties: Lazy::loaded(PropertyBag::new()),
            tools: Lazy::loaded(ToolList::new()),
            edit: EditState::default(),
            site,
            services: services.clone(),
        }
    }

    /// Rebuilds a persisted page of a live site. Properties and tools load on first access.
    pub fn reconstruct<S: SiteContainer + 'static>(
        site: &Arc<S>,
        record: PageRecord,
        services: &SiteServices,
    ) -> Self {
        Self::from_record(record, SiteLink::attached(site), services)
    }

    /// Rebuilds a persisted page reaching its site through `site`.
    pub fn reconstruct_linked(record: PageRecord, site: SiteLink, services: &SiteServices) -> Self {
        Self::from_record(record, site, services)
    }

    /// Rebuilds a persisted page without its site, remembering the site id and skin.
    pub fn reconstruct_detached(
        record: PageRecord,
        site_id: Option<String>,
        skin: Option<String>,
        services: &SiteServices,
    ) -> Self {
        Self::from_record(record, SiteLink::detached(site_id, skin), services)
    }

    fn from_record(record: PageRecord, site: SiteLink, services: &SiteServices) -> Self {
        Self {
            id: record.id,
            title: record.title.as_deref().and_then(non_blank),
            layout: PageLayout::parse_or_default(Some(&record.layout)),
            popup: record.popup,
            properties: Lazy::unloaded(),
            tools: Lazy::unloaded(),
            edit: EditState::default(),
            site,
            services: services.clone(),
        }
    }

    /// Deep copy onto `site` keeping every id and property value.
    ///
    /// # Errors
    /// Returns [`SiteError::Storage`] if the source properties or tools cannot be loaded.
    pub fn clone_exact(source: &mut Self, site: SiteLink) -> Result<Self, SiteError> {
        let mut properties = PropertyBag::new();
        properties.add_all(source.properties()?);

        let mut page = source.copy_shell(source.id.clone(), site, properties);
        let page_ref = page.page_ref();
        let tools = source
            .tools_mut()?
            .iter_mut()
            .map(|tool| ConfigurationNode::clone_exact(tool, page_ref.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        page.tools = Lazy::loaded(ToolList::try_from_items(tools)?);
        Ok(page)
    }

    /// Deep copy onto `site` with fresh page and tool ids. Occurrences of the source site id
    /// inside property values are rewritten to the id of `site`.
    ///
    /// # Errors
    /// Returns [`SiteError::Storage`] if the source properties or tools cannot be loaded.
    pub fn clone_replacing_site(source: &mut Self, site: SiteLink) -> Result<Self, SiteError> {
        let from = source.site_id().unwrap_or_default();
        let to = site.site_id().unwrap_or_default();
        let properties = source.properties()?.replacing_in_values(&from, &to);

        let mut page = source.copy_shell(source.services.generate_id(), site, properties);
        let page_ref = page.page_ref();
        let tools = source
            .tools_mut()?
            .iter_mut()
            .map(|tool| ConfigurationNode::clone_replacing_site(tool, page_ref.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        page.tools = Lazy::loaded(ToolList::try_from_items(tools)?);
        Ok(page)
    }

    fn copy_shell(&self, id: String, site: SiteLink, properties: PropertyBag) -> Self {
        Self {
            id,
            title: self.title.clone(),
            layout: self.layout,
            popup: self.popup,
            properties: Lazy::loaded(properties),
            tools: Lazy::loaded(ToolList::new()),
            edit: EditState::default(),
            site,
            services: self.services.clone(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Reference handed to the tools of this page.
    pub fn page_ref(&self) -> PageRef {
        PageRef::new(self.id.clone(), self.site_id())
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Sets the title; blank input clears it.
    pub fn set_title(&mut self, title: &str) {
        self.title = non_blank(title);
    }

    pub const fn layout(&self) -> PageLayout {
        self.layout
    }

    /// Sets the layout from its persisted value. Unknown values are logged and ignored.
    pub fn set_layout(&mut self, layout: i32) {
        match PageLayout::from_value(layout) {
            Some(layout) => self.layout = layout,
            None => warn!(page_id = %self.id, layout, "Ignoring invalid page layout"),
        }
    }

    pub const fn set_layout_mode(&mut self, layout: PageLayout) {
        self.layout = layout;
    }

    pub const fn layout_title(&self) -> &'static str {
        self.layout.title()
    }

    pub const fn is_popup(&self) -> bool {
        self.popup
    }

    pub const fn set_popup(&mut self, popup: bool) {
        self.popup = popup;
    }

    // --- Properties ---

    /// Page properties, read from storage on first access.
    ///
    /// # Errors
    /// Returns [`SiteError::Storage`] if the storage read fails; the next call retries.
    pub fn properties(&mut self) -> Result<&mut PropertyBag, SiteError> {
        let Self { id, properties, services, .. } = self;
        properties
            .materialize(|| {
                debug!(page_id = %id, "Loading page properties");
                services.storage().read_page_properties(id)
            })
            .context("Failed to read page properties")
    }

    pub const fn loaded_properties(&self) -> Option<&PropertyBag> {
        self.properties.get()
    }

    pub(crate) fn set_loaded_properties(&mut self, properties: PropertyBag) {
        self.properties = Lazy::loaded(properties);
    }

    /// Sets the page category from the configured default for `tool_id`, unless a category
    /// is already present. Needs a live site to know the site type.
    ///
    /// # Errors
    /// Returns [`SiteError::Storage`] if the page properties cannot be loaded.
    pub fn setup_page_category(&mut self, tool_id: &str) -> Result<(), SiteError> {
        let Some(site_type) = self.site.live().and_then(|s| s.site_type().map(str::to_owned))
        else {
            debug!(page_id = %self.id, tool_id, "No site type, page category left unset");
            return Ok(());
        };

        let Some(category) = self.services.categories().category_for(&site_type, tool_id) else {
            return Ok(());
        };

        let properties = self.properties()?;
        if !properties.contains(PAGE_CATEGORY_PROP) {
            properties.add_property(PAGE_CATEGORY_PROP, category);
        }
        Ok(())
    }

    // --- Tools ---

    /// The tool list, read from storage on first access.
    ///
    /// # Errors
    /// Returns [`SiteError::Storage`] if the storage read fails, or
    /// [`SiteError::DuplicateIdentity`] if storage returns the same tool id twice.
    pub fn tools_mut(&mut self) -> Result<&mut ToolList, SiteError> {
        let page = self.page_ref();
        let Self { id, tools, services, .. } = self;
        tools
            .materialize(|| {
                debug!(page_id = %id, "Loading page tools");
                let records = services.storage().read_page_tools(id)?;
                ToolList::try_from_items(records.into_iter().map(|record| {
                    ConfigurationNode::reconstruct(page.clone(), record, services)
                }))
            })
            .context("Failed to read page tools")
    }

    /// # Errors
    /// See [`PageNode::tools_mut`].
    pub fn tools(&mut self) -> Result<&ToolList, SiteError> {
        self.tools_mut().map(|tools| &*tools)
    }

    pub const fn loaded_tools(&self) -> Option<&ToolList> {
        self.tools.get()
    }

    pub(crate) fn set_loaded_tools(&mut self, tools: ToolList) {
        self.tools = Lazy::loaded(tools);
    }

    /// # Errors
    /// See [`PageNode::tools_mut`].
    pub fn tool(&mut self, tool_id: &str) -> Result<Option<&ConfigurationNode>, SiteError> {
        Ok(self.tools()?.find_by_id(tool_id))
    }

    /// # Errors
    /// See [`PageNode::tools_mut`].
    pub fn tool_mut(
        &mut self,
        tool_id: &str,
    ) -> Result<Option<&mut ConfigurationNode>, SiteError> {
        Ok(self.tools_mut()?.find_by_id_mut(tool_id))
    }

    /// Tools running one of the registered tools in `registration_ids`, in page order.
    ///
    /// # Errors
    /// See [`PageNode::tools_mut`].
    pub fn tools_by_registration(
        &mut self,
        registration_ids: &[&str],
    ) -> Result<Vec<&ConfigurationNode>, SiteError> {
        if registration_ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .tools()?
            .iter()
            .filter(|tool| {
                tool.registration_id().is_some_and(|id| registration_ids.contains(&id))
            })
            .collect())
    }

    /// Tools whose layout hints place them in `column`, in page order. Tools without
    /// usable hints belong to column 0.
    ///
    /// # Errors
    /// See [`PageNode::tools_mut`].
    pub fn tools_in_column(&mut self, column: i32) -> Result<Vec<&ConfigurationNode>, SiteError> {
        Ok(self.tools()?.iter().filter(|tool| tool.column() == column).collect())
    }

    /// Appends a fresh tool with no registration.
    ///
    /// # Errors
    /// See [`PageNode::tools_mut`].
    pub fn add_tool(&mut self) -> Result<&mut ConfigurationNode, SiteError> {
        let tool = ConfigurationNode::new(self.page_ref(), &self.services);
        self.tools_mut()?.add(tool)
    }

    /// Appends a fresh tool running `registration_id`.
    ///
    /// # Errors
    /// See [`PageNode::tools_mut`].
    pub fn add_tool_for(
        &mut self,
        registration_id: &str,
    ) -> Result<&mut ConfigurationNode, SiteError> {
        let tool =
            ConfigurationNode::with_registration(self.page_ref(), registration_id, &self.services);
        self.tools_mut()?.add(tool)
    }

    /// Appends a fresh tool for a registry entry, titled after it.
    ///
    /// # Errors
    /// See [`PageNode::tools_mut`].
    pub fn add_registered_tool(
        &mut self,
        registration: &ToolRegistration,
    ) -> Result<&mut ConfigurationNode, SiteError> {
        let tool =
            ConfigurationNode::from_registration(self.page_ref(), registration, &self.services);
        self.tools_mut()?.add(tool)
    }

    /// Removes a tool from this page only; storage is untouched.
    ///
    /// # Errors
    /// See [`PageNode::tools_mut`].
    pub fn remove_tool(&mut self, tool_id: &str) -> Result<Option<ConfigurationNode>, SiteError> {
        Ok(self.tools_mut()?.remove(tool_id))
    }

    /// # Errors
    /// See [`PageNode::tools_mut`].
    pub fn tool_position(&mut self, tool_id: &str) -> Result<Option<usize>, SiteError> {
        Ok(self.tools()?.index_of(tool_id))
    }

    /// # Errors
    /// See [`PageNode::tools_mut`].
    pub fn move_tool_up(&mut self, tool_id: &str) -> Result<(), SiteError> {
        self.tools_mut()?.move_up(tool_id);
        Ok(())
    }

    /// # Errors
    /// See [`PageNode::tools_mut`].
    pub fn move_tool_down(&mut self, tool_id: &str) -> Result<(), SiteError> {
        self.tools_mut()?.move_down(tool_id);
        Ok(())
    }

    /// # Errors
    /// See [`PageNode::tools_mut`].
    pub fn set_tool_position(&mut self, tool_id: &str, position: usize) -> Result<(), SiteError> {
        self.tools_mut()?.move_to(tool_id, position);
        Ok(())
    }

    // --- Position within the site ---

    pub fn move_up(&self) {
        if let Some(site) = self.site.live() {
            site.move_page_up(&self.id);
        }
    }

    pub fn move_down(&self) {
        if let Some(site) = self.site.live() {
            site.move_page_down(&self.id);
        }
    }

    pub fn set_position(&self, position: usize) {
        if let Some(site) = self.site.live() {
            site.move_page_to(&self.id, position);
        }
    }

    /// Index of this page in its site, or `None` without a live site.
    pub fn position(&self) -> Option<usize> {
        self.site.live()?.page_position(&self.id)
    }

    // --- Edit lifecycle ---

    pub fn activate(&mut self) {
        if self.edit == EditState::Closed {
            warn!(page_id = %self.id, "Ignoring activation of a closed page edit");
            return;
        }
        self.edit = EditState::Active;
    }

    pub const fn is_active_edit(&self) -> bool {
        matches!(self.edit, EditState::Active)
    }

    pub const fn close_edit(&mut self) {
        self.edit = EditState::Closed;
    }

    pub const fn edit_state(&self) -> EditState {
        self.edit
    }

    // --- Site ---

    pub const fn site(&self) -> &SiteLink {
        &self.site
    }

    pub fn containing_site(&self) -> Option<Arc<dyn SiteContainer>> {
        self.site.live()
    }

    pub fn site_id(&self) -> Option<String> {
        self.site.site_id()
    }

    pub fn skin(&self) -> Option<String> {
        self.site.skin()
    }

    /// `/site/{site_id}/page/{page_id}`; the site segment is empty when the site is unknown.
    pub fn reference(&self) -> String {
        let site_id = self.site_id().unwrap_or_default();
        format!("{SITE_REFERENCE_ROOT}/{site_id}/page/{}", self.id)
    }

    /// Absolute URL of the page under the configured portal.
    pub fn url(&self) -> String {
        format!("{}{}", self.services.portal_url(), self.reference())
    }

    pub const fn services(&self) -> &SiteServices {
        &self.services
    }
}

impl Identifiable for PageNode {
    fn id(&self) -> &str {
        &self.id
    }
}

impl PartialEq for PageNode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.title == other.title
            && self.layout == other.layout
            && self.popup == other.popup
            && self.properties == other.properties
            && self.tools == other.tools
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ConfiguredCategories;
    use crate::site::SiteOutline;

    fn detached() -> SiteLink {
        SiteLink::detached(Some("site-1".to_owned()), Some("default".to_owned()))
    }

    #[test]
    fn layout_values() {
        assert_eq!(PageLayout::parse_or_default(Some("1")), PageLayout::DoubleColumn);
        assert_eq!(PageLayout::parse_or_default(Some(" 0 ")), PageLayout::SingleColumn);
        assert_eq!(PageLayout::parse_or_default(Some("2")), PageLayout::SingleColumn);
        assert_eq!(PageLayout::parse_or_default(Some("wide")), PageLayout::SingleColumn);
        assert_eq!(PageLayout::parse_or_default(None), PageLayout::SingleColumn);
        assert_eq!(PageLayout::DoubleColumn.value(), 1);
    }

    #[test]
    fn invalid_layout_is_ignored() {
        let mut page = PageNode::new(detached(), &SiteServices::default());
        page.set_layout(1);
        assert_eq!(page.layout(), PageLayout::DoubleColumn);
        assert_eq!(page.layout_title(), "Double Column");

        page.set_layout(2);
        page.set_layout(-1);
        assert_eq!(page.layout(), PageLayout::DoubleColumn);
    }

    #[test]
    fn edit_lifecycle_is_one_way() {
        let mut page = PageNode::new(detached(), &SiteServices::default());
        assert_eq!(page.edit_state(), EditState::Inactive);
        page.activate();
        assert!(page.is_active_edit());
        page.close_edit();
        page.activate();
        assert_eq!(page.edit_state(), EditState::Closed);
        assert!(!page.is_active_edit());
    }

    #[test]
    fn reference_and_url_use_fallback_site() {
        let services = SiteServices::builder().portal_url("https://portal.test/portal").build();
        let page = PageNode::with_id("p9".to_owned(), detached(), &services);
        assert_eq!(page.reference(), "/site/site-1/page/p9");
        assert_eq!(page.url(), "https://portal.test/portal/site/site-1/page/p9");
        assert_eq!(page.skin().as_deref(), Some("default"));
        assert_eq!(page.position(), None);
    }

    #[test]
    fn page_category_comes_from_site_type() {
        let categories = ConfiguredCategories::new().with("course", "sakai.schedule", "calendar");
        let services = SiteServices::builder().categories(Arc::new(categories)).build();
        let site = Arc::new(SiteOutline::new("s1").with_site_type("course"));

        let mut page = PageNode::new(SiteLink::attached(&site), &services);
        page.setup_page_category("sakai.unknown").unwrap();
        assert_eq!(page.properties().unwrap().get(PAGE_CATEGORY_PROP), None);

        page.setup_page_category("sakai.schedule").unwrap();
        assert_eq!(page.properties().unwrap().get(PAGE_CATEGORY_PROP), Some("calendar"));

        page.properties().unwrap().add_property(PAGE_CATEGORY_PROP, "custom");
        page.setup_page_category("sakai.schedule").unwrap();
        assert_eq!(page.properties().unwrap().get(PAGE_CATEGORY_PROP), Some("custom"));
    }

    #[test]
    fn page_category_needs_a_live_site() {
        let categories = ConfiguredCategories::new().with("course", "sakai.schedule", "calendar");
        let services = SiteServices::builder().categories(Arc::new(categories)).build();
        let mut page = PageNode::new(detached(), &services);

        page.setup_page_category("sakai.schedule").unwrap();
        assert!(page.properties().unwrap().is_empty());
    }
}
