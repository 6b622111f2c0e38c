//! XML form of pages, tools and property bags.
//!
//! ```xml
//! <page id="..." title="..." layout="0" popup="false">
//!   <properties>
//!     <property name="key" enc="BASE64" value="dmFsdWU="/>
//!   </properties>
//!   <tools>
//!     <tool id="..." toolId="sakai.motd" title="..." layoutHints="0,1">
//!       <properties/>
//!     </tool>
//!   </tools>
//! </page>
//! ```
//!
//! Reading is permissive: malformed layout and popup values fall back to their defaults,
//! missing ids are generated and undecodable property values are kept as written. Ids are
//! kept exactly as written; titles, registration ids and layout hints go through the same
//! setters as in-memory edits, so a written tree reads back equal.

use crate::error::{SiteError, SiteErrorExt};
use crate::page::{PageLayout, PageNode, ToolList};
use crate::properties::PropertyBag;
use crate::services::SiteServices;
use crate::site::SiteLink;
use crate::tool::{ConfigurationNode, PageRef};
use crate::xml::{Element, flag_or_default};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use portico_domain::constants::{
    BASE64_ENCODING, ENCODING_ATTR, ID_ATTR, LAYOUT_ATTR, LAYOUT_HINTS_ATTR, NAME_ATTR, PAGE_TAG,
    POPUP_ATTR, PROPERTIES_TAG, PROPERTY_TAG, TITLE_ATTR, TOOL_ID_ATTR, TOOL_TAG, TOOLS_TAG,
    VALUE_ATTR,
};
use tracing::warn;

impl PropertyBag {
    /// `<properties>` with one base64-encoded `<property>` per entry, in insertion order.
    pub fn to_xml(&self) -> Element {
        let mut element = Element::new(PROPERTIES_TAG);
        for (name, value) in self.iter() {
            element.push_child(
                Element::new(PROPERTY_TAG)
                    .with_attribute(NAME_ATTR, name)
                    .with_attribute(ENCODING_ATTR, BASE64_ENCODING)
                    .with_attribute(VALUE_ATTR, STANDARD.encode(value)),
            );
        }
        element
    }

    pub fn from_xml(element: &Element) -> Self {
        let mut bag = Self::new();
        for property in element.children_named(PROPERTY_TAG) {
            let Some(name) = property.attribute(NAME_ATTR) else {
                warn!("Skipping property without a name");
                continue;
            };
            let raw = property.attribute(VALUE_ATTR).unwrap_or_default();
            let value = match property.attribute(ENCODING_ATTR) {
                Some(enc) if enc.eq_ignore_ascii_case(BASE64_ENCODING) => decode_value(name, raw),
                _ => raw.to_owned(),
            };
            bag.add_property(name, value);
        }
        bag
    }
}

fn decode_value(name: &str, raw: &str) -> String {
    match STANDARD.decode(raw).map(String::from_utf8) {
        Ok(Ok(value)) => value,
        Ok(Err(e)) => {
            warn!(property = name, error = %e, "Property value is not UTF-8, kept as written");
            raw.to_owned()
        },
        Err(e) => {
            warn!(property = name, error = %e, "Property value is not base64, kept as written");
            raw.to_owned()
        },
    }
}

fn id_or_generated(element: &Element, services: &SiteServices) -> String {
    match element.attribute(ID_ATTR).filter(|id| !id.is_empty()) {
        Some(id) => id.to_owned(),
        None => {
            let id = services.generate_id();
            warn!(tag = element.name(), generated = %id, "Element without id, generated one");
            id
        },
    }
}

fn expect_tag(element: &Element, tag: &str) -> Result<(), SiteError> {
    if element.name() == tag {
        return Ok(());
    }
    Err(SiteError::xml(format!("expected <{tag}>, found <{}>", element.name())))
}

impl ConfigurationNode {
    /// Serializes the tool, loading its properties first if needed.
    ///
    /// # Errors
    /// Returns [`SiteError::Storage`] if the properties cannot be loaded.
    pub fn to_xml(&mut self) -> Result<Element, SiteError> {
        let mut element = Element::new(TOOL_TAG).with_attribute(ID_ATTR, self.id());
        if let Some(registration_id) = self.registration_id() {
            element.set_attribute(TOOL_ID_ATTR, registration_id);
        }
        if let Some(title) = self.title() {
            element.set_attribute(TITLE_ATTR, title);
        }
        if let Some(hints) = self.layout_hints() {
            element.set_attribute(LAYOUT_HINTS_ATTR, hints);
        }
        element.push_child(self.properties()?.to_xml());
        Ok(element)
    }

    /// Builds a fully loaded tool from a `<tool>` element.
    ///
    /// # Errors
    /// Returns [`SiteError::Xml`] if `element` is not a `<tool>`.
    pub fn from_xml(
        element: &Element,
        page: PageRef,
        services: &SiteServices,
    ) -> Result<Self, SiteError> {
        expect_tag(element, TOOL_TAG)?;

        let mut tool = Self::with_id(id_or_generated(element, services), page, services);
        tool.set_registration_id(element.attribute(TOOL_ID_ATTR).unwrap_or_default());
        tool.set_title(element.attribute(TITLE_ATTR).unwrap_or_default());
        tool.set_layout_hints(element.attribute(LAYOUT_HINTS_ATTR));
        if let Some(properties) = element.child(PROPERTIES_TAG) {
            tool.set_loaded_properties(PropertyBag::from_xml(properties));
        }
        Ok(tool)
    }
}

impl PageNode {
    /// Serializes the page with its properties and tools, loading them first if needed.
    ///
    /// # Errors
    /// Returns [`SiteError::Storage`] if properties or tools cannot be loaded.
    pub fn to_xml(&mut self) -> Result<Element, SiteError> {
        let mut element = Element::new(PAGE_TAG).with_attribute(ID_ATTR, self.id());
        if let Some(title) = self.title() {
            element.set_attribute(TITLE_ATTR, title);
        }
        element.set_attribute(LAYOUT_ATTR, self.layout().value().to_string());
        element.set_attribute(POPUP_ATTR, self.is_popup().to_string());
        element.push_child(self.properties()?.to_xml());

        let mut tools = Element::new(TOOLS_TAG);
        for tool in self.tools_mut()?.iter_mut() {
            tools.push_child(tool.to_xml()?);
        }
        element.push_child(tools);
        Ok(element)
    }

    /// Builds a fully loaded page from a `<page>` element.
    ///
    /// # Errors
    /// Returns [`SiteError::Xml`] if `element` is not a `<page>`, or
    /// [`SiteError::DuplicateIdentity`] if two tools share an id.
    pub fn from_xml(
        element: &Element,
        site: SiteLink,
        services: &SiteServices,
    ) -> Result<Self, SiteError> {
        expect_tag(element, PAGE_TAG)?;

        let mut page = Self::with_id(id_or_generated(element, services), site, services);
        page.set_title(element.attribute(TITLE_ATTR).unwrap_or_default());
        page.set_layout_mode(PageLayout::parse_or_default(element.attribute(LAYOUT_ATTR)));
        page.set_popup(flag_or_default(element.attribute(POPUP_ATTR)));

        if let Some(properties) = element.child(PROPERTIES_TAG) {
            page.set_loaded_properties(PropertyBag::from_xml(properties));
        }

        let page_ref = page.page_ref();
        let tools = element
            .children_named(TOOLS_TAG)
            .flat_map(|list| list.children_named(TOOL_TAG))
            .map(|tool| ConfigurationNode::from_xml(tool, page_ref.clone(), services))
            .collect::<Result<Vec<_>, _>>()?;
        let tools = ToolList::try_from_items(tools).context(format!("Page {}", page.id()))?;
        page.set_loaded_tools(tools);
        Ok(page)
    }

    /// Parses a page document.
    ///
    /// # Errors
    /// Returns [`SiteError::Xml`] for malformed text; see [`PageNode::from_xml`].
    pub fn parse_xml(
        xml: &str,
        site: SiteLink,
        services: &SiteServices,
    ) -> Result<Self, SiteError> {
        Self::from_xml(&Element::parse(xml)?, site, services)
    }

    /// Writes the page as an indented XML document.
    ///
    /// # Errors
    /// See [`PageNode::to_xml`].
    pub fn to_xml_string(&mut self) -> Result<String, SiteError> {
        self.to_xml()?.to_xml_string()
    }
}
