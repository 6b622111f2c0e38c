//! # Portico
//!
//! Site pages as ordered trees of tool configurations.
//!
//! A [`PageNode`] owns an ordered list of [`ConfigurationNode`]s; both carry a
//! [`PropertyBag`]. Pages rebuilt from storage read their properties and tools lazily on
//! first access through the [`PageStorage`] collaborator held by [`SiteServices`].
//!
//! ## Features
//!
//! * **Ordering**: [`OrderedEntityList`] keeps ids unique and supports move up/down/to.
//! * **Copies**: `clone_exact` keeps ids; `clone_replacing_site` assigns fresh ids and
//!   rewrites the old site id inside property values.
//! * **XML**: pages round-trip through `<page>` documents (see the [`codec`] module).
//!
//! ## Example
//!
//! ```rust
//! use portico::{PageNode, SiteLink, SiteServices};
//!
//! let services = SiteServices::default();
//! let mut page = PageNode::new(SiteLink::detached(Some("site-1".into()), None), &services);
//! page.set_title("Overview");
//! page.add_tool_for("sakai.motd").unwrap();
//!
//! let xml = page.to_xml_string().unwrap();
//! let parsed = PageNode::parse_xml(&xml, page.site().clone(), &services).unwrap();
//! assert_eq!(parsed, page);
//! ```

pub mod codec;
mod error;
pub mod lazy;
pub mod ordered;
pub mod page;
pub mod properties;
pub mod services;
pub mod site;
pub mod tool;
pub mod xml;

pub use crate::error::{SiteError, SiteErrorExt};
pub use crate::lazy::Lazy;
pub use crate::ordered::{Identifiable, OrderedEntityList};
pub use crate::page::{EditState, PageLayout, PageNode, ToolList};
pub use crate::properties::PropertyBag;
pub use crate::services::{
    CategoryLookup, ConfiguredCategories, IdGenerator, NullStorage, PageRecord, PageStorage,
    SiteServices, SiteServicesBuilder, StaticRegistry, ToolRecord, ToolRegistration,
    ToolRegistry, UuidGenerator,
};
pub use crate::site::{SiteContainer, SiteLink, SiteOutline};
pub use crate::tool::{ConfigurationNode, PageRef};
pub use crate::xml::Element;
