//! Well-known property names, XML tags and attribute names.

/// Page property holding the page category (set by `setup_page_category`).
pub const PAGE_CATEGORY_PROP: &str = "sitePage.pageCategory";

/// Prefix of page references: `/site/{site_id}/page/{page_id}`.
pub const SITE_REFERENCE_ROOT: &str = "/site";

pub const PAGE_TAG: &str = "page";
pub const TOOLS_TAG: &str = "tools";
pub const TOOL_TAG: &str = "tool";
pub const PROPERTIES_TAG: &str = "properties";
pub const PROPERTY_TAG: &str = "property";

pub const ID_ATTR: &str = "id";
pub const TITLE_ATTR: &str = "title";
pub const LAYOUT_ATTR: &str = "layout";
pub const POPUP_ATTR: &str = "popup";
pub const TOOL_ID_ATTR: &str = "toolId";
pub const LAYOUT_HINTS_ATTR: &str = "layoutHints";
pub const NAME_ATTR: &str = "name";
pub const VALUE_ATTR: &str = "value";
pub const ENCODING_ATTR: &str = "enc";

/// Value of [`ENCODING_ATTR`] for base64-encoded property values.
pub const BASE64_ENCODING: &str = "BASE64";
