//! The site a page belongs to.
//!
//! Pages never own their site. A page either holds a weak handle to a live
//! [`SiteContainer`] or, when reconstructed without one, the site id and skin it was
//! stored with.

use crate::error::SiteError;
use crate::ordered::{Identifiable, OrderedEntityList};
use parking_lot::RwLock;
use std::fmt;
use std::sync::{Arc, Weak};

/// A live site: identity lookups plus ordering of its pages.
pub trait SiteContainer: Send + Sync {
    fn id(&self) -> &str;
    fn skin(&self) -> Option<&str>;
    fn site_type(&self) -> Option<&str>;
    fn move_page_up(&self, page_id: &str);
    fn move_page_down(&self, page_id: &str);
    fn move_page_to(&self, page_id: &str, position: usize);
    fn page_position(&self, page_id: &str) -> Option<usize>;
}

/// How a page reaches its site.
#[derive(Clone)]
pub enum SiteLink {
    Attached(Weak<dyn SiteContainer>),
    Detached { site_id: Option<String>, skin: Option<String> },
}

impl SiteLink {
    pub fn attached<S: SiteContainer + 'static>(site: &Arc<S>) -> Self {
        let site: Arc<dyn SiteContainer> = site.clone();
        Self::attached_dyn(&site)
    }

    /// Attaches to a site already held as a trait object.
    pub fn attached_dyn(site: &Arc<dyn SiteContainer>) -> Self {
        Self::Attached(Arc::downgrade(site))
    }

    pub fn detached(site_id: Option<String>, skin: Option<String>) -> Self {
        Self::Detached { site_id, skin }
    }

    /// The live site, if attached and still alive.
    pub fn live(&self) -> Option<Arc<dyn SiteContainer>> {
        match self {
            Self::Attached(site) => site.upgrade(),
            Self::Detached { .. } => None,
        }
    }

    pub fn site_id(&self) -> Option<String> {
        match self {
            Self::Attached(site) => site.upgrade().map(|s| s.id().to_owned()),
            Self::Detached { site_id, .. } => site_id.clone(),
        }
    }

    pub fn skin(&self) -> Option<String> {
        match self {
            Self::Attached(site) => site.upgrade().and_then(|s| s.skin().map(str::to_owned)),
            Self::Detached { skin, .. } => skin.clone(),
        }
    }

    /// A detached link carrying the current site id and skin.
    pub fn snapshot(&self) -> Self {
        Self::Detached { site_id: self.site_id(), skin: self.skin() }
    }
}

impl Default for SiteLink {
    fn default() -> Self {
        Self::Detached { site_id: None, skin: None }
    }
}

impl fmt::Debug for SiteLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attached(site) => f
                .debug_tuple("Attached")
                .field(&site.upgrade().map(|s| s.id().to_owned()))
                .finish(),
            Self::Detached { site_id, skin } => f
                .debug_struct("Detached")
                .field("site_id", site_id)
                .field("skin", skin)
                .finish(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PageSlot(String);

impl Identifiable for PageSlot {
    fn id(&self) -> &str {
        &self.0
    }
}

/// In-memory site holding only the display order of its page ids.
#[derive(Debug)]
pub struct SiteOutline {
    id: String,
    skin: Option<String>,
    site_type: Option<String>,
    pages: RwLock<OrderedEntityList<PageSlot>>,
}

impl SiteOutline {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), skin: None, site_type: None, pages: RwLock::default() }
    }

    #[must_use]
    pub fn with_skin(mut self, skin: impl Into<String>) -> Self {
        self.skin = Some(skin.into());
        self
    }

    #[must_use]
    pub fn with_site_type(mut self, site_type: impl Into<String>) -> Self {
        self.site_type = Some(site_type.into());
        self
    }

    /// Appends `page_id` to the page order.
    ///
    /// # Errors
    /// Returns [`SiteError::DuplicateIdentity`] when the page is already registered.
    pub fn register_page(&self, page_id: impl Into<String>) -> Result<(), SiteError> {
        self.pages.write().add(PageSlot(page_id.into())).map(|_| ())
    }

    pub fn unregister_page(&self, page_id: &str) -> bool {
        self.pages.write().remove(page_id).is_some()
    }

    pub fn page_ids(&self) -> Vec<String> {
        self.pages.read().ids().map(str::to_owned).collect()
    }
}

impl SiteContainer for SiteOutline {
    fn id(&self) -> &str {
        &self.id
    }

    fn skin(&self) -> Option<&str> {
        self.skin.as_deref()
    }

    fn site_type(&self) -> Option<&str> {
        self.site_type.as_deref()
    }

    fn move_page_up(&self, page_id: &str) {
        self.pages.write().move_up(page_id);
    }

    fn move_page_down(&self, page_id: &str) {
        self.pages.write().move_down(page_id);
    }

    fn move_page_to(&self, page_id: &str, position: usize) {
        self.pages.write().move_to(page_id, position);
    }

    fn page_position(&self, page_id: &str) -> Option<usize> {
        self.pages.read().index_of(page_id)
    }
}
