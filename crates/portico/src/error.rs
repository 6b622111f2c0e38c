use std::borrow::Cow;

/// Errors raised by the page and tool tree.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// An entity with the same id is already present in an ordered list.
    #[error("Duplicate identity{}: {message}", format_context(.context))]
    DuplicateIdentity { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The storage collaborator failed while filling a lazy property bag or tool list.
    #[error("Storage error{}: {message}", format_context(.context))]
    Storage { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Malformed XML text or an unexpected element.
    #[error("XML error{}: {message}", format_context(.context))]
    Xml { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl SiteError {
    pub fn storage(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Storage { message: message.into(), context: None }
    }

    pub fn xml(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Xml { message: message.into(), context: None }
    }

    pub fn duplicate(id: &str) -> Self {
        Self::DuplicateIdentity {
            message: format!("id '{id}' is already present").into(),
            context: None,
        }
    }
}

pub trait SiteErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, SiteError>;
}

impl<T> SiteErrorExt<T> for Result<T, SiteError> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Self {
        self.map_err(|mut e| {
            match &mut e {
                SiteError::DuplicateIdentity { context: c, .. }
                | SiteError::Storage { context: c, .. }
                | SiteError::Xml { context: c, .. } => *c = Some(context.into()),
            }
            e
        })
    }
}

impl From<quick_xml::Error> for SiteError {
    fn from(e: quick_xml::Error) -> Self {
        Self::xml(e.to_string())
    }
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
