#![allow(dead_code)]

use parking_lot::Mutex;
use portico::{
    IdGenerator, PageRecord, PageStorage, PropertyBag, SiteError, SiteServices, ToolRecord,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory storage counting every read, with an optional failure switch.
#[derive(Default)]
pub struct MemoryStorage {
    page_properties: HashMap<String, PropertyBag>,
    page_tools: HashMap<String, Vec<ToolRecord>>,
    tool_properties: HashMap<String, PropertyBag>,
    reads: Mutex<HashMap<&'static str, usize>>,
    failing: Mutex<bool>,
}

impl MemoryStorage {
    #[must_use]
    pub fn with_page_properties(mut self, page_id: &str, props: &[(&str, &str)]) -> Self {
        self.page_properties.insert(page_id.to_owned(), props.iter().copied().collect());
        self
    }

    #[must_use]
    pub fn with_tool(mut self, page_id: &str, record: ToolRecord) -> Self {
        self.page_tools.entry(page_id.to_owned()).or_default().push(record);
        self
    }

    #[must_use]
    pub fn with_tool_properties(mut self, tool_id: &str, props: &[(&str, &str)]) -> Self {
        self.tool_properties.insert(tool_id.to_owned(), props.iter().copied().collect());
        self
    }

    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock() = failing;
    }

    pub fn reads(&self, kind: &str) -> usize {
        self.reads.lock().get(kind).copied().unwrap_or_default()
    }

    fn record(&self, kind: &'static str) -> Result<(), SiteError> {
        if *self.failing.lock() {
            return Err(SiteError::storage(format!("{kind} unavailable")));
        }
        *self.reads.lock().entry(kind).or_default() += 1;
        Ok(())
    }
}

impl PageStorage for MemoryStorage {
    fn read_page_properties(&self, page_id: &str) -> Result<PropertyBag, SiteError> {
        self.record("page_properties")?;
        Ok(self.page_properties.get(page_id).cloned().unwrap_or_default())
    }

    fn read_page_tools(&self, page_id: &str) -> Result<Vec<ToolRecord>, SiteError> {
        self.record("page_tools")?;
        Ok(self.page_tools.get(page_id).cloned().unwrap_or_default())
    }

    fn read_tool_properties(&self, tool_id: &str) -> Result<PropertyBag, SiteError> {
        self.record("tool_properties")?;
        Ok(self.tool_properties.get(tool_id).cloned().unwrap_or_default())
    }
}

/// Deterministic ids: `gen-1`, `gen-2`, ...
#[derive(Default)]
pub struct SequentialIds(AtomicUsize);

impl IdGenerator for SequentialIds {
    fn generate(&self) -> String {
        format!("gen-{}", self.0.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

pub fn tool_record(id: &str, registration: &str, hints: Option<&str>) -> ToolRecord {
    ToolRecord {
        id: id.to_owned(),
        registration_id: Some(registration.to_owned()),
        title: None,
        layout_hints: hints.map(str::to_owned),
    }
}

pub fn page_record(id: &str, title: &str) -> PageRecord {
    PageRecord {
        id: id.to_owned(),
        title: Some(title.to_owned()),
        layout: "0".to_owned(),
        popup: false,
    }
}

/// Services over `storage` with sequential ids.
pub fn services(storage: &Arc<MemoryStorage>) -> SiteServices {
    SiteServices::builder()
        .storage(storage.clone())
        .ids(Arc::new(SequentialIds::default()))
        .portal_url("https://lms.test/portal")
        .build()
}
