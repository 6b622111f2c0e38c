pub mod fixtures;

use fixtures::*;
use portico::{PageNode, SiteLink, SiteOutline};
use std::sync::Arc;

fn stored_page(storage: &Arc<MemoryStorage>) -> PageNode {
    let mut page = PageNode::reconstruct_detached(
        page_record("p1", "Syllabus"),
        Some("site-a".to_owned()),
        Some("morpheus".to_owned()),
        &services(storage),
    );
    page.set_layout(1);
    page
}

fn storage() -> Arc<MemoryStorage> {
    Arc::new(
        MemoryStorage::default()
            .with_page_properties("p1", &[("home", "/site/site-a/home"), ("plain", "x")])
            .with_tool("p1", tool_record("t1", "sakai.web", Some("0,1")))
            .with_tool_properties("t1", &[("source", "https://lms/site/site-a/web")]),
    )
}

#[test]
fn exact_copy_keeps_ids_and_values() {
    let storage = storage();
    let mut source = stored_page(&storage);

    let target = Arc::new(SiteOutline::new("site-b"));
    let mut copy = PageNode::clone_exact(&mut source, SiteLink::attached(&target)).unwrap();

    assert_eq!(copy, source);
    assert_eq!(copy.id(), "p1");
    assert_eq!(copy.site_id().as_deref(), Some("site-b"));
    assert_eq!(copy.properties().unwrap().get("home"), Some("/site/site-a/home"));

    let tool = copy.tool_mut("t1").unwrap().unwrap();
    assert_eq!(tool.page().site_id.as_deref(), Some("site-b"));
    assert_eq!(tool.properties().unwrap().get("source"), Some("https://lms/site/site-a/web"));
}

#[test]
fn rekeyed_copy_regenerates_ids_and_rewrites_site() {
    let storage = storage();
    let mut source = stored_page(&storage);

    let target = SiteLink::detached(Some("site-b".to_owned()), None);
    let mut copy = PageNode::clone_replacing_site(&mut source, target).unwrap();

    assert_ne!(copy.id(), source.id());
    assert_eq!(copy.title(), Some("Syllabus"));
    assert_eq!(copy.layout(), source.layout());
    assert_eq!(copy.reference(), format!("/site/site-b/page/{}", copy.id()));

    let props = copy.properties().unwrap();
    assert_eq!(props.get("home"), Some("/site/site-b/home"));
    assert_eq!(props.get("plain"), Some("x"));

    let copy_id = copy.id().to_owned();
    let tools = copy.tools().unwrap();
    assert_eq!(tools.len(), 1);
    let tool = tools.get(0).unwrap();
    assert_ne!(tool.id(), "t1");
    assert_eq!(tool.page_id(), copy_id);
    assert_eq!(tool.registration_id(), Some("sakai.web"));
    assert_eq!(tool.layout_hints(), Some("0,1"));
    assert_eq!(
        tool.loaded_properties().and_then(|p| p.get("source")),
        Some("https://lms/site/site-b/web")
    );
}

#[test]
fn copies_are_independent_of_the_source() {
    let storage = storage();
    let mut source = stored_page(&storage);
    let site = source.site().clone();
    let mut copy = PageNode::clone_exact(&mut source, site).unwrap();

    copy.properties().unwrap().add_property("plain", "changed");
    copy.add_tool().unwrap();

    assert_eq!(source.properties().unwrap().get("plain"), Some("x"));
    assert_eq!(source.tools().unwrap().len(), 1);
    assert_ne!(copy, source);
}

#[test]
fn copying_loads_the_source_once() {
    let storage = storage();
    let mut source = stored_page(&storage);
    PageNode::clone_exact(&mut source, SiteLink::default()).unwrap();
    PageNode::clone_replacing_site(&mut source, SiteLink::default()).unwrap();

    assert_eq!(storage.reads("page_properties"), 1);
    assert_eq!(storage.reads("page_tools"), 1);
    assert_eq!(storage.reads("tool_properties"), 1);
}
