pub mod fixtures;

use fixtures::*;
use portico::{Element, PageNode, SiteLink, SiteServices};
use proptest::prelude::*;
use std::sync::Arc;

fn site() -> SiteLink {
    SiteLink::detached(Some("site-x".to_owned()), None)
}

#[test]
fn stored_page_round_trips() {
    let storage = Arc::new(
        MemoryStorage::default()
            .with_page_properties("p1", &[("sitePage.pageCategory", "calendar")])
            .with_tool("p1", tool_record("t1", "sakai.schedule", Some("0,1")))
            .with_tool("p1", tool_record("t2", "sakai.motd", None))
            .with_tool_properties("t2", &[("motd", "Welcome\nback & <enjoy>")]),
    );
    let services = services(&storage);
    let mut page =
        PageNode::reconstruct_detached(page_record("p1", "Week 1"), None, None, &services);
    page.set_popup(true);

    let xml = page.to_xml_string().unwrap();
    let mut parsed = PageNode::parse_xml(&xml, site(), &services).unwrap();

    assert_eq!(parsed, page);
    let motd = parsed.tool_mut("t2").unwrap().unwrap().properties().unwrap();
    assert_eq!(motd.get("motd"), Some("Welcome\nback & <enjoy>"));
    assert_eq!(parsed.to_xml_string().unwrap(), xml);
}

#[test]
fn document_shape() {
    let services = SiteServices::default();
    let mut page = PageNode::new(site(), &services);
    page.set_layout(1);
    page.add_tool_for("sakai.motd").unwrap().set_layout_hints(Some("1,0"));

    let root = page.to_xml().unwrap();
    assert_eq!(root.name(), "page");
    assert_eq!(root.attribute("id"), Some(page.id()));
    assert_eq!(root.attribute("title"), None);
    assert_eq!(root.attribute("layout"), Some("1"));
    assert_eq!(root.attribute("popup"), Some("false"));

    let names: Vec<&str> = root.children().iter().map(Element::name).collect();
    assert_eq!(names, ["properties", "tools"]);

    let tool = root.child("tools").and_then(|t| t.child("tool")).unwrap();
    assert_eq!(tool.attribute("toolId"), Some("sakai.motd"));
    assert_eq!(tool.attribute("layoutHints"), Some("1,0"));
    assert_eq!(tool.attribute("title"), None);
    assert!(tool.child("properties").is_some());
}

#[test]
fn blank_and_padded_fields_round_trip() {
    let storage = Arc::new(
        MemoryStorage::default()
            .with_tool("  p1 ", tool_record(" t1 ", " sakai.motd ", Some(""))),
    );
    let services = services(&storage);
    let mut page =
        PageNode::reconstruct_detached(page_record("  p1 ", "  Week 1 "), None, None, &services);
    page.add_tool_for(" sakai.rss ").unwrap().set_layout_hints(Some(""));
    page.add_tool_for("   ").unwrap().set_layout_hints(Some(" 0,1 "));

    let xml = page.to_xml_string().unwrap();
    let mut parsed = PageNode::parse_xml(&xml, site(), &services).unwrap();

    assert_eq!(parsed, page);
    assert_eq!(parsed.id(), "  p1 ");
    assert_eq!(parsed.title(), Some("Week 1"));
    let tools = parsed.tools().unwrap();
    assert_eq!(tools.get(0).unwrap().id(), " t1 ");
    assert_eq!(tools.get(0).unwrap().registration_id(), Some("sakai.motd"));
    assert_eq!(tools.get(0).unwrap().layout_hints(), None);
    assert_eq!(tools.get(1).unwrap().registration_id(), Some("sakai.rss"));
    assert_eq!(tools.get(2).unwrap().registration_id(), None);
    assert_eq!(tools.get(2).unwrap().layout_hints(), Some("0,1"));
}

#[derive(Debug, Clone)]
struct ToolSeed {
    registration: Option<String>,
    title: Option<String>,
    hints: Option<String>,
    properties: Vec<(String, String)>,
}

fn properties() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::btree_map("[a-zA-Z][a-zA-Z0-9._]{0,12}", any::<String>(), 0..5)
        .prop_map(|map| map.into_iter().collect())
}

fn title() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[ ]{0,2}[A-Za-z0-9 &<>\"']{0,14}[ ]{0,2}")
}

fn tool_seed() -> impl Strategy<Value = ToolSeed> {
    (
        prop::option::of("[ ]{0,2}(sakai\\.[a-z]{1,10})?[ ]{0,2}"),
        title(),
        prop::option::of("[ ]{0,2}(-?[0-9]{1,2},-?[0-9]{1,2})?[ ]{0,2}"),
        properties(),
    )
        .prop_map(|(registration, title, hints, properties)| ToolSeed {
            registration,
            title,
            hints,
            properties,
        })
}

proptest! {
    #[test]
    fn generated_pages_round_trip(
        page_title in title(),
        layout in 0..2i32,
        popup in any::<bool>(),
        page_properties in properties(),
        tools in prop::collection::vec(tool_seed(), 0..4)
    ) {
        let services = SiteServices::default();
        let mut page = PageNode::new(site(), &services);
        page.set_title(page_title.as_deref().unwrap_or_default());
        page.set_layout(layout);
        page.set_popup(popup);
        for (key, value) in &page_properties {
            page.properties().unwrap().add_property(key.as_str(), value.as_str());
        }
        for seed in &tools {
            let tool = page.add_tool().unwrap();
            if let Some(registration) = &seed.registration {
                tool.set_registration_id(registration.as_str());
            }
            tool.set_title(seed.title.as_deref().unwrap_or_default());
            tool.set_layout_hints(seed.hints.as_deref());
            for (key, value) in &seed.properties {
                tool.properties().unwrap().add_property(key.as_str(), value.as_str());
            }
        }

        let xml = page.to_xml_string().unwrap();
        let parsed = PageNode::parse_xml(&xml, site(), &services).unwrap();
        prop_assert_eq!(parsed, page);
    }
}
