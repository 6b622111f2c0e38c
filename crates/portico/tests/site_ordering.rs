pub mod fixtures;

use fixtures::*;
use portico::{PageNode, SiteContainer, SiteLink, SiteOutline};
use std::sync::Arc;

fn site_with_pages(ids: &[&str]) -> (Arc<SiteOutline>, Vec<PageNode>) {
    let storage = Arc::new(MemoryStorage::default());
    let services = services(&storage);
    let site = Arc::new(SiteOutline::new("s1").with_skin("morpheus").with_site_type("course"));
    let pages = ids
        .iter()
        .map(|id| {
            site.register_page(*id).unwrap();
            PageNode::reconstruct(&site, page_record(id, id), &services)
        })
        .collect();
    (site, pages)
}

#[test]
fn pages_reorder_through_their_site() {
    let (site, pages) = site_with_pages(&["a", "b", "c"]);

    pages[0].move_up();
    pages[2].move_down();
    assert_eq!(site.page_ids(), ["a", "b", "c"]);

    pages[2].move_up();
    assert_eq!(pages[2].position(), Some(1));
    pages[0].set_position(99);
    assert_eq!(site.page_ids(), ["c", "b", "a"]);
    pages[0].move_down();
    assert_eq!(pages[0].position(), Some(2));
}

#[test]
fn live_site_supplies_identity() {
    let (site, pages) = site_with_pages(&["a"]);
    let page = &pages[0];

    assert_eq!(page.site_id().as_deref(), Some("s1"));
    assert_eq!(page.skin().as_deref(), Some("morpheus"));
    assert_eq!(page.url(), "https://lms.test/portal/site/s1/page/a");
    assert_eq!(page.containing_site().map(|s| s.id().to_owned()).as_deref(), Some("s1"));

    drop(site);
    assert_eq!(page.position(), None);
    assert!(page.containing_site().is_none());
}

#[test]
fn trait_object_site_attaches_pages() {
    let storage = Arc::new(MemoryStorage::default());
    let outline = SiteOutline::new("s2").with_site_type("project");
    outline.register_page("a").unwrap();
    outline.register_page("b").unwrap();
    let site: Arc<dyn SiteContainer> = Arc::new(outline);

    let link = SiteLink::attached_dyn(&site);
    let page = PageNode::reconstruct_linked(page_record("b", "B"), link, &services(&storage));
    assert_eq!(page.site_id().as_deref(), Some("s2"));
    assert_eq!(page.position(), Some(1));

    page.move_up();
    assert_eq!(site.page_position("b"), Some(0));
}
