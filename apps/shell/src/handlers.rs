//! Subcommand implementations. Every handler writes its result to `out`.

use anyhow::{Context, Result};
use portico::{PageNode, SiteLink, SiteServices};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Reads and parses a page document, attaching it to `site_id` as a detached site.
///
/// # Errors
/// Returns an error if the file cannot be read or is not a valid page document.
pub fn load_page(path: &Path, site_id: Option<&str>, services: &SiteServices) -> Result<PageNode> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read page file {}", path.display()))?;
    let site = SiteLink::detached(site_id.map(str::to_owned), None);
    let page = PageNode::parse_xml(&text, site, services)
        .with_context(|| format!("Failed to parse page file {}", path.display()))?;
    info!(page_id = page.id(), path = %path.display(), "Page loaded");
    Ok(page)
}

/// Writes `page` as XML to `output`, or to `out` when no file is given.
///
/// # Errors
/// Returns an error if the page cannot be serialized or written.
pub fn emit(page: &mut PageNode, output: Option<&Path>, out: &mut impl Write) -> Result<()> {
    let xml = page.to_xml_string()?;
    match output {
        Some(path) => {
            fs::write(path, xml.as_bytes())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "Page written");
        },
        None => writeln!(out, "{xml}")?,
    }
    Ok(())
}

/// Prints the page header followed by one line per tool.
///
/// # Errors
/// Returns an error if writing to `out` fails.
pub fn inspect(page: &mut PageNode, out: &mut impl Write) -> Result<()> {
    writeln!(out, "page:   {}", page.id())?;
    writeln!(out, "title:  {}", page.title().unwrap_or("-"))?;
    writeln!(out, "layout: {}", page.layout_title())?;
    writeln!(out, "popup:  {}", page.is_popup())?;
    writeln!(out, "url:    {}", page.url())?;

    let properties = page.properties()?;
    writeln!(out, "properties: {}", properties.len())?;
    for (name, value) in properties.iter() {
        writeln!(out, "  {name} = {value}")?;
    }

    let tools = page.tools()?;
    writeln!(out, "tools: {}", tools.len())?;
    for (position, tool) in tools.iter().enumerate() {
        let column = tool.parse_layout_hints().map_or(0, |(_, col)| col);
        writeln!(
            out,
            "  {position}. {} [{}] \"{}\" column {column}",
            tool.id(),
            tool.registration_id().unwrap_or("-"),
            tool.display_title().unwrap_or_default(),
        )?;
    }
    Ok(())
}

/// Copies `page` onto `target_site`, exactly or under fresh ids.
///
/// # Errors
/// Returns an error if the copy fails.
pub fn copy(page: &mut PageNode, exact: bool, target_site: Option<String>) -> Result<PageNode> {
    if exact {
        let site = page.site().clone();
        return Ok(PageNode::clone_exact(page, site)?);
    }
    let site = SiteLink::detached(target_site, page.skin());
    Ok(PageNode::clone_replacing_site(page, site)?)
}
