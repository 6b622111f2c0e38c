mod args;
mod handlers;

use crate::args::{Cli, Commands};
use anyhow::Result;
use clap::Parser;
use portico::SiteServices;
use portico_kernel::config::load_config;
use portico_kernel::domain::config::PorticoConfig;
use portico_logger::{LevelFilter, Logger};
use std::io;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config: PorticoConfig = load_config(cli.config.as_deref())?;
    let mut logger = Logger::from_config(env!("CARGO_PKG_NAME"), &config.logging)?;
    if cli.verbose {
        logger = logger.level(LevelFilter::DEBUG);
    }
    let _logger = logger.init()?;

    let services = SiteServices::from_config(&config);
    let mut out = io::stdout().lock();

    match cli.command {
        Commands::Inspect { page } => {
            let mut node = handlers::load_page(&page.file, page.from_site.as_deref(), &services)?;
            handlers::inspect(&mut node, &mut out)?;
        },
        Commands::Normalize { page, output } => {
            let mut node = handlers::load_page(&page.file, page.from_site.as_deref(), &services)?;
            handlers::emit(&mut node, output.output.as_deref(), &mut out)?;
        },
        Commands::Copy { page, exact, site, output } => {
            let mut node = handlers::load_page(&page.file, page.from_site.as_deref(), &services)?;
            let mut copy = handlers::copy(&mut node, exact, site)?;
            handlers::emit(&mut copy, output.output.as_deref(), &mut out)?;
        },
        Commands::Layout { page, mode, output } => {
            let mut node = handlers::load_page(&page.file, page.from_site.as_deref(), &services)?;
            node.set_layout(mode);
            handlers::emit(&mut node, output.output.as_deref(), &mut out)?;
        },
    }

    Ok(())
}
