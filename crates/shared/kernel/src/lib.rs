//! Kernel utilities shared across the apps.
//! Keep this crate lightweight; it re-exports the domain models and hosts configuration loading.
//!
//! ## Config loading
//! ```rust,no_run
//! use portico_kernel::config::load_config;
//! use portico_kernel::domain::config::PorticoConfig;
//!
//! let cfg: PorticoConfig = load_config(Some("portico.toml")).unwrap_or_default();
//! println!("portal: {}", cfg.portal.url);
//! ```
pub mod config;

pub use portico_domain as domain;
