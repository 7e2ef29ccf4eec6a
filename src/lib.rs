//! Smogon Contribution Scraper Library
//!
//! Fetches a user's CMS page from Smogon, pulls the embedded `react-data`
//! payload out of the HTML and turns its credits into a normalized report
//! with aggregate statistics.
//!
//! # Modules
//!
//! - `core`: Extraction and transform logic.
//! - `integrations`: Upstream HTTP access.
//! - `clock`: Injectable time source for report assembly.
//! - `cms_client`: Authenticated client for `/cms/user/<id>` pages.
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `extractor`: Username and payload extraction from HTML.
//! - `models`: Upstream and report data models.
//! - `parser`: Credit mapping and statistics.
//! - `report`: Console summary and JSON output.
//! - `scraper`: Fetch-and-parse facade.

pub mod core;
pub mod integrations;

// Re-export primary modules for shared use in tests and binaries
pub mod clock;
pub mod cms_client;
pub mod config;
pub mod errors;
pub mod extractor;
pub mod models;
pub mod parser;
pub mod report;
pub mod scraper;
