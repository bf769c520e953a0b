mod catalog;
mod config;
mod downloader;
mod error;
mod instance;
mod locator;

pub mod dom;
pub mod util;

// (Re) Exports
pub use catalog::{CatalogFetcher, MIN_ROWS};
pub use config::{Config, DEFAULT_ANCHOR_ID, DEFAULT_SOURCE_URL};
pub use downloader::{default_transport, HttpResponse, RetryingTransport, Transport, UreqTransport};
pub use error::{CatalogError, RowError, TransportError};
pub use instance::{find_instance, parse_row, InstanceType, NUM_COLUMNS};
pub use locator::locate_table;

/// Scrape the instance type matrix using the default config and transport.
///
/// The EC2 API does not expose this information, so it is read off the
/// public instance types page.
pub fn fetch_catalog() -> Result<Vec<InstanceType>, CatalogError> {
    let config = Config::default();
    let transport = default_transport(&config);
    CatalogFetcher::new(config, transport).fetch()
}

pub fn fetch_catalog_with<T: Transport>(
    config: Config,
    transport: T,
) -> Result<Vec<InstanceType>, CatalogError> {
    CatalogFetcher::new(config, transport).fetch()
}
