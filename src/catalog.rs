use std::fmt;
use std::io::Read;

use crate::dom::search::{by_tag, find_all};
use crate::dom::Document;
use crate::downloader::{HttpResponse, Transport};
use crate::error::CatalogError;
use crate::instance::{parse_row, InstanceType};
use crate::locator::locate_table;
use crate::Config;

/// Header row plus at least two data rows.
pub const MIN_ROWS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Fetching,
    Parsing,
    LocatingSection,
    EnumeratingRows,
    ParsingRows,
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Scrapes the instance type matrix. Holds no state between fetches, so one
/// fetcher can be shared by concurrent callers.
pub struct CatalogFetcher<T> {
    config: Config,
    transport: T,
}

impl<T: Transport> CatalogFetcher<T> {
    pub fn new(config: Config, transport: T) -> Self {
        config.sanity_check();
        Self { config, transport }
    }

    /// Download the page and return every data row, in page order. Any
    /// failure aborts the whole fetch.
    pub fn fetch(&self) -> Result<Vec<InstanceType>, CatalogError> {
        let mut phase = Phase::Idle;
        let result = self.run(&mut phase);
        match &result {
            Ok(types) => log::info!("fetched {} instance types", types.len()),
            Err(e) => log::error!("catalog fetch failed while {}: {}", phase, e),
        }
        result
    }

    fn run(&self, phase: &mut Phase) -> Result<Vec<InstanceType>, CatalogError> {
        let url = &self.config.source_url;

        enter(phase, Phase::Fetching);
        let response = self.transport.get(url).map_err(|source| CatalogError::Fetch {
            url: url.clone(),
            source,
        })?;
        if !response.is_success() {
            return Err(CatalogError::BadStatus { url: url.clone(), code: response.status });
        }

        enter(phase, Phase::Parsing);
        let doc = Document::parse(&read_body(response)?);
        log::debug!("document has {} nodes", doc.node_count());

        enter(phase, Phase::LocatingSection);
        let table = locate_table(&doc, &self.config.anchor_id)?;

        enter(phase, Phase::EnumeratingRows);
        let rows = find_all(&doc, table, by_tag("tr"));
        if rows.len() < MIN_ROWS {
            return Err(CatalogError::TableTooSmall { rows: rows.len(), min: MIN_ROWS });
        }

        // First row is the column header.
        enter(phase, Phase::ParsingRows);
        let types = rows[1..]
            .iter()
            .enumerate()
            .map(|(i, &row)| {
                parse_row(&doc, row).map_err(|source| CatalogError::Row { row: i + 1, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        enter(phase, Phase::Done);
        Ok(types)
    }
}

fn enter(phase: &mut Phase, next: Phase) {
    log::debug!("{} -> {}", phase, next);
    *phase = next;
}

fn read_body(mut response: HttpResponse) -> Result<String, CatalogError> {
    let mut bytes = vec![];
    response
        .body
        .read_to_end(&mut bytes)
        .map_err(|e| CatalogError::DocumentParse { reason: format!("reading body: {}", e) })?;
    // Stray non-UTF-8 bytes are replaced rather than failing the page.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
