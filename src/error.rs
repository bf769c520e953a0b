use thiserror::Error;

/// Failure of the HTTP transport itself, before any status was received.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error(transparent)]
    Ureq(#[from] Box<ureq::Transport>),
    #[error("{0}")]
    Other(String),
}

/// Failure to turn one table row into an [`InstanceType`](crate::InstanceType).
#[derive(Debug, Error, PartialEq)]
pub enum RowError {
    #[error("expected {expected} columns, got {actual}")]
    ColumnCountMismatch { expected: usize, actual: usize },
    #[error("expected number for {field}, got '{text}'")]
    NumericParse { field: &'static str, text: String },
    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },
}

/// Every way a catalog fetch can fail. None of them leave a partial catalog
/// behind.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("request to {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: TransportError,
    },
    #[error("bad response from {url}: status {code}")]
    BadStatus { url: String, code: u16 },
    #[error("could not parse document: {reason}")]
    DocumentParse { reason: String },
    #[error("no node with id '{anchor}'")]
    AnchorNotFound { anchor: String },
    #[error("malformed HTML: no 'section title-wrapper' ancestor of '{anchor}'")]
    SectionHeaderNotFound { anchor: String },
    #[error("malformed HTML: no 'section table-wrapper' after header of '{anchor}'")]
    TableWrapperNotFound { anchor: String },
    #[error("malformed HTML: table has {rows} rows, need at least {min}")]
    TableTooSmall { rows: usize, min: usize },
    #[error("data row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: RowError,
    },
}
