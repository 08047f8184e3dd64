// src/fetch/mod.rs
//! Getting a training sheet into a `RawTable`: from a Google Drive share link
//! or from a local `.xlsx` / `.csv` file.

pub mod download;
pub mod urls;
pub mod workbook;

use reqwest::Client;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

use crate::process::RawTable;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("the link is not valid or has no Google Drive file id: {0}")]
    InvalidLink(String),

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("could not read the XLSX workbook: {0}")]
    Workbook(#[from] calamine::XlsxError),

    #[error("the workbook has no worksheets")]
    NoSheets,

    #[error("could not read the CSV file: {0}")]
    Csv(#[from] csv::Error),

    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file type: {0} (expected .xlsx or .csv)")]
    UnsupportedFormat(String),
}

/// Where a sheet comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    ShareLink(String),
    LocalFile(PathBuf),
}

impl Source {
    /// `http(s)://…` is a share link; anything else is a local path.
    pub fn parse(arg: &str) -> Self {
        let trimmed = arg.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Source::ShareLink(trimmed.to_string())
        } else {
            Source::LocalFile(PathBuf::from(trimmed))
        }
    }
}

/// Fetch and decode a sheet.
#[tracing::instrument(level = "info", skip(client))]
pub async fn load_source(client: &Client, source: &Source) -> Result<RawTable, FetchError> {
    let table = match source {
        Source::ShareLink(link) => {
            let url = urls::download_url(link)?;
            let bytes = download::download_bytes(client, &url).await?;
            info!(bytes = bytes.len(), "downloaded workbook");
            workbook::read_xlsx_bytes(&bytes)?
        }
        Source::LocalFile(path) => workbook::read_path(path)?,
    };
    info!(
        rows = table.rows.len(),
        columns = table.column_count(),
        "loaded sheet"
    );
    Ok(table)
}
