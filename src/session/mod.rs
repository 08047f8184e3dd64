// src/session/mod.rs
pub mod state;

use reqwest::Client;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;
use crate::export::Report;
use crate::fetch::{self, FetchError, Source};
use crate::process::{validate, CleanTable, RawTable, ValidationError};

pub use state::SessionState;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Outcome of a load that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded { rows: usize, dropped: usize },
    /// The sheet had no data rows; nothing was validated or replaced.
    Empty,
}

/// One user's interaction: who they are and the last table they loaded.
#[derive(Debug, Clone)]
pub struct Session {
    name: String,
    club: String,
    table: Option<CleanTable>,
}

impl Session {
    pub fn new(name: impl Into<String>, club: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            club: club.into(),
            table: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn club(&self) -> &str {
        &self.club
    }

    pub fn table(&self) -> Option<&CleanTable> {
        self.table.as_ref()
    }

    pub fn state(&self) -> SessionState {
        match self.table {
            Some(_) => SessionState::Loaded,
            None => SessionState::AwaitingData,
        }
    }

    /// Validate `raw` and, on success, replace the session table wholesale.
    /// A rejected or empty sheet leaves the previous table in place.
    pub fn accept(&mut self, raw: &RawTable) -> Result<LoadStatus, ValidationError> {
        if raw.is_empty() {
            warn!("the file is empty or has no records");
            return Ok(LoadStatus::Empty);
        }
        let clean = validate(raw)?;
        let status = LoadStatus::Loaded {
            rows: clean.len(),
            dropped: raw.rows.len() - clean.len(),
        };
        self.table = Some(clean);
        info!(state = self.state().as_str(), ?status, "session table replaced");
        Ok(status)
    }

    /// Fetch, then [`accept`](Self::accept).
    pub async fn load(&mut self, client: &Client, source: &Source) -> Result<LoadStatus, LoadError> {
        let raw = fetch::load_source(client, source).await?;
        Ok(self.accept(&raw)?)
    }

    /// Build the report for the loaded table, if any.
    pub fn report(&self, config: &Config) -> Option<Report> {
        let table = self.table.as_ref()?;
        Some(Report::build(&self.name, &self.club, table, config))
    }
}
