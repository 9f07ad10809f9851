use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use crate::models::Destination;

/// Errors that can occur when loading the destination catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate destination name: {0}")]
    DuplicateName(String),

    #[error("Invalid destination: {0}")]
    InvalidDestination(String),
}

/// Read-only, ordered collection of destinations
///
/// Loaded once at startup and shared between handlers. Names are unique
/// ignoring case.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    destinations: Vec<Destination>,
}

impl Catalog {
    /// Build a catalog, checking name uniqueness and basic field sanity
    pub fn new(destinations: Vec<Destination>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(destinations.len());

        for d in &destinations {
            let key = d.name.trim().to_lowercase();
            if key.is_empty() {
                return Err(CatalogError::InvalidDestination("destination with empty name".to_string()));
            }
            if !seen.insert(key) {
                return Err(CatalogError::DuplicateName(d.name.clone()));
            }
            if !d.avg_cost_per_day.is_finite() || d.avg_cost_per_day < 0.0 {
                return Err(CatalogError::InvalidDestination(format!(
                    "{}: average daily cost must be non-negative",
                    d.name
                )));
            }
            if let Some(range) = d.trip_duration {
                if range.min_days > range.max_days {
                    return Err(CatalogError::InvalidDestination(format!(
                        "{}: trip duration {}..{} is inverted",
                        d.name, range.min_days, range.max_days
                    )));
                }
            }
            if let Some(m) = d.best_months.iter().find(|m| !(1..=12).contains(*m)) {
                return Err(CatalogError::InvalidDestination(format!("{}: invalid month {}", d.name, m)));
            }
        }

        Ok(Self { destinations })
    }

    /// Parse a JSON array of destinations
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let destinations: Vec<Destination> = serde_json::from_str(json)?;
        Self::new(destinations)
    }

    /// Load a JSON catalog file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;

        if catalog.is_empty() {
            tracing::warn!("Destination catalog {} is empty", path.display());
        } else {
            tracing::info!("Loaded {} destinations from {}", catalog.len(), path.display());
        }

        Ok(catalog)
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn get(&self, name: &str) -> Option<&Destination> {
        let name = name.trim();
        self.destinations.iter().find(|d| d.name.eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }
}
