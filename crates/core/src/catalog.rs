use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::models::Destination;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog has no destinations")]
    Empty,

    #[error("destination #{index} has a blank name")]
    BlankName { index: usize },

    #[error("destination '{0}' appears more than once")]
    DuplicateName(String),

    #[error("destination '{0}' must have a positive cost_per_day")]
    NonPositiveCost(String),
}

/// Read-only, non-empty list of destinations. The first record is the
/// matching fallback.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    destinations: Vec<Destination>,
}

impl Catalog {
    pub fn new(destinations: Vec<Destination>) -> Result<Self, CatalogError> {
        if destinations.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for (index, destination) in destinations.iter().enumerate() {
            let name = destination.name.trim();
            if name.is_empty() {
                return Err(CatalogError::BlankName { index });
            }
            if !seen.insert(name.to_lowercase()) {
                return Err(CatalogError::DuplicateName(name.to_string()));
            }
            if destination.cost_per_day == 0 {
                return Err(CatalogError::NonPositiveCost(name.to_string()));
            }
        }

        Ok(Self { destinations })
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let destinations: Vec<Destination> = serde_json::from_str(raw)?;
        Self::new(destinations)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Built-in catalog, or the JSON file at `path` when one is given.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Ok(Self::builtin()),
        }
    }

    pub fn builtin() -> Self {
        Self {
            destinations: vec![
                destination(
                    "Delhi",
                    &[
                        "Visit Red Fort",
                        "Explore Qutub Minar",
                        "Stroll in Humayun's Tomb",
                    ],
                    &["Dine at Connaught Place", "Night bazaar at Chandni Chowk"],
                    &["Hot air balloon ride (Delhi NCR)", "Kayaking at Yamuna"],
                    2500,
                    2,
                ),
                destination(
                    "Jaipur",
                    &[
                        "Tour the City Palace",
                        "Admire Hawa Mahal",
                        "Visit Amer Fort",
                    ],
                    &["Evening at Chokhi Dhani", "Lively markets of Johari Bazaar"],
                    &["Camel safari", "Elephant ride at Amer"],
                    2000,
                    2,
                ),
                destination(
                    "Goa",
                    &["Old Goa churches tour", "Portuguese heritage walk"],
                    &["Beach club party", "Night market at Arpora"],
                    &["Water sports at Baga", "Dudhsagar waterfall trek"],
                    3500,
                    3,
                ),
                destination(
                    "Kerala",
                    &["Fort Kochi heritage walk", "Kathakali performance"],
                    &["Houseboat stay with music", "Local food tour in Kochi"],
                    &["Periyar jungle safari", "Munnar hiking trails"],
                    3000,
                    3,
                ),
            ],
        }
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn first(&self) -> &Destination {
        &self.destinations[0]
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn destination(
    name: &str,
    heritage: &[&str],
    nightlife: &[&str],
    adventure: &[&str],
    cost_per_day: u64,
    base_days: u32,
) -> Destination {
    let owned = |items: &[&str]| items.iter().map(|item| item.to_string()).collect();
    Destination {
        name: name.to_string(),
        heritage: owned(heritage),
        nightlife: owned(nightlife),
        adventure: owned(adventure),
        cost_per_day,
        base_days,
    }
}
