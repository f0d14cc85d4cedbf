use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preference {
    Heritage,
    Nightlife,
    Adventure,
}

impl Preference {
    pub const ALL: [Preference; 3] = [Self::Heritage, Self::Nightlife, Self::Adventure];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "heritage" => Some(Self::Heritage),
            "nightlife" => Some(Self::Nightlife),
            "adventure" => Some(Self::Adventure),
            _ => None,
        }
    }

    pub fn as_tag(self) -> &'static str {
        match self {
            Self::Heritage => "heritage",
            Self::Nightlife => "nightlife",
            Self::Adventure => "adventure",
        }
    }

    /// Display label with the first letter capitalised, e.g. "Nightlife".
    pub fn label(self) -> &'static str {
        match self {
            Self::Heritage => "Heritage",
            Self::Nightlife => "Nightlife",
            Self::Adventure => "Adventure",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub name: String,
    #[serde(default)]
    pub heritage: Vec<String>,
    #[serde(default)]
    pub nightlife: Vec<String>,
    #[serde(default)]
    pub adventure: Vec<String>,
    pub cost_per_day: u64,
    #[serde(default)]
    pub base_days: u32,
}

impl Destination {
    pub fn activities(&self, preference: Preference) -> &[String] {
        match preference {
            Preference::Heritage => &self.heritage,
            Preference::Nightlife => &self.nightlife,
            Preference::Adventure => &self.adventure,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    Partial,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryEntry {
    pub day: u32,
    pub preference: Preference,
    pub activity: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub per_day: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetCheck {
    pub budget: u64,
    pub within_budget: bool,
    pub shortfall: u64,
}

/// Raw inputs of a "generate" action after trivial defaulting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub destination: String,
    pub days: u32,
    pub budget: Option<u64>,
    pub preferences: Vec<Preference>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Itinerary {
    pub destination: String,
    pub matched_by: MatchKind,
    pub days: Vec<ItineraryEntry>,
    pub cost: CostEstimate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<BudgetCheck>,
}

impl Itinerary {
    pub fn free_exploration_days(&self) -> usize {
        self.days
            .iter()
            .filter(|entry| entry.activity == crate::planner::FREE_EXPLORATION)
            .count()
    }
}
