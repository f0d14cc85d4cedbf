use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::catalog::Catalog;
use crate::input::normalize_query;
use crate::models::{
    BudgetCheck, CostEstimate, Destination, Itinerary, ItineraryEntry, MatchKind, PlanRequest,
    Preference,
};

pub const FREE_EXPLORATION: &str = "Free exploration";
pub const DEFAULT_PREFERENCE: Preference = Preference::Heritage;

pub fn match_destination<'a>(query: &str, catalog: &'a Catalog) -> (&'a Destination, MatchKind) {
    let needle = normalize_query(query).to_lowercase();
    let destinations = catalog.destinations();

    if let Some(found) = destinations
        .iter()
        .find(|d| d.name.to_lowercase() == needle)
    {
        return (found, MatchKind::Exact);
    }

    if let Some(found) = destinations
        .iter()
        .find(|d| d.name.to_lowercase().contains(&needle))
    {
        return (found, MatchKind::Partial);
    }

    (catalog.first(), MatchKind::Fallback)
}

/// Round-robin over `preferences`, one entry per day. Each preference keeps
/// its own cursor into the destination's list for that category.
pub fn select_activities(
    destination: &Destination,
    preferences: &[Preference],
    days: u32,
) -> Vec<ItineraryEntry> {
    let preferences = if preferences.is_empty() {
        &[DEFAULT_PREFERENCE][..]
    } else {
        preferences
    };

    let mut cursors: HashMap<Preference, usize> = HashMap::new();
    let mut plan = Vec::with_capacity(days as usize);

    for day in 0..days {
        let preference = preferences[day as usize % preferences.len()];
        let activities = destination.activities(preference);

        let activity = if activities.is_empty() {
            FREE_EXPLORATION.to_string()
        } else {
            let cursor = cursors.entry(preference).or_insert(0);
            let picked = activities[*cursor % activities.len()].clone();
            *cursor += 1;
            picked
        };

        plan.push(ItineraryEntry {
            day: day + 1,
            preference,
            activity,
        });
    }

    plan
}

/// `per_day = round(cost_per_day * (1 + 0.2 * max(count, 1)))`, computed in
/// integer fifths so the result never depends on float rounding.
pub fn estimate_cost(destination: &Destination, preference_count: usize, days: u32) -> CostEstimate {
    let weight = 5 + preference_count.max(1) as u64;
    let fifths = destination.cost_per_day.saturating_mul(weight);
    let per_day = fifths.saturating_mul(2).saturating_add(5) / 10;

    CostEstimate {
        per_day,
        total: per_day.saturating_mul(days as u64),
    }
}

pub fn check_budget(budget: Option<u64>, cost: &CostEstimate) -> Option<BudgetCheck> {
    let budget = budget.filter(|value| *value > 0)?;
    Some(BudgetCheck {
        budget,
        within_budget: cost.total <= budget,
        shortfall: cost.total.saturating_sub(budget),
    })
}

#[instrument(skip_all, fields(destination = %request.destination, days = request.days))]
pub fn generate_itinerary(request: &PlanRequest, catalog: &Catalog) -> Itinerary {
    let (destination, matched_by) = match_destination(&request.destination, catalog);
    debug!(matched = %destination.name, ?matched_by, "destination resolved");

    let days = select_activities(destination, &request.preferences, request.days);
    let cost = estimate_cost(destination, request.preferences.len(), request.days);
    let budget = check_budget(request.budget, &cost);

    Itinerary {
        destination: destination.name.clone(),
        matched_by,
        days,
        cost,
        budget,
    }
}
