pub mod catalog;
pub mod input;
pub mod models;
pub mod planner;
pub mod render;

pub use catalog::{Catalog, CatalogError};
pub use input::{normalize_query, parse_budget, parse_day_count, parse_preferences};
pub use models::*;
pub use planner::{
    check_budget, estimate_cost, generate_itinerary, match_destination, select_activities,
    FREE_EXPLORATION,
};
pub use render::{escape_html, format_rupees, render_html, render_text};
