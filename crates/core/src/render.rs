use std::fmt::Write as _;

use crate::models::Itinerary;

pub const MOCK_DATA_NOTE: &str = "This is a rough estimate using mock data. In a production system, costs would be fetched from live APIs (flights, hotels, experiences) and optimized using AI.";

/// Formats an amount with comma thousands separators, e.g. `₹8,400`.
pub fn format_rupees(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("₹{grouped}")
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn render_html(itinerary: &Itinerary) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<h2>Suggested itinerary for {}</h2>",
        escape_html(&itinerary.destination)
    );
    let _ = write!(
        html,
        "<p>Estimated total cost: <strong>{}</strong> ({} per day)</p>",
        format_rupees(itinerary.cost.total),
        format_rupees(itinerary.cost.per_day)
    );

    if let Some(budget) = itinerary.budget.filter(|b| !b.within_budget) {
        let _ = write!(
            html,
            "<p class=\"budget-warning\">Over your budget of {} by {}.</p>",
            format_rupees(budget.budget),
            format_rupees(budget.shortfall)
        );
    }

    html.push_str("<div class=\"itinerary\">");
    for entry in &itinerary.days {
        let _ = write!(
            html,
            "<div class=\"itinerary-day\"><h3>Day {}: {}</h3><p>{}</p></div>",
            entry.day,
            entry.preference.label(),
            escape_html(&entry.activity)
        );
    }
    html.push_str("</div>");

    let _ = write!(
        html,
        "<div class=\"cost-breakdown\"><p>{MOCK_DATA_NOTE}</p></div>"
    );
    html
}

pub fn render_text(itinerary: &Itinerary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Suggested itinerary for {}", itinerary.destination);
    let _ = writeln!(
        out,
        "Estimated total cost: {} ({} per day)",
        format_rupees(itinerary.cost.total),
        format_rupees(itinerary.cost.per_day)
    );
    if let Some(budget) = itinerary.budget.filter(|b| !b.within_budget) {
        let _ = writeln!(
            out,
            "Warning: over your budget of {} by {}",
            format_rupees(budget.budget),
            format_rupees(budget.shortfall)
        );
    }
    out.push('\n');
    for entry in &itinerary.days {
        let _ = writeln!(
            out,
            "Day {}: {} - {}",
            entry.day,
            entry.preference.label(),
            entry.activity
        );
    }
    out
}
