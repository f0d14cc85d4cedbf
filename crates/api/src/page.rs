use std::fmt::Write as _;

use wander_core::{escape_html, Preference};

/// Raw field values of the generate form, echoed back into the page.
#[derive(Debug, Clone, Default)]
pub struct GenerateForm {
    pub destination: String,
    pub days: String,
    pub budget: String,
    pub preferences: Vec<String>,
}

impl GenerateForm {
    pub fn from_urlencoded(body: &[u8]) -> Self {
        let mut form = Self::default();
        for (key, value) in url::form_urlencoded::parse(body) {
            match key.as_ref() {
                "dest" | "destination" => form.destination = value.into_owned(),
                "days" => form.days = value.into_owned(),
                "budget" => form.budget = value.into_owned(),
                "pref" => form.preferences.push(value.into_owned()),
                _ => {}
            }
        }
        form
    }

    fn is_checked(&self, preference: Preference) -> bool {
        self.preferences
            .iter()
            .any(|tag| Preference::parse(tag) == Some(preference))
    }
}

pub fn render_page(form: &GenerateForm, output: Option<&str>) -> String {
    let mut html = String::from(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>WanderNow Itinerary Planner</title><style>\
         body{font-family:sans-serif;max-width:720px;margin:2rem auto;padding:0 1rem}\
         label{display:block;margin:.5rem 0}\
         .itinerary-day{border-left:4px solid #2a7;padding-left:.75rem;margin:1rem 0}\
         .budget-warning{color:#b33}\
         .cost-breakdown{font-size:.85rem;color:#555}\
         </style></head><body><h1>WanderNow</h1>",
    );

    let days = if form.days.is_empty() { "3" } else { form.days.as_str() };
    let _ = write!(
        html,
        "<form method=\"post\" action=\"/generate\">\
         <label>Destination <input id=\"dest\" name=\"dest\" value=\"{}\" placeholder=\"Jaipur\"></label>\
         <label>Days <input id=\"days\" name=\"days\" type=\"number\" min=\"0\" value=\"{}\"></label>\
         <label>Budget (₹) <input id=\"budget\" name=\"budget\" type=\"number\" min=\"0\" value=\"{}\"></label>\
         <fieldset><legend>Interests</legend>",
        escape_html(&form.destination),
        escape_html(days),
        escape_html(&form.budget)
    );

    for preference in Preference::ALL {
        let _ = write!(
            html,
            "<label><input type=\"checkbox\" name=\"pref\" value=\"{}\"{}> {}</label>",
            preference.as_tag(),
            if form.is_checked(preference) { " checked" } else { "" },
            preference.label()
        );
    }

    html.push_str(
        "</fieldset><button id=\"generateBtn\" type=\"submit\">Generate itinerary</button></form>",
    );

    match output {
        Some(fragment) => {
            let _ = write!(html, "<section id=\"output\">{fragment}</section>");
        }
        None => html.push_str("<section id=\"output\" class=\"hidden\"></section>"),
    }

    html.push_str("</body></html>");
    html
}
