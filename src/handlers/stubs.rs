// src/handlers/stubs.rs
// Inline handlers simple enough to be pure functions over the request.

use crate::nlp::EntitySet;

pub fn handle_navigation(entities: &EntitySet) -> String {
    match &entities.location {
        Some(location) => format!("Okay, setting up navigation to {}.", location),
        None => "Where would you like to navigate to?".to_string(),
    }
}

/// Keyed on the raw command text; warm keywords are checked first.
pub fn handle_temperature_change(text: &str) -> String {
    let lowered = text.to_lowercase();
    if ["warmer", "increase", "up"].iter().any(|kw| lowered.contains(kw)) {
        "Okay, making it a bit warmer in here.".to_string()
    } else if ["cooler", "decrease", "down"].iter().any(|kw| lowered.contains(kw)) {
        "Okay, cooling things down for you.".to_string()
    } else {
        "Adjusting the temperature.".to_string()
    }
}

pub fn handle_calling(entities: &EntitySet) -> String {
    match &entities.contact_name {
        Some(contact) => format!("Calling {} now...", contact),
        None => "Who would you like me to call?".to_string(),
    }
}
