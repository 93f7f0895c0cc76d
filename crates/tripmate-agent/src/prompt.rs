use crate::trip::TripRequest;

const CLOSING_INSTRUCTIONS: &str = "Include destination suggestions, daily itinerary, weather, \
visa guidance for Pakistani citizens, and travel tips.";

/// Builds the user turn sent to the model.
///
/// The hint clause sits between the two spaces around it, so an absent hint
/// leaves a double space before the description.
pub fn compose_prompt(request: &TripRequest) -> String {
    let hint_clause = match &request.hint {
        Some(hint) if !hint.is_empty() => format!("Prefer {}.", hint),
        _ => String::new(),
    };

    format!(
        "Plan a {}-day {} trip in {} with a {} budget. {} {} {}",
        request.days,
        request.category.label().to_lowercase(),
        request.month,
        request.budget.label().to_lowercase(),
        hint_clause,
        request.description,
        CLOSING_INSTRUCTIONS,
    )
}
