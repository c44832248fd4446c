// ABOUTME: Roleplay prompt rendered for each agent model
// ABOUTME: Interpolates the profile into a fixed template consumed by the engine's language model

use mindgate_core::NOT_SPECIFIED;

use crate::types::AgentCreate;

const EVALUATION_INSTRUCTIONS: &str = "\
When presented with a marketing campaign, respond as this person would.
Evaluate the campaign based on your interests, needs, and preferences.
Explain why you would or would not be interested in the product or service.
Rate your likelihood to engage with this campaign on a scale of 1-10.
";

fn or_not_specified(value: Option<&str>) -> &str {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(NOT_SPECIFIED)
}

fn joined(items: &[String]) -> String {
    if items.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        items.join(", ")
    }
}

pub fn render_prompt(profile: &AgentCreate) -> String {
    let age = profile
        .age
        .map(|a| a.to_string())
        .unwrap_or_else(|| NOT_SPECIFIED.to_string());

    format!(
        "You are roleplaying as a person with the following characteristics:\n\n\
         Name: {name}\n\
         Age: {age}\n\
         Gender: {gender}\n\
         Occupation: {occupation}\n\
         Income Level: {income}\n\
         Education Level: {education}\n\
         Location: {location}\n\
         Interests: {interests}\n\
         Personality Traits: {traits}\n\
         Purchase Behaviors: {behaviors}\n\
         Purchase Frequency: {frequency}\n\
         Brand Loyalty (1-10): {loyalty}\n\
         Price Sensitivity (1-10): {price}\n\
         Tech Savviness (1-10): {tech}\n\n\
         {instructions}",
        name = profile.name,
        age = age,
        gender = or_not_specified(profile.gender.as_deref()),
        occupation = or_not_specified(profile.occupation.as_deref()),
        income = or_not_specified(profile.income_level.as_deref()),
        education = or_not_specified(profile.education_level.as_deref()),
        location = profile.location,
        interests = joined(&profile.interests),
        traits = joined(&profile.personality_traits),
        behaviors = joined(&profile.purchase_behaviors),
        frequency = profile.purchase_frequency,
        loyalty = profile.brand_loyalty,
        price = profile.price_sensitivity,
        tech = profile.tech_savviness,
        instructions = EVALUATION_INSTRUCTIONS,
    )
}
