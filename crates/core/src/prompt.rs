//! Prompt rendering for symptom suggestions.
//!
//! The instruction text is fixed; only the symptom description varies, and it is inserted
//! verbatim after the instruction.

use mediassist_types::SymptomDescription;

/// Fixed instruction preceding the patient's symptom description.
pub const SUGGEST_CONDITIONS_INSTRUCTION: &str = "\
You are a medical expert. A patient will describe their symptoms to you.
Based on these symptoms, suggest a list of possible medical conditions they might have.
Respond with only a JSON array of strings naming those conditions, for example [\"Condition A\", \"Condition B\"].
Do not include any additional text, explanation or formatting.";

/// Label introducing the symptom description in the rendered prompt.
pub const SYMPTOMS_LABEL: &str = "Symptoms: ";

/// Render the full prompt for a symptom description.
pub fn render_suggest_conditions_prompt(symptoms: &SymptomDescription) -> String {
    let text = symptoms.as_str();
    let mut prompt =
        String::with_capacity(SUGGEST_CONDITIONS_INSTRUCTION.len() + SYMPTOMS_LABEL.len() + text.len() + 2);
    prompt.push_str(SUGGEST_CONDITIONS_INSTRUCTION);
    prompt.push_str("\n\n");
    prompt.push_str(SYMPTOMS_LABEL);
    prompt.push_str(text);
    prompt
}
