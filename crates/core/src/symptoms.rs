//! Symptom-suggestion service.
//!
//! `symptoms -> prompt -> generation service -> validated condition list`
//!
//! The service is stateless: each call renders its own prompt, makes exactly one outbound call
//! and validates its own reply, so concurrent calls never share anything but the client.

use crate::generation::GenerationClient;
use crate::prompt::render_suggest_conditions_prompt;
use crate::validation::validate_condition_list;
use crate::{AssistError, AssistResult};
use mediassist_types::SymptomDescription;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Request for condition suggestions.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuggestConditionsInput {
    /// A description of the symptoms the patient is experiencing.
    pub symptoms: String,
}

/// Validated reply: candidate conditions in the order the service returned them.
///
/// The order carries no ranking.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SuggestConditionsOutput {
    pub possible_conditions: Vec<String>,
}

#[derive(Clone)]
pub struct SymptomService {
    client: Arc<dyn GenerationClient>,
}

impl SymptomService {
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        Self { client }
    }

    /// Suggest possible conditions for a symptom description.
    ///
    /// # Errors
    /// - [`AssistError::InvalidInput`] if the description is empty or whitespace-only.
    /// - [`AssistError::TransportFailure`] if the generation call fails.
    /// - [`AssistError::SchemaMismatch`] if the reply is not a JSON array of non-empty strings.
    pub async fn suggest_possible_conditions(
        &self,
        input: SuggestConditionsInput,
    ) -> AssistResult<SuggestConditionsOutput> {
        let symptoms = SymptomDescription::new(input.symptoms)?;
        let prompt = render_suggest_conditions_prompt(&symptoms);

        tracing::info!(
            model = self.client.model(),
            symptom_chars = symptoms.char_count(),
            "requesting condition suggestions"
        );

        let completion = self.client.generate(&prompt).await?;

        let possible_conditions = validate_condition_list(&completion).map_err(|e| {
            tracing::warn!(model = self.client.model(), "rejected generation reply: {}", e);
            e
        })?;

        tracing::info!(
            conditions = possible_conditions.len(),
            "condition suggestions validated"
        );

        Ok(SuggestConditionsOutput {
            possible_conditions,
        })
    }

    /// Like [`Self::suggest_possible_conditions`], but first applies the symptom form's length
    /// policy.
    pub async fn suggest_from_form(
        &self,
        symptoms: String,
    ) -> AssistResult<SuggestConditionsOutput> {
        let checked = SymptomDescription::for_form(symptoms).map_err(AssistError::from)?;
        self.suggest_possible_conditions(SuggestConditionsInput {
            symptoms: checked.as_str().to_string(),
        })
        .await
    }
}
