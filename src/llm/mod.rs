use async_openai::{
    config::OpenAIConfig,
    types::{ChatCompletionRequestMessage, CreateChatCompletionRequest, Role},
    Chat,
};

use crate::{config::Config, error::ConfigError, error::GenerationFailure};

/// A backend that turns one prompt into one reply. Implementations never retry.
#[allow(async_fn_in_trait)]
pub trait TextGenerator {
    async fn generate(
        &self,
        prompt: &str,
        temperature: Option<f32>,
    ) -> Result<String, GenerationFailure>;
}

/// Any OpenAI-compatible chat completion endpoint.
pub struct OpenAiGenerator {
    client: async_openai::Client<OpenAIConfig>,
    model: String,
}

impl OpenAiGenerator {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let api_key = config
            .text_api_key
            .as_deref()
            .ok_or(ConfigError::Missing("GEMINI_API_KEY"))?;

        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(config.text_api_base.trim_end_matches('/'));

        Ok(OpenAiGenerator {
            client: async_openai::Client::with_config(openai_config),
            model: config.text_model.clone(),
        })
    }
}

impl TextGenerator for OpenAiGenerator {
    async fn generate(
        &self,
        prompt: &str,
        temperature: Option<f32>,
    ) -> Result<String, GenerationFailure> {
        if prompt.trim().is_empty() {
            return Err(GenerationFailure::EmptyPrompt);
        }

        let resp = Chat::new(&self.client)
            .create(CreateChatCompletionRequest {
                model: self.model.clone(),
                messages: vec![ChatCompletionRequestMessage {
                    role: Role::User,
                    content: prompt.to_owned(),
                    name: None,
                }],
                temperature,
                top_p: None,
                n: None,
                stream: None,
                stop: None,
                max_tokens: None,
                presence_penalty: None,
                frequency_penalty: None,
                logit_bias: None,
                user: None,
            })
            .await
            .map_err(|err| GenerationFailure::Backend(err.to_string()))?;

        let choice = resp
            .choices
            .into_iter()
            .next()
            .ok_or(GenerationFailure::NoChoices)?;

        non_empty(choice.message.content)
    }
}

fn non_empty(reply: String) -> Result<String, GenerationFailure> {
    let reply = reply.trim();

    if reply.is_empty() {
        Err(GenerationFailure::EmptyReply)
    } else {
        Ok(reply.to_owned())
    }
}
