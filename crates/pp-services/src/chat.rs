//! Chat panel: the conversational front end of background generation.
//!
//! Keeps the transcript and turns one prompt into one generation run.
//! Every failure ends up as a bot message; nothing here can touch the
//! scene, which only changes when the caller applies the returned
//! [`GenerationOutcome::Background`].

use crate::credits::{CreditGate, GENERATION_COST};
use crate::error::{ServiceError, ServiceResult};
use crate::generation::{
    CancelSignal, DEFAULT_MODEL, GenerationRequest, GenerationService, PollConfig, PollOutcome,
    candidates, poll_until_done,
};
use pp_core::model::ImageSrc;
use serde::Serialize;

pub const GREETING: &str =
    "Hi! I am your AI assistant. What background can I create for your product photo?";

pub const QUICK_PROMPTS: [&str; 4] = [
    "Soft morning light",
    "Minimal shadow play",
    "Spa marble backdrop",
    "Botanical studio set",
];

const INVALID_FORMAT_HINT: &str = "The generator could not read the reference image. Make sure it is a PNG or JPEG reachable from the internet.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub thumbnails: Vec<String>,
}

impl ChatMessage {
    fn user(text: &str) -> Self {
        Self {
            sender: Sender::User,
            text: text.to_string(),
            thumbnails: Vec::new(),
        }
    }

    fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
            thumbnails: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// Apply this as the new scene background.
    Background(ImageSrc),
    /// Not enough credits; nothing was sent.
    Denied,
    /// Empty prompt; nothing was sent.
    Ignored,
    Failed(String),
    /// The view went away; drop the result.
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    model: String,
    poll: PollConfig,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::bot(GREETING)],
            model: DEFAULT_MODEL.to_string(),
            poll: PollConfig::default(),
        }
    }

    pub fn with_poll_config(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }

    pub fn set_model(&mut self, model: impl Into<String>) {
        self.model = model.into();
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Quick prompts are offered until the user says anything.
    pub fn show_quick_prompts(&self) -> bool {
        matches!(self.messages.as_slice(), [only] if only.sender == Sender::Bot)
    }

    /// The prompt chips to render under the transcript.
    pub fn quick_prompts(&self) -> &'static [&'static str] {
        if self.show_quick_prompts() {
            &QUICK_PROMPTS
        } else {
            &[]
        }
    }

    /// Run one prompt through the generator.
    ///
    /// `reference_png` is the 1× stage snapshot; `aspect_ratio` the active
    /// preset's reduced ratio.
    pub async fn generate(
        &mut self,
        service: &impl GenerationService,
        gate: &impl CreditGate,
        prompt: &str,
        reference_png: Vec<u8>,
        aspect_ratio: &str,
        cancel: &mut CancelSignal,
    ) -> GenerationOutcome {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return GenerationOutcome::Ignored;
        }
        self.messages.push(ChatMessage::user(prompt));

        if !gate.can_generate() {
            self.messages.push(ChatMessage::bot(format!(
                "You need at least {GENERATION_COST} credits to generate a background."
            )));
            return GenerationOutcome::Denied;
        }

        let result = run_generation(
            service,
            prompt,
            reference_png,
            aspect_ratio,
            &self.model,
            &self.poll,
            cancel,
        )
        .await;

        match result {
            Ok(PollOutcome::Cancelled) => {
                log::debug!("generation for '{prompt}' cancelled");
                GenerationOutcome::Cancelled
            }
            Ok(PollOutcome::Completed(urls)) => match urls.first() {
                Some(first) => {
                    let background = ImageSrc::new(first.as_str());
                    self.messages.push(ChatMessage {
                        sender: Sender::Bot,
                        text: format!("Here are some generated backgrounds for: \"{prompt}\""),
                        thumbnails: candidates(&urls),
                    });
                    GenerationOutcome::Background(background)
                }
                None => self.fail(ServiceError::NoResults),
            },
            Err(e) => self.fail(e),
        }
    }

    fn fail(&mut self, error: ServiceError) -> GenerationOutcome {
        log::warn!("generation failed: {error}");
        let text = error.to_string();
        let mut message = format!("Sorry, something went wrong: {text}");
        if text.to_lowercase().contains("invalid image format") {
            message.push(' ');
            message.push_str(INVALID_FORMAT_HINT);
        }
        self.messages.push(ChatMessage::bot(message));
        GenerationOutcome::Failed(text)
    }
}

async fn run_generation(
    service: &impl GenerationService,
    prompt: &str,
    reference_png: Vec<u8>,
    aspect_ratio: &str,
    model: &str,
    poll: &PollConfig,
    cancel: &mut CancelSignal,
) -> ServiceResult<PollOutcome> {
    let reference_url = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Ok(PollOutcome::Cancelled),
        url = service.upload_reference(reference_png) => url?,
    };
    let request = GenerationRequest::new(prompt, reference_url, aspect_ratio).with_model(model);
    let task = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Ok(PollOutcome::Cancelled),
        task = service.create_task(&request) => task?,
    };
    log::debug!("generation task {task} created ({})", request.model);
    poll_until_done(service, &task, poll, cancel).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_greeting_and_quick_prompts() {
        let chat = ChatSession::new();
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].text, GREETING);
        assert!(chat.show_quick_prompts());
        assert_eq!(chat.quick_prompts(), &QUICK_PROMPTS);
    }

    #[test]
    fn hint_added_for_invalid_format() {
        let mut chat = ChatSession::new();
        let out = chat.fail(ServiceError::GenerationFailed("Invalid image format".into()));
        assert!(matches!(out, GenerationOutcome::Failed(_)));
        let last = chat.messages().last().unwrap();
        assert!(last.text.ends_with(INVALID_FORMAT_HINT));
        assert!(!chat.show_quick_prompts());
        assert!(chat.quick_prompts().is_empty());
    }
}
