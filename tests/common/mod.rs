use async_trait::async_trait;
use codetweak::core::CompletionBackend;
use codetweak::error::{TweakError, TweakResult};
use std::sync::Mutex;

/// One recorded backend invocation
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    Edit { input: String, instruction: String },
    Complete { prompt: String },
}

/// Completion backend that records calls and replays a scripted reply
pub struct MockBackend {
    calls: Mutex<Vec<MockCall>>,
    reply: Option<String>,
}

impl MockBackend {
    /// Backend that answers every call with `text`
    pub fn replying(text: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            reply: Some(text.to_string()),
        }
    }

    /// Backend that behaves like a response with zero choices
    pub fn empty() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            reply: None,
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    fn reply(&self) -> TweakResult<String> {
        self.reply
            .clone()
            .ok_or(TweakError::EmptyCompletion)
    }
}

#[async_trait]
impl CompletionBackend for MockBackend {
    async fn edit(&self, input: &str, instruction: &str) -> TweakResult<String> {
        self.calls.lock().unwrap().push(MockCall::Edit {
            input: input.to_string(),
            instruction: instruction.to_string(),
        });
        self.reply()
    }

    async fn complete(&self, prompt: &str) -> TweakResult<String> {
        self.calls.lock().unwrap().push(MockCall::Complete {
            prompt: prompt.to_string(),
        });
        self.reply()
    }
}
