mod chat_completion;

pub use chat_completion::{
    ChatCompletion, ChatCompletionError, ChatMessage, ChatRequest, OpenAiClient,
};
