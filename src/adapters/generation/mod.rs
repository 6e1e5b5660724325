//! Text generation adapters.

pub mod chat_completions;
pub mod mock;

pub use chat_completions::ChatCompletionsGenerator;
pub use mock::{MockGenerator, MockReply};
