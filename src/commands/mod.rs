pub mod completions;
pub mod create;

pub use completions::CompletionsCommand;
pub use create::{AwsSessionCommand, CreateCommand, CreateProvider};
