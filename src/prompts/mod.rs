pub mod builder;
pub mod loader;
pub mod templates;

pub use builder::PromptBuilder;
pub use loader::PromptLoader;
