pub mod composer;
pub mod policy;
pub mod request;

pub use composer::RandomComposer;
pub use policy::{PromptGenerator, PromptSource};
pub use request::{GenerationRequest, GenerationResult};
