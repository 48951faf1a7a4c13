pub mod traits;
pub mod types;

pub use traits::ModelProvider;
pub use types::ModelError;
