pub mod events;
pub mod importer;
pub mod orchestrator;
pub mod renderer;
pub mod service;

pub use events::*;
pub use importer::*;
pub use orchestrator::*;
pub use renderer::*;
pub use service::*;
