//! In-memory collaborators and fixtures for exercising the submission workflow in tests.
mod event_recorder;
mod fixtures;
mod mock_backend;
pub mod prepare_env;

pub use event_recorder::EventRecorder;
pub use fixtures::{sample_address, QuoteBuilder};
pub use mock_backend::{BackendCall, ConverterMethod, MockBackend};
