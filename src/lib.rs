pub mod discovery;
pub mod orchestration;
pub mod profiles;
pub mod render;
pub mod resolver;
pub mod settings;
pub mod tenant;
pub mod view;

// Re-export commonly used types for convenience.
pub use orchestration::{select_stack, InspectionOutcome, SelectError, SelectionOutcome};
pub use profiles::{LoadError, LoadReport, LoadWarning, ProfileRecord, ProfileSource, ProfileStore};
pub use resolver::{resolve, Resolution, ResolveError, ResolveWarning, DEFAULT_DEPLOYMENT_TYPE};
pub use tenant::{TenantConfig, TenantConfigError};
