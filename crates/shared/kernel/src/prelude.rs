//! Convenience re-exports used by feature slices and apps.

pub use crate::config::load_config;
pub use crate::safe_nanoid;
pub use crate::security::resource::ResourceGuard;
#[cfg(feature = "server")]
pub use crate::server::state::{ApiState, ApiStateError};
pub use dhub_domain::config::ApiConfig;
pub use dhub_domain::registry::{FeatureSlice, InitializedSlice};
