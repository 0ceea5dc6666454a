pub mod classify;
pub mod config;
pub mod deploy;
pub mod error;
pub mod platform;
pub mod topology;

pub use classify::classify;
pub use config::DeployConfig;
pub use deploy::{Deployer, resolve};
pub use error::{CoreError, CoreResult};
pub use platform::{ManifestPlatform, Platform, PlatformError, Submission};
pub use topology::TopologyBuilder;

pub mod prelude {
    pub use crate::classify::classify;
    pub use crate::config::DeployConfig;
    pub use crate::deploy::{Deployer, resolve};
    pub use crate::error::CoreError;
    pub use crate::platform::{Platform, PlatformError, Submission};
    pub use crate::topology::TopologyBuilder;
}
