use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use apprun_core::{DeployConfig, Deployer, ManifestPlatform};
use apprun_observe::{LoggerConfig, init_logger};

const ENV_OUT_DIR: &str = "APPRUN_OUT_DIR";
const DEFAULT_OUT_DIR: &str = "apprun.out";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // 1) logger
    let cfg = LoggerConfig::from_lookup(|key| std::env::var(key).ok())?;
    init_logger(&cfg)?;
    info!(format = %cfg.format, level = cfg.level.as_str(), "logger initialized");

    // 2) inputs
    let (raw, settings) = DeployConfig::from_env()
        .into_inputs()
        .context("invalid deployment configuration")?;
    if raw.is_empty() {
        warn!("environment bundle is empty, deploying with fixed variables only");
    }

    // 3) platform
    let out_dir = std::env::var(ENV_OUT_DIR)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_OUT_DIR.to_string());
    let platform = ManifestPlatform::new(out_dir);
    info!(out_dir = %platform.out_dir().display(), "manifest platform ready");
    let deployer = Deployer::new(Arc::new(platform));

    // 4) resolve + submit
    let submission = deployer
        .deploy(&raw, &settings)
        .await
        .with_context(|| format!("deployment of {:?} failed", settings.namespace))?;

    info!(platform = deployer.platform().name(), "done");
    println!("{}", submission.service_url);
    Ok(())
}
