use std::path::{Path, PathBuf};

use apprun_model::ResourceTopology;
use async_trait::async_trait;
use tracing::{info, instrument};

use super::{Platform, PlatformError, Submission};

/// Platform that renders the topology as a JSON manifest instead of provisioning it.
///
/// The manifest lands in `<out_dir>/<namespace>.topology.json`. Secret payloads are
/// redacted, and the service URL is returned with its platform token unresolved.
#[derive(Debug, Clone)]
pub struct ManifestPlatform {
    out_dir: PathBuf,
}

impl ManifestPlatform {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Path the manifest of `namespace` is written to.
    ///
    /// Bytes outside `[A-Za-z0-9._-]` are written as `%XX`, so distinct namespaces
    /// never share a file.
    pub fn manifest_path(&self, namespace: &str) -> PathBuf {
        let mut file = String::with_capacity(namespace.len());
        for b in namespace.bytes() {
            match b {
                b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' | b'.' => {
                    file.push(char::from(b))
                }
                _ => file.push_str(&format!("%{b:02X}")),
            }
        }
        self.out_dir.join(format!("{file}.topology.json"))
    }
}

#[async_trait]
impl Platform for ManifestPlatform {
    fn name(&self) -> &'static str {
        "manifest"
    }

    #[instrument(level = "debug", skip_all, fields(namespace = %topology.namespace))]
    async fn submit(&self, topology: &ResourceTopology) -> Result<Submission, PlatformError> {
        let service_url = topology
            .output()
            .ok_or_else(|| PlatformError::Rejected("topology has no output".into()))?
            .to_string();

        let body = serde_json::to_vec_pretty(topology)?;
        let path = self.manifest_path(&topology.namespace);

        tokio::fs::create_dir_all(self.out_dir()).await?;
        tokio::fs::write(&path, body).await?;

        info!(path = %path.display(), directives = topology.len(), "manifest written");
        Ok(Submission { service_url })
    }
}
