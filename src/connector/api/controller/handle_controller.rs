use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;

use super::super::{Container, ContainerConfig};

/// Processes a single envelope read from a file or stdin.
pub struct HandleController<'a> {
    config: &'a ContainerConfig,
}

impl<'a> HandleController<'a> {
    pub fn new(config: &'a ContainerConfig) -> Self {
        Self { config }
    }

    pub async fn handle(&self, file: Option<PathBuf>) -> Result<String> {
        let raw = match file {
            Some(path) => tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("failed to read envelope from {}", path.display()))?,
            None => {
                let mut buf = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut buf)
                    .await
                    .context("failed to read envelope from stdin")?;
                buf
            }
        };

        let container = Container::for_invocation(self.config)?;
        let ack = container.enrich_use_case().execute_raw(&raw).await?;

        Ok(ack)
    }
}
