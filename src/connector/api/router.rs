use anyhow::Result;

use crate::cli::{default_port, Commands};

use super::container::ContainerConfig;
use super::controller::{HandleController, PushController};

pub struct Router<'a> {
    push_controller: PushController,
    handle_controller: HandleController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(config: &'a ContainerConfig) -> Self {
        Self {
            push_controller: PushController::new(config),
            handle_controller: HandleController::new(config),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Serve { host, port } => {
                self.push_controller
                    .serve(host, port.unwrap_or_else(default_port))
                    .await
            }
            Commands::Handle { file } => self.handle_controller.handle(file).await,
        }
    }
}
