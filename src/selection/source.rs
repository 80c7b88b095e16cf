//! Access to the host text selection.

use async_trait::async_trait;
use log::debug;
use std::io::ErrorKind;
use std::time::Duration;
use tokio::process::Command;

use crate::errors::SelectionError;

/// A place the current text selection can be read from
#[async_trait]
pub trait SelectionSource: Send + Sync {
    /// Read the raw bytes of the current selection
    async fn read(&self) -> Result<Vec<u8>, SelectionError>;

    /// Drop the current selection so it is not read again
    async fn clear(&self) -> Result<(), SelectionError>;
}

/// Selection source backed by external commands such as `xsel`
#[derive(Debug, Clone)]
pub struct CommandSelectionSource {
    read_command: Vec<String>,
    clear_command: Vec<String>,
    timeout: Duration,
}

impl CommandSelectionSource {
    /// Create a source running `read_command` to read and `clear_command` to clear
    pub fn new(read_command: Vec<String>, clear_command: Vec<String>) -> Self {
        Self {
            read_command,
            clear_command,
            timeout: Duration::from_secs(2),
        }
    }

    /// Create a source from the selection section of the configuration
    pub fn from_config(config: &crate::app_config::SelectionConfig) -> Self {
        Self::new(config.read_command.clone(), config.clear_command.clone())
    }

    /// Override how long a command may run before it is abandoned
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn run(&self, command_line: &[String]) -> Result<Vec<u8>, SelectionError> {
        let (program, args) = command_line
            .split_first()
            .ok_or_else(|| SelectionError::InvalidCommand("empty command line".to_string()))?;

        let mut command = Command::new(program);
        command.args(args).kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) if e.kind() == ErrorKind::NotFound => {
                return Err(SelectionError::CommandNotFound(program.clone()));
            }
            Ok(Err(e)) => return Err(SelectionError::Io(e)),
            Err(_) => {
                return Err(SelectionError::CommandFailed {
                    status: format!("timeout after {:?}", self.timeout),
                    stderr: String::new(),
                });
            }
        };

        if !output.status.success() {
            return Err(SelectionError::CommandFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        debug!("{} returned {} bytes", program, output.stdout.len());
        Ok(output.stdout)
    }
}

impl Default for CommandSelectionSource {
    fn default() -> Self {
        Self::from_config(&crate::app_config::SelectionConfig::default())
    }
}

#[async_trait]
impl SelectionSource for CommandSelectionSource {
    async fn read(&self) -> Result<Vec<u8>, SelectionError> {
        self.run(&self.read_command).await
    }

    async fn clear(&self) -> Result<(), SelectionError> {
        self.run(&self.clear_command).await.map(|_| ())
    }
}
