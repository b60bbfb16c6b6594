// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake container adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ContainerAdapter, ContainerError, ExecOutput};
use async_trait::async_trait;
use px_core::ResourceLimits;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Recorded container call
#[derive(Debug, Clone)]
pub enum ContainerCall {
    Version,
    ImageExists {
        image: String,
    },
    Pull {
        image: String,
    },
    Run {
        name: String,
        image: String,
        mount: Option<PathBuf>,
    },
    IsRunning {
        name: String,
    },
    CopyIn {
        name: String,
        src: PathBuf,
        dest: String,
    },
    Exec {
        name: String,
        command: Vec<String>,
        env: Vec<(String, String)>,
        timeout: Option<Duration>,
    },
    RemoveFile {
        name: String,
        path: String,
    },
    Stop {
        name: String,
    },
}

/// Fake container state
#[derive(Debug, Clone)]
struct FakeContainer {
    image: String,
    running: bool,
    files: Vec<String>,
}

/// Fake container adapter for testing
#[derive(Clone, Default)]
pub struct FakeContainerAdapter {
    containers: Arc<Mutex<HashMap<String, FakeContainer>>>,
    images: Arc<Mutex<Vec<String>>>,
    exec_results: Arc<Mutex<VecDeque<ExecOutput>>>,
    calls: Arc<Mutex<Vec<ContainerCall>>>,
    runtime_missing: Arc<Mutex<bool>>,
    fail_pull: Arc<Mutex<bool>>,
    fail_next_run: Arc<Mutex<Option<String>>>,
    lose_next_race: Arc<Mutex<bool>>,
}

impl FakeContainerAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<ContainerCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Make the image available locally without a pull
    pub fn add_image(&self, image: &str) {
        self.images
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(image.to_string());
    }

    /// Mark a container as already running
    pub fn set_running(&self, name: &str, image: &str) {
        self.containers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(
                name.to_string(),
                FakeContainer {
                    image: image.to_string(),
                    running: true,
                    files: Vec::new(),
                },
            );
    }

    /// Script the output of the next exec call (FIFO)
    pub fn push_exec(&self, output: ExecOutput) {
        self.exec_results
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(output);
    }

    /// Make version() report a missing runtime
    pub fn set_runtime_missing(&self) {
        *self.runtime_missing.lock().unwrap_or_else(|e| e.into_inner()) = true;
    }

    /// Make the next pull fail
    pub fn fail_pull(&self) {
        *self.fail_pull.lock().unwrap_or_else(|e| e.into_inner()) = true;
    }

    /// Make the next run() fail once with the given message
    pub fn fail_next_run(&self, message: &str) {
        *self.fail_next_run.lock().unwrap_or_else(|e| e.into_inner()) =
            Some(message.to_string());
    }

    /// Make the next run() lose a start race: it fails with a name
    /// conflict, but the container is running (another caller won)
    pub fn lose_next_run_race(&self) {
        *self.lose_next_race.lock().unwrap_or_else(|e| e.into_inner()) = true;
    }

    /// Files currently present in the container (copied in, not yet removed)
    pub fn files(&self, name: &str) -> Vec<String> {
        self.containers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(name)
            .map(|c| c.files.clone())
            .unwrap_or_default()
    }

    /// Image a container was started from
    pub fn container_image(&self, name: &str) -> Option<String> {
        self.containers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(name)
            .map(|c| c.image.clone())
    }

    /// Number of exec calls recorded
    pub fn exec_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|call| matches!(call, ContainerCall::Exec { .. }))
            .count()
    }
}

#[async_trait]
impl ContainerAdapter for FakeContainerAdapter {
    async fn version(&self) -> Result<String, ContainerError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(ContainerCall::Version);

        if *self.runtime_missing.lock().unwrap_or_else(|e| e.into_inner()) {
            return Err(ContainerError::RuntimeUnavailable(
                "docker: command not found".to_string(),
            ));
        }

        Ok("Docker version 0.0.0-fake".to_string())
    }

    async fn image_exists(&self, image: &str) -> Result<bool, ContainerError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(ContainerCall::ImageExists {
                image: image.to_string(),
            });

        let images = self.images.lock().unwrap_or_else(|e| e.into_inner());
        Ok(images.iter().any(|i| i == image))
    }

    async fn pull(&self, image: &str) -> Result<(), ContainerError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(ContainerCall::Pull {
                image: image.to_string(),
            });

        if *self.fail_pull.lock().unwrap_or_else(|e| e.into_inner()) {
            return Err(ContainerError::ImageNotFound(image.to_string()));
        }

        self.images
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(image.to_string());

        Ok(())
    }

    async fn run(
        &self,
        name: &str,
        image: &str,
        _limits: &ResourceLimits,
        mount: Option<&Path>,
    ) -> Result<String, ContainerError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(ContainerCall::Run {
                name: name.to_string(),
                image: image.to_string(),
                mount: mount.map(Path::to_path_buf),
            });

        if let Some(message) = self
            .fail_next_run
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
        {
            return Err(ContainerError::CommandFailed(message));
        }

        let lost_race = std::mem::take(
            &mut *self.lose_next_race.lock().unwrap_or_else(|e| e.into_inner()),
        );
        if lost_race {
            self.containers
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .insert(
                    name.to_string(),
                    FakeContainer {
                        image: image.to_string(),
                        running: true,
                        files: Vec::new(),
                    },
                );
            return Err(ContainerError::CommandFailed(format!(
                "Conflict. The container name \"/{name}\" is already in use"
            )));
        }

        {
            let images = self.images.lock().unwrap_or_else(|e| e.into_inner());
            if !images.iter().any(|i| i == image) {
                return Err(ContainerError::ImageNotFound(image.to_string()));
            }
        }

        self.containers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(
                name.to_string(),
                FakeContainer {
                    image: image.to_string(),
                    running: true,
                    files: Vec::new(),
                },
            );

        Ok(format!("id-{name}"))
    }

    async fn is_running(&self, name: &str) -> Result<bool, ContainerError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(ContainerCall::IsRunning {
                name: name.to_string(),
            });

        let containers = self.containers.lock().unwrap_or_else(|e| e.into_inner());
        Ok(containers.get(name).map(|c| c.running).unwrap_or(false))
    }

    async fn copy_in(&self, name: &str, src: &Path, dest: &str) -> Result<(), ContainerError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(ContainerCall::CopyIn {
                name: name.to_string(),
                src: src.to_path_buf(),
                dest: dest.to_string(),
            });

        let mut containers = self.containers.lock().unwrap_or_else(|e| e.into_inner());
        match containers.get_mut(name) {
            Some(container) if container.running => {
                container.files.push(dest.to_string());
                Ok(())
            }
            _ => Err(ContainerError::NotRunning(name.to_string())),
        }
    }

    async fn exec(
        &self,
        name: &str,
        command: &[&str],
        env: &[(String, String)],
        timeout: Option<Duration>,
    ) -> Result<ExecOutput, ContainerError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(ContainerCall::Exec {
                name: name.to_string(),
                command: command.iter().map(|s| s.to_string()).collect(),
                env: env.to_vec(),
                timeout,
            });

        {
            let containers = self.containers.lock().unwrap_or_else(|e| e.into_inner());
            let running = containers.get(name).map(|c| c.running).unwrap_or(false);
            if !running {
                return Err(ContainerError::NotRunning(name.to_string()));
            }
        }

        let scripted = self
            .exec_results
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();

        Ok(scripted.unwrap_or(ExecOutput {
            exit_code: Some(0),
            stdout: String::new(),
            stderr: String::new(),
            timed_out: false,
        }))
    }

    async fn remove_file(&self, name: &str, path: &str) -> Result<(), ContainerError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(ContainerCall::RemoveFile {
                name: name.to_string(),
                path: path.to_string(),
            });

        let mut containers = self.containers.lock().unwrap_or_else(|e| e.into_inner());
        match containers.get_mut(name) {
            Some(container) if container.running => {
                container.files.retain(|f| f != path);
                Ok(())
            }
            _ => Err(ContainerError::NotRunning(name.to_string())),
        }
    }

    async fn stop(&self, name: &str) -> Result<(), ContainerError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(ContainerCall::Stop {
                name: name.to_string(),
            });

        let mut containers = self.containers.lock().unwrap_or_else(|e| e.into_inner());
        match containers.get_mut(name) {
            Some(container) => {
                container.running = false;
                Ok(())
            }
            None => Err(ContainerError::NotRunning(name.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
