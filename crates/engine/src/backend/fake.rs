// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted backend for orchestrator tests

use super::{BackendError, ExecutionBackend};
use async_trait::async_trait;
use px_core::{BackendKind, ExecutionRequest, ExecutionResult};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Fake execution backend with scripted results (FIFO).
///
/// Falls back to a clean success when the script runs out.
#[derive(Clone, Default)]
pub struct FakeBackend {
    results: Arc<Mutex<VecDeque<ExecutionResult>>>,
    runs: Arc<Mutex<Vec<String>>>,
    preflight_error: Arc<Mutex<Option<String>>>,
    fail_next_run: Arc<Mutex<bool>>,
    shutdowns: Arc<Mutex<usize>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the result of the next run call (FIFO)
    pub fn push_result(&self, result: ExecutionResult) {
        self.results
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(result);
    }

    /// Source code of every run call, in order
    pub fn runs(&self) -> Vec<String> {
        self.runs.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn run_count(&self) -> usize {
        self.runs.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Make preflight fail
    pub fn set_preflight_error(&self, message: &str) {
        *self.preflight_error.lock().unwrap_or_else(|e| e.into_inner()) =
            Some(message.to_string());
    }

    /// Make the next run() return a backend error instead of a result
    pub fn fail_next_run(&self) {
        *self.fail_next_run.lock().unwrap_or_else(|e| e.into_inner()) = true;
    }

    pub fn shutdown_count(&self) -> usize {
        *self.shutdowns.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl ExecutionBackend for FakeBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Local
    }

    async fn preflight(&self) -> Result<(), BackendError> {
        let scripted = self
            .preflight_error
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        match scripted {
            Some(message) => Err(BackendError::InterpreterUnavailable(message)),
            None => Ok(()),
        }
    }

    async fn run(&self, request: &ExecutionRequest) -> Result<ExecutionResult, BackendError> {
        self.runs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.code.clone());

        let failing = std::mem::take(
            &mut *self.fail_next_run.lock().unwrap_or_else(|e| e.into_inner()),
        );
        if failing {
            return Err(BackendError::InterpreterUnavailable(
                "scripted backend failure".to_string(),
            ));
        }

        let scripted = self
            .results
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();

        Ok(scripted.unwrap_or_else(|| {
            ExecutionResult::from_output(
                Some(0),
                String::new(),
                String::new(),
                Duration::from_millis(1),
            )
        }))
    }

    async fn shutdown(&self) -> Result<(), BackendError> {
        *self.shutdowns.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        Ok(())
    }
}
