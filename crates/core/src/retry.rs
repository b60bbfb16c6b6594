// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Retry bookkeeping for the execute loop.

use std::collections::HashSet;

/// Hard ceiling on execution attempts per run.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// State carried across execute attempts within a single run.
///
/// Two rules keep the loop finite: the attempt counter never exceeds
/// `max_attempts`, and a module is installed at most once per run no
/// matter how often stderr names it.
#[derive(Debug, Clone)]
pub struct RetryState {
    attempt: u32,
    max_attempts: u32,
    attempted_modules: HashSet<String>,
}

impl RetryState {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            // the first execution is attempt 1
            attempt: 1,
            max_attempts: max_attempts.max(1),
            attempted_modules: HashSet::new(),
        }
    }

    /// Attempt number of the execution currently running, 1-based.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Whether another execution may follow the current one.
    pub fn can_retry(&self) -> bool {
        self.attempt < self.max_attempts
    }

    /// Move on to the next attempt.
    pub fn next_attempt(&mut self) {
        self.attempt += 1;
    }

    /// Record a module as install-attempted. Returns false if it was
    /// already recorded, in which case the caller must not install again.
    pub fn record(&mut self, module: &str) -> bool {
        self.attempted_modules.insert(module.to_string())
    }

    pub fn attempted(&self, module: &str) -> bool {
        self.attempted_modules.contains(module)
    }

    /// Seed the attempted set, used for the initial install pass.
    pub fn record_all<'a>(&mut self, modules: impl IntoIterator<Item = &'a str>) {
        for module in modules {
            self.record(module);
        }
    }
}

impl Default for RetryState {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}
