/*
    Lookbook - page layout editor and exporter
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

//! One-shot startup wait for script-loaded collaborators.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 50,
            interval: Duration::from_millis(100),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Pending,
    Ready,
    Unavailable { attempts: u32 },
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready)
    }
}

/// Probes once immediately, then once per interval until the policy runs out.
pub async fn await_ready<P, PF, S, SF>(
    name: &str,
    mut probe: P,
    mut sleep: S,
    policy: RetryPolicy,
) -> Readiness
where
    P: FnMut() -> PF,
    PF: Future<Output = bool>,
    S: FnMut(Duration) -> SF,
    SF: Future<Output = ()>,
{
    if probe().await {
        debug!(collaborator = name, "ready immediately");
        return Readiness::Ready;
    }
    for attempt in 1..=policy.attempts {
        sleep(policy.interval).await;
        if probe().await {
            debug!(collaborator = name, attempt, "ready");
            return Readiness::Ready;
        }
    }
    warn!(collaborator = name, attempts = policy.attempts, "failed to load");
    Readiness::Unavailable {
        attempts: policy.attempts,
    }
}
