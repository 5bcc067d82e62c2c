//! The shared findings store.
//!
//! Writes are cheap and never prune: [`FindingsStore::submit`] does a linear
//! scan for the key and either replaces in place or appends. Expiry and the
//! capacity bound are enforced by a compaction pass that runs at the start of
//! every read ([`FindingsStore::list`] and [`FindingsStore::stats`]), so no
//! background task is needed.

use std::{fmt, sync::Arc};

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    clock::{Clock, SystemClock},
    error::Result,
    finding::{Finding, FindingKey, SubmitFinding},
    stats::FindingStats,
};

/// Most findings held at any observation point.
pub const MAX_FINDINGS: usize = 100;

/// Lifetime of a finding in milliseconds. A finding whose age reaches this
/// value is expired.
pub const FINDING_TTL_MS: i64 = 15_000;

/// Capacity and expiry bounds for a [`FindingsStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreLimits {
    /// Upper bound on retained findings after compaction.
    pub max_findings: usize,
    /// Age at which a finding expires.
    pub ttl: Duration,
}

impl Default for StoreLimits {
    fn default() -> Self {
        Self {
            max_findings: MAX_FINDINGS,
            ttl: Duration::milliseconds(FINDING_TTL_MS),
        }
    }
}

/// Result of a successful submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// Key the finding was stored under.
    pub key: FindingKey,
    /// Raw store size right after the write, before any compaction.
    pub count: usize,
    /// Whether an existing finding with the same key was replaced.
    pub replaced: bool,
}

/// Live findings as of [`FindingsSnapshot::timestamp`], newest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FindingsSnapshot {
    /// Findings sorted by timestamp, most recent first.
    pub findings: Vec<Finding>,
    /// Number of entries in `findings`.
    pub count: usize,
    /// When the snapshot was taken.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

/// What a compaction pass removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Compaction {
    /// Findings dropped for having reached the TTL.
    pub expired: usize,
    /// Findings dropped to get back under the capacity bound.
    pub overflow: usize,
}

/// Bounded, time-expiring collection of findings.
///
/// All access goes through one mutex. No operation suspends or performs I/O
/// while holding it.
pub struct FindingsStore {
    findings: Mutex<Vec<Finding>>,
    limits: StoreLimits,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for FindingsStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FindingsStore")
            .field("len", &self.findings.lock().len())
            .field("limits", &self.limits)
            .field("clock", &self.clock)
            .finish()
    }
}

impl Default for FindingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FindingsStore {
    /// Empty store using the system clock and default limits.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Empty store with default limits reading time from `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self::with_limits(StoreLimits::default(), clock)
    }

    /// Empty store with explicit limits.
    pub fn with_limits(limits: StoreLimits, clock: Arc<dyn Clock>) -> Self {
        Self {
            findings: Mutex::new(Vec::new()),
            limits,
            clock,
        }
    }

    /// Limits this store enforces.
    pub fn limits(&self) -> StoreLimits {
        self.limits
    }

    /// Insert a finding, or replace the existing one with the same key.
    ///
    /// Validation runs before the lock is taken; a rejected submission leaves
    /// the store untouched.
    pub fn submit(&self, submission: SubmitFinding) -> Result<SubmitOutcome> {
        let finding = submission.into_finding(self.clock.now())?;
        let key = finding.key();

        let mut findings = self.findings.lock();
        let existing = findings
            .iter()
            .position(|entry| entry.matches(&key.job_id, &key.place_id));
        let replaced = match existing {
            Some(index) => {
                findings[index] = finding;
                true
            }
            None => {
                findings.push(finding);
                false
            }
        };
        let count = findings.len();
        drop(findings);

        debug!(
            job_id = %key.job_id,
            place_id = %key.place_id,
            replaced,
            count,
            "finding stored"
        );

        Ok(SubmitOutcome {
            key,
            count,
            replaced,
        })
    }

    /// Compact, then return the live findings newest first.
    ///
    /// Findings with equal timestamps keep their relative insertion order.
    pub fn list(&self) -> FindingsSnapshot {
        let now = self.clock.now();
        let mut live = {
            let mut findings = self.findings.lock();
            self.compact_locked(&mut findings, now);
            findings.clone()
        };

        live.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        FindingsSnapshot {
            count: live.len(),
            findings: live,
            timestamp: now,
        }
    }

    /// Compact, then aggregate over the live findings.
    pub fn stats(&self) -> FindingStats {
        let now = self.clock.now();
        let mut findings = self.findings.lock();
        self.compact_locked(&mut findings, now);
        FindingStats::from_findings(&findings)
    }

    /// Drop every finding. Returns how many were removed.
    pub fn clear(&self) -> usize {
        let removed = std::mem::take(&mut *self.findings.lock()).len();
        info!(removed, "findings cleared");
        removed
    }

    /// Raw number of stored findings, including any not yet compacted away.
    pub fn len(&self) -> usize {
        self.findings.lock().len()
    }

    /// Whether nothing is stored, compacted or not.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn compact_locked(&self, findings: &mut Vec<Finding>, now: DateTime<Utc>) {
        let report = compact(findings, now, self.limits);
        if report != Compaction::default() {
            debug!(
                expired = report.expired,
                overflow = report.overflow,
                remaining = findings.len(),
                "findings compacted"
            );
        }
    }
}

/// Remove expired findings, then trim the oldest until at most
/// `limits.max_findings` remain.
///
/// Trimming goes by timestamp, oldest first; findings sharing a timestamp are
/// dropped in insertion order. Survivors keep their relative order.
pub fn compact(
    findings: &mut Vec<Finding>,
    now: DateTime<Utc>,
    limits: StoreLimits,
) -> Compaction {
    let before = findings.len();
    findings.retain(|finding| {
        now.signed_duration_since(finding.timestamp) < limits.ttl
    });
    let expired = before - findings.len();

    let overflow = findings.len().saturating_sub(limits.max_findings);
    if overflow > 0 {
        let mut by_age: Vec<usize> = (0..findings.len()).collect();
        by_age.sort_by_key(|&index| findings[index].timestamp);

        let mut evict = vec![false; findings.len()];
        for &index in &by_age[..overflow] {
            evict[index] = true;
        }

        let mut position = 0;
        findings.retain(|_| {
            let keep = !evict[position];
            position += 1;
            keep
        });
    }

    Compaction { expired, overflow }
}
