//! Status aggregator.
//!
//! Tracks a severity per key and derives one aggregate severity for the
//! whole system.  Keys only ever live in one of two sets:
//!
//! ```text
//!   report_failure(k) ──▶ ┌──────────┐
//!   report_warning(k) ──▶ │ failures │  ∩  │ warnings │ = ∅
//!   report_normal(k)  ──▶ └──────────┘     └──────────┘
//!                               │                │
//!                 aggregate = Failure if any failure,
//!                             Warning if any warning,
//!                             Normal otherwise
//! ```
//!
//! ## Hooks
//!
//! Two kinds of hook can be registered:
//!
//! - **Aggregate** hooks (`on_failure`, `on_warning`, `on_normal`) fire on
//!   an *edge* of the aggregate level: only when a report moves the
//!   aggregate into that level.  Reporting a second failing key while one
//!   is already failing fires nothing.
//! - **Per-key** hooks (`on_new_failure`, `on_new_warning`) fire when a
//!   key enters the failure or warning set.  They receive the key.
//!
//! Within one report the per-key hook runs first, then at most one
//! aggregate hook.  Hooks run inline on the caller's thread and cannot
//! reach the aggregator while it dispatches.
//!
//! ## Hook failures
//!
//! Hooks return [`HookResult`].  An `Err` is logged and counted, a panic
//! is caught, logged and counted.  Neither stops the aggregator: the set
//! mutation is committed before any hook runs.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::panic::{self, AssertUnwindSafe};

use log::{debug, error, info, warn};

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Severity of a single key or of the aggregate.
///
/// Ordered so that `Failure > Warning > Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Normal,
    Warning,
    Failure,
}

impl Severity {
    /// Parse the lowercase wire name (`"normal"`, `"warning"`, `"failure"`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "normal" => Some(Self::Normal),
            "warning" => Some(Self::Warning),
            "failure" => Some(Self::Failure),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Warning => "warning",
            Self::Failure => "failure",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Hook types
// ---------------------------------------------------------------------------

/// Result returned by every hook.
pub type HookResult = anyhow::Result<()>;

/// Aggregate-level hook (no arguments).
pub type AggregateHook = Box<dyn FnMut() -> HookResult>;

/// Per-key hook, receives the key that changed.
pub type KeyHook<K> = Box<dyn FnMut(&K) -> HookResult>;

struct Hooks<K> {
    on_failure: AggregateHook,
    on_warning: AggregateHook,
    on_normal: AggregateHook,
    on_new_failure: KeyHook<K>,
    on_new_warning: KeyHook<K>,
}

fn noop() -> HookResult {
    Ok(())
}

fn noop_key<K>(_: &K) -> HookResult {
    Ok(())
}

impl<K: 'static> Default for Hooks<K> {
    fn default() -> Self {
        Self {
            on_failure: Box::new(noop),
            on_warning: Box::new(noop),
            on_normal: Box::new(noop),
            on_new_failure: Box::new(noop_key::<K>),
            on_new_warning: Box::new(noop_key::<K>),
        }
    }
}

/// Run a hook, isolating errors and panics.  Returns `false` if it failed.
fn run_hook(name: &'static str, hook: impl FnOnce() -> HookResult) -> bool {
    match panic::catch_unwind(AssertUnwindSafe(hook)) {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            warn!("{name} hook failed: {e:#}");
            false
        }
        Err(_) => {
            error!("{name} hook panicked");
            false
        }
    }
}

// ---------------------------------------------------------------------------
// StatusAggregator
// ---------------------------------------------------------------------------

/// Per-key status tracker with edge-triggered hooks.
pub struct StatusAggregator<K> {
    failures: HashSet<K>,
    warnings: HashSet<K>,
    hooks: Hooks<K>,
    hook_failures: u64,
}

impl<K> StatusAggregator<K>
where
    K: Eq + Hash + Clone + fmt::Debug + 'static,
{
    /// Empty aggregator with no-op hooks.
    pub fn new() -> Self {
        Self {
            failures: HashSet::new(),
            warnings: HashSet::new(),
            hooks: Hooks::default(),
            hook_failures: 0,
        }
    }

    // ── Hook registration ─────────────────────────────────────

    /// Called when the aggregate enters Failure.
    pub fn set_on_failure(&mut self, hook: impl FnMut() -> HookResult + 'static) {
        self.hooks.on_failure = Box::new(hook);
    }

    /// Called when the aggregate enters Warning.
    pub fn set_on_warning(&mut self, hook: impl FnMut() -> HookResult + 'static) {
        self.hooks.on_warning = Box::new(hook);
    }

    /// Called when the aggregate returns to Normal.
    pub fn set_on_normal(&mut self, hook: impl FnMut() -> HookResult + 'static) {
        self.hooks.on_normal = Box::new(hook);
    }

    /// Called when a key enters the failure set.
    pub fn set_on_new_failure(&mut self, hook: impl FnMut(&K) -> HookResult + 'static) {
        self.hooks.on_new_failure = Box::new(hook);
    }

    /// Called when a key enters the warning set.
    pub fn set_on_new_warning(&mut self, hook: impl FnMut(&K) -> HookResult + 'static) {
        self.hooks.on_new_warning = Box::new(hook);
    }

    // ── Reports ───────────────────────────────────────────────

    /// Mark `key` as failing.
    pub fn report_failure(&mut self, key: K) {
        self.observe(|this| {
            if this.failures.contains(&key) {
                return;
            }
            this.warnings.remove(&key);
            debug!("failure set: +{key:?}");
            this.failures.insert(key.clone());
            let hook = &mut this.hooks.on_new_failure;
            if !run_hook("on_new_failure", || hook(&key)) {
                this.hook_failures += 1;
            }
        });
    }

    /// Mark `key` as warning.  A failing key steps down to warning.
    pub fn report_warning(&mut self, key: K) {
        self.observe(|this| {
            if this.failures.remove(&key) {
                debug!("failure set: -{key:?}");
            }
            if this.warnings.contains(&key) {
                return;
            }
            debug!("warning set: +{key:?}");
            this.warnings.insert(key.clone());
            let hook = &mut this.hooks.on_new_warning;
            if !run_hook("on_new_warning", || hook(&key)) {
                this.hook_failures += 1;
            }
        });
    }

    /// Clear any status for `key`.  No-op for untracked keys.
    pub fn report_normal(&mut self, key: &K) {
        self.observe(|this| {
            let was_failure = this.failures.remove(key);
            let was_warning = this.warnings.remove(key);
            if was_failure || was_warning {
                debug!("cleared {key:?}");
            }
        });
    }

    /// Dispatch to the matching `report_*` operation.
    pub fn report(&mut self, key: K, severity: Severity) {
        match severity {
            Severity::Failure => self.report_failure(key),
            Severity::Warning => self.report_warning(key),
            Severity::Normal => self.report_normal(&key),
        }
    }

    // ── Aggregate predicates ──────────────────────────────────

    /// True if any key is failing.
    pub fn is_failure(&self) -> bool {
        !self.failures.is_empty()
    }

    /// True if some key is warning and none is failing.
    pub fn is_warning(&self) -> bool {
        !self.warnings.is_empty() && self.failures.is_empty()
    }

    /// True if no key is failing or warning.
    pub fn is_normal(&self) -> bool {
        self.failures.is_empty() && self.warnings.is_empty()
    }

    /// The aggregate severity across all keys.
    pub fn aggregate(&self) -> Severity {
        if self.is_failure() {
            Severity::Failure
        } else if self.is_warning() {
            Severity::Warning
        } else {
            Severity::Normal
        }
    }

    // ── Per-key queries ───────────────────────────────────────

    pub fn severity_of(&self, key: &K) -> Severity {
        if self.failures.contains(key) {
            Severity::Failure
        } else if self.warnings.contains(key) {
            Severity::Warning
        } else {
            Severity::Normal
        }
    }

    /// Keys currently failing (unordered).
    pub fn failing(&self) -> impl Iterator<Item = &K> {
        self.failures.iter()
    }

    /// Keys currently warning (unordered).
    pub fn warning(&self) -> impl Iterator<Item = &K> {
        self.warnings.iter()
    }

    /// Number of keys not at Normal.
    pub fn tracked(&self) -> usize {
        self.failures.len() + self.warnings.len()
    }

    /// Number of hook invocations that returned an error or panicked.
    pub fn hook_failures(&self) -> u64 {
        self.hook_failures
    }

    // ── Internal ──────────────────────────────────────────────

    /// Capture the aggregate, apply `mutate`, then fire the aggregate hook
    /// for the new level if the level moved.
    ///
    /// The three aggregate levels partition the state space, so "level
    /// changed to X" is the same as "predicate X went false → true".
    fn observe(&mut self, mutate: impl FnOnce(&mut Self)) {
        let before = self.aggregate();
        mutate(self);
        let after = self.aggregate();

        debug_assert!(self.failures.is_disjoint(&self.warnings));

        if before == after {
            return;
        }

        info!("aggregate {before} -> {after}");
        let ok = match after {
            Severity::Failure => run_hook("on_failure", &mut self.hooks.on_failure),
            Severity::Warning => run_hook("on_warning", &mut self.hooks.on_warning),
            Severity::Normal => run_hook("on_normal", &mut self.hooks.on_normal),
        };
        if !ok {
            self.hook_failures += 1;
        }
    }
}

impl<K> Default for StatusAggregator<K>
where
    K: Eq + Hash + Clone + fmt::Debug + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug> fmt::Debug for StatusAggregator<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatusAggregator")
            .field("failures", &self.failures)
            .field("warnings", &self.warnings)
            .field("hook_failures", &self.hook_failures)
            .finish_non_exhaustive()
    }
}
