use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};
use tokio::runtime::Handle;
use tokio::sync::oneshot;

use super::errors::GateError;
use super::types::Callback;
use crate::sdk::{AuthSdk, SdkConfig};

#[derive(Default)]
pub(super) struct GateState {
    pub(super) initialized: bool,
    pub(super) pending: VecDeque<Callback>,
    pub(super) login_in_flight: bool,
    /// Thread currently running queued callbacks
    pub(super) draining: Option<ThreadId>,
}

impl GateState {
    /// Callbacks may run right away: the gate is open and no other thread
    /// is still working through the queue.
    fn runs_now(&self, me: ThreadId) -> bool {
        self.initialized && self.draining.is_none_or(|owner| owner == me)
    }
}

/// Holds callbacks back until the authentication SDK reports that it is ready.
///
/// Clones share the same state, so one gate can be handed to every part of
/// the application that needs the SDK.
pub struct InitGate<S: AuthSdk> {
    pub(super) sdk: Arc<S>,
    pub(super) state: Arc<Mutex<GateState>>,
    pub(super) runtime: Handle,
    drained: Arc<Condvar>,
}

impl<S: AuthSdk> Clone for InitGate<S> {
    fn clone(&self) -> Self {
        Self {
            sdk: Arc::clone(&self.sdk),
            state: Arc::clone(&self.state),
            runtime: self.runtime.clone(),
            drained: Arc::clone(&self.drained),
        }
    }
}

/// Releases drain ownership even when a callback panics, and wakes threads
/// waiting in `mark_initialized`.
struct DrainGuard<'a> {
    state: &'a Mutex<GateState>,
    drained: &'a Condvar,
    owner: ThreadId,
}

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        let mut state = lock_state(self.state);
        if state.draining == Some(self.owner) {
            state.draining = None;
        }
        drop(state);
        self.drained.notify_all();
    }
}

// The gate never fails on its own, so a poisoned lock is taken over as is.
pub(super) fn lock_state(state: &Mutex<GateState>) -> MutexGuard<'_, GateState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<S: AuthSdk> InitGate<S> {
    /// Create a gate whose SDK calls run on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a tokio runtime.
    pub fn new(sdk: S) -> Self {
        Self::with_handle(sdk, Handle::current())
    }

    /// Create a gate whose SDK calls run on `runtime`.
    ///
    /// Use this instead of [`new`](Self::new) when the gate is built outside
    /// of a tokio runtime context.
    pub fn with_handle(sdk: S, runtime: Handle) -> Self {
        Self {
            sdk: Arc::new(sdk),
            state: Arc::new(Mutex::new(GateState::default())),
            runtime,
            drained: Arc::new(Condvar::new()),
        }
    }

    /// The SDK this gate defers to
    pub fn sdk(&self) -> &S {
        &self.sdk
    }

    pub(super) fn lock(&self) -> MutexGuard<'_, GateState> {
        lock_state(&self.state)
    }

    /// Record that the SDK is ready and run every queued callback in order.
    ///
    /// Callbacks run on the calling thread with the gate unlocked, so they
    /// may use the gate themselves. Only one thread works through the queue
    /// at a time; a concurrent call waits until that drain is finished.
    /// Calling this again is harmless.
    pub fn mark_initialized(&self) -> &Self {
        let me = thread::current().id();
        let mut state = self.lock();
        if !state.initialized {
            state.initialized = true;
            tracing::info!(
                "Auth SDK initialized, running {} queued callback(s)",
                state.pending.len()
            );
        }

        loop {
            let draining = state.draining;
            match draining {
                // Called from a queued callback; the outer drain carries on.
                Some(owner) if owner == me => return self,
                Some(_) => {
                    state = self
                        .drained
                        .wait(state)
                        .unwrap_or_else(PoisonError::into_inner);
                }
                None => break,
            }
        }

        state.draining = Some(me);
        drop(state);
        let _guard = DrainGuard {
            state: &*self.state,
            drained: &*self.drained,
            owner: me,
        };

        loop {
            let mut state = self.lock();
            match state.pending.pop_front() {
                Some(callback) => {
                    drop(state);
                    callback();
                }
                None => {
                    // Cleared together with the empty check so nothing queued
                    // from another thread is left behind.
                    state.draining = None;
                    break;
                }
            }
        }

        self
    }

    /// Whether the SDK has signalled that it is ready
    pub fn is_initialized(&self) -> bool {
        self.lock().initialized
    }

    /// Run `f` now if the SDK is ready, otherwise queue it.
    ///
    /// Returns `true` when `f` ran immediately. While another thread is still
    /// running queued callbacks, `f` is queued behind them and `false` is
    /// returned.
    pub fn run_when_initialized<F>(&self, f: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        self.run_when_initialized_or_skip(f, false)
    }

    /// Like [`run_when_initialized`](Self::run_when_initialized), but when
    /// `skip_queueing` is set a not-yet-ready gate drops `f` instead of
    /// queueing it. An open gate never drops `f`.
    pub fn run_when_initialized_or_skip<F>(&self, f: F, skip_queueing: bool) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        let mut state = self.lock();
        if state.runs_now(thread::current().id()) {
            drop(state);
            f();
            return true;
        }

        if state.initialized {
            state.pending.push_back(Box::new(f));
            tracing::debug!("Queued callback behind a drain in progress");
        } else if skip_queueing {
            tracing::debug!("Auth SDK not initialized, dropping callback");
        } else {
            state.pending.push_back(Box::new(f));
            tracing::debug!(
                "Auth SDK not initialized, queued callback ({} pending)",
                state.pending.len()
            );
        }
        false
    }

    /// Resolves once the gate is initialized.
    ///
    /// Yields `true` on initialization and `false` if every handle to the gate
    /// was dropped first.
    pub fn ready(&self) -> impl Future<Output = bool> + Send + 'static + use<S> {
        let (tx, rx) = oneshot::channel();
        self.run_when_initialized(move || {
            let _ = tx.send(());
        });
        async move { rx.await.is_ok() }
    }

    /// Number of callbacks waiting for initialization
    pub fn pending_len(&self) -> usize {
        self.lock().pending.len()
    }

    /// Whether a login request is queued and waiting for initialization
    pub fn login_in_flight(&self) -> bool {
        self.lock().login_in_flight
    }

    /// Initialize the SDK with `config` and open the gate once it is ready.
    ///
    /// On failure the gate stays closed and queued callbacks keep waiting.
    pub async fn bootstrap(&self, config: &SdkConfig) -> Result<&Self, GateError> {
        config.validate()?;

        if let Err(e) = self.sdk.init(config).await {
            tracing::error!("Auth SDK initialization failed: {}", e);
            return Err(e.into());
        }

        Ok(self.mark_initialized())
    }
}
