// SPDX-License-Identifier: MPL-2.0
//! Keeps a surface's "no capture" flag in sync with the secure-mode setting.
//!
//! A subscription is two cooperative tasks joined by a [`LatestSlot`]:
//! - the *pump* awaits the setting stream and overwrites the slot with every
//!   value it sees;
//! - the *applier* waits on the slot and pushes the newest value to the
//!   surface.
//!
//! Values that arrive while the applier is busy replace each other, so only
//! the most recent one is applied. Applications happen in observation order
//! and each one is a single synchronous call into the surface.
//!
//! Failures never reach the caller. A surface that is gone, or that reports
//! [`SurfaceError::Unavailable`], simply keeps its previous flag state.

use super::latest::LatestSlot;
use super::{Surface, SurfaceError};
use futures_util::stream::BoxStream;
use futures_util::StreamExt;
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

static NEXT_SUBSCRIPTION_ID: AtomicU64 = AtomicU64::new(1);

/// Producer of the current value of a boolean setting.
///
/// Every call to [`subscribe`](Self::subscribe) starts a fresh stream that
/// yields the current value first and then every change. Late subscribers see
/// the latest value, never history.
pub trait SettingSource: Send + Sync {
    fn subscribe(&self) -> BoxStream<'static, bool>;
}

impl<F> SettingSource for F
where
    F: Fn() -> BoxStream<'static, bool> + Send + Sync,
{
    fn subscribe(&self) -> BoxStream<'static, bool> {
        self()
    }
}

/// Starts and stops secure-flag subscriptions on a host runtime.
#[derive(Debug, Clone)]
pub struct SecureFlagController {
    runtime: Handle,
}

impl SecureFlagController {
    /// Creates a controller whose subscriptions run on `runtime`.
    #[must_use]
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Creates a controller bound to the runtime of the calling task.
    ///
    /// Returns `None` outside of a tokio runtime.
    #[must_use]
    pub fn try_current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }

    /// Subscribes `surface` to `source`.
    ///
    /// Only a weak reference to the surface is kept. Nothing is applied until
    /// the source produces its first value.
    pub fn start<S, Src>(&self, surface: &Arc<S>, source: &Src) -> SubscriptionHandle
    where
        S: Surface,
        Src: SettingSource + ?Sized,
    {
        let id = NEXT_SUBSCRIPTION_ID.fetch_add(1, Ordering::Relaxed);
        let shared = Arc::new(Shared {
            id,
            active: Mutex::new(true),
            pending: LatestSlot::new(),
        });

        let stream = source.subscribe();
        let pump = self.runtime.spawn(pump(stream, Arc::clone(&shared)));
        let applier = self
            .runtime
            .spawn(apply_latest(Arc::downgrade(surface), Arc::clone(&shared)));

        info!(subscription = id, "secure flag subscription started");

        SubscriptionHandle {
            shared,
            tasks: Mutex::new(vec![pump, applier]),
        }
    }

    /// Cancels `handle`. See [`SubscriptionHandle::stop`].
    pub fn stop(&self, handle: &SubscriptionHandle) -> bool {
        handle.stop()
    }
}

struct Shared {
    id: u64,
    /// Held across each surface call so `stop` cannot interleave with one.
    active: Mutex<bool>,
    pending: LatestSlot<bool>,
}

async fn pump(mut stream: BoxStream<'static, bool>, shared: Arc<Shared>) {
    while let Some(secure) = stream.next().await {
        if shared.pending.publish(secure) {
            debug!(
                subscription = shared.id,
                secure, "superseded an unapplied secure mode value"
            );
        }
    }
    debug!(subscription = shared.id, "secure mode stream ended");
    shared.pending.close();
}

async fn apply_latest<S: Surface>(surface: Weak<S>, shared: Arc<Shared>) {
    while let Some(secure) = shared.pending.next().await {
        let Some(surface) = surface.upgrade() else {
            debug!(
                subscription = shared.id,
                "surface dropped, discarding secure flag update"
            );
            return;
        };
        match apply(&shared, surface.as_ref(), secure) {
            Applied::Yes => debug!(subscription = shared.id, secure, "secure flag applied"),
            Applied::Stopped => return,
            Applied::Failed(SurfaceError::Unavailable) => debug!(
                subscription = shared.id,
                secure, "surface unavailable, secure flag update dropped"
            ),
            Applied::Failed(err) => warn!(
                subscription = shared.id,
                secure,
                error = %err,
                "secure flag update failed"
            ),
        }
    }
}

enum Applied {
    Yes,
    Stopped,
    Failed(SurfaceError),
}

fn apply<S: Surface + ?Sized>(shared: &Shared, surface: &S, secure: bool) -> Applied {
    let active = shared.active.lock();
    if !*active {
        return Applied::Stopped;
    }
    let result = if secure {
        surface.add_secure_flag()
    } else {
        surface.remove_secure_flag()
    };
    drop(active);
    match result {
        Ok(()) => Applied::Yes,
        Err(err) => Applied::Failed(err),
    }
}

/// Cancels its subscription when stopped or dropped.
pub struct SubscriptionHandle {
    shared: Arc<Shared>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl SubscriptionHandle {
    /// Cancels the subscription.
    ///
    /// Once this returns no further flag mutation happens. Returns `false` if
    /// the subscription was already stopped.
    pub fn stop(&self) -> bool {
        {
            let mut active = self.shared.active.lock();
            if !*active {
                return false;
            }
            *active = false;
        }
        self.shared.pending.close();
        for task in self.tasks.lock().drain(..) {
            task.abort();
        }
        info!(subscription = self.shared.id, "secure flag subscription stopped");
        true
    }

    pub fn is_active(&self) -> bool {
        *self.shared.active.lock()
    }

    pub fn id(&self) -> u64 {
        self.shared.id
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

impl fmt::Debug for SubscriptionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionHandle")
            .field("id", &self.shared.id)
            .field("active", &self.is_active())
            .finish()
    }
}
