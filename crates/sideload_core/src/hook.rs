//! Explicit attach/detach registration against the host's load-miss source.
//!
//! The host surfaces "module resolution failed" notifications through an
//! injected [`LoadMissEvents`] collaborator instead of an ambient process
//! global. [`ResolverHook::start`] and [`ResolverHook::stop`] form the single
//! attach/detach pair executed at extension activation and deactivation.

use crate::loader::ModuleLoader;
use crate::resolver::LoadMissResolver;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use uuid::Uuid;

/// Opaque handle for one active callback subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for SubscriptionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Callback invoked with the textual identity of one failed load request.
pub type ResolveCallback<M> = Arc<dyn Fn(&str) -> Option<M> + Send + Sync>;

/// Host collaborator surfacing failed module-load requests.
pub trait LoadMissEvents {
    type Module;

    /// Registers one callback and returns its subscription handle.
    fn subscribe(&mut self, callback: ResolveCallback<Self::Module>) -> SubscriptionId;

    /// Removes one callback; returns whether the handle was known.
    fn unsubscribe(&mut self, id: &SubscriptionId) -> bool;
}

/// Lifecycle wrapper pairing one callback subscription with the host source.
pub struct ResolverHook<S: LoadMissEvents> {
    source: S,
    active: Option<SubscriptionId>,
}

impl<S: LoadMissEvents> ResolverHook<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            active: None,
        }
    }

    /// Attaches the callback at extension activation.
    pub fn start(
        &mut self,
        callback: ResolveCallback<S::Module>,
    ) -> Result<SubscriptionId, HookError> {
        if let Some(id) = self.active {
            return Err(HookError::AlreadyStarted(id));
        }
        let id = self.source.subscribe(callback);
        self.active = Some(id);
        Ok(id)
    }

    /// Detaches the callback at extension deactivation.
    pub fn stop(&mut self) -> Result<(), HookError> {
        match self.active.take() {
            Some(id) => {
                if !self.source.unsubscribe(&id) {
                    log::warn!(
                        "event=hook_detach module=core status=unknown_subscription id={id}"
                    );
                }
                Ok(())
            }
            None => Err(HookError::NotStarted),
        }
    }

    pub fn is_started(&self) -> bool {
        self.active.is_some()
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<L> LoadMissResolver<L>
where
    L: ModuleLoader + Send + Sync + 'static,
    L::Module: 'static,
{
    /// Adapts the resolver into a subscription callback.
    pub fn into_callback(self) -> ResolveCallback<L::Module> {
        Arc::new(move |request: &str| self.resolve(request))
    }
}

/// Hook lifecycle errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookError {
    AlreadyStarted(SubscriptionId),
    NotStarted,
}

impl Display for HookError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyStarted(id) => {
                write!(f, "resolver hook already started: subscription {id}")
            }
            Self::NotStarted => write!(f, "resolver hook is not started"),
        }
    }
}

impl Error for HookError {}
