//! Liveness tokens for screens on a stack.
//!
//! Every screen entry owns a token. Tearing the screen down (pop, reset past
//! it, modal replaced) expires the token and every token derived from it. A
//! deferred routing attempt holds a derived token and checks it in the same
//! critical section that would push its result.

use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Default)]
pub struct LivenessToken {
    inner: CancellationToken,
}

impl LivenessToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token that expires with this one, or on its own.
    pub fn child(&self) -> Self {
        Self {
            inner: self.inner.child_token(),
        }
    }

    pub fn is_live(&self) -> bool {
        !self.inner.is_cancelled()
    }

    pub fn expire(&self) {
        self.inner.cancel();
    }

    /// Resolves once the token has expired.
    pub async fn expired(&self) {
        self.inner.cancelled().await
    }
}
