//! Tokio wrappers around [`TokenCodec`]
//!
//! Signing and verification are CPU-bound, so each call runs on tokio's
//! blocking pool and reports back over a oneshot channel. Called outside a
//! tokio runtime, every method resolves to `TokenError::Internal`.

use crate::{
    claims::ClaimSet,
    codec::TokenCodec,
    error::{TokenError, TokenResult},
    keys::{SigningKey, VerificationKey},
    types::Token,
};
use futures::Stream;
use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};
use tokio::{
    runtime::Handle,
    sync::{mpsc, oneshot},
};
use tokio_stream::wrappers::ReceiverStream;

/// Awaitable result of a background token operation.
pub struct AsyncTokenResult<T> {
    receiver: oneshot::Receiver<TokenResult<T>>,
}

impl<T> AsyncTokenResult<T> {
    pub(crate) fn new(receiver: oneshot::Receiver<TokenResult<T>>) -> Self {
        Self { receiver }
    }
}

impl<T> Future for AsyncTokenResult<T> {
    type Output = TokenResult<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_)) => Poll::Ready(Err(TokenError::internal(
                "token worker stopped before producing a result",
            ))),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Async front end for a shared [`TokenCodec`].
#[derive(Debug, Clone, Default)]
pub struct AsyncTokenCodec {
    codec: Arc<TokenCodec>,
}

impl AsyncTokenCodec {
    /// Wrap `codec`.
    #[must_use]
    pub fn new(codec: TokenCodec) -> Self {
        Self {
            codec: Arc::new(codec),
        }
    }

    /// The wrapped codec.
    #[must_use]
    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Sign on the blocking pool.
    #[must_use]
    pub fn sign(&self, claims: ClaimSet, key: SigningKey) -> AsyncTokenResult<Token> {
        let codec = Arc::clone(&self.codec);
        run_blocking(move || codec.sign(&claims, &key))
    }

    /// Verify on the blocking pool.
    #[must_use]
    pub fn verify(
        &self,
        token: impl Into<String>,
        key: VerificationKey,
    ) -> AsyncTokenResult<ClaimSet> {
        let codec = Arc::clone(&self.codec);
        let token = token.into();
        run_blocking(move || codec.verify(&token, &key))
    }

    /// Sign each claim set in order, yielding one result per input.
    ///
    /// Stops early if the returned stream is dropped. Outside a runtime the
    /// stream yields a single `TokenError::Internal`.
    pub fn sign_batch(
        &self,
        claims_list: Vec<ClaimSet>,
        key: SigningKey,
    ) -> impl Stream<Item = TokenResult<Token>> {
        let (tx, rx) = mpsc::channel(32);
        let codec = Arc::clone(&self.codec);

        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(move || {
                    for claims in claims_list {
                        if tx.blocking_send(codec.sign(&claims, &key)).is_err() {
                            break; // Receiver dropped
                        }
                    }
                });
            }
            Err(_) => {
                // Fresh channel with spare capacity; cannot fail.
                let _ = tx.try_send(Err(no_runtime()));
            }
        }

        ReceiverStream::new(rx)
    }
}

/// Run `job` on the current runtime's blocking pool.
fn run_blocking<T, F>(job: F) -> AsyncTokenResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> TokenResult<T> + Send + 'static,
{
    let (tx, rx) = oneshot::channel();

    match Handle::try_current() {
        Ok(handle) => {
            handle.spawn_blocking(move || {
                let _ = tx.send(job());
            });
        }
        Err(_) => {
            let _ = tx.send(Err(no_runtime()));
        }
    }

    AsyncTokenResult::new(rx)
}

fn no_runtime() -> TokenError {
    TokenError::internal("no tokio runtime is running on this thread")
}
