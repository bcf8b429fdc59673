//! Per-service request pool.

use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::sync::Semaphore;
use tonic::server::NamedService;
use tower::Service;
use tower::limit::ConcurrencyLimit;
use tower::limit::concurrency::future::ResponseFuture;

/// Caps the calls one service handles at once, across every connection.
///
/// Excess calls wait for a slot instead of failing. Only the wrapped service
/// is limited, so health checks registered beside it stay responsive while
/// it is saturated.
#[derive(Clone)]
pub struct ConcurrencyLimited<S> {
  inner: ConcurrencyLimit<S>,
}

impl<S> ConcurrencyLimited<S> {
  pub fn new(inner: S, max_in_flight: usize) -> Self {
    let semaphore = Arc::new(Semaphore::new(max_in_flight.max(1)));
    Self {
      inner: ConcurrencyLimit::with_semaphore(inner, semaphore),
    }
  }
}

impl<S, Request> Service<Request> for ConcurrencyLimited<S>
where
  S: Service<Request>,
{
  type Response = S::Response;
  type Error = S::Error;
  type Future = ResponseFuture<S::Future>;

  fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
    self.inner.poll_ready(cx)
  }

  fn call(&mut self, request: Request) -> Self::Future {
    self.inner.call(request)
  }
}

impl<S: NamedService> NamedService for ConcurrencyLimited<S> {
  const NAME: &'static str = S::NAME;
}
