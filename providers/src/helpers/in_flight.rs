// Copyright 2022 Xayn AG
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, version 3.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Single-shot handles to spawned requests.

use std::{
    future::Future,
    panic,
    pin::Pin,
    task::{Context, Poll},
};

use tokio::task::{AbortHandle, JoinHandle};

use crate::Error;

/// An outstanding request.
///
/// Awaiting it resolves exactly once: to `Some(Ok(_))` with the decoded
/// response, to `Some(Err(_))` with the failure, or to `None` if the request
/// was cancelled before it completed.
///
/// Dropping the handle cancels the request.
#[must_use = "dropping the handle cancels the request"]
#[derive(Debug)]
pub struct InFlight<T> {
    task: JoinHandle<Result<T, Error>>,
}

impl<T> InFlight<T>
where
    T: Send + 'static,
{
    /// Spawns the request on the current tokio runtime.
    ///
    /// # Panics
    /// If called outside of a tokio runtime.
    pub(crate) fn spawn<F>(request: F) -> Self
    where
        F: Future<Output = Result<T, Error>> + Send + 'static,
    {
        Self {
            task: tokio::spawn(request),
        }
    }
}

impl<T> InFlight<T> {
    /// Aborts the request if it hasn't completed yet.
    ///
    /// Cancelling more than once has no further effect.
    pub fn cancel(&self) {
        self.task.abort();
    }

    /// Returns a handle which can cancel the request from elsewhere.
    pub fn canceller(&self) -> Canceller {
        Canceller(self.task.abort_handle())
    }

    /// Whether the request completed, failed or was cancelled.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl<T> Future for InFlight<T> {
    type Output = Option<Result<T, Error>>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.get_mut().task)
            .poll(cx)
            .map(|joined| match joined {
                Ok(result) => Some(result),
                Err(error) if error.is_cancelled() => None,
                Err(error) => panic::resume_unwind(error.into_panic()),
            })
    }
}

impl<T> Drop for InFlight<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Cancels an [`InFlight`] request, see [`InFlight::cancel()`].
#[derive(Clone, Debug)]
pub struct Canceller(AbortHandle);

impl Canceller {
    pub fn cancel(&self) {
        self.0.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.0.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::sleep;

    use super::*;

    #[tokio::test]
    async fn test_delivers_result_once() {
        let handle = InFlight::spawn(async { Ok(7) });
        assert_eq!(handle.await.unwrap().unwrap(), 7);
    }

    #[tokio::test]
    async fn test_delivers_error() {
        let handle = InFlight::<()>::spawn(async { Err(Error::MissingBody) });
        assert!(matches!(handle.await, Some(Err(Error::MissingBody))));
    }

    #[tokio::test]
    async fn test_cancel_is_idempotent() {
        let handle = InFlight::spawn(async {
            sleep(Duration::from_secs(60)).await;
            Ok(())
        });
        handle.cancel();
        handle.cancel();
        assert!(handle.await.is_none());
    }

    #[tokio::test]
    async fn test_canceller_aborts_request() {
        let handle = InFlight::spawn(async {
            sleep(Duration::from_secs(60)).await;
            Ok(())
        });
        let canceller = handle.canceller();
        canceller.cancel();
        assert!(handle.await.is_none());
        assert!(canceller.is_finished());
        canceller.cancel();
    }
}
