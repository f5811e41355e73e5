//! # Mock Framework & Testing Guide
//!
//! `MockClient<T>` hands out a real [`ResourceClient<T>`] whose requests are
//! answered from a queue of expectations instead of a running actor. Use it to
//! unit-test client wrappers and actors whose context holds other clients.
//!
//! | | MockClient | Real Actor |
//! |---|---|---|
//! | **State** | None, canned responses | Real collection |
//! | **Determinism** | Fully deterministic | Subject to scheduler |
//! | **Error injection** | `return_err(..)` | Needs specific state |
//! | **Use case** | Logic *around* a client | The actor itself, full system |
//!
//! ## Patterns
//!
//! 1. **Client logic (pure mock)**: wrap `mock.client()` in the resource
//!    client under test and queue the responses it should see.
//! 2. **Single actor**: spawn `ResourceActor::new(..)` with `()` context.
//! 3. **Actor with mocked dependencies**: spawn a real actor whose context is
//!    built from mock clients (see `crates/bazaar/tests/item_actor_test.rs`).
//! 4. **Full system**: start every actor (see `MarketSystem` in `bazaar`).
//!
//! When the request itself needs inspecting (e.g. the exact [`FindQuery`] a
//! client built), use [`create_mock_client`] and the `expect_*` helpers, which
//! hand back the request payload together with its responder.
//!
//! ```rust
//! use bazaar_actor::mock::MockClient;
//! use bazaar_actor::query::{Document, FindQuery, Value};
//! use bazaar_actor::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Note { id: u32 }
//! #[derive(Debug)] struct NoteCreate;
//! #[derive(Debug)] struct NoteUpdate;
//! #[derive(Debug)] enum NoteAction {}
//! #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
//!
//! impl Document for Note {
//!     fn field(&self, _: &str) -> Option<Value> { None }
//! }
//!
//! #[async_trait]
//! impl ActorEntity for Note {
//!     type Id = u32; type Create = NoteCreate; type Update = NoteUpdate;
//!     type Action = NoteAction; type ActionResult = (); type Context = (); type Error = NoteError;
//!     fn from_create_params(id: u32, _: NoteCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
//!     async fn on_update(&mut self, _: NoteUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, a: NoteAction, _: &()) -> Result<(), Self::Error> { match a {} }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Note>::new();
//!     mock.expect_find().return_ok(vec![Note { id: 7 }]);
//!     mock.expect_get(1).return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     let found = client.find(FindQuery::default()).await.unwrap();
//!     assert_eq!(found[0].id, 7);
//!     assert!(matches!(client.get(1).await, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{ResourceRequest, Response};
use crate::query::{Bucket, Filter, FindQuery};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the response to give it.
enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
    Find {
        response: Result<Vec<T>, FrameworkError>,
    },
    Count {
        response: Result<usize, FrameworkError>,
    },
    GroupCount {
        response: Result<Vec<Bucket>, FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn answer<R>(respond_to: Response<R>, response: Result<R, FrameworkError>) {
    let _ = respond_to.send(response);
}

fn check_id<I: PartialEq + std::fmt::Debug>(op: &str, expected: &I, actual: &I) {
    if expected != actual {
        panic!("{op}: expected id {expected:?}, got {actual:?}");
    }
}

/// A mock client with expectation tracking for fluent testing.
///
/// Expectations are consumed in the order they were queued. A request that
/// does not match the next expectation panics the mock's background task,
/// which surfaces as `FrameworkError::ActorDropped` at the call site and as a
/// leftover expectation in [`MockClient::verify`].
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().unwrap().pop_front();

                match (request, expectation) {
                    (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get { id: want, response })) => {
                        check_id("get", &want, &id);
                        answer(respond_to, response);
                    }
                    (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
                        answer(respond_to, response);
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update { id: want, response }),
                    ) => {
                        check_id("update", &want, &id);
                        answer(respond_to, response);
                    }
                    (
                        ResourceRequest::Delete { id, respond_to },
                        Some(Expectation::Delete { id: want, response }),
                    ) => {
                        check_id("delete", &want, &id);
                        answer(respond_to, response);
                    }
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action { id: want, response }),
                    ) => {
                        check_id("action", &want, &id);
                        answer(respond_to, response);
                    }
                    (ResourceRequest::Find { respond_to, .. }, Some(Expectation::Find { response })) => {
                        answer(respond_to, response);
                    }
                    (ResourceRequest::Count { respond_to, .. }, Some(Expectation::Count { response })) => {
                        answer(respond_to, response);
                    }
                    (
                        ResourceRequest::GroupCount { respond_to, .. },
                        Some(Expectation::GroupCount { response }),
                    ) => {
                        answer(respond_to, response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    fn builder<R: 'static>(&self, make: fn(Result<R, FrameworkError>) -> Expectation<T>) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            expectations: self.expectations.clone(),
            make: Box::new(make),
        }
    }

    fn builder_for<R: 'static>(
        &self,
        id: T::Id,
        make: fn(T::Id, Result<R, FrameworkError>) -> Expectation<T>,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            expectations: self.expectations.clone(),
            make: Box::new(move |response| make(id, response)),
        }
    }

    /// Expects a `get` for `id`.
    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder_for(id, |id, response| Expectation::Get { id, response })
    }

    /// Expects a `create`.
    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(|response| Expectation::Create { response })
    }

    /// Expects an `update` of `id`.
    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder_for(id, |id, response| Expectation::Update { id, response })
    }

    /// Expects a `delete` of `id`.
    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder_for(id, |id, response| Expectation::Delete { id, response })
    }

    /// Expects an `action` on `id`.
    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder_for(id, |id, response| Expectation::Action { id, response })
    }

    /// Expects a `find`, whatever the query.
    pub fn expect_find(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(|response| Expectation::Find { response })
    }

    /// Expects a `count`, whatever the filter.
    pub fn expect_count(&mut self) -> ExpectationBuilder<T, usize> {
        self.builder(|response| Expectation::Count { response })
    }

    /// Expects a `group_count`, whatever the field.
    pub fn expect_group_count(&mut self) -> ExpectationBuilder<T, Vec<Bucket>> {
        self.builder(|response| Expectation::GroupCount { response })
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

/// Queues the response for one expected request.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    expectations: Queue<T>,
    make: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        let expectation = (self.make)(Ok(value));
        self.expectations.lock().unwrap().push_back(expectation);
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        let expectation = (self.make)(Err(error));
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

// =============================================================================
// CHANNEL HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// Tests drive the receiver with the `expect_*` helpers below, assert on the
/// request payload and answer through the returned responder.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, Response<T::Id>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Response<T::ActionResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Find request
pub async fn expect_find<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(FindQuery, Response<Vec<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Find { query, respond_to }) => Some((query, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Count request
pub async fn expect_count<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(Filter, Response<usize>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Count { filter, respond_to }) => Some((filter, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a GroupCount request
pub async fn expect_group_count<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(String, Response<Vec<Bucket>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::GroupCount { field, respond_to }) => Some((field, respond_to)),
        _ => None,
    }
}
