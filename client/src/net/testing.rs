//! In-memory doubles for the credential store and transport.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::task::{Poll, Waker};

use futures::future::poll_fn;

use super::credentials::CredentialStore;
use super::error::ApiError;
use super::transport::{HttpRequest, HttpResponse, Transport};

/// Token slot held in memory; clones share the slot.
#[derive(Clone, Debug, Default)]
pub struct MemoryCredentialStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryCredentialStore {
    pub fn with_token(token: &str) -> Self {
        let store = Self::default();
        store.save(token);
        store
    }

    /// Raw slot contents, including empty strings.
    pub fn raw(&self) -> Option<String> {
        match self.slot.lock() {
            Ok(slot) => slot.clone(),
            Err(_) => None,
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Option<String> {
        self.raw().filter(|token| !token.is_empty())
    }

    fn save(&self, token: &str) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(token.to_owned());
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
    }
}

/// Transport that records every request and replays queued responses.
///
/// With an empty queue it answers `200 []`.
#[derive(Clone, Debug, Default)]
pub struct ScriptedTransport {
    requests: Arc<Mutex<Vec<HttpRequest>>>,
    responses: Arc<Mutex<VecDeque<Result<HttpResponse, ApiError>>>>,
}

impl ScriptedTransport {
    pub fn respond(&self, status: u16, body: serde_json::Value) -> &Self {
        self.push(Ok(HttpResponse { status, body: body.to_string() }))
    }

    pub fn respond_raw(&self, status: u16, body: &str) -> &Self {
        self.push(Ok(HttpResponse { status, body: body.to_owned() }))
    }

    pub fn fail(&self, error: ApiError) -> &Self {
        self.push(Err(error))
    }

    fn push(&self, response: Result<HttpResponse, ApiError>) -> &Self {
        if let Ok(mut queue) = self.responses.lock() {
            queue.push_back(response);
        }
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        match self.requests.lock() {
            Ok(requests) => requests.clone(),
            Err(_) => Vec::new(),
        }
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests().pop()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
        let next = match self.responses.lock() {
            Ok(mut queue) => queue.pop_front(),
            Err(_) => None,
        };
        next.unwrap_or_else(|| Ok(HttpResponse { status: 200, body: "[]".to_owned() }))
    }
}

/// Transport whose single response is held until the test releases it.
///
/// `send` records the request and stays pending until [`release`](Self::release).
#[derive(Clone, Debug, Default)]
pub struct GatedTransport {
    gate: Arc<Mutex<Gate>>,
}

#[derive(Debug, Default)]
struct Gate {
    requests: Vec<HttpRequest>,
    response: Option<Result<HttpResponse, ApiError>>,
    waker: Option<Waker>,
}

impl GatedTransport {
    pub fn release(&self, status: u16, body: serde_json::Value) {
        let waker = match self.gate.lock() {
            Ok(mut gate) => {
                gate.response = Some(Ok(HttpResponse { status, body: body.to_string() }));
                gate.waker.take()
            }
            Err(_) => None,
        };
        if let Some(waker) = waker {
            waker.wake();
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        match self.gate.lock() {
            Ok(gate) => gate.requests.clone(),
            Err(_) => Vec::new(),
        }
    }
}

impl Transport for GatedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        if let Ok(mut gate) = self.gate.lock() {
            gate.requests.push(request);
        }
        poll_fn(|cx| {
            let Ok(mut gate) = self.gate.lock() else {
                return Poll::Ready(Err(ApiError::Transport("gate lock poisoned".to_owned())));
            };
            match gate.response.take() {
                Some(response) => Poll::Ready(response),
                None => {
                    gate.waker = Some(cx.waker().clone());
                    Poll::Pending
                }
            }
        })
        .await
    }
}
