//! In-memory transport for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::error::JojoError;
use crate::rest::transport::{HttpRequest, RawResponse, Transport};

enum Reply {
    Response(RawResponse),
    Failure,
}

/// Records every request and answers from a queue of canned replies.
#[derive(Clone, Default)]
pub(crate) struct RecordingTransport {
    requests: Arc<Mutex<Vec<HttpRequest>>>,
    replies: Arc<Mutex<VecDeque<Reply>>>,
}

impl RecordingTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queue a response.
    pub(crate) fn respond(self, status: u16, body: &str) -> Self {
        self.replies.lock().unwrap().push_back(Reply::Response(RawResponse {
            status,
            body: body.to_string(),
        }));
        self
    }

    /// Queue a transport failure.
    pub(crate) fn fail(self) -> Self {
        self.replies.lock().unwrap().push_back(Reply::Failure);
        self
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

pub(crate) const SIMULATED_FAILURE: &str = "simulated transport failure";

impl Transport for RecordingTransport {
    async fn send(&self, request: HttpRequest) -> Result<RawResponse, JojoError> {
        self.requests.lock().unwrap().push(request);
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Failure) => Err(JojoError::InvalidInput(SIMULATED_FAILURE.to_string())),
            None => panic!("unexpected request: no reply queued"),
        }
    }
}
