//! Scripted transport and recording notifier for tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use serde_json::Value;

use crate::error::TransportError;
use crate::notify::{Notifier, Severity};
use crate::transport::{HttpRequest, HttpResponse, Transport};

#[derive(Default)]
struct Script {
    replies: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: RefCell<Vec<HttpRequest>>,
    on_send: RefCell<Option<Rc<dyn Fn()>>>,
}

/// Transport answering from a queue of canned replies and recording requests.
#[derive(Clone, Default)]
pub struct MockTransport {
    script: Rc<Script>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, status: u16, body: Value) -> &Self {
        self.reply_raw(status, &body.to_string())
    }

    pub fn reply_raw(&self, status: u16, body: &str) -> &Self {
        self.script
            .replies
            .borrow_mut()
            .push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    pub fn fail(&self, message: &str) -> &Self {
        self.script
            .replies
            .borrow_mut()
            .push_back(Err(TransportError::Network(message.to_string())));
        self
    }

    /// Run `hook` while each request is in flight, before its reply is read.
    pub fn on_send(&self, hook: impl Fn() + 'static) -> &Self {
        *self.script.on_send.borrow_mut() = Some(Rc::new(hook));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.script.requests.borrow().clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.script.requests.borrow().last().cloned()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.script.requests.borrow_mut().push(request);
        let hook = self.script.on_send.borrow().clone();
        if let Some(hook) = hook {
            hook();
        }
        self.script
            .replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no scripted reply".to_string())))
    }
}

/// Notifier keeping every message it receives.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    messages: Rc<RefCell<Vec<(Severity, String)>>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<(Severity, String)> {
        self.messages.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        self.messages
            .borrow_mut()
            .push((severity, message.to_string()));
    }
}
