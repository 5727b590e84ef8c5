//! Scripted fakes for the gateway's seams.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::error::TransportError;
use crate::jwt::{make_token, now_secs};
use crate::page::Page;
use crate::transport::{HttpRequest, HttpResponse, Transport};

pub fn fresh_token() -> String {
    make_token(&format!(r#"{{"exp":{},"user_id":1}}"#, (now_secs() + 3600.0) as u64))
}

pub fn stale_token() -> String {
    make_token(&format!(r#"{{"exp":{},"user_id":1}}"#, (now_secs() - 60.0) as u64))
}

/// Replays queued responses in order and records every request.
#[derive(Clone, Default)]
pub struct FakeTransport {
    responses: Rc<RefCell<VecDeque<Result<HttpResponse, TransportError>>>>,
    requests: Rc<RefCell<Vec<HttpRequest>>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, response: HttpResponse) {
        self.responses.borrow_mut().push_back(Ok(response));
    }

    pub fn push_json(&self, status: u16, body: &str) {
        self.push(HttpResponse::new(status, body).with_content_type("application/json"));
    }

    pub fn push_network_error(&self, message: &str) {
        self.responses
            .borrow_mut()
            .push_back(Err(TransportError::Network(message.to_string())));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }
}

impl Transport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no scripted response".into())))
    }
}

/// Records navigations and displayed errors.
#[derive(Clone, Default)]
pub struct FakePage {
    csrf: Option<String>,
    navigations: Rc<RefCell<Vec<String>>>,
    errors: Rc<RefCell<Vec<String>>>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_csrf(mut self, token: &str) -> Self {
        self.csrf = Some(token.to_string());
        self
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.borrow().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }
}

impl Page for FakePage {
    fn navigate(&self, url: &str) {
        self.navigations.borrow_mut().push(url.to_string());
    }

    fn csrf_token(&self) -> Option<String> {
        self.csrf.clone()
    }

    fn show_error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }
}
