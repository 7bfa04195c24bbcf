// Shared fake collaborators for the integration tests.
//
// None of them touch the network: DNS answers, HTTP responses and redirect
// hops are all scripted up front.

use std::cell::RefCell;
use std::collections::HashMap;

use denylist::dns::{DnsQuery, DnsQueryError};
use denylist::fetch::{HttpClient, HttpResponse, RedirectChain, RedirectSession};
use denylist::TransportError;

/// DNS answering from a table; unknown names do not exist.
#[derive(Default)]
#[allow(dead_code)] // Not every test file uses every helper
pub struct ScriptedDns {
    answers: HashMap<String, Result<Vec<String>, DnsQueryError>>,
    queried: RefCell<Vec<String>>,
}

#[allow(dead_code)]
impl ScriptedDns {
    pub fn answering(mut self, name: &str, answers: &[&str]) -> Self {
        self.answers.insert(
            name.to_string(),
            Ok(answers.iter().map(|a| a.to_string()).collect()),
        );
        self
    }

    pub fn failing(mut self, name: &str, error: DnsQueryError) -> Self {
        self.answers.insert(name.to_string(), Err(error));
        self
    }

    pub fn queried(&self) -> Vec<String> {
        self.queried.borrow().clone()
    }
}

impl DnsQuery for ScriptedDns {
    fn query(&self, name: &str) -> Result<Vec<String>, DnsQueryError> {
        self.queried.borrow_mut().push(name.to_string());
        self.answers
            .get(name)
            .cloned()
            .unwrap_or(Err(DnsQueryError::NxDomain))
    }
}

/// HTTP client that must never be called.
#[allow(dead_code)]
pub struct UnusedHttp;

impl HttpClient for UnusedHttp {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        panic!("unexpected GET {url}");
    }

    fn post(&self, url: &str, _body: String) -> Result<HttpResponse, TransportError> {
        panic!("unexpected POST {url}");
    }
}

/// HTTP client answering every request with the same status and body.
#[allow(dead_code)]
pub struct CannedHttp {
    pub status: u16,
    pub body: String,
    pub requests: RefCell<Vec<(String, Option<String>)>>,
}

#[allow(dead_code)]
impl CannedHttp {
    pub fn new(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            requests: RefCell::new(Vec::new()),
        }
    }
}

impl HttpClient for CannedHttp {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push((url.to_string(), None));
        Ok(HttpResponse::new(url, self.status, &self.body))
    }

    fn post(&self, url: &str, body: String) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push((url.to_string(), Some(body)));
        Ok(HttpResponse::new(url, self.status, &self.body))
    }
}

/// Redirect session answering HEAD requests from a script; unknown URLs
/// refuse connections.
#[derive(Default)]
#[allow(dead_code)]
pub struct ScriptedSession {
    responses: HashMap<String, Result<HttpResponse, TransportError>>,
}

#[allow(dead_code)]
impl ScriptedSession {
    pub fn redirect(mut self, from: &str, to: &str) -> Self {
        self.responses.insert(
            from.to_string(),
            Ok(HttpResponse::new(from, 302, "").with_header("Location", to)),
        );
        self
    }

    pub fn ok(mut self, url: &str) -> Self {
        self.responses
            .insert(url.to_string(), Ok(HttpResponse::new(url, 200, "")));
        self
    }
}

impl RedirectSession for ScriptedSession {
    fn head(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.responses
            .get(url)
            .cloned()
            .unwrap_or_else(|| Err(TransportError::Connection(url.to_string())))
    }

    fn resolve_redirects<'a>(&'a self, response: &HttpResponse) -> RedirectChain<'a> {
        let mut current = Some(response.clone());
        Box::new(std::iter::from_fn(move || {
            let previous = current.take()?;
            if !previous.is_redirect() {
                return None;
            }
            let target = previous.location()?.to_string();
            match self.head(&target) {
                Ok(next) => {
                    current = Some(next.clone());
                    Some(Ok(next))
                }
                Err(e) => Some(Err(e)),
            }
        }))
    }
}

#[allow(dead_code)]
pub fn urls(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
