//! Scripted page source shared by unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{Page, PageSource, Result, SearchError};

enum Scripted {
    Page(Page),
    Fail(u16),
}

/// Page source answering from a fixed script keyed by start index.
pub(crate) struct ScriptedSource {
    script: HashMap<u32, Scripted>,
    calls: Mutex<Vec<u32>>,
}

impl ScriptedSource {
    pub(crate) fn new() -> Self {
        Self {
            script: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn page(mut self, start_index: u32, page: Page) -> Self {
        self.script.insert(start_index, Scripted::Page(page));
        self
    }

    pub(crate) fn fail(mut self, start_index: u32, status: u16) -> Self {
        self.script.insert(start_index, Scripted::Fail(status));
        self
    }

    /// Start indexes requested so far, in order.
    pub(crate) fn calls(&self) -> Vec<u32> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageSource for ScriptedSource {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn fetch_page(&self, _query: &str, start_index: u32) -> Result<Page> {
        self.calls.lock().unwrap().push(start_index);
        match self.script.get(&start_index) {
            Some(Scripted::Page(page)) => Ok(page.clone()),
            Some(Scripted::Fail(status)) => Err(SearchError::Upstream {
                status: *status,
                message: "scripted failure".to_string(),
            }),
            None => Err(SearchError::Upstream {
                status: 404,
                message: format!("no page scripted at {}", start_index),
            }),
        }
    }
}
