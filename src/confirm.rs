//! Seams to the outside world: the blocking yes/no prompt and page navigation.

/// Blocking confirmation prompt. The caller does not proceed until it returns.
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// Full navigation request; the response is the server collaborator's business.
pub trait Navigator {
    fn navigate(&mut self, path: &str);
}

/// Navigator that queues requests so the caller can route them after the handler returns.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PendingNavigation {
    requests: Vec<String>,
}

impl PendingNavigation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> &[String] {
        &self.requests
    }

    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.requests)
    }
}

impl Navigator for PendingNavigation {
    fn navigate(&mut self, path: &str) {
        self.requests.push(path.to_string());
    }
}

/// `/<resource>/delete/<identifier>`
pub fn delete_path(resource: &str, identifier: &str) -> String {
    format!("/{}/delete/{}", resource.trim_matches('/'), identifier)
}
