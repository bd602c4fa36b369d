use std::collections::HashSet;

/// Allow-list gate between parsed completions and the privileged executor.
///
/// Completions are untrusted input running at console privilege: a command
/// runs only if its first whitespace-delimited token is listed. Deny by
/// default.
#[derive(Debug)]
pub struct CommandPolicy {
    allowed: HashSet<String>,
}

impl CommandPolicy {
    pub fn new<I>(allowed: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            allowed: allowed
                .into_iter()
                .map(|s| s.trim().to_ascii_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    pub fn permits(&self, command: &str) -> bool {
        let Some(root) = command.split_whitespace().next() else {
            return false;
        };
        self.allowed.contains(&root.to_ascii_lowercase())
    }
}
