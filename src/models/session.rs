//! Admin session
//!
//! Holds the credential entered at login. The client never checks it; the
//! backend rejects bad credentials on mutating requests. The session lives only
//! as long as the page and is never persisted.

/// Admin mode and its credential
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminSession {
    credential: Option<String>,
}

impl AdminSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter admin mode. Blank input is ignored and returns false.
    pub fn login(&mut self, credential: &str) -> bool {
        let credential = credential.trim();
        if credential.is_empty() {
            return false;
        }
        self.credential = Some(credential.to_string());
        true
    }

    pub fn logout(&mut self) {
        self.credential = None;
    }

    pub fn is_admin(&self) -> bool {
        self.credential.is_some()
    }

    /// Credential to attach to mutating requests
    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }
}
