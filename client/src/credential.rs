use std::fmt::{Debug, Formatter};

/// The access key pair requests are signed with.
#[derive(Clone)]
pub struct Credential {
    /// Access key id for the account.
    pub access_key_id: String,
    /// Access key secret for the account.
    pub access_key_secret: String,
}

impl Credential {
    pub(crate) fn new(access_key_id: String, access_key_secret: String) -> Self {
        Self {
            access_key_id,
            access_key_secret,
        }
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_key_id", &Redact(&self.access_key_id))
            .field("access_key_secret", &Redact(&self.access_key_secret))
            .finish()
    }
}

/// Shows at most the first and last three characters of key material.
struct Redact<'a>(&'a str);

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.0.len() {
            0 => f.write_str("EMPTY"),
            n if n < 12 => f.write_str("***"),
            n => write!(f, "{}***{}", &self.0[..3], &self.0[n - 3..]),
        }
    }
}
