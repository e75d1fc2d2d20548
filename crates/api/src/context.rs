/// Authenticated caller of a request.
///
/// Inserted by the auth middleware; handlers that persist order events read the
/// credential from here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerContext {
    token: String,
}

impl CallerContext {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// The credential the caller presented, verbatim.
    pub fn token(&self) -> &str {
        &self.token
    }
}
