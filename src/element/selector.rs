use std::fmt;

/// Class-style locator such as `.editor`.
///
/// The leading dot is optional; matching compares the bare class token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector(String);

impl Selector {
    pub fn new(raw: impl AsRef<str>) -> Self {
        let trimmed = raw.as_ref().trim();
        Self(trimmed.strip_prefix('.').unwrap_or(trimmed).to_string())
    }

    pub fn class(&self) -> &str {
        &self.0
    }

    pub fn matches<S: AsRef<str>>(&self, classes: &[S]) -> bool {
        classes.iter().any(|class| class.as_ref() == self.0)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.0)
    }
}

impl From<&str> for Selector {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for Selector {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}
