pub type CardResult<T> = Result<T, CardError>;

#[derive(thiserror::Error, Debug)]
pub enum CardError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("store error: {0}")]
    Store(String),

    /// A render was requested while another one was in flight. New triggers
    /// are rejected, never queued; the in-flight render is unaffected.
    #[error("a render is already in flight")]
    Busy,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CardError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            CardError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(CardError::render("x").to_string().contains("render error:"));
        assert!(CardError::store("x").to_string().contains("store error:"));
        assert!(CardError::Busy.to_string().contains("in flight"));
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = CardError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
