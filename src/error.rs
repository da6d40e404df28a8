pub type GraphanimResult<T> = Result<T, GraphanimError>;

#[derive(thiserror::Error, Debug)]
pub enum GraphanimError {
    #[error("malformed graph: {0}")]
    MalformedGraph(String),

    #[error("malformed artifact: {0}")]
    MalformedArtifact(String),

    #[error("missing file: {0}")]
    MissingFile(String),

    #[error("rendering surface error: {0}")]
    Surface(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GraphanimError {
    pub fn malformed_graph(msg: impl Into<String>) -> Self {
        Self::MalformedGraph(msg.into())
    }

    pub fn malformed_artifact(msg: impl Into<String>) -> Self {
        Self::MalformedArtifact(msg.into())
    }

    pub fn missing_file(msg: impl Into<String>) -> Self {
        Self::MissingFile(msg.into())
    }

    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            GraphanimError::malformed_graph("x")
                .to_string()
                .contains("malformed graph:")
        );
        assert!(
            GraphanimError::malformed_artifact("x")
                .to_string()
                .contains("malformed artifact:")
        );
        assert!(
            GraphanimError::missing_file("x")
                .to_string()
                .contains("missing file:")
        );
        assert!(
            GraphanimError::surface("x")
                .to_string()
                .contains("rendering surface error:")
        );
        assert!(
            GraphanimError::serde("x")
                .to_string()
                .contains("serialization error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = GraphanimError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
