/// Result alias for `sociogram`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by graph construction and analysis.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The request is malformed: a component count outside `[1, node_count]`,
    /// an empty attribute name, a threshold outside `[0, 1]`, a duplicate node
    /// or edge, a self-loop.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A node or edge named by the request is not part of the graph.
    #[error("not found: {0}")]
    NotFound(String),

    /// Edges ran out before the requested component count was reached.
    #[error("cannot reach {requested} components: edges exhausted at {reached}")]
    Unsatisfiable {
        /// Requested component count.
        requested: usize,
        /// Component count when no edges were left.
        reached: usize,
    },
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidRequest(msg.into())
    }

    pub(crate) fn node_not_found(id: &str) -> Self {
        Error::NotFound(format!("node '{id}'"))
    }
}
