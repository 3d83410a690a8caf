/// What an embedding backend answered, once the transport succeeded.
///
/// Transport failures (timeouts, refused connections, HTTP errors) are `Err`s.
/// A reply that arrived but cannot be trusted is `Malformed`, and callers route
/// it through the same path as a failed call.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendReply {
    Embeddings(Vec<Vec<f32>>),
    Malformed { reason: String },
}

impl BackendReply {
    /// Check the reply against the request: one vector per input, each of
    /// `dimensions` floats. Anything else becomes `Malformed`.
    pub fn validate(self, expected_count: usize, dimensions: usize) -> Self {
        match self {
            Self::Embeddings(vectors) => {
                if vectors.len() != expected_count {
                    return Self::Malformed {
                        reason: format!(
                            "expected {expected_count} embeddings, got {}",
                            vectors.len()
                        ),
                    };
                }
                if let Some((i, v)) = vectors.iter().enumerate().find(|(_, v)| v.len() != dimensions)
                {
                    return Self::Malformed {
                        reason: format!(
                            "embedding #{i} has {} dimensions, expected {dimensions}",
                            v.len()
                        ),
                    };
                }
                if let Some(i) = vectors.iter().position(|v| v.iter().any(|x| !x.is_finite())) {
                    return Self::Malformed {
                        reason: format!("embedding #{i} contains non-finite values"),
                    };
                }
                Self::Embeddings(vectors)
            }
            malformed @ Self::Malformed { .. } => malformed,
        }
    }
}
