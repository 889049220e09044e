use uuid::Uuid;

/// Correlation ID that follows one user-visible flow end to end.
#[derive(Clone, Debug)]
pub struct TraceId(String);

impl TraceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TraceId {
    fn default() -> Self {
        Self(Uuid::new_v4().as_hyphenated().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_ids_are_unique() {
        let a = TraceId::default();
        let b = TraceId::default();
        assert_ne!(a.as_str(), b.as_str());
        assert_eq!(a.as_str().len(), 36);
    }
}
