use postgres_unit_of_work::Executor;

/// Counters behind generated container codes and batch numbers.
///
/// Each scope hands out 1, 2, 3, ... and never reuses a value, even when the
/// row that consumed it is deleted later.
pub struct CodeSequenceRepositoryImpl {
    pub executor: Executor,
}

impl CodeSequenceRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }

    /// Container codes are unique per code prefix, so that is what they count.
    /// The prefix has no year: a route's March 7 continues last year's sequence.
    pub fn container_scope(code_prefix: &str) -> String {
        format!("container:{code_prefix}")
    }

    /// Batch numbers are unique across containers, so they count per code prefix too.
    pub fn batch_scope(code_prefix: &str) -> String {
        format!("batch:{code_prefix}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scopes() {
        assert_eq!(
            CodeSequenceRepositoryImpl::container_scope("KR-40FT-0307"),
            "container:KR-40FT-0307"
        );
        assert_eq!(CodeSequenceRepositoryImpl::batch_scope("KR-40FT-0307"), "batch:KR-40FT-0307");
    }
}
