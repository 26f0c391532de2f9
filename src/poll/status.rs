/// Outcome of one status check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollStatus<T> {
    /// Not finished yet, keep waiting
    Pending,
    /// Finished with this payload
    Complete(T),
}

impl<T> PollStatus<T> {
    /// Classify `value` with a caller-defined completion predicate
    pub fn from_predicate(value: T, is_complete: impl FnOnce(&T) -> bool) -> Self {
        if is_complete(&value) {
            Self::Complete(value)
        } else {
            Self::Pending
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }

    pub fn into_complete(self) -> Option<T> {
        match self {
            Self::Complete(value) => Some(value),
            Self::Pending => None,
        }
    }
}

impl<T> From<Option<T>> for PollStatus<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Complete(value),
            None => Self::Pending,
        }
    }
}
