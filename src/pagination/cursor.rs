/// Position of a paged listing between two remote calls.
///
/// The cursor only moves through [`PageCursor::after`], which is the single
/// place deciding whether a response's token means "more pages" or "done".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PageCursor {
    /// No page requested yet
    #[default]
    Start,
    /// The previous page carried this token; pass it back verbatim
    HasMore(String),
    /// The previous page carried no token, or the listing failed
    Done,
}

impl PageCursor {
    pub fn new() -> Self {
        Self::Start
    }

    /// Transition taken after a page arrives. Absent and empty tokens both end the listing.
    pub fn after(next_page_token: Option<String>) -> Self {
        match next_page_token {
            Some(token) if !token.is_empty() => Self::HasMore(token),
            _ => Self::Done,
        }
    }

    pub fn advance(&mut self, next_page_token: Option<String>) {
        *self = Self::after(next_page_token);
    }

    pub fn finish(&mut self) {
        *self = Self::Done;
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Token to send with the next request, if any
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::HasMore(token) => Some(token),
            Self::Start | Self::Done => None,
        }
    }
}
