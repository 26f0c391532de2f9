mod cursor;
mod page;
mod sequence;
mod state;
mod stream;

pub use cursor::PageCursor;
pub use page::{Page, PageQuery, PageRequest, check_page_size};
pub use sequence::{PagedSequence, Pages};
pub use stream::PagedStream;
