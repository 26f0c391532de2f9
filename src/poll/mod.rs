mod budget;
mod clock;
mod poller;
mod settings;
mod status;

pub use budget::WaitBudget;
pub use clock::{Clock, ManualClock, SystemClock};
pub use poller::DeadlinePoller;
pub use settings::PollSettings;
pub use status::PollStatus;
