pub mod listing;
pub mod polling;
pub mod progress;
pub mod querying;
