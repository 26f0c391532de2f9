use log::info;

/// Track how much of a listing has been consumed
pub struct ListingProgress {
    label: String,
    items: usize,
    limit: Option<usize>,
}

impl ListingProgress {
    pub fn new(label: impl Into<String>, limit: Option<usize>) -> Self {
        Self {
            label: label.into(),
            items: 0,
            limit,
        }
    }

    pub fn increment(&mut self) {
        self.items += 1;
        self.log_progress();
    }

    pub fn count(&self) -> usize {
        self.items
    }

    /// Consumer-side bound; the listing itself never stops early
    pub fn reached_limit(&self) -> bool {
        self.limit.is_some_and(|limit| self.items >= limit)
    }

    fn log_progress(&self) {
        if should_log(self.items, self.limit) {
            info!("  → {}: {} items so far", self.label, self.items);
        }
    }
}

fn should_log(current: usize, limit: Option<usize>) -> bool {
    is_milestone(current) || is_complete(current, limit)
}

fn is_milestone(count: usize) -> bool {
    count % 10 == 0
}

fn is_complete(current: usize, limit: Option<usize>) -> bool {
    limit == Some(current)
}
