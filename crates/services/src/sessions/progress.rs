use drill_core::ViewModel;

/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

impl SessionProgress {
    #[must_use]
    pub fn from_view(view: &ViewModel) -> Self {
        let (total, answered) = match view {
            ViewModel::Start { total } => (*total, 0),
            ViewModel::Scenario { index, total, .. } => (*total, *index),
            ViewModel::Finished { total, .. } => (*total, *total),
        };
        Self {
            total,
            answered,
            remaining: total.saturating_sub(answered),
            is_complete: view.is_finished(),
        }
    }
}
