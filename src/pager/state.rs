/// Whether a page load is underway. Advisory only: it gates new
/// navigation calls but does not serialize loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
}

/// Position of a pager within its page sequence.
///
/// Every mutation goes through one of the transition methods below. They are
/// applied by whichever continuation finishes last, so overlapping loads
/// resolve as last-write-wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerState {
    current: i64,
    max: i64,
    load_state: LoadState,
}

impl PagerState {
    pub fn new() -> Self {
        PagerState {
            current: 1,
            max: 1,
            load_state: LoadState::Idle,
        }
    }

    /// Current page, 1-based.
    pub fn current(&self) -> i64 {
        self.current
    }

    /// Last valid page.
    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    pub(crate) fn begin_load(&mut self) {
        self.load_state = LoadState::Loading;
    }

    pub(crate) fn finish_load(&mut self) {
        self.load_state = LoadState::Idle;
    }

    pub(crate) fn step_forward(&mut self) {
        self.current += 1;
    }

    pub(crate) fn step_back(&mut self) {
        self.current -= 1;
    }

    pub(crate) fn move_to(&mut self, page: i64) {
        self.current = page;
    }

    pub(crate) fn move_to_last(&mut self) {
        self.current = self.max;
    }

    pub(crate) fn set_max(&mut self, max: i64) {
        self.max = max;
    }

    pub(crate) fn reset(&mut self) {
        *self = PagerState::new();
    }
}

impl Default for PagerState {
    fn default() -> Self {
        PagerState::new()
    }
}
