/// Readiness of the translator's data. Install calls move the state to
/// `Loading`; `finish_loading` marks it `Ready`. Lookups check readiness
/// once instead of tracking individual pending loads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Empty,
    Loading,
    Ready,
}

impl LoadState {
    /// An install call started; queries are unreliable until finished.
    pub fn begin(&mut self) {
        *self = LoadState::Loading;
    }

    /// All pending installs are done.
    pub fn finish(&mut self) {
        *self = LoadState::Ready;
    }

    pub fn is_ready(self) -> bool {
        self == LoadState::Ready
    }
}
