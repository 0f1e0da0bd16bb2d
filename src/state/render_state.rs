use crate::api::types::{PriceFeedEntry, VolumeSnapshot};

/// What the host element currently shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RenderState {
    #[default]
    Empty,
    Loading,
    Rendered(Box<TickerSnapshot>),
}

impl RenderState {
    pub fn label(&self) -> &'static str {
        match self {
            RenderState::Empty => "empty",
            RenderState::Loading => "loading",
            RenderState::Rendered(_) => "rendered",
        }
    }
}

/// Data from one successful cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct TickerSnapshot {
    pub entry: PriceFeedEntry,
    pub volume: VolumeSnapshot,
}
