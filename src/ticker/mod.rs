//! Update cycles: fetch both sources, pick the configured pair, paint.

pub mod poller;

use futures::future::try_join;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, error, info};

use crate::api::PriceSource;
use crate::api::types::find_pair;
use crate::dom::HostElement;
use crate::error::TickerError;
use crate::metrics::prometheus::record_cycle;
use crate::render::paint;
use crate::state::render_state::{RenderState, TickerSnapshot};
use crate::state::widget::WidgetConfig;

/// Which result wins when cycles overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CyclePolicy {
    /// Only the most recently started cycle may paint its data.
    #[default]
    LatestStarted,
    /// Every cycle paints when it resolves; the last to resolve wins.
    LastResolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Rendered { cycle: u64 },
    /// A newer cycle started while this one was in flight.
    Superseded { cycle: u64 },
}

/// One widget instance: owns its host element, configuration and the
/// state currently on screen.
pub struct Ticker {
    config: WidgetConfig,
    host: Arc<dyn HostElement>,
    source: Arc<dyn PriceSource>,
    policy: CyclePolicy,
    started: AtomicU64,
    state: Mutex<RenderState>,
}

impl Ticker {
    pub fn new(
        config: WidgetConfig,
        host: Arc<dyn HostElement>,
        source: Arc<dyn PriceSource>,
        policy: CyclePolicy,
    ) -> Self {
        Self {
            config,
            host,
            source,
            policy,
            started: AtomicU64::new(0),
            state: Mutex::new(RenderState::Empty),
        }
    }

    pub fn render_state(&self) -> RenderState {
        self.lock_state().clone()
    }

    /// Runs one cycle, logging any failure. Never fails.
    pub async fn run_cycle(&self) {
        match self.update().await {
            Ok(CycleOutcome::Rendered { cycle }) => {
                record_cycle("rendered");
                debug!(cycle, pair = %self.config.pair(), "ticker updated");
            }
            Ok(CycleOutcome::Superseded { cycle }) => {
                record_cycle("superseded");
                info!(cycle, "newer cycle in flight, discarding result");
            }
            Err(err @ TickerError::PairNotFound { .. }) => {
                record_cycle("pair_not_found");
                error!(pair = %self.config.pair(), "{err}");
            }
            Err(err) => {
                record_cycle("failed");
                error!(error = %err, "error updating ticker data");
            }
        }
    }

    /// One fetch-and-render cycle. On failure the host keeps whatever it
    /// showed last.
    pub async fn update(&self) -> Result<CycleOutcome, TickerError> {
        let cycle = self.begin_cycle();

        let (feed, volume) = try_join(
            self.source.price_feed(),
            self.source.volume(&self.config.coin, &self.config.base_currency),
        )
        .await?;

        let pair = self.config.pair();
        let entry = find_pair(&feed, &pair)
            .cloned()
            .ok_or(TickerError::PairNotFound { pair })?;

        let next = RenderState::Rendered(Box::new(TickerSnapshot { entry, volume }));
        if self.publish(cycle, next) {
            Ok(CycleOutcome::Rendered { cycle })
        } else {
            Ok(CycleOutcome::Superseded { cycle })
        }
    }

    /// Takes the next sequence number and shows the spinner. Both happen
    /// under the state lock so `publish` sees them together.
    fn begin_cycle(&self) -> u64 {
        let mut state = self.lock_state();
        let cycle = self.started.fetch_add(1, Ordering::SeqCst) + 1;
        paint(self.host.as_ref(), &RenderState::Loading, &self.config);
        *state = RenderState::Loading;
        cycle
    }

    /// Paints `next` unless the policy says a newer cycle owns the screen.
    /// The check and the paint share one lock hold.
    fn publish(&self, cycle: u64, next: RenderState) -> bool {
        let mut state = self.lock_state();
        if self.policy == CyclePolicy::LatestStarted && self.started.load(Ordering::SeqCst) != cycle {
            return false;
        }
        paint(self.host.as_ref(), &next, &self.config);
        *state = next;
        true
    }

    fn lock_state(&self) -> MutexGuard<'_, RenderState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
