//! View-model building (`view`) and markup assembly (`html`).

pub mod html;
pub mod view;

use crate::dom::HostElement;
use crate::metrics::prometheus::record_render;
use crate::state::render_state::RenderState;
use crate::state::widget::WidgetConfig;
use view::TickerView;

/// Markup for `state`. Same input, same bytes.
pub fn render(state: &RenderState, config: &WidgetConfig) -> String {
    match state {
        RenderState::Empty => String::new(),
        RenderState::Loading => html::loading_fragment(),
        RenderState::Rendered(snapshot) => html::ticker_fragment(&TickerView::build(config, snapshot)),
    }
}

/// Replaces the host element's content with the markup for `state`.
pub fn paint(host: &dyn HostElement, state: &RenderState, config: &WidgetConfig) {
    host.set_inner_html(render(state, config));
    record_render(state.label());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{PriceFeedEntry, VolumeSnapshot};
    use crate::state::render_state::TickerSnapshot;
    use crate::theme::Theme;
    use std::collections::HashMap;

    fn config() -> WidgetConfig {
        WidgetConfig {
            coin: "BTC".into(),
            base_currency: "USD".into(),
            show_percent_change_24h: false,
            theme: Theme::Light,
            enable_polling: false,
        }
    }

    fn rendered(change: f64) -> RenderState {
        RenderState::Rendered(Box::new(TickerSnapshot {
            entry: PriceFeedEntry {
                pair: "BTCUSD".into(),
                price: "100".into(),
                percent_change_24h: Some(change),
            },
            volume: VolumeSnapshot { volume: HashMap::new() },
        }))
    }

    #[test]
    fn rendering_is_idempotent() {
        let state = rendered(1.0);
        assert_eq!(render(&state, &config()), render(&state, &config()));
    }

    #[test]
    fn percent_markup_absent_regardless_of_sign() {
        for change in [2.5, -2.5] {
            let html = render(&rendered(change), &config());
            assert!(!html.contains("% CHANGE"));
            assert!(!html.contains("2.5%"));
        }
    }

    #[test]
    fn empty_state_clears_content() {
        assert_eq!(render(&RenderState::Empty, &config()), "");
    }
}
