pub mod render_state;
pub mod widget;
