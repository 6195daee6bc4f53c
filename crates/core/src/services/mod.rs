pub mod series_store;
pub mod timer_queue;
pub mod transition_coordinator;
pub mod view_mode_controller;
pub mod window_selector;
