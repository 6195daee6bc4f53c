pub mod bar;
pub mod config;
pub mod selection;
pub mod series;
pub mod timeframe;
pub mod transition;
pub mod view;
pub mod view_mode;
