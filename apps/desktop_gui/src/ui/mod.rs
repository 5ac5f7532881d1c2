//! UI layer for desktop GUI: app shell and the prediction form.

pub mod app;

pub use app::PredictionFormApp;
