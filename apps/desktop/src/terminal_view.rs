//! Renders controller updates on stdout/stderr.

use client_core::{PredictionView, SubmitControl};

pub struct TerminalView;

impl PredictionView for TerminalView {
    fn clear_messages(&self) {}

    fn set_submit_control(&self, control: SubmitControl) {
        if !control.enabled {
            eprintln!("{}", control.label);
        }
    }

    fn show_result(&self, formatted_salary: &str) {
        println!("Predicted expected CTC: {formatted_salary}");
    }

    fn show_error(&self, message: &str) {
        eprintln!("Error: {message}");
    }
}
