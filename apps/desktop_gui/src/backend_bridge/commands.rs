//! Backend commands queued from UI to backend worker.

use client_core::FormSnapshot;

#[derive(Debug, Clone)]
pub enum BackendCommand {
    Submit { form: FormSnapshot },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Submit { .. } => "submit",
        }
    }
}
