use std::sync::Arc;
use std::time::Duration;

use client_core::{ControllerPhase, FormController, FormSnapshot};
use crossbeam_channel::{Receiver, Sender};
use shared::domain::{FieldKind, FieldSpec, EDUCATION, FORM_SCHEMA};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::PanelState;

/// Raw input text, one entry per [`FORM_SCHEMA`] field in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct FormInputs {
    values: Vec<String>,
}

impl FormInputs {
    pub fn from_schema() -> Self {
        Self {
            values: FORM_SCHEMA
                .iter()
                .map(|spec| spec.initial.to_string())
                .collect(),
        }
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FORM_SCHEMA
            .iter()
            .zip(&self.values)
            .map(|(spec, value)| (spec.name, value.as_str()))
            .collect()
    }
}

pub struct PredictionFormApp {
    controller: Arc<FormController>,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    inputs: FormInputs,
    panel: PanelState,
}

impl PredictionFormApp {
    pub fn new(
        controller: Arc<FormController>,
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
    ) -> Self {
        Self {
            controller,
            cmd_tx,
            ui_rx,
            inputs: FormInputs::from_schema(),
            panel: PanelState::default(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.panel.apply(event);
        }
    }

    fn submit(&mut self) {
        if !self.panel.submit.enabled {
            return;
        }
        self.panel.begin_submit();
        let cmd = BackendCommand::Submit {
            form: self.inputs.snapshot(),
        };
        if let Err(message) = dispatch_backend_command(&self.cmd_tx, cmd) {
            tracing::warn!("submission not queued: {message}");
            self.panel.submit_not_queued(message);
        }
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        let controller = &self.controller;
        let values = &mut self.inputs.values;
        egui::Grid::new("prediction_form")
            .num_columns(2)
            .spacing([16.0, 6.0])
            .striped(true)
            .show(ui, |ui| {
                for (spec, value) in FORM_SCHEMA.iter().zip(values.iter_mut()) {
                    ui.label(spec.label);
                    field_widget(ui, controller, spec, value);
                    ui.end_row();
                }
            });
    }

    fn show_submit(&mut self, ui: &mut egui::Ui) {
        let control = self.panel.submit;
        let mut clicked = false;
        ui.horizontal(|ui| {
            clicked = ui
                .add_enabled(
                    control.enabled,
                    egui::Button::new(control.label).min_size(egui::vec2(200.0, 28.0)),
                )
                .clicked();
            if self.controller.phase() == ControllerPhase::Submitting {
                ui.spinner();
            }
        });
        if clicked {
            self.submit();
        }
    }

    fn show_messages(&mut self, ui: &mut egui::Ui) {
        let scroll = std::mem::take(&mut self.panel.scroll_to_result);
        if let Some(result) = &self.panel.result {
            let response = egui::Frame::group(ui.style())
                .show(ui, |ui| {
                    ui.label("Predicted expected CTC");
                    ui.heading(result.as_str());
                })
                .response;
            if scroll {
                response.scroll_to_me(Some(egui::Align::Center));
            }
        }
        if let Some(error) = &self.panel.error {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.colored_label(egui::Color32::from_rgb(200, 60, 60), error.as_str());
            });
        }
    }
}

fn field_widget(
    ui: &mut egui::Ui,
    controller: &FormController,
    spec: &FieldSpec,
    value: &mut String,
) {
    match spec.kind {
        FieldKind::Select(options) => {
            let before = value.clone();
            egui::ComboBox::from_id_salt(spec.name)
                .selected_text(value.clone())
                .width(220.0)
                .show_ui(ui, |ui| {
                    for option in options {
                        ui.selectable_value(value, option.to_string(), *option);
                    }
                });
            if *value != before && spec.name == EDUCATION {
                controller.on_education_changed(value);
            }
        }
        FieldKind::Flag => {
            let mut checked = value.trim() == "1";
            if ui.checkbox(&mut checked, "Yes").changed() {
                *value = if checked { "1" } else { "0" }.to_string();
            }
        }
        kind => {
            let mut edit = egui::TextEdit::singleline(value).desired_width(220.0);
            if let Some(hint) = bounds_hint(&kind) {
                edit = edit.hint_text(hint);
            }
            let response = ui.add(edit);
            if response.lost_focus() && kind.is_numeric_input() {
                if let Some(clamped) = controller.on_numeric_blur(spec.name, value) {
                    *value = clamped;
                }
            }
        }
    }
}

fn bounds_hint(kind: &FieldKind) -> Option<String> {
    let (bounds, optional) = match kind {
        FieldKind::OptionalYear(bounds) => (bounds, true),
        FieldKind::Float(bounds) | FieldKind::Integer(bounds) => (bounds, false),
        _ => return None,
    };
    let range = match (bounds.min, bounds.max) {
        (Some(min), Some(max)) => format!("{min}-{max}"),
        (Some(min), None) => format!(">= {min}"),
        (None, Some(max)) => format!("<= {max}"),
        (None, None) => return None,
    };
    Some(if optional {
        format!("optional, {range}")
    } else {
        range
    })
}

impl eframe::App for PredictionFormApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading("Expected CTC Prediction");
            ui.label("Fill in the candidate profile and request a salary estimate.");
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    self.show_form(ui);
                    ui.add_space(12.0);
                    self.show_submit(ui);
                    ui.add_space(12.0);
                    self.show_messages(ui);
                });
        });

        if self.panel.submit.enabled {
            ctx.request_repaint_after(Duration::from_millis(100));
        } else {
            ctx.request_repaint_after(Duration::from_millis(16));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::{CURRENT_CTC, INTERNATIONAL_DEGREE_ANY, PASSING_YEAR_OF_GRADUATION, ROLE};

    fn set(inputs: &mut FormInputs, name: &str, value: &str) {
        let idx = FORM_SCHEMA
            .iter()
            .position(|spec| spec.name == name)
            .expect("schema field");
        inputs.values[idx] = value.to_string();
    }

    #[test]
    fn fresh_form_carries_schema_initials() {
        let snapshot = FormInputs::from_schema().snapshot();
        assert_eq!(snapshot.get(EDUCATION), Some("Grad"));
        assert_eq!(snapshot.get(PASSING_YEAR_OF_GRADUATION), Some("2020"));
        assert_eq!(snapshot.get(ROLE), Some(""));
        assert_eq!(snapshot, FormSnapshot::from_schema_defaults());
    }

    #[test]
    fn snapshot_contains_every_field() {
        let mut inputs = FormInputs::from_schema();
        set(&mut inputs, CURRENT_CTC, "1200000");
        set(&mut inputs, INTERNATIONAL_DEGREE_ANY, "1");

        let snapshot = inputs.snapshot();
        assert_eq!(snapshot.len(), FORM_SCHEMA.len());
        assert_eq!(snapshot.get(CURRENT_CTC), Some("1200000"));
        assert_eq!(snapshot.get(INTERNATIONAL_DEGREE_ANY), Some("1"));
    }

    #[test]
    fn hints_describe_bounds() {
        assert_eq!(
            bounds_hint(&FieldKind::Integer(shared::domain::NumericBounds::new(0.0, 50.0))),
            Some("0-50".to_string())
        );
        assert_eq!(
            bounds_hint(&FieldKind::OptionalYear(shared::domain::NumericBounds::new(
                1970.0, 2030.0
            ))),
            Some("optional, 1970-2030".to_string())
        );
        assert_eq!(bounds_hint(&FieldKind::Text), None);
        assert_eq!(
            bounds_hint(&FieldKind::Float(shared::domain::NumericBounds::unbounded())),
            None
        );
    }
}
