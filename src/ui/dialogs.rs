//! Modal dialogs for file operation errors and in-flight operations.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::areas::{AreasLoadError, AreasSaveError, AsyncAreasOperation};

pub fn error_dialogs_ui(
    mut contexts: EguiContexts,
    mut save_error: ResMut<AreasSaveError>,
    mut load_error: ResMut<AreasLoadError>,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    if let Some(error) = save_error.message.clone() {
        egui::Window::new("Save Error")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.colored_label(egui::Color32::RED, &error);
                if ui.button("OK").clicked() {
                    save_error.message = None;
                }
            });
    }

    if let Some(error) = load_error.message.clone() {
        egui::Window::new("Load Error")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.colored_label(egui::Color32::RED, &error);
                if ui.button("OK").clicked() {
                    load_error.message = None;
                }
            });
    }

    Ok(())
}

pub fn busy_indicator_ui(
    mut contexts: EguiContexts,
    async_op: Res<AsyncAreasOperation>,
) -> Result {
    if !async_op.is_busy() {
        return Ok(());
    }

    let ctx = contexts.ctx_mut()?;
    egui::Window::new("Working")
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(egui::Align2::CENTER_TOP, [0.0, 24.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.spinner();
                if let Some(description) = &async_op.operation_description {
                    ui.label(description);
                }
            });
        });

    Ok(())
}
