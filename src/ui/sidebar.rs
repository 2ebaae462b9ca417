//! The left sidebar: drawing controls, the saved-areas list, view status,
//! performance stats, and file actions.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::areas::{
    estimated_memory_mb, AreaOfInterest, AreasDirtyState, AsyncAreasOperation, CurrentAreasFile,
    DeleteAreaRequest, LoadAreasRequest, SaveAreasRequest,
};
use crate::constants::{MAX_ZOOM, MIN_ZOOM};
use crate::editor::{
    CurrentTool, CursorReadout, DrawingCommand, DrawingSession, EditorTool, MapView,
};
use crate::perf::PerformanceMonitor;

#[allow(clippy::too_many_arguments)]
pub fn sidebar_ui(
    mut contexts: EguiContexts,
    session: Res<DrawingSession>,
    current_tool: Res<CurrentTool>,
    areas: Query<(Entity, &AreaOfInterest)>,
    mut view: ResMut<MapView>,
    readout: Res<CursorReadout>,
    mut monitor: ResMut<PerformanceMonitor>,
    dirty_state: Res<AreasDirtyState>,
    current_file: Res<CurrentAreasFile>,
    async_op: Res<AsyncAreasOperation>,
    mut drawing_commands: MessageWriter<DrawingCommand>,
    mut delete_events: MessageWriter<DeleteAreaRequest>,
    mut save_events: MessageWriter<SaveAreasRequest>,
    mut load_events: MessageWriter<LoadAreasRequest>,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    egui::SidePanel::left("sidebar")
        .default_width(300.0)
        .show(ctx, |ui| {
            ui.heading("Define Area of Interest");
            ui.separator();

            drawing_section(ui, &session, &current_tool, &mut drawing_commands);
            ui.separator();

            areas_section(ui, &areas, &mut delete_events);
            ui.separator();

            view_section(ui, &mut view, &readout);
            ui.separator();

            file_section(
                ui,
                &dirty_state,
                &current_file,
                &async_op,
                &mut save_events,
                &mut load_events,
            );

            ui.separator();
            performance_section(ui, &mut monitor);
        });

    Ok(())
}

fn drawing_section(
    ui: &mut egui::Ui,
    session: &DrawingSession,
    current_tool: &CurrentTool,
    drawing_commands: &mut MessageWriter<DrawingCommand>,
) {
    ui.label(egui::RichText::new("Drawing Tools").strong());

    ui.horizontal(|ui| {
        for tool in EditorTool::all() {
            let selected = current_tool.tool == *tool;
            if ui.selectable_label(selected, tool.display_name()).clicked() && !selected {
                let command = match tool {
                    EditorTool::Pan => DrawingCommand::Cancel,
                    EditorTool::DrawPolygon => DrawingCommand::Start,
                };
                drawing_commands.write(command);
            }
        }
    });

    if session.is_capturing() {
        if ui.button("Finish drawing (double-click)").clicked() {
            drawing_commands.write(DrawingCommand::Finish);
        }
        if ui.button("Cancel (Esc)").clicked() {
            drawing_commands.write(DrawingCommand::Cancel);
        }
        let captured = session.vertices().len();
        let hint = if captured < 3 {
            format!("{} of 3 vertices needed", captured)
        } else {
            format!("{} vertices captured", captured)
        };
        ui.label(hint);
    } else if ui.button("Start Drawing Polygon").clicked() {
        drawing_commands.write(DrawingCommand::Start);
    }
}

fn areas_section(
    ui: &mut egui::Ui,
    areas: &Query<(Entity, &AreaOfInterest)>,
    delete_events: &mut MessageWriter<DeleteAreaRequest>,
) {
    let mut entries: Vec<(Entity, &AreaOfInterest)> = areas.iter().collect();
    entries.sort_by_key(|(_, area)| area.id);

    ui.label(egui::RichText::new(format!("Saved Areas ({})", entries.len())).strong());

    if entries.is_empty() {
        ui.label("No areas saved yet");
        return;
    }

    egui::ScrollArea::vertical()
        .max_height(240.0)
        .show(ui, |ui| {
            for (entity, area) in entries {
                ui.horizontal(|ui| {
                    ui.label(&area.name);
                    if ui.small_button("Delete").clicked() {
                        delete_events.write(DeleteAreaRequest { entity });
                    }
                });
                ui.small(format!("{} vertices", area.points.len()));
            }
        });

    ui.small(format!(
        "~{:.2} MB",
        estimated_memory_mb(areas.iter().map(|(_, area)| area))
    ));
}

fn view_section(ui: &mut egui::Ui, view: &mut ResMut<MapView>, readout: &CursorReadout) {
    ui.label(egui::RichText::new("View").strong());

    ui.horizontal(|ui| {
        ui.label(format!("Zoom: {}", view.zoom));
        // Mutable deref only on click; unconditional access would mark the
        // view changed every frame
        if ui.small_button("-").clicked() && view.zoom > MIN_ZOOM {
            view.zoom_out();
        }
        if ui.small_button("+").clicked() && view.zoom < MAX_ZOOM {
            view.zoom_in();
        }
    });

    match readout.position {
        Some(position) => {
            ui.small(format!("{:.5}, {:.5}", position.lat, position.lng));
        }
        None => {
            ui.small("Move the cursor over the map");
        }
    }
}

fn file_section(
    ui: &mut egui::Ui,
    dirty_state: &AreasDirtyState,
    current_file: &CurrentAreasFile,
    async_op: &AsyncAreasOperation,
    save_events: &mut MessageWriter<SaveAreasRequest>,
    load_events: &mut MessageWriter<LoadAreasRequest>,
) {
    ui.label(egui::RichText::new("File").strong());

    if let Some(description) = &async_op.operation_description {
        ui.label(description);
        return;
    }

    ui.horizontal(|ui| {
        if ui.button("Save Areas...").clicked() {
            let mut dialog = rfd::FileDialog::new().add_filter("JSON", &["json"]);
            if let Some(name) = current_file
                .path
                .as_ref()
                .and_then(|p| p.file_name())
                .and_then(|n| n.to_str())
            {
                dialog = dialog.set_file_name(name);
            } else {
                dialog = dialog.set_file_name("areas.json");
            }

            if let Some(path) = dialog.save_file() {
                save_events.write(SaveAreasRequest { path });
            }
        }

        if ui.button("Load Areas...").clicked()
            && let Some(path) = rfd::FileDialog::new()
                .add_filter("JSON", &["json"])
                .pick_file()
        {
            load_events.write(LoadAreasRequest { path });
        }
    });

    if dirty_state.is_dirty {
        ui.small("Unsaved changes");
    }
}

fn performance_section(ui: &mut egui::Ui, monitor: &mut ResMut<PerformanceMonitor>) {
    ui.collapsing("Performance", |ui| {
        let labels = monitor.labels();
        if labels.is_empty() {
            ui.small("No measurements yet");
            return;
        }

        for label in labels {
            if let Some(stats) = monitor.stats(label) {
                ui.small(format!(
                    "{}: avg {:.2}ms min {:.2}ms max {:.2}ms ({} runs)",
                    label,
                    stats.avg.as_secs_f64() * 1000.0,
                    stats.min.as_secs_f64() * 1000.0,
                    stats.max.as_secs_f64() * 1000.0,
                    stats.count,
                ));
            }
        }

        if ui.small_button("Reset").clicked() {
            monitor.clear();
        }
    });
}
