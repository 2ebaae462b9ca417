mod dialogs;
mod sidebar;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            EguiPrimaryContextPass,
            (
                sidebar::sidebar_ui,
                dialogs::error_dialogs_ui,
                dialogs::busy_indicator_ui,
            ),
        );
    }
}
