use bevy::prelude::*;
use bevy::window::{CursorIcon, PrimaryWindow, SystemCursorIcon};
use bevy_egui::EguiContexts;

use super::draw_tool::DrawingCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorTool {
    #[default]
    Pan,
    DrawPolygon,
}

impl EditorTool {
    pub fn display_name(&self) -> &'static str {
        match self {
            EditorTool::Pan => "Pan (V)",
            EditorTool::DrawPolygon => "Draw Polygon (D)",
        }
    }

    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            EditorTool::Pan => CursorIcon::System(SystemCursorIcon::Default),
            EditorTool::DrawPolygon => CursorIcon::System(SystemCursorIcon::Crosshair),
        }
    }

    pub fn all() -> &'static [EditorTool] {
        &[EditorTool::Pan, EditorTool::DrawPolygon]
    }
}

#[derive(Resource, Default)]
pub struct CurrentTool {
    pub tool: EditorTool,
}

pub fn handle_tool_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut current_tool: ResMut<CurrentTool>,
    mut drawing_commands: MessageWriter<DrawingCommand>,
    mut contexts: EguiContexts,
) {
    // Don't change tools if typing in a text field
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.wants_keyboard_input()
    {
        return;
    }

    if keyboard.just_pressed(KeyCode::KeyV) {
        current_tool.tool = EditorTool::Pan;
    } else if keyboard.just_pressed(KeyCode::KeyD) {
        current_tool.tool = EditorTool::DrawPolygon;
    }

    // Escape abandons an in-progress capture
    if keyboard.just_pressed(KeyCode::Escape) {
        drawing_commands.write(DrawingCommand::Cancel);
    }
}

pub fn update_cursor_icon(
    current_tool: Res<CurrentTool>,
    window_query: Query<Entity, With<PrimaryWindow>>,
    mut commands: Commands,
    mut contexts: EguiContexts,
) {
    let Ok(entity) = window_query.single() else {
        return;
    };

    // Use default cursor over UI, tool cursor in map space
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.is_pointer_over_area()
    {
        commands
            .entity(entity)
            .insert(CursorIcon::System(SystemCursorIcon::Default));
        return;
    }

    commands.entity(entity).insert(current_tool.tool.cursor_icon());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names() {
        assert_eq!(EditorTool::Pan.display_name(), "Pan (V)");
        assert_eq!(EditorTool::DrawPolygon.display_name(), "Draw Polygon (D)");
    }

    #[test]
    fn test_display_names_contain_shortcuts() {
        for tool in EditorTool::all() {
            let name = tool.display_name();
            assert!(name.contains('('), "Display name should contain shortcut: {}", name);
            assert!(name.contains(')'), "Display name should contain shortcut: {}", name);
        }
    }

    #[test]
    fn test_all_returns_all_tools() {
        let all = EditorTool::all();
        assert_eq!(all.len(), 2);
        assert!(all.contains(&EditorTool::Pan));
        assert!(all.contains(&EditorTool::DrawPolygon));
    }

    #[test]
    fn test_default_tool_is_pan() {
        assert_eq!(EditorTool::default(), EditorTool::Pan);
    }

    #[test]
    fn test_current_tool_default() {
        let current = CurrentTool::default();
        assert_eq!(current.tool, EditorTool::Pan);
    }

    #[test]
    fn test_draw_tool_has_crosshair() {
        assert_eq!(
            EditorTool::DrawPolygon.cursor_icon(),
            CursorIcon::System(SystemCursorIcon::Crosshair)
        );
    }
}
