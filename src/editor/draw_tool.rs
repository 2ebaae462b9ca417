//! Polygon capture session and the systems that drive it.

use bevy::prelude::*;
use chrono::Utc;

use crate::areas::AreaOfInterest;
use crate::geo::LatLng;

use super::gestures::MapClick;
use super::tools::{CurrentTool, EditorTool};

/// Commands a UI surface (or the gesture layer) issues to the session.
#[derive(Message)]
pub enum DrawingCommand {
    Start,
    Finish,
    Cancel,
}

/// Handoff of a finalized polygon to whatever stores it. The session does
/// not keep, render, or persist the polygon itself.
#[derive(Message)]
pub struct AoiFinalized {
    pub area: AreaOfInterest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawMode {
    #[default]
    Idle,
    Capturing,
}

/// Point-capture state machine.
///
/// `Idle` is the resting state; `begin` clears the vertex buffer and enters
/// `Capturing`, where each primary click appends a vertex. Finishing below
/// three vertices is a no-op - the shape is not yet closable - and
/// cancelling discards the buffer without emitting anything.
#[derive(Resource, Default)]
pub struct DrawingSession {
    mode: DrawMode,
    buffer: Vec<LatLng>,
    finalized_count: usize,
}

impl DrawingSession {
    pub fn begin(&mut self) {
        self.buffer.clear();
        self.mode = DrawMode::Capturing;
    }

    /// Append a vertex. Ignored outside of `Capturing`.
    pub fn add_vertex(&mut self, point: LatLng) {
        if self.mode == DrawMode::Capturing {
            self.buffer.push(point);
        }
    }

    /// Finalize the polygon under construction.
    ///
    /// Returns `None` - staying in `Capturing` with the buffer intact - when
    /// fewer than three vertices have been captured. Otherwise emits a
    /// polygon with the vertices in capture order and returns to `Idle`.
    pub fn finish(&mut self, id: i64) -> Option<AreaOfInterest> {
        if self.mode != DrawMode::Capturing || self.buffer.len() < 3 {
            return None;
        }

        self.finalized_count += 1;
        let area = AreaOfInterest {
            id,
            name: format!("AOI {}", self.finalized_count),
            points: std::mem::take(&mut self.buffer),
        };
        self.mode = DrawMode::Idle;
        Some(area)
    }

    /// Abandon the capture, discarding all buffered vertices.
    pub fn cancel(&mut self) {
        self.buffer.clear();
        self.mode = DrawMode::Idle;
    }

    /// Continue name numbering after `finalized` polygons already exist
    /// (used when a saved collection is loaded).
    pub fn resume_numbering(&mut self, finalized: usize) {
        self.finalized_count = finalized;
    }

    pub fn is_capturing(&self) -> bool {
        self.mode == DrawMode::Capturing
    }

    #[allow(dead_code)]
    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    pub fn vertices(&self) -> &[LatLng] {
        &self.buffer
    }
}

/// Applies UI commands and capture clicks to the session.
pub fn handle_capture(
    mut session: ResMut<DrawingSession>,
    mut current_tool: ResMut<CurrentTool>,
    mut drawing_commands: MessageReader<DrawingCommand>,
    mut clicks: MessageReader<MapClick>,
    mut finalized: MessageWriter<AoiFinalized>,
) {
    for command in drawing_commands.read() {
        match command {
            DrawingCommand::Start => {
                current_tool.tool = EditorTool::DrawPolygon;
            }
            DrawingCommand::Finish => {
                try_finish(&mut session, &mut current_tool, &mut finalized);
            }
            DrawingCommand::Cancel => {
                if session.is_capturing() {
                    info!(
                        "Cancelled capture, discarding {} vertices",
                        session.vertices().len()
                    );
                    session.cancel();
                    current_tool.tool = EditorTool::Pan;
                }
            }
        }
    }

    if !session.is_capturing() {
        clicks.clear();
        return;
    }

    for click in clicks.read() {
        session.add_vertex(click.position);
        debug!(
            "Captured vertex {} at [{:.5}, {:.5}]",
            session.vertices().len(),
            click.position.lat,
            click.position.lng
        );
    }
}

/// Keeps the session in lockstep with the active tool: selecting the draw
/// tool begins a capture, leaving it abandons one.
pub fn sync_tool_session(
    current_tool: Res<CurrentTool>,
    mut session: ResMut<DrawingSession>,
) {
    if !current_tool.is_changed() {
        return;
    }

    match current_tool.tool {
        EditorTool::DrawPolygon => {
            if !session.is_capturing() {
                session.begin();
            }
        }
        _ => {
            if session.is_capturing() {
                info!(
                    "Tool changed, discarding {} captured vertices",
                    session.vertices().len()
                );
                session.cancel();
            }
        }
    }
}

fn try_finish(
    session: &mut DrawingSession,
    current_tool: &mut CurrentTool,
    finalized: &mut MessageWriter<AoiFinalized>,
) {
    let captured = session.vertices().len();
    match session.finish(Utc::now().timestamp_millis()) {
        Some(area) => {
            info!("Finalized \"{}\" with {} vertices", area.name, area.points.len());
            current_tool.tool = EditorTool::Pan;
            finalized.write(AoiFinalized { area });
        }
        None => {
            debug!("Ignoring finish with {} vertices (3 required)", captured);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: [[f64; 2]; 4] = [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]];

    fn capture(session: &mut DrawingSession, coords: &[[f64; 2]]) {
        for &[lat, lng] in coords {
            session.add_vertex(LatLng::new(lat, lng));
        }
    }

    #[test]
    fn test_initial_state_is_idle() {
        let session = DrawingSession::default();
        assert_eq!(session.mode(), DrawMode::Idle);
        assert!(session.vertices().is_empty());
    }

    #[test]
    fn test_begin_enters_capturing_with_empty_buffer() {
        let mut session = DrawingSession::default();
        session.begin();
        assert_eq!(session.mode(), DrawMode::Capturing);
        assert!(session.vertices().is_empty());
    }

    #[test]
    fn test_vertices_ignored_while_idle() {
        let mut session = DrawingSession::default();
        session.add_vertex(LatLng::new(1.0, 1.0));
        assert!(session.vertices().is_empty());
    }

    #[test]
    fn test_finish_below_three_vertices_is_a_no_op() {
        let mut session = DrawingSession::default();
        session.begin();
        capture(&mut session, &SQUARE[..2]);

        assert!(session.finish(1).is_none());
        assert_eq!(session.mode(), DrawMode::Capturing);
        assert_eq!(session.vertices().len(), 2);
    }

    #[test]
    fn test_finish_emits_polygon_in_capture_order() {
        let mut session = DrawingSession::default();
        session.begin();
        capture(&mut session, &SQUARE);

        let area = session.finish(1700000000000).unwrap();
        assert_eq!(area.name, "AOI 1");
        assert_eq!(area.id, 1700000000000);
        assert_eq!(
            area.points,
            SQUARE.iter().map(|&[lat, lng]| LatLng::new(lat, lng)).collect::<Vec<_>>()
        );
        assert_eq!(session.mode(), DrawMode::Idle);
        assert!(session.vertices().is_empty());
    }

    #[test]
    fn test_names_count_finalized_polygons() {
        let mut session = DrawingSession::default();

        session.begin();
        capture(&mut session, &SQUARE);
        assert_eq!(session.finish(1).unwrap().name, "AOI 1");

        session.begin();
        capture(&mut session, &SQUARE);
        assert_eq!(session.finish(2).unwrap().name, "AOI 2");
    }

    #[test]
    fn test_cancel_discards_without_emitting() {
        let mut session = DrawingSession::default();
        session.begin();
        capture(&mut session, &SQUARE);
        session.cancel();

        assert_eq!(session.mode(), DrawMode::Idle);
        assert!(session.vertices().is_empty());

        // the abandoned capture did not consume a name
        session.begin();
        capture(&mut session, &SQUARE);
        assert_eq!(session.finish(3).unwrap().name, "AOI 1");
    }

    #[test]
    fn test_begin_clears_previous_buffer() {
        let mut session = DrawingSession::default();
        session.begin();
        capture(&mut session, &SQUARE[..2]);
        session.begin();
        assert!(session.vertices().is_empty());
    }

    #[test]
    fn test_finish_while_idle_is_a_no_op() {
        let mut session = DrawingSession::default();
        assert!(session.finish(1).is_none());
    }

    #[test]
    fn test_resume_numbering() {
        let mut session = DrawingSession::default();
        session.resume_numbering(7);
        session.begin();
        capture(&mut session, &SQUARE);
        assert_eq!(session.finish(1).unwrap().name, "AOI 8");
    }
}
