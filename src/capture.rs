//! Pointer gesture capture
//!
//! Buffers one stroke of pointer samples behind a minimum-distance filter
//! and, on release, turns it into track segments according to the drawing
//! mode that was active when the stroke began.
//!
//! ```text
//! Idle --down--> Capturing --move--> Capturing (sample kept or dropped)
//!                    |
//!                    +--up--> Idle (Committed | Discarded)
//! ```

use serde::{Deserialize, Serialize};

use crate::consts::JOINT_EPSILON;
use crate::geom::{Point, dedup_consecutive, simplify, smooth};
use crate::settings::Settings;
use crate::track::{Material, TrackSegment, build_track_with};

/// Drawing tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DrawingMode {
    /// Freehand, simplified and smoothed
    #[default]
    Pencil,
    /// Straight chord from first to last sample
    Line,
    /// Freehand boost track
    Rocket,
}

impl DrawingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DrawingMode::Pencil => "Pencil",
            DrawingMode::Line => "Line",
            DrawingMode::Rocket => "Rocket",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pencil" => Some(DrawingMode::Pencil),
            "line" => Some(DrawingMode::Line),
            "rocket" | "boost" => Some(DrawingMode::Rocket),
            _ => None,
        }
    }

    /// Material for segments drawn with this tool
    pub fn material(&self) -> Material {
        match self {
            DrawingMode::Pencil | DrawingMode::Line => Material::track(),
            DrawingMode::Rocket => Material::boost(),
        }
    }
}

/// Pointer event phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

/// One pointer sample in viewport pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub pos: Point,
}

impl PointerEvent {
    pub fn down(pos: Point) -> Self {
        Self { kind: PointerKind::Down, pos }
    }

    pub fn moved(pos: Point) -> Self {
        Self { kind: PointerKind::Move, pos }
    }

    pub fn up(pos: Point) -> Self {
        Self { kind: PointerKind::Up, pos }
    }
}

/// What a pointer event did to the capture
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome {
    /// Nothing changed (out-of-stroke event or filtered sample)
    Ignored,
    /// A stroke began
    Started,
    /// A sample was kept; carries the live preview polyline
    Preview(Vec<Point>),
    /// The stroke finished and produced track
    Committed(Vec<TrackSegment>),
    /// The stroke finished without producing track
    Discarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureState {
    Idle,
    /// Drawing mode is fixed for the whole stroke
    Capturing { mode: DrawingMode },
}

/// Stroke buffer and its state machine
#[derive(Debug, Clone)]
pub struct GestureCapture {
    state: CaptureState,
    buffer: Vec<Point>,
}

impl Default for GestureCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureCapture {
    pub fn new() -> Self {
        Self {
            state: CaptureState::Idle,
            buffer: Vec::new(),
        }
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self.state, CaptureState::Capturing { .. })
    }

    /// Mode of the stroke in progress
    pub fn active_mode(&self) -> Option<DrawingMode> {
        match self.state {
            CaptureState::Capturing { mode } => Some(mode),
            CaptureState::Idle => None,
        }
    }

    /// Samples buffered so far
    pub fn buffer(&self) -> &[Point] {
        &self.buffer
    }

    /// Dispatch one pointer event. `mode` is only read on pointer-down.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        mode: DrawingMode,
        settings: &Settings,
    ) -> CaptureOutcome {
        match event.kind {
            PointerKind::Down => self.pointer_down(event.pos, mode),
            PointerKind::Move => self.pointer_move(event.pos, settings),
            PointerKind::Up => self.pointer_up(settings),
        }
    }

    pub fn pointer_down(&mut self, pos: Point, mode: DrawingMode) -> CaptureOutcome {
        if self.is_capturing() {
            log::debug!("Pointer down during a stroke, ignored");
            return CaptureOutcome::Ignored;
        }

        self.state = CaptureState::Capturing { mode };
        self.buffer.clear();
        self.buffer.push(pos);
        log::debug!("{} stroke started at ({:.1}, {:.1})", mode.as_str(), pos.x, pos.y);
        CaptureOutcome::Started
    }

    pub fn pointer_move(&mut self, pos: Point, settings: &Settings) -> CaptureOutcome {
        let CaptureState::Capturing { mode } = self.state else {
            return CaptureOutcome::Ignored;
        };

        let min_dist = settings.min_sample_distance;
        match self.buffer.last() {
            Some(&last) if last.distance_squared(pos) <= min_dist * min_dist => {
                CaptureOutcome::Ignored
            }
            _ => {
                self.buffer.push(pos);
                CaptureOutcome::Preview(preview(&self.buffer, mode, settings))
            }
        }
    }

    pub fn pointer_up(&mut self, settings: &Settings) -> CaptureOutcome {
        let CaptureState::Capturing { mode } = self.state else {
            return CaptureOutcome::Ignored;
        };

        self.state = CaptureState::Idle;
        let stroke = std::mem::take(&mut self.buffer);
        if stroke.len() < 2 {
            log::debug!("Discarding stroke with {} sample(s)", stroke.len());
            return CaptureOutcome::Discarded;
        }

        let segments = commit_stroke(&stroke, mode, settings);
        if segments.is_empty() {
            log::debug!("Stroke collapsed to a single point, discarded");
            return CaptureOutcome::Discarded;
        }

        log::info!(
            "{} stroke: {} samples -> {} segments",
            mode.as_str(),
            stroke.len(),
            segments.len()
        );
        CaptureOutcome::Committed(segments)
    }

    /// Abandon the stroke in progress without emitting anything
    pub fn cancel(&mut self) {
        if self.is_capturing() {
            log::debug!("Stroke cancelled");
        }
        self.state = CaptureState::Idle;
        self.buffer.clear();
    }
}

/// Coarse polyline for live feedback while drawing
pub fn preview(stroke: &[Point], mode: DrawingMode, settings: &Settings) -> Vec<Point> {
    match (mode, stroke) {
        (_, []) => Vec::new(),
        (DrawingMode::Line, [first, .., last]) => vec![*first, *last],
        (DrawingMode::Line, [only]) => vec![*only],
        (DrawingMode::Pencil | DrawingMode::Rocket, _) => smooth(
            &simplify_stroke(stroke, settings.preview_simplify_tolerance),
            settings.preview_segments(),
        ),
    }
}

/// `simplify` that survives closed strokes.
///
/// A stroke ending where it began has a zero-length chord, which collapses
/// the whole path to its endpoints. Such strokes are split at the sample
/// farthest from the start and each half is simplified on its own.
fn simplify_stroke(stroke: &[Point], tolerance: f32) -> Vec<Point> {
    let (Some(&first), Some(&last)) = (stroke.first(), stroke.last()) else {
        return Vec::new();
    };
    let eps_sq = JOINT_EPSILON * JOINT_EPSILON;
    if stroke.len() < 3 || first.distance_squared(last) > eps_sq {
        return simplify(stroke, tolerance);
    }

    let far = stroke
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.distance_squared(first).total_cmp(&b.1.distance_squared(first)))
        .map_or(0, |(i, _)| i);
    if stroke[far].distance_squared(first) <= eps_sq {
        // Every sample sits on the start point
        return simplify(stroke, tolerance);
    }

    let mut control = simplify(&stroke[..=far], tolerance);
    control.pop();
    control.extend(simplify(&stroke[far..], tolerance));
    control
}

/// Turn a finished stroke into track segments
pub fn commit_stroke(
    stroke: &[Point],
    mode: DrawingMode,
    settings: &Settings,
) -> Vec<TrackSegment> {
    let params = settings.capsule_params();
    match (mode, stroke) {
        (_, [] | [_]) => Vec::new(),
        (DrawingMode::Line, [first, .., last]) => {
            build_track_with(&[*first, *last], mode.material(), &params)
        }
        (DrawingMode::Pencil | DrawingMode::Rocket, _) => {
            let control = simplify_stroke(stroke, settings.simplify_tolerance);
            let curve = smooth(&control, settings.smooth_segments);
            // Span joints come out of `smooth` twice
            let curve = dedup_consecutive(&curve, JOINT_EPSILON);
            build_track_with(&curve, mode.material(), &params)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::CapsuleParams;
    use glam::Vec2;

    fn run_stroke(
        capture: &mut GestureCapture,
        mode: DrawingMode,
        points: &[Point],
    ) -> CaptureOutcome {
        let settings = Settings::default();
        let (first, rest) = points.split_first().expect("non-empty stroke");
        assert_eq!(
            capture.handle(PointerEvent::down(*first), mode, &settings),
            CaptureOutcome::Started
        );
        for &p in rest {
            capture.handle(PointerEvent::moved(p), mode, &settings);
        }
        let last = *points.last().unwrap();
        capture.handle(PointerEvent::up(last), mode, &settings)
    }

    fn wavy_stroke() -> Vec<Point> {
        (0..60)
            .map(|i| {
                let x = i as f32 * 8.0;
                Vec2::new(x, 300.0 + 40.0 * (x / 80.0).sin())
            })
            .collect()
    }

    #[test]
    fn test_line_uses_only_endpoints() {
        let mut capture = GestureCapture::new();
        let stroke = [Vec2::new(0.0, 0.0), Vec2::new(5.0, 5.0), Vec2::new(50.0, 50.0)];

        let CaptureOutcome::Committed(segments) =
            run_stroke(&mut capture, DrawingMode::Line, &stroke)
        else {
            panic!("line stroke should commit");
        };
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].material.friction, 0.0);
        assert!(segments[0].position.distance(Vec2::new(25.0, 25.0)) < 1e-4);
        let expected_len = Vec2::new(50.0, 50.0).length();
        assert!((segments[0].length(&CapsuleParams::default()) - expected_len).abs() < 1e-3);
        assert!(!capture.is_capturing());
        assert!(capture.buffer().is_empty());
    }

    #[test]
    fn test_rocket_stroke_is_all_boost() {
        let mut capture = GestureCapture::new();
        let CaptureOutcome::Committed(segments) =
            run_stroke(&mut capture, DrawingMode::Rocket, &wavy_stroke())
        else {
            panic!("rocket stroke should commit");
        };
        assert!(!segments.is_empty());
        for seg in &segments {
            assert!(seg.material.friction < 0.0);
            assert_eq!(seg.material, Material::boost());
        }
    }

    #[test]
    fn test_pencil_stroke_has_no_zero_length_segments() {
        let mut capture = GestureCapture::new();
        let CaptureOutcome::Committed(segments) =
            run_stroke(&mut capture, DrawingMode::Pencil, &wavy_stroke())
        else {
            panic!("pencil stroke should commit");
        };
        let params = CapsuleParams::default();
        assert!(segments.len() > 1);
        for seg in &segments {
            assert_eq!(seg.material, Material::track());
            assert!(seg.length(&params) > 0.0);
        }
    }

    #[test]
    fn test_closed_loop_stroke_is_kept() {
        let center = Vec2::new(300.0, 300.0);
        let mut stroke: Vec<Point> = (0..40)
            .map(|i| center + Vec2::from_angle(i as f32 * std::f32::consts::TAU / 40.0) * 50.0)
            .collect();
        stroke.push(stroke[0]);

        for mode in [DrawingMode::Pencil, DrawingMode::Rocket] {
            let mut capture = GestureCapture::new();
            let CaptureOutcome::Committed(segments) = run_stroke(&mut capture, mode, &stroke) else {
                panic!("closed {} stroke should commit", mode.as_str());
            };
            assert!(segments.len() > 4);
            // The loop still reaches the far side of the circle
            let far = segments
                .iter()
                .map(|s| s.position.distance(stroke[0]))
                .fold(0.0, f32::max);
            assert!(far > 80.0, "{far}");
        }
    }

    #[test]
    fn test_jitter_is_filtered_and_discarded() {
        let settings = Settings::default();
        let mut capture = GestureCapture::new();
        capture.handle(PointerEvent::down(Vec2::new(100.0, 100.0)), DrawingMode::Pencil, &settings);

        for i in 0..100 {
            let angle = i as f32 * 0.7;
            let p = Vec2::new(100.0, 100.0) + Vec2::from_angle(angle) * 3.0;
            assert_eq!(
                capture.handle(PointerEvent::moved(p), DrawingMode::Pencil, &settings),
                CaptureOutcome::Ignored
            );
        }
        assert_eq!(capture.buffer().len(), 1);

        let up = PointerEvent::up(Vec2::new(100.0, 100.0));
        let outcome = capture.handle(up, DrawingMode::Pencil, &settings);
        assert_eq!(outcome, CaptureOutcome::Discarded);
        assert!(!capture.is_capturing());
    }

    #[test]
    fn test_mode_is_snapshotted_at_pointer_down() {
        let settings = Settings::default();
        let mut capture = GestureCapture::new();
        capture.handle(PointerEvent::down(Vec2::new(0.0, 0.0)), DrawingMode::Rocket, &settings);
        for p in wavy_stroke() {
            capture.handle(PointerEvent::moved(p), DrawingMode::Pencil, &settings);
        }
        assert_eq!(capture.active_mode(), Some(DrawingMode::Rocket));

        let outcome = capture.handle(PointerEvent::up(Vec2::ZERO), DrawingMode::Line, &settings);
        let CaptureOutcome::Committed(segments) = outcome else {
            panic!("stroke should commit");
        };
        assert!(segments.len() > 1);
        assert!(segments.iter().all(|s| s.material.is_boost()));
    }

    #[test]
    fn test_events_outside_a_stroke_are_ignored() {
        let settings = Settings::default();
        let mut capture = GestureCapture::new();
        let p = Vec2::new(10.0, 10.0);
        let pencil = DrawingMode::Pencil;
        let moved = capture.handle(PointerEvent::moved(p), pencil, &settings);
        assert_eq!(moved, CaptureOutcome::Ignored);
        let up = capture.handle(PointerEvent::up(p), pencil, &settings);
        assert_eq!(up, CaptureOutcome::Ignored);

        capture.handle(PointerEvent::down(p), DrawingMode::Pencil, &settings);
        assert_eq!(
            capture.handle(PointerEvent::down(Vec2::new(90.0, 90.0)), DrawingMode::Line, &settings),
            CaptureOutcome::Ignored
        );
        assert_eq!(capture.buffer(), &[p]);
    }

    #[test]
    fn test_preview_tracks_accepted_samples() {
        let settings = Settings::default();
        let mut capture = GestureCapture::new();
        capture.handle(PointerEvent::down(Vec2::ZERO), DrawingMode::Line, &settings);
        capture.handle(PointerEvent::moved(Vec2::new(20.0, 5.0)), DrawingMode::Line, &settings);
        let next = PointerEvent::moved(Vec2::new(40.0, 0.0));
        let outcome = capture.handle(next, DrawingMode::Line, &settings);
        assert_eq!(outcome, CaptureOutcome::Preview(vec![Vec2::ZERO, Vec2::new(40.0, 0.0)]));

        let mut capture = GestureCapture::new();
        capture.handle(PointerEvent::down(Vec2::ZERO), DrawingMode::Pencil, &settings);
        let next = PointerEvent::moved(Vec2::new(30.0, 0.0));
        let CaptureOutcome::Preview(line) = capture.handle(next, DrawingMode::Pencil, &settings)
        else {
            panic!("accepted sample should preview");
        };
        assert_eq!(line.first(), Some(&Vec2::ZERO));
        assert_eq!(line.last(), Some(&Vec2::new(30.0, 0.0)));
    }

    #[test]
    fn test_cancel_drops_the_stroke() {
        let settings = Settings::default();
        let mut capture = GestureCapture::new();
        capture.handle(PointerEvent::down(Vec2::ZERO), DrawingMode::Pencil, &settings);
        capture.handle(PointerEvent::moved(Vec2::new(50.0, 0.0)), DrawingMode::Pencil, &settings);
        capture.cancel();
        assert!(!capture.is_capturing());
        assert_eq!(
            capture.handle(PointerEvent::up(Vec2::ZERO), DrawingMode::Pencil, &settings),
            CaptureOutcome::Ignored
        );
    }

    #[test]
    fn test_drawing_mode_parsing() {
        assert_eq!(DrawingMode::from_str("ROCKET"), Some(DrawingMode::Rocket));
        assert_eq!(DrawingMode::from_str("line"), Some(DrawingMode::Line));
        assert_eq!(DrawingMode::from_str("eraser"), None);
        assert_eq!(DrawingMode::default(), DrawingMode::Pencil);
    }
}
