//! Sketch Rider entry point
//!
//! Native: a headless demo that draws a scripted track, rides it, and
//! round-trips it through on-disk storage.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::path::PathBuf;

    use glam::Vec2;
    use sketch_rider::platform::FileStore;
    use sketch_rider::{CaptureOutcome, DrawingMode, Editor, Mode, Point, PointerEvent};

    /// Host frame rate the demo pretends to run at
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Simulated ride length, seconds
    const RIDE_SECONDS: f32 = 2.0;

    fn data_dir() -> PathBuf {
        std::env::var_os("SKETCH_RIDER_DATA")
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join("sketch-rider"))
    }

    /// Drag the pointer through `points` as one stroke
    fn stroke(editor: &mut Editor<FileStore>, points: &[Point]) -> usize {
        let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
            return 0;
        };

        editor.pointer(PointerEvent::down(first));
        for &p in &points[1..] {
            editor.pointer(PointerEvent::moved(p));
        }
        match editor.pointer(PointerEvent::up(last)) {
            CaptureOutcome::Committed(segments) => segments.len(),
            _ => 0,
        }
    }

    /// Downhill run under the spawn point, with a bump at the end
    fn pencil_path() -> Vec<Point> {
        (0..=70)
            .map(|i| {
                let x = 250.0 + i as f32 * 10.0;
                let y = 220.0 + (x - 250.0) * 0.25 + 25.0 * ((x - 250.0) / 120.0).sin();
                Vec2::new(x, y)
            })
            .collect()
    }

    /// Short boost strip continuing the slope
    fn rocket_path() -> Vec<Point> {
        (0..=20)
            .map(|i| {
                let x = 960.0 + i as f32 * 12.0;
                Vec2::new(x, 400.0 + i as f32 * 2.0)
            })
            .collect()
    }

    pub fn run() {
        let dir = data_dir();
        log::info!("Sketch Rider (native) starting, data in {}", dir.display());

        let mut editor = Editor::new(FileStore::new(dir));
        editor.init();

        editor.set_drawing_mode(DrawingMode::Pencil);
        let pencil = stroke(&mut editor, &pencil_path());
        editor.set_drawing_mode(DrawingMode::Rocket);
        let rocket = stroke(&mut editor, &rocket_path());
        log::info!("Drew {pencil} pencil and {rocket} rocket segments");

        editor.set_mode(Mode::Play);
        let frames = (RIDE_SECONDS / FRAME_DT).round() as u32;
        let ticks: u32 = (0..frames).map(|_| editor.frame(FRAME_DT)).sum();
        if let Some(pose) = editor.player_pose() {
            log::info!(
                "After {ticks} ticks: position ({:.1}, {:.1}), angle {:.2}, speed {:.1}",
                pose.position.x,
                pose.position.y,
                pose.angle,
                pose.velocity.length()
            );
        }
        editor.set_mode(Mode::Edit);

        editor.save_level();
        let saved = editor.world().map_or(0, |w| w.track_bodies().count());
        editor.clear_all();
        editor.load_level();
        let loaded = editor.world().map_or(0, |w| w.track_bodies().count());
        log::info!("Saved {saved} bodies, reloaded {loaded}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host page; nothing to run here
}
