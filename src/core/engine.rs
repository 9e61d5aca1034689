use std::io;
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::core::geometry::Scene;
use crate::core::transform::{RotationState, RotationStep};
use crate::pipeline::{render_frame, Frame, ScreenPolygon, View};
use crate::Metrics;

/// Whatever owns the window or terminal the frames end up in.
pub trait Host {
    /// Shows a finished frame.
    fn present(&mut self, frame: &[ScreenPolygon]) -> io::Result<()>;

    /// Blocks for roughly `delay`, handling input meanwhile. Returns `false`
    /// once the host wants the animation to stop.
    fn wait(&mut self, delay: Duration) -> io::Result<bool>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Running,
}

/// Owns the scene and rotation state and produces one frame per tick.
pub struct Animator {
    scene: Scene,
    view: View,
    rotation: RotationState,
    step: RotationStep,
    wrap_angles: bool,
    state: DriverState,
}

impl Animator {
    pub fn new(scene: Scene, view: View, step: RotationStep, wrap_angles: bool) -> Self {
        Self {
            scene,
            view,
            rotation: RotationState::default(),
            step,
            wrap_angles,
            state: DriverState::Idle,
        }
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Renders with the current angles, then advances them. The returned frame
    /// always reflects the angles from before this call.
    pub fn tick(&mut self) -> Frame {
        if self.state == DriverState::Idle {
            debug!(
                "Animation starting: {} faces, {:?}",
                self.scene.faces.len(),
                self.view
            );
            self.state = DriverState::Running;
        }

        let frame = render_frame(&self.scene, &self.rotation, &self.view);
        self.rotation = self.rotation.advanced(self.step, self.wrap_angles);
        frame
    }

    /// Ticks until the host asks to stop. The next tick is scheduled `interval`
    /// after the previous one finished, so the real rate is a bit under
    /// `1 / interval`.
    pub fn run<H: Host>(&mut self, host: &mut H, interval: Duration) -> io::Result<()> {
        let mut metrics = Metrics::new();

        loop {
            let start = Instant::now();
            let frame = self.tick();
            host.present(&frame)?;

            metrics.update(start.elapsed());
            if let Some(report) = metrics.take_report() {
                info!("{report}");
            }

            if !host.wait(interval)? {
                break;
            }
        }

        debug!("Animation stopped at {:?}", self.rotation);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::builtin;
    use crate::core::Color;

    struct CountingHost {
        frames: Vec<usize>,
        stop_after: usize,
    }

    impl Host for CountingHost {
        fn present(&mut self, frame: &[ScreenPolygon]) -> io::Result<()> {
            self.frames.push(frame.len());
            Ok(())
        }

        fn wait(&mut self, _delay: Duration) -> io::Result<bool> {
            Ok(self.frames.len() < self.stop_after)
        }
    }

    fn animator() -> Animator {
        let scene = builtin::cube(Color::MISSING).unwrap();
        Animator::new(scene, View::default(), RotationStep::default(), false)
    }

    #[test]
    fn starts_idle_and_runs_after_first_tick() {
        let mut anim = animator();
        assert_eq!(anim.state(), DriverState::Idle);
        anim.tick();
        assert_eq!(anim.state(), DriverState::Running);
    }

    #[test]
    fn frame_uses_angles_from_before_the_tick() {
        let mut anim = animator();
        let first = anim.tick();
        assert_eq!(
            first,
            render_frame(anim.scene(), &RotationState::default(), &View::default())
        );
        assert_eq!(anim.rotation(), RotationState::new(0.02, 0.015, 0.01));

        let second = anim.tick();
        assert_eq!(
            second,
            render_frame(
                anim.scene(),
                &RotationState::new(0.02, 0.015, 0.01),
                &View::default()
            )
        );
    }

    #[test]
    fn angles_accumulate_every_tick() {
        let mut anim = animator();
        for _ in 0..10 {
            anim.tick();
        }
        let r = anim.rotation();
        assert!((r.x - 0.2).abs() < 1e-12);
        assert!((r.y - 0.15).abs() < 1e-12);
        assert!((r.z - 0.1).abs() < 1e-12);
    }

    #[test]
    fn run_stops_when_host_says_so() {
        let mut anim = animator();
        let mut host = CountingHost {
            frames: Vec::new(),
            stop_after: 3,
        };
        anim.run(&mut host, Duration::ZERO).unwrap();
        assert_eq!(host.frames, vec![6, 6, 6]);
        assert!((anim.rotation().x - 0.06).abs() < 1e-12);
    }
}
