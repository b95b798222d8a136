use data::Scale;
use data::config::ZoomAnimation;
use iced::time::Instant;

/// Distance in px/unit under which the displayed scale snaps to its target.
const SETTLE_EPSILON: f32 = 0.01;

/// Displayed scale easing towards the committed one.
///
/// Each axis follows a critically damped spring, so the displayed value never
/// overshoots and stays between the start and the target.
#[derive(Debug, Clone, Copy)]
pub struct ZoomTransition {
    from: Scale,
    target: Scale,
    current: Scale,
    started: Option<Instant>,
    animation: ZoomAnimation,
}

impl ZoomTransition {
    pub fn new(scale: Scale, animation: ZoomAnimation) -> Self {
        Self {
            from: scale,
            target: scale,
            current: scale,
            started: None,
            animation,
        }
    }

    pub fn current(&self) -> Scale {
        self.current
    }

    pub fn target(&self) -> Scale {
        self.target
    }

    pub fn is_animating(&self) -> bool {
        self.started.is_some()
    }

    /// Starts easing from the displayed scale towards `target`.
    pub fn retarget(&mut self, target: Scale, now: Instant) {
        self.target = target;

        if !self.animation.enabled || target == self.current {
            self.snap();
            return;
        }

        self.from = self.current;
        self.started = Some(now);
    }

    /// Advances the spring; returns whether the displayed scale changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(started) = self.started else {
            return false;
        };

        let t = now.saturating_duration_since(started).as_secs_f32();
        let w = self.animation.angular_frequency;

        let next = Scale::new(
            spring(self.from.x, self.target.x, w, t),
            spring(self.from.y, self.target.y, w, t),
        );

        if (next.x - self.target.x).abs() < SETTLE_EPSILON
            && (next.y - self.target.y).abs() < SETTLE_EPSILON
        {
            self.snap();
        } else {
            self.current = next;
        }
        true
    }

    fn snap(&mut self) {
        self.from = self.target;
        self.current = self.target;
        self.started = None;
    }
}

/// Critically damped spring released from rest at `from`.
fn spring(from: f32, to: f32, angular_frequency: f32, t: f32) -> f32 {
    let wt = angular_frequency * t;
    to + (from - to) * (1.0 + wt) * (-wt).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::time::Duration;

    fn enabled() -> ZoomAnimation {
        ZoomAnimation {
            enabled: true,
            angular_frequency: 18.0,
        }
    }

    #[test]
    fn disabled_animation_jumps_immediately() {
        let mut zoom = ZoomTransition::new(
            Scale::uniform(100.0),
            ZoomAnimation {
                enabled: false,
                ..enabled()
            },
        );

        zoom.retarget(Scale::uniform(200.0), Instant::now());

        assert_eq!(zoom.current(), Scale::uniform(200.0));
        assert!(!zoom.is_animating());
    }

    #[test]
    fn eases_monotonically_then_settles() {
        let start = Instant::now();
        let mut zoom = ZoomTransition::new(Scale::uniform(100.0), enabled());
        zoom.retarget(Scale::new(200.0, 50.0), start);
        assert!(zoom.is_animating());
        assert_eq!(zoom.current(), Scale::uniform(100.0));

        let mut previous = zoom.current();
        for frame in 1..=30 {
            assert!(zoom.tick(start + Duration::from_millis(frame * 16)));
            let current = zoom.current();
            assert!(current.x >= previous.x && current.x <= 200.0);
            assert!(current.y <= previous.y && current.y >= 50.0);
            previous = current;
        }

        zoom.tick(start + Duration::from_secs(5));
        assert_eq!(zoom.current(), Scale::new(200.0, 50.0));
        assert!(!zoom.is_animating());
        assert!(!zoom.tick(start + Duration::from_secs(6)));
    }

    #[test]
    fn retarget_mid_flight_starts_from_displayed_value() {
        let start = Instant::now();
        let mut zoom = ZoomTransition::new(Scale::uniform(100.0), enabled());
        zoom.retarget(Scale::uniform(400.0), start);

        let mid = start + Duration::from_millis(50);
        zoom.tick(mid);
        let displayed = zoom.current();
        assert!(displayed.x > 100.0 && displayed.x < 400.0);

        zoom.retarget(Scale::uniform(100.0), mid);
        zoom.tick(mid);
        assert!((zoom.current().x - displayed.x).abs() < 1e-3);
        assert_eq!(zoom.target(), Scale::uniform(100.0));
    }

    #[test]
    fn spring_starts_at_rest_and_converges() {
        assert_eq!(spring(10.0, 20.0, 18.0, 0.0), 10.0);
        assert!((spring(10.0, 20.0, 18.0, 2.0) - 20.0).abs() < 1e-6);
    }
}
