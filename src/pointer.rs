//! Pointer-driven transforms.
//!
//! Every builder here is a pure function of the pointer position and the
//! geometry of the element it moves, returning a CSS value ready to be written
//! to `style.transform` (or `style.background` for the spotlight). The browser
//! layer owns the listeners and decides when to call them.

pub const IDENTITY_TRANSFORM: &str = "none";
const MAGNETIC_PULL: f64 = 0.3;
const SPOTLIGHT_RADIUS_PX: u32 = 600;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Viewport-relative bounding box, as reported by `getBoundingClientRect`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn center(&self) -> PointerPosition {
        PointerPosition::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    fn offset_of(&self, pointer: PointerPosition) -> (f64, f64) {
        let center = self.center();
        (pointer.x - center.x, pointer.y - center.y)
    }
}

/// Shifts an element against the pointer's offset from the viewport center.
/// The offset is normalized to `[-0.5, 0.5]` before scaling by `multiplier` px.
pub fn parallax(pointer: PointerPosition, viewport: (f64, f64), multiplier: f64) -> String {
    let (width, height) = viewport;
    if width <= 0.0 || height <= 0.0 {
        return IDENTITY_TRANSFORM.to_string();
    }

    let x = (pointer.x - width / 2.0) / width * multiplier;
    let y = (pointer.y - height / 2.0) / height * multiplier;
    format!("translate3d({x:.2}px, {y:.2}px, 0)")
}

pub fn tilt(pointer: PointerPosition, bounds: Bounds, divisor: f64) -> String {
    let (dx, dy) = bounds.offset_of(pointer);
    let divisor = divisor.max(1.0);
    let rotate_x = -dy / divisor;
    let rotate_y = dx / divisor;
    format!("perspective(1000px) rotateX({rotate_x:.2}deg) rotateY({rotate_y:.2}deg)")
}

pub fn magnetic(pointer: PointerPosition, bounds: Bounds) -> String {
    let (dx, dy) = bounds.offset_of(pointer);
    let x = dx * MAGNETIC_PULL;
    let y = dy * MAGNETIC_PULL;
    format!("translate({x:.2}px, {y:.2}px)")
}

pub fn cursor_ring(pointer: PointerPosition) -> String {
    format!("translate({:.2}px, {:.2}px)", pointer.x, pointer.y)
}

pub fn spotlight(pointer: PointerPosition) -> String {
    format!(
        "radial-gradient({SPOTLIGHT_RADIUS_PX}px circle at {:.2}px {:.2}px, rgba(168, 85, 247, 0.12), transparent 40%)",
        pointer.x, pointer.y
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> Bounds {
        Bounds {
            left: 100.0,
            top: 200.0,
            width: 300.0,
            height: 200.0,
        }
    }

    #[test]
    fn parallax_is_zero_at_viewport_center() {
        let transform = parallax(PointerPosition::new(640.0, 360.0), (1280.0, 720.0), 12.0);
        assert_eq!(transform, "translate3d(0.00px, 0.00px, 0)");
    }

    #[test]
    fn parallax_reaches_half_multiplier_at_edges() {
        let transform = parallax(PointerPosition::new(1280.0, 0.0), (1280.0, 720.0), 12.0);
        assert_eq!(transform, "translate3d(6.00px, -6.00px, 0)");
    }

    #[test]
    fn parallax_without_viewport_is_identity() {
        let transform = parallax(PointerPosition::new(10.0, 10.0), (0.0, 720.0), 12.0);
        assert_eq!(transform, IDENTITY_TRANSFORM);
    }

    #[test]
    fn tilt_scales_center_offset_by_divisor() {
        // center is (250, 300)
        let transform = tilt(PointerPosition::new(300.0, 250.0), card(), 25.0);
        assert_eq!(
            transform,
            "perspective(1000px) rotateX(2.00deg) rotateY(2.00deg)"
        );
    }

    #[test]
    fn magnetic_pulls_toward_pointer() {
        let transform = magnetic(PointerPosition::new(260.0, 290.0), card());
        assert_eq!(transform, "translate(3.00px, -3.00px)");
    }

    #[test]
    fn cursor_ring_follows_pointer() {
        assert_eq!(
            cursor_ring(PointerPosition::new(12.5, 40.0)),
            "translate(12.50px, 40.00px)"
        );
    }

    #[test]
    fn spotlight_centers_on_pointer() {
        assert!(spotlight(PointerPosition::new(1.0, 2.0)).contains("at 1.00px 2.00px"));
    }
}
