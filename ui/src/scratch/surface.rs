//! # Scratch mask — the erase-state machine
//!
//! [`ScratchSurface`] owns a dense per-pixel alpha buffer laid over the
//! reward panel. Drag input erases round-capped segments out of the mask;
//! the surface tracks the erased fraction and reports the one-shot reveal
//! transition once enough of it is gone.
//!
//! The state machine is `Unscratched → Scratching → Revealed`, and nothing
//! leaves `Revealed`: further strokes keep erasing cosmetically but can
//! never re-fire the reveal.
//!
//! The erased fraction is recomputed with a full scan of the mask on every
//! drag sample. That scan is O(pixels) and dominates the cost of the
//! widget, but at the few-hundred-pixel sizes the site renders it stays
//! well under a millisecond. (Tracking newly-erased pixels per segment
//! would avoid the rescan; the full scan is the reference behavior.)
//!
//! The buffer is sized in CSS pixels — device pixel ratio is not
//! compensated, so on high-density displays the fraction is computed over
//! the logical grid rather than physical pixels.

/// Stroke width of the erase brush, in surface pixels.
pub const BRUSH_WIDTH: f32 = 40.0;

/// Erased fraction at which the reward is revealed.
pub const REVEAL_THRESHOLD: f32 = 0.40;

const COVERED: u8 = 255;
const ERASED: u8 = 0;

/// Returned by [`ScratchSurface::continue_stroke`] on the one sample where
/// the erased fraction first crosses [`REVEAL_THRESHOLD`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Revealed;

/// The opaque mask covering the reward panel.
#[derive(Clone, Debug)]
pub struct ScratchSurface {
    width: u32,
    height: u32,
    mask: Vec<u8>,
    last_point: Option<(f32, f32)>,
    drawing: bool,
    revealed: bool,
}

impl ScratchSurface {
    /// A fully covered mask sized to the rendered surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            mask: vec![COVERED; (width * height) as usize],
            last_point: None,
            drawing: false,
            revealed: false,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the reveal transition has fired. Never reverts.
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Whether a stroke is currently active.
    pub fn is_scratching(&self) -> bool {
        self.drawing
    }

    /// The previous stroke sample, while a stroke is active.
    pub fn last_point(&self) -> Option<(f32, f32)> {
        self.last_point
    }

    /// Anchor a new stroke. Does not erase anything by itself.
    pub fn begin_stroke(&mut self, x: f32, y: f32) {
        self.drawing = true;
        self.last_point = Some((x, y));
    }

    /// Erase from the previous anchor to `(x, y)` and advance the anchor.
    ///
    /// Returns `Some(Revealed)` exactly once, on the sample where the
    /// erased fraction first reaches [`REVEAL_THRESHOLD`]. Samples outside
    /// an active stroke are ignored.
    pub fn continue_stroke(&mut self, x: f32, y: f32) -> Option<Revealed> {
        if !self.drawing {
            return None;
        }
        let from = self.last_point.unwrap_or((x, y));
        self.erase_segment(from, (x, y));
        self.last_point = Some((x, y));

        if !self.revealed && self.scratched_fraction() >= REVEAL_THRESHOLD {
            self.revealed = true;
            return Some(Revealed);
        }
        None
    }

    /// End the active stroke. Erasing resumes on the next `begin_stroke`.
    pub fn end_stroke(&mut self) {
        self.drawing = false;
    }

    /// Fraction of fully erased pixels, from a scan of the whole mask.
    pub fn scratched_fraction(&self) -> f32 {
        if self.mask.is_empty() {
            return 0.0;
        }
        let erased = self.mask.iter().filter(|&&alpha| alpha == ERASED).count();
        erased as f32 / self.mask.len() as f32
    }

    /// Erase everything, as the post-reveal cleanup does.
    pub fn clear(&mut self) {
        self.mask.fill(ERASED);
    }

    /// Erase a round-capped segment of [`BRUSH_WIDTH`] between two points.
    /// A pixel is erased when its centre lies within the brush radius of
    /// the segment; pixels outside the surface are clipped.
    fn erase_segment(&mut self, from: (f32, f32), to: (f32, f32)) {
        if self.mask.is_empty() {
            return;
        }
        let radius = BRUSH_WIDTH / 2.0;
        let min_x = (from.0.min(to.0) - radius).floor().max(0.0);
        let min_y = (from.1.min(to.1) - radius).floor().max(0.0);
        let max_x = (from.0.max(to.0) + radius).ceil().min(self.width as f32 - 1.0);
        let max_y = (from.1.max(to.1) + radius).ceil().min(self.height as f32 - 1.0);
        if max_x < min_x || max_y < min_y {
            return;
        }

        let (x0, y0) = (min_x as u32, min_y as u32);
        let (x1, y1) = (max_x as u32, max_y as u32);
        let r2 = radius * radius;

        for py in y0..=y1 {
            for px in x0..=x1 {
                let centre = (px as f32 + 0.5, py as f32 + 0.5);
                if distance_squared_to_segment(centre, from, to) <= r2 {
                    self.mask[(py * self.width + px) as usize] = ERASED;
                }
            }
        }
    }
}

/// Squared distance from `point` to the closed segment `a`–`b`.
fn distance_squared_to_segment(point: (f32, f32), a: (f32, f32), b: (f32, f32)) -> f32 {
    let (px, py) = point;
    let (ax, ay) = a;
    let (bx, by) = b;
    let (dx, dy) = (bx - ax, by - ay);
    let length_squared = dx * dx + dy * dy;
    let t = if length_squared == 0.0 {
        0.0
    } else {
        (((px - ax) * dx + (py - ay) * dy) / length_squared).clamp(0.0, 1.0)
    };
    let (cx, cy) = (ax + t * dx, ay + t * dy);
    let (ex, ey) = (px - cx, py - cy);
    ex * ex + ey * ey
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drag a horizontal stroke across the full width at the given row,
    /// sampling every 10 px, and count reveal events.
    fn sweep(surface: &mut ScratchSurface, y: f32) -> usize {
        let mut events = 0;
        surface.begin_stroke(0.0, y);
        let mut x = 0.0;
        while x <= surface.width() as f32 {
            if surface.continue_stroke(x, y).is_some() {
                events += 1;
            }
            x += 10.0;
        }
        surface.end_stroke();
        events
    }

    #[test]
    fn fresh_surface_is_covered_and_unrevealed() {
        let surface = ScratchSurface::new(200, 100);
        assert_eq!(surface.scratched_fraction(), 0.0);
        assert!(!surface.is_revealed());
    }

    #[test]
    fn samples_without_an_active_stroke_are_ignored() {
        let mut surface = ScratchSurface::new(200, 100);
        assert_eq!(surface.continue_stroke(50.0, 50.0), None);
        assert_eq!(surface.scratched_fraction(), 0.0);

        surface.begin_stroke(50.0, 50.0);
        surface.end_stroke();
        assert_eq!(surface.continue_stroke(60.0, 50.0), None);
        assert_eq!(surface.scratched_fraction(), 0.0);
    }

    #[test]
    fn a_zero_length_stroke_erases_a_round_cap() {
        let mut surface = ScratchSurface::new(200, 100);
        surface.begin_stroke(100.0, 50.0);
        surface.continue_stroke(100.0, 50.0);

        let fraction = surface.scratched_fraction();
        // A dot of radius 20 on a 200x100 surface: roughly pi * 400 / 20000.
        assert!(fraction > 0.04 && fraction < 0.09, "fraction = {fraction}");
    }

    #[test]
    fn off_surface_strokes_are_clipped() {
        let mut surface = ScratchSurface::new(200, 100);
        surface.begin_stroke(-100.0, -100.0);
        surface.continue_stroke(-50.0, -100.0);
        assert_eq!(surface.scratched_fraction(), 0.0);

        surface.begin_stroke(500.0, 500.0);
        surface.continue_stroke(600.0, 500.0);
        assert_eq!(surface.scratched_fraction(), 0.0);
        assert!(!surface.is_revealed());
    }

    #[test]
    fn fraction_is_monotonically_non_decreasing() {
        let mut surface = ScratchSurface::new(200, 100);
        let mut previous = 0.0;

        for y in [10.0, 10.0, 50.0, 30.0, 90.0] {
            surface.begin_stroke(0.0, y);
            let mut x = 0.0;
            while x <= 200.0 {
                surface.continue_stroke(x, y);
                let fraction = surface.scratched_fraction();
                assert!(fraction >= previous);
                previous = fraction;
                x += 10.0;
            }
            surface.end_stroke();
        }
    }

    #[test]
    fn reveal_fires_exactly_once_across_many_segments() {
        let mut surface = ScratchSurface::new(200, 100);
        let mut events = 0;

        // Scrub row by row until well past the threshold.
        for y in [10.0, 50.0, 90.0, 30.0, 70.0] {
            events += sweep(&mut surface, y);
        }

        assert_eq!(events, 1);
        assert!(surface.is_revealed());
        assert!(surface.scratched_fraction() >= REVEAL_THRESHOLD);
    }

    #[test]
    fn revealed_is_terminal() {
        let mut surface = ScratchSurface::new(200, 100);
        let mut events = 0;
        for y in [10.0, 50.0, 90.0] {
            events += sweep(&mut surface, y);
        }
        assert_eq!(events, 1);

        // Cosmetic scratching continues, but the event never re-fires.
        for y in [20.0, 40.0, 60.0, 80.0] {
            assert_eq!(sweep(&mut surface, y), 0);
        }
        assert!(surface.is_revealed());
    }

    #[test]
    fn clear_erases_the_whole_mask() {
        let mut surface = ScratchSurface::new(200, 100);
        surface.clear();
        assert_eq!(surface.scratched_fraction(), 1.0);
    }
}
