use std::collections::VecDeque;

use image::{Pixel, Primitive, Rgba};

use crate::image::holes::grid::{RgbaBuffer, is_transparent, pixel_index};

/// Offsets of the 8 neighbours: edges first, then diagonals.
const NEIGHBORS: [(i32, i32); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Transparent pixels connected to the image border.
///
/// A pixel is background iff it has alpha 0 and is 8-connected to an edge
/// pixel through other alpha-0 pixels. Opaque pixels are never background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReachabilitySet {
    width: u32,
    height: u32,
    background: Vec<bool>,
}

impl ReachabilitySet {
    fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: vec![false; width as usize * height as usize],
        }
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Whether `(x, y)` is border-connected background.
    ///
    /// Coordinates outside the grid are never background.
    #[inline]
    pub fn is_background(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.background[pixel_index(self.width, x, y)]
    }

    /// Number of background pixels.
    #[cfg(test)]
    pub fn background_count(&self) -> usize {
        self.background.iter().filter(|&&bg| bg).count()
    }
}

/// Classify border-connected transparent pixels with a multi-source BFS.
///
/// Every transparent border pixel seeds the queue. Pixels are marked visited
/// when enqueued, so each one enters the queue at most once and the walk is
/// O(W*H) in time and space.
pub fn classify<P>(img: &RgbaBuffer<P>) -> ReachabilitySet
where
    P: Primitive,
    Rgba<P>: Pixel<Subpixel = P>,
{
    let (width, height) = img.dimensions();
    let mut set = ReachabilitySet::empty(width, height);
    if width == 0 || height == 0 {
        return set;
    }

    let raw = img.as_raw();
    let mut visited = vec![false; set.background.len()];
    let mut queue = VecDeque::with_capacity((width as usize + height as usize) * 2);

    for x in 0..width {
        enqueue(&mut queue, &mut visited, raw, width, x, 0);
        enqueue(&mut queue, &mut visited, raw, width, x, height - 1);
    }
    for y in 1..height.saturating_sub(1) {
        enqueue(&mut queue, &mut visited, raw, width, 0, y);
        enqueue(&mut queue, &mut visited, raw, width, width - 1, y);
    }

    while let Some((x, y)) = queue.pop_front() {
        set.background[pixel_index(width, x, y)] = true;

        for (dx, dy) in NEIGHBORS {
            let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy)) else {
                continue;
            };
            if nx < width && ny < height {
                enqueue(&mut queue, &mut visited, raw, width, nx, ny);
            }
        }
    }

    set
}

#[inline]
fn enqueue<P: Primitive>(
    queue: &mut VecDeque<(u32, u32)>,
    visited: &mut [bool],
    raw: &[P],
    width: u32,
    x: u32,
    y: u32,
) {
    let idx = pixel_index(width, x, y);
    if !visited[idx] && is_transparent(raw, idx) {
        visited[idx] = true;
        queue.push_back((x, y));
    }
}
