//! Canny edge detection on a single luma plane.
//!
//! # Algorithm
//!
//! 1. 3x3 Sobel gradients with replicated borders
//! 2. L1 gradient magnitude `|gx| + |gy|`
//! 3. Non-maximum suppression along the quantized gradient direction
//!    (0°, 45°, 90°, 135°)
//! 4. Double threshold: magnitude above `high` is a strong edge, magnitude
//!    above `low` is a weak candidate
//! 5. Hysteresis: weak candidates 8-connected to a strong edge are kept
//!
//! No smoothing is applied before the gradient step. The output is 255 for
//! edge pixels and 0 elsewhere, and depends only on the input bytes.

use crate::config::EdgeThresholds;

/// tan(22.5°), boundary between the horizontal and diagonal sectors.
const TAN_22_5: f64 = 0.414_213_562_373_095_1;

/// tan(67.5°), boundary between the diagonal and vertical sectors.
const TAN_67_5: f64 = 2.414_213_562_373_095;

/// Pixel classification after non-maximum suppression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeClass {
    None,
    Weak,
    Strong,
}

/// Run Canny edge detection over `plane` (`width * height` luma bytes).
///
/// Returns a plane of the same size holding 255 for edges and 0 otherwise.
pub fn canny(plane: &[u8], width: u32, height: u32, thresholds: EdgeThresholds) -> Vec<u8> {
    let (w, h) = (width as usize, height as usize);
    debug_assert_eq!(plane.len(), w * h, "Luma plane size mismatch");

    if w == 0 || h == 0 {
        return Vec::new();
    }

    let (gx, gy) = sobel(plane, w, h);
    let magnitude: Vec<i32> = gx
        .iter()
        .zip(&gy)
        .map(|(dx, dy)| dx.abs() + dy.abs())
        .collect();

    let classes = suppress_non_maxima(&magnitude, &gx, &gy, w, h, thresholds);
    hysteresis(&classes, w, h)
}

/// 3x3 Sobel derivatives with replicated borders.
fn sobel(plane: &[u8], w: usize, h: usize) -> (Vec<i32>, Vec<i32>) {
    let at = |x: isize, y: isize| -> i32 {
        let cx = x.clamp(0, w as isize - 1) as usize;
        let cy = y.clamp(0, h as isize - 1) as usize;
        plane[cy * w + cx] as i32
    };

    let mut gx = vec![0i32; w * h];
    let mut gy = vec![0i32; w * h];

    for y in 0..h as isize {
        for x in 0..w as isize {
            let tl = at(x - 1, y - 1);
            let t = at(x, y - 1);
            let tr = at(x + 1, y - 1);
            let l = at(x - 1, y);
            let r = at(x + 1, y);
            let bl = at(x - 1, y + 1);
            let b = at(x, y + 1);
            let br = at(x + 1, y + 1);

            let idx = y as usize * w + x as usize;
            gx[idx] = (tr + 2 * r + br) - (tl + 2 * l + bl);
            gy[idx] = (bl + 2 * b + br) - (tl + 2 * t + tr);
        }
    }

    (gx, gy)
}

/// Thin the gradient ridges and apply the double threshold.
///
/// Comparisons are asymmetric (`>` against one neighbor, `>=` against the
/// other) so that a plateau two pixels wide yields a one-pixel edge.
fn suppress_non_maxima(
    magnitude: &[i32],
    gx: &[i32],
    gy: &[i32],
    w: usize,
    h: usize,
    thresholds: EdgeThresholds,
) -> Vec<EdgeClass> {
    let mag = |x: isize, y: isize| -> i32 {
        if x < 0 || y < 0 || x >= w as isize || y >= h as isize {
            0
        } else {
            magnitude[y as usize * w + x as usize]
        }
    };

    let low = thresholds.low as f64;
    let high = thresholds.high as f64;
    let mut classes = vec![EdgeClass::None; w * h];

    for y in 0..h as isize {
        for x in 0..w as isize {
            let idx = y as usize * w + x as usize;
            let m = magnitude[idx];
            if (m as f64) <= low {
                continue;
            }

            let dx = gx[idx];
            let dy = gy[idx];
            let ax = dx.abs() as f64;
            let ay = dy.abs() as f64;

            let is_max = if ay < ax * TAN_22_5 {
                // Gradient mostly horizontal: compare left/right
                m > mag(x - 1, y) && m >= mag(x + 1, y)
            } else if ay > ax * TAN_67_5 {
                // Gradient mostly vertical: compare up/down
                m > mag(x, y - 1) && m >= mag(x, y + 1)
            } else {
                // Diagonal: same signs point down-right (y grows downward)
                let s: isize = if (dx < 0) != (dy < 0) { -1 } else { 1 };
                m > mag(x - s, y - 1) && m > mag(x + s, y + 1)
            };

            if is_max {
                classes[idx] = if (m as f64) > high {
                    EdgeClass::Strong
                } else {
                    EdgeClass::Weak
                };
            }
        }
    }

    classes
}

/// Keep strong edges and every weak pixel 8-connected to one.
fn hysteresis(classes: &[EdgeClass], w: usize, h: usize) -> Vec<u8> {
    let mut output = vec![0u8; w * h];
    let mut stack: Vec<usize> = classes
        .iter()
        .enumerate()
        .filter(|(_, c)| **c == EdgeClass::Strong)
        .map(|(i, _)| i)
        .collect();

    for &idx in &stack {
        output[idx] = 255;
    }

    while let Some(idx) = stack.pop() {
        let (x, y) = ((idx % w) as isize, (idx / w) as isize);
        for ny in y - 1..=y + 1 {
            for nx in x - 1..=x + 1 {
                if nx < 0 || ny < 0 || nx >= w as isize || ny >= h as isize {
                    continue;
                }
                let n = ny as usize * w + nx as usize;
                if output[n] == 0 && classes[n] == EdgeClass::Weak {
                    output[n] = 255;
                    stack.push(n);
                }
            }
        }
    }

    output
}
