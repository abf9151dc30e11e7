// Color rules - Intensity to RGBA conversion and alpha compositing
//
// MNIST samples store ink intensity: 0 is background, 255 is a full stroke.
// The display inverts that so strokes render dark on a light background.

/// An RGBA color sample, 8 bits per channel, straight (non-premultiplied) alpha
pub type Rgba = [u8; 4];

/// Fully transparent black, the state of a cleared surface
pub const TRANSPARENT: Rgba = [0x00, 0x00, 0x00, 0x00];

/// Opaque white (intensity 0)
pub const WHITE: Rgba = [0xFF, 0xFF, 0xFF, 0xFF];

/// Opaque black (intensity 255)
pub const BLACK: Rgba = [0x00, 0x00, 0x00, 0xFF];

/// Grid line color: light gray at 70% opacity
pub const GRID_LINE_COLOR: Rgba = [211, 211, 211, 179];

/// Convert an ink intensity to its display color
///
/// Every color channel is `255 - intensity`; alpha is always opaque.
#[inline]
pub fn intensity_to_rgba(intensity: u8) -> Rgba {
    let gray = 255 - intensity;
    [gray, gray, gray, 0xFF]
}

/// Composite `src` over `dst` (Porter-Duff source-over)
///
/// An opaque source replaces the destination exactly and a fully transparent
/// source leaves it untouched.
#[inline]
pub fn blend_over(dst: Rgba, src: Rgba) -> Rgba {
    let sa = src[3] as u32;
    let da = dst[3] as u32;
    let inv = 255 - sa;

    // Both alphas scaled by 255
    let out_a = sa * 255 + da * inv;
    if out_a == 0 {
        return TRANSPARENT;
    }

    let mut out = [0u8; 4];
    for c in 0..3 {
        let num = src[c] as u32 * sa * 255 + dst[c] as u32 * da * inv;
        out[c] = ((num + out_a / 2) / out_a) as u8;
    }
    out[3] = ((out_a + 127) / 255) as u8;
    out
}

/// Linear interpolation between two colors, `t` in 0.0-1.0
#[inline]
pub fn lerp(a: Rgba, b: Rgba, t: f32) -> Rgba {
    let mut out = [0u8; 4];
    for c in 0..4 {
        let v = a[c] as f32 + (b[c] as f32 - a[c] as f32) * t;
        out[c] = v.round().clamp(0.0, 255.0) as u8;
    }
    out
}
