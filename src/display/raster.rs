// Rasterizer and magnifier
//
// rasterize() turns an intensity grid into an N×N RGBA image, one pixel per
// logical cell. The stretch functions map a source image onto a destination
// rectangle: nearest-neighbor copies whole source pixels and never mixes
// neighbours, smooth filtering is the bilinear path a context uses when its
// smoothing flag is left on.

use super::framebuffer::{Rect, RgbaImage};
use super::palette::{blend_over, intensity_to_rgba, lerp};
use crate::source::IntensityGrid;

/// Convert an intensity grid into a `grid_size`×`grid_size` RGBA image
///
/// # Panics
/// Panics if the grid does not hold exactly `grid_size²` samples. Callers
/// validate the length first.
pub fn rasterize(grid: &IntensityGrid, grid_size: usize) -> RgbaImage {
    assert_eq!(
        grid.len(),
        grid_size * grid_size,
        "Intensity grid must be exactly grid_size² samples"
    );

    let mut image = RgbaImage::new(grid_size, grid_size);
    let data = image.as_mut_slice();
    for (i, &intensity) in grid.as_slice().iter().enumerate() {
        let offset = i * 4;
        data[offset..offset + 4].copy_from_slice(&intensity_to_rgba(intensity));
    }
    image
}

/// Source coordinate of destination offset `d` along an axis
#[inline]
fn nearest_index(d: usize, src_len: usize, dst_len: usize) -> usize {
    (d * src_len / dst_len).min(src_len - 1)
}

/// Visit every destination pixel of `dest` that lies inside `dst`
fn for_each_target<F>(dst: &RgbaImage, dest: Rect, mut f: F)
where
    F: FnMut(usize, usize, usize, usize),
{
    let x_end = (dest.x + dest.width).min(dst.width());
    let y_end = (dest.y + dest.height).min(dst.height());
    for y in dest.y.min(y_end)..y_end {
        for x in dest.x.min(x_end)..x_end {
            f(x, y, x - dest.x, y - dest.y);
        }
    }
}

/// Stretch `src` onto `dest` inside `dst` with nearest-neighbor sampling
///
/// Each destination pixel takes the color of exactly one source pixel,
/// composited source-over. With an integer scale factor every source pixel
/// becomes a solid `factor`×`factor` block.
pub fn stretch_nearest(src: &RgbaImage, dst: &mut RgbaImage, dest: Rect) {
    if dest.is_empty() || src.width() == 0 || src.height() == 0 {
        return;
    }

    let mut writes = Vec::with_capacity(dest.width * dest.height);
    for_each_target(dst, dest, |x, y, dx, dy| {
        let sx = nearest_index(dx, src.width(), dest.width);
        let sy = nearest_index(dy, src.height(), dest.height);
        writes.push((x, y, src.pixel(sx, sy)));
    });

    for (x, y, color) in writes {
        let under = dst.pixel(x, y);
        dst.set_pixel(x, y, blend_over(under, color));
    }
}

/// Stretch `src` onto `dest` inside `dst` with bilinear filtering
pub fn stretch_smooth(src: &RgbaImage, dst: &mut RgbaImage, dest: Rect) {
    if dest.is_empty() || src.width() == 0 || src.height() == 0 {
        return;
    }

    let scale_x = src.width() as f32 / dest.width as f32;
    let scale_y = src.height() as f32 / dest.height as f32;
    let max_x = (src.width() - 1) as f32;
    let max_y = (src.height() - 1) as f32;

    let mut writes = Vec::with_capacity(dest.width * dest.height);
    for_each_target(dst, dest, |x, y, dx, dy| {
        // Sample at pixel centers
        let fx = ((dx as f32 + 0.5) * scale_x - 0.5).clamp(0.0, max_x);
        let fy = ((dy as f32 + 0.5) * scale_y - 0.5).clamp(0.0, max_y);
        let (x0, y0) = (fx.floor() as usize, fy.floor() as usize);
        let (x1, y1) = ((x0 + 1).min(src.width() - 1), (y0 + 1).min(src.height() - 1));
        let (tx, ty) = (fx - x0 as f32, fy - y0 as f32);

        let top = lerp(src.pixel(x0, y0), src.pixel(x1, y0), tx);
        let bottom = lerp(src.pixel(x0, y1), src.pixel(x1, y1), tx);
        writes.push((x, y, lerp(top, bottom, ty)));
    });

    for (x, y, color) in writes {
        let under = dst.pixel(x, y);
        dst.set_pixel(x, y, blend_over(under, color));
    }
}

/// Magnify an image by an integer factor into a new image
pub fn magnify(src: &RgbaImage, factor: usize) -> RgbaImage {
    let mut out = RgbaImage::new(src.width() * factor, src.height() * factor);
    let dest = Rect::new(0, 0, out.width(), out.height());
    stretch_nearest(src, &mut out, dest);
    out
}
