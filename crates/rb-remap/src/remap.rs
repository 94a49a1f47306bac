use rb_core::{Error, Image, ImageView, ImageViewMut};

use crate::border::BorderMode;
use crate::kernel::{Interpolation, LANCZOS_RADIUS, LANCZOS_TAPS, lanczos4_weights};

/// Remaps `src` through the coordinate field `map` into a new image.
///
/// The output has the map's extent and the source's channel count. See
/// [`remap_into`] for the error conditions.
pub fn remap(
    src: &ImageView<'_, u8>,
    map: &ImageView<'_, f32>,
    interpolation: Interpolation,
    border: BorderMode,
) -> Result<Image<u8>, Error> {
    let mut dst = Image::new_fill(map.width(), map.height(), src.channels(), 0u8);
    let mut dst_view = dst.as_view_mut();
    remap_into(src, map, &mut dst_view, interpolation, border)?;
    Ok(dst)
}

/// Remaps `src` through the coordinate field `map` into `dst`.
///
/// For each destination pixel `(x, y)`, reads the source coordinate
/// `(map[0], map[1])` at that cell and samples `src` there with the selected
/// kernel and border mode. `map` and `dst` may be subviews of larger
/// buffers; the map values stay absolute source coordinates.
///
/// # Errors
/// - `ChannelMismatch` if `map` does not have exactly 2 channels or `dst`
///   does not match the source channel count.
/// - `SizeMismatch` if `dst` does not have the map's extent.
/// - `OutOfBounds` if the source is empty and the border mode is not
///   `Constant`, since no tap could ever resolve.
pub fn remap_into(
    src: &ImageView<'_, u8>,
    map: &ImageView<'_, f32>,
    dst: &mut ImageViewMut<'_, u8>,
    interpolation: Interpolation,
    border: BorderMode,
) -> Result<(), Error> {
    if map.channels() != 2 {
        return Err(Error::ChannelMismatch {
            expected: 2,
            actual: map.channels(),
        });
    }
    if dst.channels() != src.channels() {
        return Err(Error::ChannelMismatch {
            expected: src.channels(),
            actual: dst.channels(),
        });
    }
    if dst.width() != map.width() || dst.height() != map.height() {
        return Err(Error::SizeMismatch {
            expected: map.width() * map.height(),
            actual: dst.width() * dst.height(),
        });
    }
    if (src.width() == 0 || src.height() == 0) && !matches!(border, BorderMode::Constant(_)) {
        return Err(Error::OutOfBounds);
    }

    let width = map.width();
    let channels = src.channels();

    for y in 0..map.height() {
        let map_row = map.row(y);
        let dst_row = dst.row_mut(y);
        for x in 0..width {
            let sx = map_row[2 * x];
            let sy = map_row[2 * x + 1];
            let out = &mut dst_row[x * channels..(x + 1) * channels];
            match interpolation {
                Interpolation::Nearest => nearest_pixel(src, sx, sy, &border, out),
                Interpolation::Bilinear => bilinear_pixel(src, sx, sy, &border, out),
                Interpolation::Lanczos4 => lanczos4_pixel(src, sx, sy, &border, out),
            }
        }
    }

    Ok(())
}

#[inline]
fn to_u8(v: f32) -> u8 {
    v.clamp(0.0, 255.0).round() as u8
}

fn nearest_pixel(src: &ImageView<'_, u8>, x: f32, y: f32, border: &BorderMode, out: &mut [u8]) {
    let xi = x.round() as isize;
    let yi = y.round() as isize;
    for (c, value) in out.iter_mut().enumerate() {
        *value = to_u8(tap(src, xi, yi, c, border));
    }
}

fn bilinear_pixel(src: &ImageView<'_, u8>, x: f32, y: f32, border: &BorderMode, out: &mut [u8]) {
    let x0 = x.floor() as isize;
    let y0 = y.floor() as isize;
    let dx = x - x0 as f32;
    let dy = y - y0 as f32;

    for (c, value) in out.iter_mut().enumerate() {
        let p00 = tap(src, x0, y0, c, border);
        let p10 = tap(src, x0 + 1, y0, c, border);
        let p01 = tap(src, x0, y0 + 1, c, border);
        let p11 = tap(src, x0 + 1, y0 + 1, c, border);

        let top = p00 * (1.0 - dx) + p10 * dx;
        let bottom = p01 * (1.0 - dx) + p11 * dx;
        *value = to_u8(top * (1.0 - dy) + bottom * dy);
    }
}

fn lanczos4_pixel(src: &ImageView<'_, u8>, x: f32, y: f32, border: &BorderMode, out: &mut [u8]) {
    let x0 = x.floor() as isize;
    let y0 = y.floor() as isize;

    let mut wx = [0.0f32; LANCZOS_TAPS];
    let mut wy = [0.0f32; LANCZOS_TAPS];
    lanczos4_weights(x - x0 as f32, &mut wx);
    lanczos4_weights(y - y0 as f32, &mut wy);

    for (c, value) in out.iter_mut().enumerate() {
        let mut acc = 0.0f32;
        for (j, &wyj) in wy.iter().enumerate() {
            let yi = y0 + j as isize - (LANCZOS_RADIUS - 1);
            let mut row_acc = 0.0f32;
            for (i, &wxi) in wx.iter().enumerate() {
                let xi = x0 + i as isize - (LANCZOS_RADIUS - 1);
                row_acc += wxi * tap(src, xi, yi, c, border);
            }
            acc += wyj * row_acc;
        }
        *value = to_u8(acc);
    }
}

#[inline]
fn tap(src: &ImageView<'_, u8>, xi: isize, yi: isize, c: usize, border: &BorderMode) -> f32 {
    match border {
        BorderMode::Constant(fill) => {
            if xi < 0 || yi < 0 || xi >= src.width() as isize || yi >= src.height() as isize {
                *fill
            } else {
                // SAFETY: Bounds are checked immediately above, and callers
                // iterate `c` below the source channel count.
                unsafe { *src.get_unchecked(xi as usize, yi as usize, c) as f32 }
            }
        }
        mode @ (BorderMode::Clamp | BorderMode::Reflect101) => {
            let x = mode
                .resolve(xi, src.width())
                .expect("valid mapped index for non-empty image");
            let y = mode
                .resolve(yi, src.height())
                .expect("valid mapped index for non-empty image");
            // SAFETY: `resolve` returns indices in `[0, len)` for non-empty
            // images, and callers iterate `c` below the source channel count.
            unsafe { *src.get_unchecked(x, y, c) as f32 }
        }
    }
}

#[cfg(test)]
mod tests {
    use rb_core::{Error, Image};

    use super::{remap, remap_into};
    use crate::border::BorderMode;
    use crate::kernel::Interpolation;

    fn ramp_rgb(width: usize, height: usize) -> Image<u8> {
        let mut data = Vec::with_capacity(width * height * 3);
        for y in 0..height {
            for x in 0..width {
                data.push((x * 10) as u8);
                data.push((y * 10) as u8);
                data.push((x + y) as u8);
            }
        }
        Image::from_vec(width, height, 3, data).expect("valid image")
    }

    fn identity_map(width: usize, height: usize) -> Image<f32> {
        let mut data = Vec::with_capacity(width * height * 2);
        for y in 0..height {
            for x in 0..width {
                data.push(x as f32);
                data.push(y as f32);
            }
        }
        Image::from_vec(width, height, 2, data).expect("valid field")
    }

    #[test]
    fn identity_map_reproduces_source_for_all_kernels() {
        let src = ramp_rgb(6, 5);
        let map = identity_map(6, 5);

        for kernel in [
            Interpolation::Nearest,
            Interpolation::Bilinear,
            Interpolation::Lanczos4,
        ] {
            let out = remap(
                &src.as_view(),
                &map.as_view(),
                kernel,
                BorderMode::Constant(0.0),
            )
            .expect("valid remap");
            assert_eq!(out, src, "kernel {kernel:?}");
        }
    }

    #[test]
    fn bilinear_midpoint_averages_four_neighbors() {
        let src = Image::from_vec(2, 2, 1, vec![0u8, 10, 20, 30]).expect("valid image");
        let map = Image::from_vec(1, 1, 2, vec![0.5f32, 0.5]).expect("valid field");

        let out = remap(
            &src.as_view(),
            &map.as_view(),
            Interpolation::Bilinear,
            BorderMode::Constant(0.0),
        )
        .expect("valid remap");
        assert_eq!(out.data(), &[15u8]);
    }

    #[test]
    fn constant_border_fills_outside_taps() {
        let src = Image::from_vec(2, 2, 1, vec![10u8, 10, 10, 10]).expect("valid image");
        // Entirely outside on the left.
        let map = Image::from_vec(1, 1, 2, vec![-5.0f32, 0.0]).expect("valid field");

        for kernel in [Interpolation::Nearest, Interpolation::Bilinear] {
            let out = remap(
                &src.as_view(),
                &map.as_view(),
                kernel,
                BorderMode::Constant(99.0),
            )
            .expect("valid remap");
            assert_eq!(out.data(), &[99u8], "kernel {kernel:?}");
        }
    }

    #[test]
    fn clamp_border_repeats_edge_pixels() {
        let src = Image::from_vec(2, 1, 1, vec![50u8, 200]).expect("valid image");
        let map = Image::from_vec(2, 1, 2, vec![-3.0f32, 0.0, 7.0, 0.0]).expect("valid field");

        let out = remap(
            &src.as_view(),
            &map.as_view(),
            Interpolation::Bilinear,
            BorderMode::Clamp,
        )
        .expect("valid remap");
        assert_eq!(out.data(), &[50u8, 200]);
    }

    #[test]
    fn lanczos4_keeps_constant_source_constant() {
        let src = Image::new_fill(12, 12, 3, 100u8);
        let mut data = Vec::new();
        for y in 0..5 {
            for x in 0..5 {
                data.push(3.3f32 + x as f32 * 0.7);
                data.push(4.1f32 + y as f32 * 0.6);
            }
        }
        let map = Image::from_vec(5, 5, 2, data).expect("valid field");

        let out = remap(
            &src.as_view(),
            &map.as_view(),
            Interpolation::Lanczos4,
            BorderMode::Clamp,
        )
        .expect("valid remap");
        assert!(out.data().iter().all(|&v| v == 100));
    }

    #[test]
    fn subview_remap_matches_full_remap_region() {
        let src = ramp_rgb(9, 7);
        let mut data = Vec::new();
        for y in 0..6 {
            for x in 0..8 {
                data.push(x as f32 * 0.9 + 0.3);
                data.push(y as f32 * 0.8 + 0.2);
            }
        }
        let map = Image::from_vec(8, 6, 2, data).expect("valid field");

        let full = remap(
            &src.as_view(),
            &map.as_view(),
            Interpolation::Bilinear,
            BorderMode::Constant(0.0),
        )
        .expect("valid remap");

        let map_band = map.as_view().view_rows(2..5).expect("valid band");
        let band = remap(
            &src.as_view(),
            &map_band,
            Interpolation::Bilinear,
            BorderMode::Constant(0.0),
        )
        .expect("valid remap");

        for y in 0..3 {
            assert_eq!(band.as_view().row(y), full.as_view().row(y + 2));
        }
    }

    #[test]
    fn rejects_bad_map_and_destination_shapes() {
        let src = ramp_rgb(4, 4);
        let map3 = Image::new_fill(4, 4, 3, 0.0f32);
        assert!(matches!(
            remap(
                &src.as_view(),
                &map3.as_view(),
                Interpolation::Bilinear,
                BorderMode::Clamp,
            ),
            Err(Error::ChannelMismatch {
                expected: 2,
                actual: 3
            })
        ));

        let map = identity_map(4, 4);
        let mut small = Image::new_fill(3, 4, 3, 0u8);
        let mut small_view = small.as_view_mut();
        assert!(matches!(
            remap_into(
                &src.as_view(),
                &map.as_view(),
                &mut small_view,
                Interpolation::Bilinear,
                BorderMode::Clamp,
            ),
            Err(Error::SizeMismatch { .. })
        ));

        let mut gray = Image::new_fill(4, 4, 1, 0u8);
        let mut gray_view = gray.as_view_mut();
        assert!(matches!(
            remap_into(
                &src.as_view(),
                &map.as_view(),
                &mut gray_view,
                Interpolation::Bilinear,
                BorderMode::Clamp,
            ),
            Err(Error::ChannelMismatch {
                expected: 3,
                actual: 1
            })
        ));
    }

    #[test]
    fn empty_source_requires_constant_border() {
        let src = Image::new_fill(0, 0, 3, 0u8);
        let map = identity_map(2, 2);

        assert!(matches!(
            remap(
                &src.as_view(),
                &map.as_view(),
                Interpolation::Bilinear,
                BorderMode::Clamp,
            ),
            Err(Error::OutOfBounds)
        ));

        let out = remap(
            &src.as_view(),
            &map.as_view(),
            Interpolation::Bilinear,
            BorderMode::Constant(42.0),
        )
        .expect("constant border samples nothing");
        assert!(out.data().iter().all(|&v| v == 42));
    }
}
