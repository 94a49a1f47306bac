use rb_core::Image;

/// Two-channel coordinate field: for each destination pixel, the source
/// `(x, y)` to sample.
///
/// The horizontal coordinate follows a sine warp, `sin(x / dst_width) *
/// src_width`, which is non-monotonic over a wide destination; the vertical
/// coordinate is a linear scale over the full source height. Re-running
/// with the same extents produces a bitwise-identical field.
pub fn sine_warp_map(
    dst_width: usize,
    dst_height: usize,
    src_width: usize,
    src_height: usize,
) -> Image<f32> {
    let mut data = Vec::with_capacity(dst_width * dst_height * 2);
    for y in 0..dst_height {
        let sy = (y as f32 / dst_height as f32) * src_height as f32;
        for x in 0..dst_width {
            let sx = (x as f32 / dst_width as f32).sin() * src_width as f32;
            data.push(sx);
            data.push(sy);
        }
    }
    Image::from_vec(dst_width, dst_height, 2, data).expect("field length matches extent")
}
