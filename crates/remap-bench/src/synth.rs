use rb_core::Image;

/// Deterministic interleaved RGB test pattern.
///
/// Channel 0 is `x mod 256`, channel 1 is `y mod 256`, channel 2 is
/// `(x + y) mod 256`, filled in row-major order.
pub fn test_pattern_rgb(width: usize, height: usize) -> Image<u8> {
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            data.push((x % 256) as u8);
            data.push((y % 256) as u8);
            data.push(((x + y) % 256) as u8);
        }
    }
    Image::from_vec(width, height, 3, data).expect("pattern length matches extent")
}
