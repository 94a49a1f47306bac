/// Policy for sample taps that fall outside the source extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BorderMode {
    /// Repeat the edge pixel.
    Clamp,
    /// Out-of-bounds taps contribute this value.
    Constant(f32),
    /// Mirror around edge pixels without repeating them
    /// (`gfedcb|abcdefgh|gfedcb`).
    Reflect101,
}

impl BorderMode {
    /// Maps a possibly out-of-range index into `[0, len)`.
    ///
    /// Returns `None` when the tap resolves to the constant fill value, or
    /// when `len == 0` and no in-range index exists.
    pub fn resolve(&self, i: isize, len: usize) -> Option<usize> {
        match self {
            Self::Constant(_) => {
                if i < 0 || i >= len as isize {
                    None
                } else {
                    Some(i as usize)
                }
            }
            Self::Clamp => {
                if len == 0 {
                    return None;
                }
                if i < 0 {
                    Some(0)
                } else {
                    let idx = i as usize;
                    Some(idx.min(len - 1))
                }
            }
            Self::Reflect101 => {
                if len == 0 {
                    return None;
                }
                if len == 1 {
                    return Some(0);
                }

                let period = (2 * len - 2) as isize;
                let r = i.rem_euclid(period) as usize;
                if r < len {
                    Some(r)
                } else {
                    Some((2 * len - 2) - r)
                }
            }
        }
    }
}
