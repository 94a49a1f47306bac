use core::ops::Range;

use crate::Error;
use crate::rect::Rect;

/// Owned row-major image buffer with interleaved channels.
#[derive(Debug, Clone, PartialEq)]
pub struct Image<T> {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<T>,
}

impl<T> Image<T> {
    pub fn from_vec(
        width: usize,
        height: usize,
        channels: usize,
        data: Vec<T>,
    ) -> Result<Self, Error> {
        let expected = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(channels))
            .ok_or(Error::SizeMismatch {
                expected: usize::MAX,
                actual: data.len(),
            })?;

        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Number of elements per row (`width * channels`).
    pub fn row_elems(&self) -> usize {
        self.width * self.channels
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn as_view(&self) -> ImageView<'_, T> {
        ImageView {
            width: self.width,
            height: self.height,
            channels: self.channels,
            stride: self.width * self.channels,
            data: &self.data,
        }
    }

    pub fn as_view_mut(&mut self) -> ImageViewMut<'_, T> {
        ImageViewMut {
            width: self.width,
            height: self.height,
            channels: self.channels,
            stride: self.width * self.channels,
            data: &mut self.data,
        }
    }
}

impl<T: Clone> Image<T> {
    pub fn new_fill(width: usize, height: usize, channels: usize, value: T) -> Self {
        let len = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(channels))
            .expect("image size overflow");
        Self {
            width,
            height,
            channels,
            data: vec![value; len],
        }
    }
}

/// Borrowed read-only view into an image buffer.
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a, T> {
    width: usize,
    height: usize,
    channels: usize,
    stride: usize,
    data: &'a [T],
}

impl<'a, T> ImageView<'a, T> {
    pub fn from_slice(
        width: usize,
        height: usize,
        channels: usize,
        stride: usize,
        data: &'a [T],
    ) -> Result<Self, Error> {
        let row_elems = width.checked_mul(channels).ok_or(Error::OutOfBounds)?;
        if stride < row_elems {
            return Err(Error::InvalidStride);
        }

        let min_len = stride.checked_mul(height).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;

        if data.len() < min_len {
            return Err(Error::SizeMismatch {
                expected: min_len,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            channels,
            stride,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// All elements of row `y`, channels interleaved.
    pub fn row(&self, y: usize) -> &'a [T] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.stride;
        &self.data[start..start + self.width * self.channels]
    }

    /// The channel elements of pixel `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> &'a [T] {
        assert!(
            x < self.width && y < self.height,
            "pixel index out of bounds"
        );
        let start = y * self.stride + x * self.channels;
        &self.data[start..start + self.channels]
    }

    pub fn get(&self, x: usize, y: usize, c: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height || c >= self.channels {
            return None;
        }
        let idx = y * self.stride + x * self.channels + c;
        self.data.get(idx)
    }

    /// Returns a channel element without bounds checks.
    ///
    /// # Safety
    /// Caller must guarantee `x < self.width()`, `y < self.height()` and
    /// `c < self.channels()`.
    pub unsafe fn get_unchecked(&self, x: usize, y: usize, c: usize) -> &'a T {
        // SAFETY: Caller guarantees `x < width`, `y < height` and
        // `c < channels`. With view invariants this implies `idx` is in
        // bounds of `data`.
        unsafe { self.data.get_unchecked(y * self.stride + x * self.channels + c) }
    }

    pub fn subview(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> Result<ImageView<'a, T>, Error> {
        if x > self.width
            || y > self.height
            || width > (self.width - x)
            || height > (self.height - y)
        {
            return Err(Error::OutOfBounds);
        }

        let start = y
            .checked_mul(self.stride)
            .and_then(|v| v.checked_add(x * self.channels))
            .ok_or(Error::OutOfBounds)?;
        let min_len = min_required_len(width, height, self.channels, self.stride)
            .ok_or(Error::OutOfBounds)?;
        let tail = self.data.get(start..).ok_or(Error::OutOfBounds)?;

        if tail.len() < min_len {
            return Err(Error::OutOfBounds);
        }

        Ok(ImageView {
            width,
            height,
            channels: self.channels,
            stride: self.stride,
            data: tail,
        })
    }

    /// View of a row range spanning all columns.
    pub fn view_rows(&self, rows: Range<usize>) -> Result<ImageView<'a, T>, Error> {
        if rows.end < rows.start {
            return Err(Error::OutOfBounds);
        }
        self.subview(0, rows.start, self.width, rows.end - rows.start)
    }

    /// View of an explicit rectangle.
    pub fn view_rect(&self, rect: Rect) -> Result<ImageView<'a, T>, Error> {
        self.subview(rect.x, rect.y, rect.width, rect.height)
    }

    pub fn is_contiguous(&self) -> bool {
        self.stride == self.width * self.channels
    }

    pub fn as_contiguous_slice(&self) -> Option<&'a [T]> {
        if !self.is_contiguous() {
            return None;
        }
        let len = self.width * self.height * self.channels;
        self.data.get(0..len)
    }
}

/// Borrowed mutable view into an image buffer.
#[derive(Debug)]
pub struct ImageViewMut<'a, T> {
    width: usize,
    height: usize,
    channels: usize,
    stride: usize,
    data: &'a mut [T],
}

impl<'a, T> ImageViewMut<'a, T> {
    pub fn from_slice_mut(
        width: usize,
        height: usize,
        channels: usize,
        stride: usize,
        data: &'a mut [T],
    ) -> Result<Self, Error> {
        let row_elems = width.checked_mul(channels).ok_or(Error::OutOfBounds)?;
        if stride < row_elems {
            return Err(Error::InvalidStride);
        }

        let min_len = stride.checked_mul(height).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;

        if data.len() < min_len {
            return Err(Error::SizeMismatch {
                expected: min_len,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            channels,
            stride,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn row(&self, y: usize) -> &[T] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.stride;
        &self.data[start..start + self.width * self.channels]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [T] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.stride;
        &mut self.data[start..start + self.width * self.channels]
    }

    pub fn get(&self, x: usize, y: usize, c: usize) -> Option<&T> {
        if x >= self.width || y >= self.height || c >= self.channels {
            return None;
        }
        let idx = y * self.stride + x * self.channels + c;
        self.data.get(idx)
    }

    pub fn get_mut(&mut self, x: usize, y: usize, c: usize) -> Option<&mut T> {
        if x >= self.width || y >= self.height || c >= self.channels {
            return None;
        }
        let idx = y * self.stride + x * self.channels + c;
        self.data.get_mut(idx)
    }

    pub fn subview_mut(
        &mut self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> Result<ImageViewMut<'_, T>, Error> {
        if x > self.width
            || y > self.height
            || width > (self.width - x)
            || height > (self.height - y)
        {
            return Err(Error::OutOfBounds);
        }

        let start = y
            .checked_mul(self.stride)
            .and_then(|v| v.checked_add(x * self.channels))
            .ok_or(Error::OutOfBounds)?;
        let min_len = min_required_len(width, height, self.channels, self.stride)
            .ok_or(Error::OutOfBounds)?;

        let (_, tail) = self.data.split_at_mut(start);
        if tail.len() < min_len {
            return Err(Error::OutOfBounds);
        }

        Ok(ImageViewMut {
            width,
            height,
            channels: self.channels,
            stride: self.stride,
            data: tail,
        })
    }

    /// Mutable view of a row range spanning all columns.
    pub fn view_rows_mut(&mut self, rows: Range<usize>) -> Result<ImageViewMut<'_, T>, Error> {
        if rows.end < rows.start {
            return Err(Error::OutOfBounds);
        }
        let width = self.width;
        self.subview_mut(0, rows.start, width, rows.end - rows.start)
    }

    /// Mutable view of an explicit rectangle.
    pub fn view_rect_mut(&mut self, rect: Rect) -> Result<ImageViewMut<'_, T>, Error> {
        self.subview_mut(rect.x, rect.y, rect.width, rect.height)
    }

    pub fn as_view(&self) -> ImageView<'_, T> {
        ImageView {
            width: self.width,
            height: self.height,
            channels: self.channels,
            stride: self.stride,
            data: self.data,
        }
    }

    pub fn is_contiguous(&self) -> bool {
        self.stride == self.width * self.channels
    }

    /// Copies every pixel of `src` into this view. Extents and channel
    /// counts must match; strides may differ.
    pub fn copy_from(&mut self, src: &ImageView<'_, T>) -> Result<(), Error>
    where
        T: Copy,
    {
        if self.width != src.width() || self.height != src.height() {
            return Err(Error::SizeMismatch {
                expected: src.width() * src.height(),
                actual: self.width * self.height,
            });
        }
        if self.channels != src.channels() {
            return Err(Error::ChannelMismatch {
                expected: src.channels(),
                actual: self.channels,
            });
        }

        for y in 0..self.height {
            self.row_mut(y).copy_from_slice(src.row(y));
        }
        Ok(())
    }
}

fn min_required_len(
    width: usize,
    height: usize,
    channels: usize,
    stride: usize,
) -> Option<usize> {
    if width == 0 || height == 0 {
        return Some(0);
    }

    let row_elems = width.checked_mul(channels)?;
    let rows_before_last = height.checked_sub(1)?;
    let base = rows_before_last.checked_mul(stride)?;
    base.checked_add(row_elems)
}
