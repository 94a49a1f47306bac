use rb_core::{Error, Image, ImageView, Rect};
use rb_remap::{BorderMode, Interpolation, remap_into};

/// How a band's destination and mapping sub-views are expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandAccess {
    /// Row-range views spanning all columns, written directly.
    RowRange,
    /// Explicit rectangle views, written directly.
    RectRegion,
    /// Remap into a reused scratch buffer, then copy into place.
    CopyThrough,
}

/// Remaps the destination in horizontal bands of `band_rows` rows into a
/// new image. See [`remap_in_bands_into`].
pub fn remap_in_bands(
    src: &ImageView<'_, u8>,
    map: &ImageView<'_, f32>,
    interpolation: Interpolation,
    border: BorderMode,
    band_rows: usize,
    access: BandAccess,
) -> Result<Image<u8>, Error> {
    let mut dst = Image::new_fill(map.width(), map.height(), src.channels(), 0u8);
    remap_in_bands_into(src, map, interpolation, border, band_rows, access, &mut dst)?;
    Ok(dst)
}

/// Remaps the destination in horizontal bands of `band_rows` rows.
///
/// The final band clips to the remaining rows. The output is pixel-identical
/// to a single full-frame [`rb_remap::remap_into`] call over the same
/// inputs, whichever `access` variant is used.
///
/// # Panics
/// Panics if `band_rows` is zero.
pub fn remap_in_bands_into(
    src: &ImageView<'_, u8>,
    map: &ImageView<'_, f32>,
    interpolation: Interpolation,
    border: BorderMode,
    band_rows: usize,
    access: BandAccess,
    dst: &mut Image<u8>,
) -> Result<(), Error> {
    assert!(band_rows > 0, "band_rows must be positive");

    if dst.width() != map.width() || dst.height() != map.height() {
        return Err(Error::SizeMismatch {
            expected: map.width() * map.height(),
            actual: dst.width() * dst.height(),
        });
    }

    match access {
        BandAccess::RowRange => {
            remap_row_range_bands(src, map, interpolation, border, band_rows, dst)
        }
        BandAccess::RectRegion => {
            remap_rect_bands(src, map, interpolation, border, band_rows, dst)
        }
        BandAccess::CopyThrough => {
            remap_copy_through_bands(src, map, interpolation, border, band_rows, dst)
        }
    }
}

fn remap_row_range_bands(
    src: &ImageView<'_, u8>,
    map: &ImageView<'_, f32>,
    interpolation: Interpolation,
    border: BorderMode,
    band_rows: usize,
    dst: &mut Image<u8>,
) -> Result<(), Error> {
    let height = dst.height();
    let mut dst_view = dst.as_view_mut();

    for start in (0..height).step_by(band_rows) {
        let end = (start + band_rows).min(height);
        let map_band = map.view_rows(start..end)?;
        let mut dst_band = dst_view.view_rows_mut(start..end)?;
        remap_into(src, &map_band, &mut dst_band, interpolation, border)?;
    }
    Ok(())
}

fn remap_rect_bands(
    src: &ImageView<'_, u8>,
    map: &ImageView<'_, f32>,
    interpolation: Interpolation,
    border: BorderMode,
    band_rows: usize,
    dst: &mut Image<u8>,
) -> Result<(), Error> {
    let width = dst.width();
    let height = dst.height();
    let mut dst_view = dst.as_view_mut();

    for start in (0..height).step_by(band_rows) {
        let band = Rect::row_band(start, band_rows, width, height);
        let map_band = map.view_rect(band)?;
        let mut dst_band = dst_view.view_rect_mut(band)?;
        remap_into(src, &map_band, &mut dst_band, interpolation, border)?;
    }
    Ok(())
}

fn remap_copy_through_bands(
    src: &ImageView<'_, u8>,
    map: &ImageView<'_, f32>,
    interpolation: Interpolation,
    border: BorderMode,
    band_rows: usize,
    dst: &mut Image<u8>,
) -> Result<(), Error> {
    let width = dst.width();
    let height = dst.height();
    let channels = dst.channels();

    // One scratch allocation at full band size, reused for every band. The
    // final band remaps into a subview of it, so stale rows below the
    // subview are never copied out.
    let mut scratch = Image::new_fill(width, band_rows.min(height), channels, 0u8);
    let mut dst_view = dst.as_view_mut();

    for start in (0..height).step_by(band_rows) {
        let end = (start + band_rows).min(height);
        let rows = end - start;
        let map_band = map.view_rows(start..end)?;

        {
            let mut scratch_view = scratch.as_view_mut();
            let mut scratch_band = scratch_view.subview_mut(0, 0, width, rows)?;
            remap_into(src, &map_band, &mut scratch_band, interpolation, border)?;
        }

        let scratch_band = scratch.as_view().subview(0, 0, width, rows)?;
        let mut dst_band = dst_view.view_rows_mut(start..end)?;
        dst_band.copy_from(&scratch_band)?;
    }
    Ok(())
}
