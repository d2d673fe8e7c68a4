use crate::foundation::error::{DeinterlaceError, DeinterlaceResult};

/// Bytes per pixel of packed 4:2:2 (`Y0 U Y1 V`) scanlines.
pub const BYTES_PER_PIXEL: usize = 2;

/// Number of payload bytes in one packed 4:2:2 scanline of `width` pixels.
pub fn row_bytes(width: usize) -> usize {
    width * BYTES_PER_PIXEL
}

/// Minimum buffer length holding `rows` scanlines of `width` pixels at `stride`.
pub fn required_len(stride: usize, width: usize, rows: usize) -> usize {
    if rows == 0 {
        return 0;
    }
    (rows - 1) * stride + row_bytes(width)
}

/// Frame size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Geometry {
    /// Width in pixels.
    pub width: usize,
    /// Height in scanlines (both fields).
    pub height: usize,
}

impl Geometry {
    /// Create a validated geometry.
    ///
    /// A frame needs at least one pixel per scanline and one scanline per field.
    pub fn new(width: usize, height: usize) -> DeinterlaceResult<Self> {
        if width == 0 {
            return Err(DeinterlaceError::validation("frame width must be > 0"));
        }
        if height < 2 {
            return Err(DeinterlaceError::validation(
                "frame height must be >= 2 (one scanline per field)",
            ));
        }
        Ok(Self { width, height })
    }

    /// Payload bytes of one scanline.
    pub fn row_bytes(self) -> usize {
        row_bytes(self.width)
    }
}

/// Borrowed view of one historical frame buffer.
///
/// The engine never owns slots; callers hand them in per request.
#[derive(Clone, Copy, Debug)]
pub struct FrameSlot<'a> {
    /// Packed 4:2:2 pixels, `stride` bytes per scanline.
    pub data: &'a [u8],
    /// Distance in bytes between the starts of consecutive scanlines.
    pub stride: usize,
    /// Whether the frame was presented as progressive.
    pub progressive: bool,
}

impl<'a> FrameSlot<'a> {
    /// Wrap an interlaced frame buffer.
    pub fn new(data: &'a [u8], stride: usize) -> Self {
        Self {
            data,
            stride,
            progressive: false,
        }
    }

    /// Set the progressive flag.
    pub fn with_progressive(mut self, progressive: bool) -> Self {
        self.progressive = progressive;
        self
    }

    /// Scanline `y`, from its first byte to the end of the buffer.
    ///
    /// Callers validate geometry with [`FrameSlot::check`] before indexing.
    pub fn row(&self, y: usize) -> &'a [u8] {
        &self.data[y * self.stride..]
    }

    /// Verify the slot holds `height` scanlines of `width` pixels.
    pub fn check(&self, what: &str, width: usize, height: usize) -> DeinterlaceResult<()> {
        if self.stride < row_bytes(width) {
            return Err(DeinterlaceError::geometry(format!(
                "{what}: stride {} is smaller than a {width}-pixel scanline",
                self.stride
            )));
        }
        let need = required_len(self.stride, width, height);
        if self.data.len() < need {
            return Err(DeinterlaceError::geometry(format!(
                "{what}: buffer holds {} bytes, {width}x{height} at stride {} needs {need}",
                self.data.len(),
                self.stride
            )));
        }
        Ok(())
    }
}

/// The three most recent frames, newest first.
///
/// Missing history is represented by repeating the newest frame, which degrades every method to
/// spatial-only interpolation instead of failing.
#[derive(Clone, Copy, Debug)]
pub struct FieldHistory<'a> {
    /// Frame holding the field being reconstructed.
    pub current: FrameSlot<'a>,
    /// Frame before `current`.
    pub previous: FrameSlot<'a>,
    /// Frame before `previous`.
    pub second_previous: FrameSlot<'a>,
}

impl<'a> FieldHistory<'a> {
    /// Build a history window from three slots.
    pub fn new(
        current: FrameSlot<'a>,
        previous: FrameSlot<'a>,
        second_previous: FrameSlot<'a>,
    ) -> Self {
        Self {
            current,
            previous,
            second_previous,
        }
    }

    /// History window with no past frames.
    pub fn single(current: FrameSlot<'a>) -> Self {
        Self::new(current, current, current)
    }

    /// Validate every slot against the same geometry.
    pub fn check(&self, width: usize, height: usize) -> DeinterlaceResult<()> {
        self.current.check("current frame", width, height)?;
        self.previous.check("previous frame", width, height)?;
        self.second_previous
            .check("second previous frame", width, height)
    }
}

/// Verify an output buffer can hold `rows` scanlines of `width` pixels.
pub fn check_output(out: &[u8], stride: usize, width: usize, rows: usize) -> DeinterlaceResult<()> {
    if stride < row_bytes(width) {
        return Err(DeinterlaceError::geometry(format!(
            "output: stride {stride} is smaller than a {width}-pixel scanline"
        )));
    }
    let need = required_len(stride, width, rows);
    if out.len() < need {
        return Err(DeinterlaceError::geometry(format!(
            "output: buffer holds {} bytes, {rows} scanlines at stride {stride} need {need}",
            out.len()
        )));
    }
    Ok(())
}

/// Mutable scanline `y` of an output buffer, exactly `row_bytes(width)` long.
pub(crate) fn out_row(out: &mut [u8], stride: usize, y: usize, width: usize) -> &mut [u8] {
    let start = y * stride;
    &mut out[start..start + row_bytes(width)]
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
