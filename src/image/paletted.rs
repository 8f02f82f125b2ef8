use alloc::vec::Vec;

use rgb::RGBA8;

use super::Plane;
use crate::color::Color;
use crate::error::ConvertError;
use crate::geom::Rect;
use crate::source::ColorSource;

/// Ordered color table addressed by 8-bit indices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Palette(Vec<Color>);

impl Palette {
    pub const MAX_LEN: usize = 256;

    pub fn new(colors: Vec<Color>) -> Result<Self, ConvertError> {
        if colors.len() > Self::MAX_LEN {
            return Err(ConvertError::PaletteTooLarge(colors.len()));
        }
        Ok(Self(colors))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: u8) -> Option<Color> {
        self.0.get(usize::from(index)).copied()
    }

    pub fn colors(&self) -> &[Color] {
        &self.0
    }

    /// Every entry converted to straight-alpha RGBA8, padded to 256 entries
    /// with transparent black so any index byte is addressable.
    pub(crate) fn to_nrgba_table(&self) -> [RGBA8; 256] {
        let mut table = [RGBA8::new(0, 0, 0, 0); 256];
        for (slot, color) in table.iter_mut().zip(&self.0) {
            *slot = color.to_nrgba();
        }
        table
    }
}

/// 8-bit palette indices plus their [`Palette`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PalettedImage {
    plane: Plane,
    palette: Palette,
}

impl PalettedImage {
    /// All indices zero.
    ///
    /// # Panics
    ///
    /// Under the same conditions as [`crate::PackedImage::new`].
    pub fn new(rect: Rect, palette: Palette) -> Self {
        match Plane::zeroed(rect, 1) {
            Ok(plane) => Self { plane, palette },
            Err(e) => panic!("{e}"),
        }
    }

    pub fn from_raw(
        pix: Vec<u8>,
        stride: usize,
        rect: Rect,
        palette: Palette,
    ) -> Result<Self, ConvertError> {
        Ok(Self {
            plane: Plane::from_raw(pix, stride, rect, 1)?,
            palette,
        })
    }

    pub fn bounds(&self) -> Rect {
        self.plane.rect
    }

    pub fn stride(&self) -> usize {
        self.plane.stride
    }

    pub fn pix(&self) -> &[u8] {
        &self.plane.pix
    }

    pub fn pix_mut(&mut self) -> &mut [u8] {
        &mut self.plane.pix
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn index_at(&self, x: i32, y: i32) -> Option<u8> {
        self.plane.offset(x, y).map(|i| self.plane.pix[i])
    }

    /// Out-of-bounds coordinates are ignored.
    pub fn set_index(&mut self, x: i32, y: i32, index: u8) {
        if let Some(i) = self.plane.offset(x, y) {
            self.plane.pix[i] = index;
        }
    }

    #[inline]
    pub(crate) fn row(&self, dy: usize) -> &[u8] {
        self.plane.row(dy)
    }
}

impl ColorSource for PalettedImage {
    fn color_at(&self, x: i32, y: i32) -> Color {
        self.index_at(x, y)
            .and_then(|i| self.palette.get(i))
            .unwrap_or(Color::TRANSPARENT)
    }
}
