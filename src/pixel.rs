/// Source pixel layout, one per [`crate::SourceImage`] variant.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    /// 4 channels, 8-bit straight-alpha RGBA. The canonical layout.
    Nrgba8,
    /// 4 channels, 16-bit big-endian straight-alpha RGBA.
    Nrgba16,
    /// 4 channels, 8-bit premultiplied RGBA.
    Rgba8,
    /// 4 channels, 16-bit big-endian premultiplied RGBA.
    Rgba16,
    /// Single channel, 8-bit grayscale.
    Gray8,
    /// Single channel, 16-bit big-endian grayscale.
    Gray16,
    /// Planar luma plus subsampled Cb/Cr planes, 8-bit.
    YCbCr,
    /// 8-bit indices into a palette.
    Paletted,
    /// Anything else, read one color at a time.
    Generic,
}

impl PixelLayout {
    /// Bytes per pixel in the primary plane, `None` for [`PixelLayout::Generic`].
    pub fn bytes_per_pixel(&self) -> Option<usize> {
        match self {
            Self::Gray8 | Self::YCbCr | Self::Paletted => Some(1),
            Self::Gray16 => Some(2),
            Self::Nrgba8 | Self::Rgba8 => Some(4),
            Self::Nrgba16 | Self::Rgba16 => Some(8),
            Self::Generic => None,
        }
    }

    /// Whether color channels are stored multiplied by alpha.
    pub fn is_premultiplied(&self) -> bool {
        matches!(self, Self::Rgba8 | Self::Rgba16)
    }

    /// Whether the layout can carry non-opaque pixels.
    pub fn has_alpha(&self) -> bool {
        !matches!(self, Self::Gray8 | Self::Gray16 | Self::YCbCr)
    }
}
