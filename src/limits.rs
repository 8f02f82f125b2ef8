use crate::error::ConvertError;
use crate::geom::Rect;

/// Resource limits for limit-checked conversion.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum memory bytes for the canonical output buffer.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check the dimensions of `rect` against limits.
    pub(crate) fn check(&self, rect: Rect) -> Result<(), ConvertError> {
        let (width, height) = (rect.width, rect.height);
        if let Some(max_w) = self.max_width {
            if u64::from(width) > max_w {
                return Err(ConvertError::LimitExceeded(alloc::format!(
                    "width {width} exceeds limit {max_w}"
                )));
            }
        }
        if let Some(max_h) = self.max_height {
            if u64::from(height) > max_h {
                return Err(ConvertError::LimitExceeded(alloc::format!(
                    "height {height} exceeds limit {max_h}"
                )));
            }
        }
        if let Some(max_px) = self.max_pixels {
            let pixels = rect.area();
            if pixels > max_px {
                return Err(ConvertError::LimitExceeded(alloc::format!(
                    "pixel count {pixels} exceeds limit {max_px}"
                )));
            }
        }
        Ok(())
    }

    /// Check that an allocation size is within memory limits.
    pub(crate) fn check_memory(&self, bytes: u64) -> Result<(), ConvertError> {
        if let Some(max_mem) = self.max_memory_bytes {
            if bytes > max_mem {
                return Err(ConvertError::LimitExceeded(alloc::format!(
                    "allocation {bytes} bytes exceeds memory limit {max_mem}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unlimited() {
        let limits = Limits::default();
        assert!(limits.check(Rect::from_size(u32::MAX, u32::MAX)).is_ok());
        assert!(limits.check_memory(u64::MAX).is_ok());
    }

    #[test]
    fn pixel_limit_counts_area() {
        let limits = Limits {
            max_pixels: Some(6),
            ..Default::default()
        };
        assert!(limits.check(Rect::from_size(3, 2)).is_ok());
        match limits.check(Rect::from_size(7, 1)) {
            Err(ConvertError::LimitExceeded(msg)) => assert!(msg.contains("pixel count 7")),
            other => panic!("expected LimitExceeded, got {other:?}"),
        }
    }

    #[test]
    fn width_and_height_checked_separately() {
        let limits = Limits {
            max_width: Some(4),
            max_height: Some(2),
            ..Default::default()
        };
        assert!(limits.check(Rect::new(-10, -10, 4, 2)).is_ok());
        assert!(limits.check(Rect::from_size(5, 1)).is_err());
        assert!(limits.check(Rect::from_size(1, 3)).is_err());
    }
}
