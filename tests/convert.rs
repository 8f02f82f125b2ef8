//! Conversion behavior through the public API, one source layout at a time.

use std::borrow::Cow;
use std::sync::atomic::{AtomicUsize, Ordering};

use zenclone::*;

fn noise(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed | 1;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect()
}

/// Canonical pixel at output coordinates (x, y).
fn px(img: &NrgbaImage, x: i32, y: i32) -> [u8; 4] {
    let c = img.pixel(x, y).unwrap();
    [c.r, c.g, c.b, c.a]
}

// ── Scenarios ────────────────────────────────────────────────────────

#[test]
fn gray_two_by_two_at_offset() {
    let src = GrayImage::from_raw(vec![0, 128, 255, 64], 2, Rect::new(-7, 40, 2, 2)).unwrap();
    let out = clone_image(&src);
    assert_eq!(out.bounds(), Rect::from_size(2, 2));
    assert_eq!(out.stride(), 8);
    assert_eq!(
        out.pix(),
        &[0, 0, 0, 255, 128, 128, 128, 255, 255, 255, 255, 255, 64, 64, 64, 255]
    );
}

#[test]
fn premultiplied_half_red() {
    let src = RgbaImage::from_raw(vec![128, 0, 0, 128], 4, Rect::from_size(1, 1)).unwrap();
    assert_eq!(clone_image(&src).pix(), &[255, 0, 0, 128]);
}

#[test]
fn padded_stride_is_dropped() {
    // Two visible pixels per row, stride of three pixels plus a stray byte.
    let mut pix = vec![0xee; 13 * 2];
    pix[..8].copy_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
    pix[13..21].copy_from_slice(&[9, 10, 11, 12, 13, 14, 15, 16]);
    let src = NrgbaImage::from_raw(pix, 13, Rect::new(3, 3, 2, 2)).unwrap();
    let out = clone_image(&src);
    assert_eq!(out.stride(), 8);
    assert_eq!(out.pix(), &(1..=16).collect::<Vec<u8>>()[..]);
}

#[test]
fn conversion_is_idempotent() {
    let src = RgbaImage::from_raw(noise(4 * 9 * 11, 3), 36, Rect::new(2, -5, 9, 11)).unwrap();
    let once = clone_image(&src);
    let twice = clone_image(&once);
    assert_eq!(once, twice);
    assert!(matches!(to_canonical(&once), Cow::Borrowed(b) if *b == once));
}

#[test]
fn clone_copies_even_canonical_input() {
    let src = NrgbaImage::from_raw(noise(4 * 4 * 4, 9), 16, Rect::from_size(4, 4)).unwrap();
    let mut copy = clone_image(&src);
    copy.put_pixel(0, 0, RGBA8::new(1, 2, 3, 4));
    assert_ne!(copy.pix(), src.pix());
}

#[test]
fn sixteen_bit_sources_keep_high_bytes() {
    let rect = Rect::new(1, 2, 5, 3);
    let wide = noise(8 * 15, 17);
    let high: Vec<u8> = wide.chunks_exact(2).map(|c| c[0]).collect();

    let nrgba64 = Nrgba64Image::from_raw(wide.clone(), 40, rect).unwrap();
    let nrgba = NrgbaImage::from_raw(high.clone(), 20, rect).unwrap();
    assert_eq!(clone_image(&nrgba64), clone_image(&nrgba));

    let rgba64 = Rgba64Image::from_raw(wide.clone(), 40, rect).unwrap();
    let rgba = RgbaImage::from_raw(high.clone(), 20, rect).unwrap();
    assert_eq!(clone_image(&rgba64), clone_image(&rgba));

    let gray16 = Gray16Image::from_raw(wide[..30].to_vec(), 10, rect).unwrap();
    let gray = GrayImage::from_raw(high[..15].to_vec(), 5, rect).unwrap();
    assert_eq!(clone_image(&gray16), clone_image(&gray));
}

#[test]
fn premultiplied_alpha_extremes() {
    let src = RgbaImage::from_raw(
        vec![10, 20, 30, 0, 10, 20, 30, 255, 0, 0, 0, 1, 1, 1, 1, 1],
        16,
        Rect::from_size(4, 1),
    )
    .unwrap();
    let out = clone_image(&src);
    assert_eq!(px(&out, 0, 0), [0, 0, 0, 0]);
    assert_eq!(px(&out, 1, 0), [10, 20, 30, 255]);
    assert_eq!(px(&out, 2, 0), [0, 0, 0, 1]);
    assert_eq!(px(&out, 3, 0), [255, 255, 255, 1]);
}

// ── Y'CbCr ───────────────────────────────────────────────────────────

fn ycbcr_noise(rect: Rect, subsampling: Subsampling, seed: u32) -> YCbCrImage {
    let mut img = YCbCrImage::new(rect, subsampling);
    let y = noise(img.y_plane().len(), seed);
    let cb = noise(img.cb_plane().len(), seed.wrapping_mul(3));
    let cr = noise(img.cr_plane().len(), seed.wrapping_mul(7));
    img.y_plane_mut().copy_from_slice(&y);
    img.cb_plane_mut().copy_from_slice(&cb);
    img.cr_plane_mut().copy_from_slice(&cr);
    img
}

const ALL_RATIOS: [Subsampling; 6] = [
    Subsampling::S444,
    Subsampling::S422,
    Subsampling::S420,
    Subsampling::S440,
    Subsampling::S411,
    Subsampling::S410,
];

#[test]
fn every_ratio_reads_the_covering_chroma_sample() {
    for rect in [Rect::new(0, 0, 9, 7), Rect::new(1, 3, 10, 5), Rect::new(-5, -3, 7, 6)] {
        for ratio in ALL_RATIOS {
            let src = ycbcr_noise(rect, ratio, 0x5eed);
            let out = clone_image(&src);
            for y in rect.y..rect.max_y() {
                for x in rect.x..rect.max_x() {
                    let luma = src.y_plane()[src.y_offset(x, y)];
                    let ci = src.c_offset(x, y);
                    let [r, g, b] = ycbcr_to_rgb(luma, src.cb_plane()[ci], src.cr_plane()[ci]);
                    assert_eq!(
                        px(&out, x - rect.x, y - rect.y),
                        [r, g, b, 255],
                        "{ratio:?} {rect:?} at ({x}, {y})"
                    );
                }
            }
        }
    }
}

#[test]
fn four_two_zero_shares_one_sample_per_block() {
    let mut src = YCbCrImage::new(Rect::from_size(4, 2), Subsampling::S420);
    src.y_plane_mut().fill(100);
    src.cb_plane_mut().copy_from_slice(&[128, 128]);
    src.cr_plane_mut().copy_from_slice(&[128, 200]);
    let out = clone_image(&src);
    for y in 0..2 {
        assert_eq!(px(&out, 0, y), px(&out, 1, y));
        assert_eq!(px(&out, 2, y), px(&out, 3, y));
        assert_eq!(px(&out, 0, y), [100, 100, 100, 255]);
    }
    assert_ne!(px(&out, 0, 0), px(&out, 2, 0));
}

#[test]
fn ycbcr_matrix_tracks_floating_point() {
    for y in (0..=255u8).step_by(5) {
        for cb in (0..=255u8).step_by(3) {
            for cr in (0..=255u8).step_by(7) {
                let (fy, fb, fr) = (f64::from(y), f64::from(cb) - 128.0, f64::from(cr) - 128.0);
                let reference = [
                    fy + 1.402 * fr,
                    fy - 0.344136 * fb - 0.714136 * fr,
                    fy + 1.772 * fb,
                ];
                let got = ycbcr_to_rgb(y, cb, cr);
                for (g, f) in got.iter().zip(reference) {
                    let f = f.clamp(0.0, 255.0);
                    // Fixed-point truncation costs at most one step.
                    assert!((f64::from(*g) - f).abs() < 1.001, "y={y} cb={cb} cr={cr}");
                }
            }
        }
    }
}

// ── Paletted ─────────────────────────────────────────────────────────

#[test]
fn palette_entries_convert_through_their_model() {
    let palette = Palette::new(vec![
        Color::Rgba(RGBA8::new(64, 0, 0, 128)),
        Color::Gray(77),
        Color::Nrgba(RGBA8::new(1, 2, 3, 4)),
    ])
    .unwrap();
    let src = PalettedImage::from_raw(vec![0, 1, 2, 7], 4, Rect::new(0, 9, 4, 1), palette).unwrap();
    let out = clone_image(&src);
    assert_eq!(px(&out, 0, 0), [127, 0, 0, 128]);
    assert_eq!(px(&out, 1, 0), [77, 77, 77, 255]);
    assert_eq!(px(&out, 2, 0), [1, 2, 3, 4]);
    // Index past the end of the palette.
    assert_eq!(px(&out, 3, 0), [0, 0, 0, 0]);
}

#[test]
fn palette_rejects_more_than_256_entries() {
    let err = Palette::new(vec![Color::Gray(0); 257]).unwrap_err();
    assert!(matches!(err, ConvertError::PaletteTooLarge(257)));
}

// ── Generic sources ──────────────────────────────────────────────────

/// Horizontal alpha ramp that counts how often it is queried.
struct AlphaRamp {
    queries: AtomicUsize,
}

impl ColorSource for AlphaRamp {
    fn color_at(&self, x: i32, _y: i32) -> Color {
        self.queries.fetch_add(1, Ordering::Relaxed);
        Color::Alpha((x * 51) as u8)
    }
}

#[test]
fn generic_source_is_queried_once_per_pixel() {
    let ramp = AlphaRamp {
        queries: AtomicUsize::new(0),
    };
    let bounds = Rect::new(0, -4, 6, 40);
    let out = clone_image(GenericImage::new(bounds, &ramp));
    assert_eq!(ramp.queries.load(Ordering::Relaxed), 6 * 40);
    assert_eq!(px(&out, 0, 0), [0, 0, 0, 0]);
    assert_eq!(px(&out, 1, 39), [255, 255, 255, 51]);
    assert_eq!(px(&out, 5, 17), [255, 255, 255, 255]);
}

#[test]
fn cmyk_source_through_generic_path() {
    struct Ink;
    impl ColorSource for Ink {
        fn color_at(&self, x: i32, _y: i32) -> Color {
            match x {
                0 => Color::Cmyk { c: 255, m: 0, y: 0, k: 0 },
                1 => Color::Cmyk { c: 0, m: 0, y: 0, k: 255 },
                _ => Color::Cmyk { c: 0, m: 0, y: 0, k: 0 },
            }
        }
    }
    let out = clone_image(GenericImage::new(Rect::from_size(3, 1), &Ink));
    assert_eq!(px(&out, 0, 0), [0, 255, 255, 255]);
    assert_eq!(px(&out, 1, 0), [0, 0, 0, 255]);
    assert_eq!(px(&out, 2, 0), [255, 255, 255, 255]);
}

#[test]
fn generic_bounds_must_fit_i32() {
    struct Flat;
    impl ColorSource for Flat {
        fn color_at(&self, _x: i32, _y: i32) -> Color {
            Color::Gray(7)
        }
    }
    let err = GenericImage::try_new(Rect::new(0, i32::MAX, 1, 2), &Flat).unwrap_err();
    assert!(matches!(err, ConvertError::DimensionsTooLarge { .. }));

    let edge = GenericImage::try_new(Rect::new(0, i32::MAX - 2, 1, 2), &Flat).unwrap();
    assert_eq!(clone_image(edge).pix(), &[7, 7, 7, 255, 7, 7, 7, 255]);
}

// ── Requests and limits ──────────────────────────────────────────────

#[test]
fn request_reports_limits() {
    let src = GrayImage::new(Rect::new(100, 100, 64, 64));
    let limits = Limits {
        max_pixels: Some(64 * 63),
        ..Default::default()
    };
    let err = ConvertRequest::new(&src).with_limits(&limits).clone_image().unwrap_err();
    assert!(matches!(err, ConvertError::LimitExceeded(_)));

    let limits = Limits {
        max_width: Some(64),
        max_height: Some(64),
        ..Default::default()
    };
    let out = ConvertRequest::new(&src).with_limits(&limits).clone_image().unwrap();
    assert_eq!(out.bounds(), Rect::from_size(64, 64));
}

#[test]
fn request_to_canonical_copies_offset_nrgba() {
    let src = NrgbaImage::new(Rect::new(1, 1, 2, 2));
    let out = ConvertRequest::new(&src).to_canonical().unwrap();
    assert!(matches!(out, Cow::Owned(_)));
    assert!(out.bounds().is_zero_origin());
}

#[test]
fn from_raw_rejects_bad_buffers() {
    let err = RgbaImage::from_raw(vec![0; 15], 8, Rect::from_size(2, 2)).unwrap_err();
    assert!(matches!(err, ConvertError::BufferTooSmall { needed: 16, actual: 15 }));
    let err = Gray16Image::from_raw(vec![0; 16], 3, Rect::from_size(2, 2)).unwrap_err();
    assert!(matches!(err, ConvertError::InvalidStride { stride: 3, min: 4 }));
}

#[test]
fn empty_sources_yield_empty_outputs() {
    for rect in [Rect::new(-3, 4, 0, 5), Rect::new(9, 9, 5, 0), Rect::default()] {
        let out = clone_image(&YCbCrImage::new(rect, Subsampling::S420));
        assert_eq!(out.bounds(), rect.at_origin());
        assert!(out.pix().is_empty());
    }
}

// ── Partitioning ─────────────────────────────────────────────────────

#[test]
fn row_ranges_follow_worker_count() {
    assert_eq!(part_size(1000, 4), 25);
    assert_eq!(row_ranges(1000, 4).count(), 40);
    assert_eq!(part_size(7, 8), 1);
    assert_eq!(row_ranges(7, 8).count(), 7);
    assert_eq!(row_ranges(7, 1).collect::<Vec<_>>(), vec![0..7]);
    assert_eq!(row_ranges(0, 8).count(), 0);
}

#[test]
fn for_each_row_range_covers_every_row() {
    let hits: Vec<AtomicUsize> = (0..523).map(|_| AtomicUsize::new(0)).collect();
    for_each_row_range(hits.len(), Parallelism::Auto, |rows| {
        for i in rows {
            hits[i].fetch_add(1, Ordering::Relaxed);
        }
    });
    assert!(hits.iter().all(|h| h.load(Ordering::Relaxed) == 1));
}

#[test]
fn worker_panic_reaches_caller() {
    struct Poisoned;
    impl ColorSource for Poisoned {
        fn color_at(&self, _x: i32, y: i32) -> Color {
            assert!(y != 150, "bad row");
            Color::Gray(0)
        }
    }
    let result = std::panic::catch_unwind(|| {
        clone_image(GenericImage::new(Rect::from_size(4, 300), &Poisoned))
    });
    assert!(result.is_err());
}
