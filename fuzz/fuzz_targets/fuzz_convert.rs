#![no_main]
use libfuzzer_sys::fuzz_target;
use zenclone::*;

const RATIOS: [Subsampling; 6] = [
    Subsampling::S444,
    Subsampling::S422,
    Subsampling::S420,
    Subsampling::S440,
    Subsampling::S411,
    Subsampling::S410,
];

fuzz_target!(|data: &[u8]| {
    // Header: layout, origin x, origin y, width, height, stride pad.
    let [kind, x, y, w, h, pad, rest @ ..] = data else {
        return;
    };
    if rest.is_empty() {
        return;
    }
    let rect = Rect::new(
        i32::from(*x as i8) * 3,
        i32::from(*y as i8) * 3,
        u32::from(*w % 64),
        u32::from(*h % 64),
    );
    let pad = usize::from(*pad % 8);
    let (w, h) = (rect.width as usize, rect.height as usize);

    let fill = |len: usize| -> Vec<u8> { rest.iter().copied().cycle().take(len).collect() };
    let plane = |bpp: usize| {
        let stride = w * bpp + pad;
        (fill(stride * h), stride)
    };

    match kind % 5 {
        0 => {
            let (pix, stride) = plane(4);
            let img = NrgbaImage::from_raw(pix, stride, rect).unwrap();
            check((&img).into());
        }
        1 => {
            let (pix, stride) = plane(1);
            let img = GrayImage::from_raw(pix, stride, rect).unwrap();
            check((&img).into());
        }
        2 => {
            let (pix, stride) = plane(2);
            let img = Gray16Image::from_raw(pix, stride, rect).unwrap();
            check((&img).into());
        }
        3 => {
            let ratio = RATIOS[usize::from(*kind / 5) % RATIOS.len()];
            let mut img = YCbCrImage::new(rect, ratio);
            let y = fill(img.y_plane().len());
            let c = fill(img.cb_plane().len() * 2);
            let (cb, cr) = c.split_at(img.cb_plane().len());
            img.y_plane_mut().copy_from_slice(&y);
            img.cb_plane_mut().copy_from_slice(cb);
            img.cr_plane_mut().copy_from_slice(cr);
            check((&img).into());
        }
        _ => {
            let entries = usize::from(*kind / 5) + 1;
            let colors = fill(entries * 4)
                .chunks_exact(4)
                .map(|c| Color::Rgba(RGBA8::new(c[0], c[1], c[2], c[3])))
                .collect();
            let palette = Palette::new(colors).unwrap();
            let (pix, stride) = plane(1);
            let img = PalettedImage::from_raw(pix, stride, rect, palette).unwrap();
            check((&img).into());
        }
    }
});

/// The dedicated decoder and the generic one must agree exactly, and so
/// must sequential and parallel runs.
fn check(source: SourceImage<'_>) {
    let fast = ConvertRequest::new(source)
        .with_parallelism(Parallelism::Sequential)
        .clone_image()
        .unwrap();
    let generic = clone_image(source.as_generic());
    assert_eq!(fast, generic, "{:?}", source.layout());
    assert_eq!(fast, clone_image(source));
    assert_eq!(fast.bounds(), source.bounds().at_origin());
}
