use crate::source::GenericImage;

/// Query every pixel of visible row `dy` and convert it through its color
/// model.
pub(super) fn generic_row(src: &GenericImage<'_>, dy: usize, out: &mut [u8]) {
    let b = src.bounds();
    let y = b.y + dy as i32;
    let source = src.source();
    for (d, x) in out.chunks_exact_mut(4).zip(b.x..b.max_x()) {
        let c = source.color_at(x, y).to_nrgba();
        d.copy_from_slice(&[c.r, c.g, c.b, c.a]);
    }
}
