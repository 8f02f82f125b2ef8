use rgb::RGBA8;

/// `table` is the palette already converted to straight alpha; every index
/// byte addresses it.
pub(super) fn paletted_row(table: &[RGBA8; 256], src: &[u8], out: &mut [u8]) {
    for (d, &i) in out.chunks_exact_mut(4).zip(src) {
        let c = table[usize::from(i)];
        d.copy_from_slice(&[c.r, c.g, c.b, c.a]);
    }
}
