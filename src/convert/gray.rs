pub(super) fn gray_row(src: &[u8], out: &mut [u8]) {
    for (d, &y) in out.chunks_exact_mut(4).zip(src) {
        d.copy_from_slice(&[y, y, y, 0xff]);
    }
}

pub(super) fn gray16_row(src: &[u8], out: &mut [u8]) {
    for (d, s) in out.chunks_exact_mut(4).zip(src.chunks_exact(2)) {
        let y = s[0];
        d.copy_from_slice(&[y, y, y, 0xff]);
    }
}
