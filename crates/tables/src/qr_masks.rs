//! Pre-calculated QR Code and Micro QR mask patterns.
//!
//! Every mask rule repeats with a period dividing 12 rows by 6 columns, so
//! one 12x6 tile per symbology covers the whole symbol. Each cell packs one
//! bit per mask: bit `n` is set where mask `n` inverts the module.

/// Tile height.
pub const ROWS: usize = 12;
/// Tile width.
pub const COLS: usize = 6;

/// Mask bits for `(y, x)` as `(qr, microqr)`.
pub fn mask_bits(y: usize, x: usize) -> (u8, u8) {
    let mut qr = 0u8;
    let mut micro = 0u8;
    // QR 000
    if (y + x) % 2 == 0 {
        qr |= 0x01;
    }
    // QR 001, MicroQR 00
    if y % 2 == 0 {
        qr |= 0x02;
        micro |= 0x01;
    }
    // QR 010
    if x % 3 == 0 {
        qr |= 0x04;
    }
    // QR 011
    if (y + x) % 3 == 0 {
        qr |= 0x08;
    }
    // QR 100, MicroQR 01
    if (y / 2 + x / 3) % 2 == 0 {
        qr |= 0x10;
        micro |= 0x02;
    }
    let prod = y * x;
    // QR 101
    if prod % 2 + prod % 3 == 0 {
        qr |= 0x20;
    }
    // QR 110, MicroQR 10
    if (prod % 2 + prod % 3) % 2 == 0 {
        qr |= 0x40;
        micro |= 0x04;
    }
    // QR 111, MicroQR 11
    if ((y + x) % 2 + prod % 3) % 2 == 0 {
        qr |= 0x80;
        micro |= 0x08;
    }
    (qr, micro)
}

/// Both tiles, `(qr_masks, microqr_masks)`.
pub fn masks() -> ([[u8; COLS]; ROWS], [[u8; COLS]; ROWS]) {
    let mut qr = [[0u8; COLS]; ROWS];
    let mut micro = [[0u8; COLS]; ROWS];
    for y in 0..ROWS {
        for x in 0..COLS {
            (qr[y][x], micro[y][x]) = mask_bits(y, x);
        }
    }
    (qr, micro)
}

fn push_grid(out: &mut String, name: &str, grid: &[[u8; COLS]; ROWS]) {
    out.push_str(&format!("static const unsigned char {name}[{ROWS}][{COLS}] = {{\n"));
    for (y, row) in grid.iter().enumerate() {
        let cells: Vec<String> = row.iter().map(|b| format!("0x{b:02X}")).collect();
        let sep = if y + 1 == ROWS { "" } else { "," };
        out.push_str(&format!("    {{ {} }}{sep}\n", cells.join(", ")));
    }
    out.push_str("};\n");
}

/// Both arrays, ready to paste into `qr.h`.
pub fn render() -> String {
    let (qr, micro) = masks();
    let mut out = String::new();
    push_grid(&mut out, "qr_masks", &qr);
    out.push('\n');
    push_grid(&mut out, "microqr_masks", &micro);
    out
}
