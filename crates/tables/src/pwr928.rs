//! Powers of two in base 928 for `encode928()` in `composite.c`.
//!
//! Row `j` holds 2^j as seven base-928 digits, most significant first.

/// Number of powers.
pub const ROWS: usize = 69;
/// Base-928 digits per power.
pub const DIGITS: usize = 7;

const BASE: u32 = 928;

/// The table, computed by repeated doubling with carry.
pub fn pwr928() -> [[u32; DIGITS]; ROWS] {
    let mut table = [[0u32; DIGITS]; ROWS];
    let mut cw = [0u32; DIGITS];
    cw[DIGITS - 1] = 1;
    table[0] = cw;
    for row in table.iter_mut().skip(1) {
        let mut carry = 0;
        for digit in cw[1..].iter_mut().rev() {
            let v = 2 * *digit + carry;
            *digit = v % BASE;
            carry = v / BASE;
        }
        cw[0] = 2 * cw[0] + carry;
        *row = cw;
    }
    table
}

/// The `pwr928` array declaration.
pub fn render() -> String {
    let mut out = format!("static const UINT pwr928[{ROWS}][{DIGITS}] = {{\n");
    for row in pwr928() {
        out.push_str("    { ");
        for v in row {
            out.push_str(&format!("{v:3}, "));
        }
        out.push_str("},\n");
    }
    out.push_str("};\n");
    out
}
