use zint_tools_codegen::EmitConfig;
use zint_tools_tables::{iso3166, qr_masks};

/// Pull the `codes[]` bytes of one function back out of the rendered header.
fn codes_after(text: &str, func: &str) -> Vec<u8> {
    let start = text.find(func).expect("function present");
    let body = &text[start..];
    let open = body.find("= {").expect("array start") + 3;
    let close = body.find("};").expect("array end");
    body[open..close]
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| u8::from_str_radix(s.trim_start_matches("0x"), 16).expect("hex byte"))
        .collect()
}

#[test]
fn rendered_iso3166_bitmaps_match_the_lists() {
    let text = iso3166::render(&EmitConfig::default(), "zint-tools iso3166");
    let numeric = codes_after(&text, "iso3166_numeric(int cc)");
    let alpha2 = codes_after(&text, "iso3166_alpha2(const char *cc)");
    assert_eq!(numeric, iso3166::numeric_bitmap());
    assert_eq!(alpha2, iso3166::alpha2_bitmap());

    for &(n, _) in iso3166::NUMERIC {
        assert!(iso3166::is_numeric(&numeric, i32::from(n)), "{n}");
    }
    let assigned = (0..=999).filter(|&n| iso3166::is_numeric(&numeric, n)).count();
    assert_eq!(assigned, iso3166::NUMERIC.len());

    for cc in iso3166::ALPHA2 {
        assert!(iso3166::is_alpha2(&alpha2, cc), "{cc}");
    }
}

#[test]
fn mask_tiles_repeat_with_documented_periods() {
    let (qr, _) = qr_masks::masks();
    // Mask 000 has period 2 in both directions.
    for y in 0..qr_masks::ROWS - 2 {
        for x in 0..qr_masks::COLS - 2 {
            assert_eq!(qr[y][x] & 0x01, qr[y + 2][x + 2] & 0x01);
        }
    }
    // Mask 010 depends on the column only.
    for y in 1..qr_masks::ROWS {
        for x in 0..qr_masks::COLS {
            assert_eq!(qr[y][x] & 0x04, qr[0][x] & 0x04);
        }
    }
}

