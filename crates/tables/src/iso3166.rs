//! ISO 3166-1 country code bitmaps and the `iso3166.h` lookup functions.

use zint_tools_codegen::{EmitConfig, libzint_copyright};

/// Assigned ISO 3166-1 numeric codes, ascending, with their alpha-3 code.
pub const NUMERIC: &[(u16, &str)] = &[
    (4, "AFG"), (8, "ALB"), (10, "ATA"), (12, "DZA"), (16, "ASM"), (20, "AND"), (24, "AGO"), (28, "ATG"),
    (31, "AZE"), (32, "ARG"), (36, "AUS"), (40, "AUT"), (44, "BHS"), (48, "BHR"), (50, "BGD"), (51, "ARM"),
    (52, "BRB"), (56, "BEL"), (60, "BMU"), (64, "BTN"), (68, "BOL"), (70, "BIH"), (72, "BWA"), (74, "BVT"),
    (76, "BRA"), (84, "BLZ"), (86, "IOT"), (90, "SLB"), (92, "VGB"), (96, "BRN"), (100, "BGR"), (104, "MMR"),
    (108, "BDI"), (112, "BLR"), (116, "KHM"), (120, "CMR"), (124, "CAN"), (132, "CPV"), (136, "CYM"), (140, "CAF"),
    (144, "LKA"), (148, "TCD"), (152, "CHL"), (156, "CHN"), (158, "TWN"), (162, "CXR"), (166, "CCK"), (170, "COL"),
    (174, "COM"), (175, "MYT"), (178, "COG"), (180, "COD"), (184, "COK"), (188, "CRI"), (191, "HRV"), (192, "CUB"),
    (196, "CYP"), (203, "CZE"), (204, "BEN"), (208, "DNK"), (212, "DMA"), (214, "DOM"), (218, "ECU"), (222, "SLV"),
    (226, "GNQ"), (231, "ETH"), (232, "ERI"), (233, "EST"), (234, "FRO"), (238, "FLK"), (239, "SGS"), (242, "FJI"),
    (246, "FIN"), (248, "ALA"), (250, "FRA"), (254, "GUF"), (258, "PYF"), (260, "ATF"), (262, "DJI"), (266, "GAB"),
    (268, "GEO"), (270, "GMB"), (275, "PSE"), (276, "DEU"), (288, "GHA"), (292, "GIB"), (296, "KIR"), (300, "GRC"),
    (304, "GRL"), (308, "GRD"), (312, "GLP"), (316, "GUM"), (320, "GTM"), (324, "GIN"), (328, "GUY"), (332, "HTI"),
    (334, "HMD"), (336, "VAT"), (340, "HND"), (344, "HKG"), (348, "HUN"), (352, "ISL"), (356, "IND"), (360, "IDN"),
    (364, "IRN"), (368, "IRQ"), (372, "IRL"), (376, "ISR"), (380, "ITA"), (384, "CIV"), (388, "JAM"), (392, "JPN"),
    (398, "KAZ"), (400, "JOR"), (404, "KEN"), (408, "PRK"), (410, "KOR"), (414, "KWT"), (417, "KGZ"), (418, "LAO"),
    (422, "LBN"), (426, "LSO"), (428, "LVA"), (430, "LBR"), (434, "LBY"), (438, "LIE"), (440, "LTU"), (442, "LUX"),
    (446, "MAC"), (450, "MDG"), (454, "MWI"), (458, "MYS"), (462, "MDV"), (466, "MLI"), (470, "MLT"), (474, "MTQ"),
    (478, "MRT"), (480, "MUS"), (484, "MEX"), (492, "MCO"), (496, "MNG"), (498, "MDA"), (499, "MNE"), (500, "MSR"),
    (504, "MAR"), (508, "MOZ"), (512, "OMN"), (516, "NAM"), (520, "NRU"), (524, "NPL"), (528, "NLD"), (531, "CUW"),
    (533, "ABW"), (534, "SXM"), (535, "BES"), (540, "NCL"), (548, "VUT"), (554, "NZL"), (558, "NIC"), (562, "NER"),
    (566, "NGA"), (570, "NIU"), (574, "NFK"), (578, "NOR"), (580, "MNP"), (581, "UMI"), (583, "FSM"), (584, "MHL"),
    (585, "PLW"), (586, "PAK"), (591, "PAN"), (598, "PNG"), (600, "PRY"), (604, "PER"), (608, "PHL"), (612, "PCN"),
    (616, "POL"), (620, "PRT"), (624, "GNB"), (626, "TLS"), (630, "PRI"), (634, "QAT"), (638, "REU"), (642, "ROU"),
    (643, "RUS"), (646, "RWA"), (652, "BLM"), (654, "SHN"), (659, "KNA"), (660, "AIA"), (662, "LCA"), (663, "MAF"),
    (666, "SPM"), (670, "VCT"), (674, "SMR"), (678, "STP"), (682, "SAU"), (686, "SEN"), (688, "SRB"), (690, "SYC"),
    (694, "SLE"), (702, "SGP"), (703, "SVK"), (704, "VNM"), (705, "SVN"), (706, "SOM"), (710, "ZAF"), (716, "ZWE"),
    (724, "ESP"), (728, "SSD"), (729, "SDN"), (732, "ESH"), (740, "SUR"), (744, "SJM"), (748, "SWZ"), (752, "SWE"),
    (756, "CHE"), (760, "SYR"), (762, "TJK"), (764, "THA"), (768, "TGO"), (772, "TKL"), (776, "TON"), (780, "TTO"),
    (784, "ARE"), (788, "TUN"), (792, "TUR"), (795, "TKM"), (796, "TCA"), (798, "TUV"), (800, "UGA"), (804, "UKR"),
    (807, "MKD"), (818, "EGY"), (826, "GBR"), (831, "GGY"), (832, "JEY"), (833, "IMN"), (834, "TZA"), (840, "USA"),
    (850, "VIR"), (854, "BFA"), (858, "URY"), (860, "UZB"), (862, "VEN"), (876, "WLF"), (882, "WSM"), (887, "YEM"),
    (894, "ZMB"),
];

/// Assigned ISO 3166-1 alpha-2 codes, ascending.
pub const ALPHA2: &[&str] = &[
    "AD", "AE", "AF", "AG", "AI", "AL", "AM", "AO", "AQ", "AR", "AS", "AT", "AU",
    "AW", "AX", "AZ", "BA", "BB", "BD", "BE", "BF", "BG", "BH", "BI", "BJ", "BL",
    "BM", "BN", "BO", "BQ", "BR", "BS", "BT", "BV", "BW", "BY", "BZ", "CA", "CC",
    "CD", "CF", "CG", "CH", "CI", "CK", "CL", "CM", "CN", "CO", "CR", "CU", "CV",
    "CW", "CX", "CY", "CZ", "DE", "DJ", "DK", "DM", "DO", "DZ", "EC", "EE", "EG",
    "EH", "ER", "ES", "ET", "FI", "FJ", "FK", "FM", "FO", "FR", "GA", "GB", "GD",
    "GE", "GF", "GG", "GH", "GI", "GL", "GM", "GN", "GP", "GQ", "GR", "GS", "GT",
    "GU", "GW", "GY", "HK", "HM", "HN", "HR", "HT", "HU", "ID", "IE", "IL", "IM",
    "IN", "IO", "IQ", "IR", "IS", "IT", "JE", "JM", "JO", "JP", "KE", "KG", "KH",
    "KI", "KM", "KN", "KP", "KR", "KW", "KY", "KZ", "LA", "LB", "LC", "LI", "LK",
    "LR", "LS", "LT", "LU", "LV", "LY", "MA", "MC", "MD", "ME", "MF", "MG", "MH",
    "MK", "ML", "MM", "MN", "MO", "MP", "MQ", "MR", "MS", "MT", "MU", "MV", "MW",
    "MX", "MY", "MZ", "NA", "NC", "NE", "NF", "NG", "NI", "NL", "NO", "NP", "NR",
    "NU", "NZ", "OM", "PA", "PE", "PF", "PG", "PH", "PK", "PL", "PM", "PN", "PR",
    "PS", "PT", "PW", "PY", "QA", "RE", "RO", "RS", "RU", "RW", "SA", "SB", "SC",
    "SD", "SE", "SG", "SH", "SI", "SJ", "SK", "SL", "SM", "SN", "SO", "SR", "SS",
    "ST", "SV", "SX", "SY", "SZ", "TC", "TD", "TF", "TG", "TH", "TJ", "TK", "TL",
    "TM", "TN", "TO", "TR", "TT", "TV", "TW", "TZ", "UA", "UG", "UM", "US", "UY",
    "UZ", "VA", "VC", "VE", "VG", "VI", "VN", "VU", "WF", "WS", "YE", "YT", "ZA",
    "ZM", "ZW",
];

/// Bit `n` set iff numeric code `n` is assigned. Sized to the largest code.
pub fn numeric_bitmap() -> Vec<u8> {
    let max = NUMERIC.iter().map(|&(n, _)| usize::from(n)).max().unwrap_or(0);
    let mut bits = vec![0u8; (max >> 3) + 1];
    for &(n, _) in NUMERIC {
        let n = usize::from(n);
        bits[n >> 3] |= 1 << (n & 0x7);
    }
    bits
}

fn alpha2_index(cc: &str) -> Option<usize> {
    match cc.as_bytes() {
        [a @ b'A'..=b'Z', b @ b'A'..=b'Z'] => Some(usize::from(a - b'A') * 26 + usize::from(b - b'A')),
        _ => None,
    }
}

/// 26 x 26 bits keyed by `(first - 'A') * 26 + (second - 'A')`.
pub fn alpha2_bitmap() -> Vec<u8> {
    let mut bits = vec![0u8; (26 * 26usize).div_ceil(8)];
    for ij in ALPHA2.iter().filter_map(|cc| alpha2_index(cc)) {
        bits[ij >> 3] |= 1 << (ij & 0x7);
    }
    bits
}

/// The test `iso3166_numeric()` performs, against a computed bitmap.
pub fn is_numeric(bitmap: &[u8], cc: i32) -> bool {
    let Ok(cc) = usize::try_from(cc) else {
        return false;
    };
    bitmap.get(cc >> 3).is_some_and(|b| b & (1 << (cc & 0x7)) != 0)
}

/// The test `iso3166_alpha2()` performs, against a computed bitmap.
pub fn is_alpha2(bitmap: &[u8], cc: &str) -> bool {
    alpha2_index(cc).is_some_and(|ij| bitmap.get(ij >> 3).is_some_and(|b| b & (1 << (ij & 0x7)) != 0))
}

fn push_codes(out: &mut String, codes: &[u8], tab: &str) {
    for (i, b) in codes.iter().enumerate() {
        if i % 8 == 0 {
            out.push_str(&format!("\n{tab}{tab}"));
        } else {
            out.push(' ');
        }
        out.push_str(&format!("0x{b:02X},"));
    }
}

/// Render `iso3166.h`.
pub fn render(config: &EmitConfig, generator: &str) -> String {
    let tab = &config.tab;
    let numeric = numeric_bitmap();
    let alpha2 = alpha2_bitmap();
    log::debug!("iso3166: {} numeric bytes, {} alpha2 bytes", numeric.len(), alpha2.len());

    let mut out = format!("/*\n * ISO 3166 country codes generated by \"{generator}\"\n */\n");
    if config.copyright {
        out.push_str(&libzint_copyright("2021"));
        out.push('\n');
    }
    if config.guard {
        out.push_str("#ifndef ISO3166_H\n#define ISO3166_H\n");
    }

    out.push_str(&format!(
        "\n/* Whether ISO 3166-1 numeric */\nstatic int iso3166_numeric(int cc) {{\n{tab}static const unsigned char codes[{}] = {{",
        numeric.len()
    ));
    push_codes(&mut out, &numeric, tab);
    out.push_str(&format!(
        "\n{tab}}};\n{tab}int b = cc >> 3;\n\n{tab}if (b < 0 || b >= {}) {{\n{tab}{tab}return 0;\n{tab}}}\n\
         {tab}return codes[b] & (1 << (cc & 0x7)) ? 1 : 0;\n}}\n\n",
        numeric.len()
    ));

    out.push_str(&format!(
        "/* Whether ISO 3166-1 alpha2 */\nstatic int iso3166_alpha2(const char *cc) {{\n{tab}static const unsigned char codes[{}] = {{",
        alpha2.len()
    ));
    push_codes(&mut out, &alpha2, tab);
    out.push_str(&format!(
        "\n{tab}}};\n{tab}int cc_int;\n\n\
         {tab}if (cc[0] < 'A' || cc[0] > 'Z' || cc[1] < 'A' || cc[1] > 'Z') {{\n{tab}{tab}return 0;\n{tab}}}\n\
         {tab}cc_int = (cc[0] - 'A') * 26 + (cc[1] - 'A');\n\n\
         {tab}return codes[cc_int >> 3] & (1 << (cc_int & 0x7)) ? 1 : 0;\n}}\n"
    ));

    if config.guard {
        out.push_str("\n#endif /* ISO3166_H */\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitmap_sizes() {
        assert_eq!(numeric_bitmap().len(), 112);
        assert_eq!(alpha2_bitmap().len(), 85);
        assert_eq!(NUMERIC.len(), 249);
        assert_eq!(ALPHA2.len(), 249);
    }

    #[test]
    fn lists_are_sorted() {
        assert!(NUMERIC.windows(2).all(|w| w[0].0 < w[1].0));
        assert!(ALPHA2.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn first_bytes() {
        // 4 (AFG) is bit 4 of byte 0; 8, 10, 12 fill byte 1.
        assert_eq!(&numeric_bitmap()[..4], &[0x10, 0x15, 0x11, 0x91]);
        assert_eq!(&alpha2_bitmap()[..4], &[0x78, 0x59, 0xDF, 0xEE]);
        assert_eq!(alpha2_bitmap()[84], 0x01);
    }

    #[test]
    fn lookups() {
        let numeric = numeric_bitmap();
        assert!(is_numeric(&numeric, 826));
        assert!(is_numeric(&numeric, 894));
        assert!(!is_numeric(&numeric, 0));
        assert!(!is_numeric(&numeric, 895));
        assert!(!is_numeric(&numeric, 999));
        assert!(!is_numeric(&numeric, -1));

        let alpha2 = alpha2_bitmap();
        assert!(is_alpha2(&alpha2, "GB"));
        assert!(is_alpha2(&alpha2, "ZW"));
        assert!(!is_alpha2(&alpha2, "UK"));
        assert!(!is_alpha2(&alpha2, "gb"));
        assert!(!is_alpha2(&alpha2, "G"));
    }

    #[test]
    fn header_layout() {
        let text = render(&EmitConfig::default(), "gen");
        assert!(text.starts_with("/*\n * ISO 3166 country codes generated by \"gen\"\n */\n/*\n    libzint"));
        assert!(text.contains(
            " */\n\n#ifndef ISO3166_H\n#define ISO3166_H\n\n/* Whether ISO 3166-1 numeric */\nstatic int iso3166_numeric(int cc) {\n    static const unsigned char codes[112] = {\n        0x10, 0x15, 0x11, 0x91,"
        ));
        assert!(text.contains("    if (b < 0 || b >= 112) {\n        return 0;\n    }\n"));
        assert!(text.contains("    static const unsigned char codes[85] = {\n        0x78, 0x59,"));
        assert!(text.contains(" 0x40,\n    };\n    int b = cc >> 3;\n"));
        assert!(text.ends_with("? 1 : 0;\n}\n\n#endif /* ISO3166_H */\n"));
    }

    #[test]
    fn header_without_banner_or_guard() {
        let config = EmitConfig {
            copyright: false,
            guard: false,
            tab: "\t".to_string(),
        };
        let text = render(&config, "gen");
        assert!(text.starts_with("/*\n * ISO 3166 country codes generated by \"gen\"\n */\n\n/* Whether ISO 3166-1 numeric */\n"));
        assert!(text.contains("\tstatic const unsigned char codes[112] = {\n\t\t0x10,"));
        assert!(!text.contains("#ifndef"));
        assert!(text.ends_with("? 1 : 0;\n}\n"));
    }
}
