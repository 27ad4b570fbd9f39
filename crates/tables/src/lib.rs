//! Generators for zint's small fixed tables.
//!
//! None of these read input: the data is either a literal list
//! ([`iso3166`]) or computed from a closed-form rule ([`qr_masks`],
//! [`pwr928`]). Each module exposes the computed table for inspection and a
//! `render` function producing the C text.

pub mod iso3166;
pub mod pwr928;
pub mod qr_masks;
