// Test serialization of configuration using json
#![cfg(feature = "serde")]

use kas_font_atlas::{Config, RasterMode};
use serde::{de::Deserialize, ser::Serialize};
use std::cmp::PartialEq;
use std::fmt::Debug;

fn test<X: Debug + PartialEq + Serialize + for<'a> Deserialize<'a>>(x: X, t: &str) {
    match serde_json::to_string(&x) {
        Ok(text) => assert_eq!(text, t),
        Err(err) => panic!("Ser of '{x:?}' failed: {err}"),
    }

    match serde_json::from_str::<X>(t) {
        Ok(v) => assert_eq!(v, x),
        Err(err) => panic!("Deser of '{t}' failed: {err}"),
    }
}

#[test]
fn raster_mode() {
    test(RasterMode::Auto, "\"Auto\"");
    test(RasterMode::Fontdue, "\"Fontdue\"");
}

#[test]
fn config() {
    let config = Config {
        dpp: 1.5,
        mode: RasterMode::AbGlyph,
        ..Config::default()
    };
    test(
        config,
        "{\"chars\":{\"start\":32,\"end\":128},\"max_row_width\":4096,\"staging_size\":1024,\
         \"dpp\":1.5,\"mode\":\"AbGlyph\",\"large_text_threshold\":60.0}",
    );
}
