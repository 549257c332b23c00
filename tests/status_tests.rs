//! Integration tests for the status handlers

mod common;
use common::*;

use indicator_strip::{
    BLACK, BatteryAnchors, IndicatorPalette, PairingStatus, Srgb, battery_color,
    connectivity_color, layer_color, lerp,
};

#[test]
fn empty_battery_is_first_anchor() {
    let anchors = BatteryAnchors::DEFAULT;
    assert_eq!(battery_color(&anchors, 0), anchors.anchor(0));
}

#[test]
fn full_battery_stays_in_top_decile() {
    let anchors = BatteryAnchors::DEFAULT;
    let full = battery_color(&anchors, 100);
    assert!(colors_equal(full, battery_color(&anchors, 99)));
    assert!(colors_equal(full, lerp(anchors.anchor(9), anchors.anchor(10), 0.9)));
    // Only blue differs between the top two anchors.
    assert!(full.blue > anchors.anchor(9).blue);
    assert!(full.blue < anchors.anchor(10).blue);
}

#[test]
fn battery_interpolates_within_decile() {
    let anchors = BatteryAnchors::DEFAULT;
    let color = battery_color(&anchors, 45);
    assert!(colors_equal(color, lerp(anchors.anchor(4), anchors.anchor(5), 0.5)));
}

#[test]
fn battery_hits_anchor_on_decile_boundaries() {
    let anchors = BatteryAnchors::DEFAULT;
    for decile in 0..10 {
        let color = battery_color(&anchors, decile * 10);
        assert!(colors_equal(color, anchors.anchor(decile as usize)), "decile {}", decile);
    }
}

#[test]
fn battery_out_of_range_saturates() {
    let anchors = BatteryAnchors::DEFAULT;
    assert_eq!(battery_color(&anchors, -5), anchors.anchor(0));
    assert_eq!(battery_color(&anchors, 250), battery_color(&anchors, 99));
}

#[test]
fn battery_is_monotonic_for_monotonic_anchors() {
    let mut table = [BLACK; 11];
    for (i, anchor) in table.iter_mut().enumerate() {
        let v = i as f32 / 10.0;
        *anchor = Srgb::new(v, v * v, 1.0 - v);
    }
    let anchors = BatteryAnchors(table);

    for percent in 1..100 {
        let prev = battery_color(&anchors, percent - 1);
        let next = battery_color(&anchors, percent);
        assert!(next.red >= prev.red, "percent {}", percent);
        assert!(next.green >= prev.green, "percent {}", percent);
        assert!(next.blue <= prev.blue, "percent {}", percent);
    }
}

#[test]
fn connected_profiles_have_distinct_colors() {
    let palette = IndicatorPalette::default();
    for profile in 0..3u8 {
        assert_eq!(
            connectivity_color(&palette, PairingStatus::Connected { profile }),
            palette.profiles[profile as usize]
        );
    }
    assert_ne!(palette.profiles[0], palette.profiles[1]);
    assert_ne!(palette.profiles[1], palette.profiles[2]);
}

#[test]
fn other_profiles_share_fallback() {
    let palette = IndicatorPalette::default();
    for profile in [3u8, 4, 200] {
        assert_eq!(
            connectivity_color(&palette, PairingStatus::Connected { profile }),
            palette.profile_fallback
        );
    }
}

#[test]
fn advertising_and_disconnected_are_fixed() {
    let palette = IndicatorPalette::default();
    assert_eq!(
        connectivity_color(&palette, PairingStatus::Advertising),
        Srgb::new(0.0, 0.0, 1.0)
    );
    assert_eq!(
        connectivity_color(&palette, PairingStatus::Disconnected),
        BLACK
    );
}

#[test]
fn layer_colors_and_fallback() {
    let palette = IndicatorPalette::default();
    for layer in 0..4u8 {
        assert_eq!(layer_color(&palette, layer), palette.layers[layer as usize]);
    }
    assert_eq!(layer_color(&palette, 7), palette.layer_fallback);
    assert_eq!(layer_color(&palette, 255), palette.layer_fallback);
}
