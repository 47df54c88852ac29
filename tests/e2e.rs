mod common;

use common::synthetic_image::{checkerboard_hdr, exposure_ramp_hdr};
use local_tonemap::image::{ImageRgbF32, ImageView};
use local_tonemap::tonemap::display_color;
use local_tonemap::{FusionParams, LocalToneMapper};

fn tile_contrast(out: &ImageRgbF32) -> f32 {
    (out.get(1, 0)[1] - out.get(0, 0)[1]).abs()
}

fn checkerboard_params(boost: bool) -> FusionParams {
    FusionParams {
        exposure: 1.0,
        weight_sigma: 5.0,
        mip_level: 2,
        display_mip: 0,
        boost_local_contrast: boost,
        ..Default::default()
    }
}

#[test]
fn contrast_boost_increases_local_contrast_on_checkerboard() {
    let _ = env_logger::builder().is_test(true).try_init();
    let image = checkerboard_hdr(4, 4, 1, 0.1, 0.9);

    let plain = LocalToneMapper::new(checkerboard_params(false)).process(&image);
    let boosted = LocalToneMapper::new(checkerboard_params(true)).process(&image);

    let c_plain = tile_contrast(&plain);
    let c_boost = tile_contrast(&boosted);
    assert!(
        c_boost > c_plain,
        "expected boosted contrast {c_boost:.5} to exceed plain contrast {c_plain:.5}"
    );
    assert!(c_plain > 0.0, "checkerboard lost all contrast");
}

#[test]
fn repeated_runs_are_bit_identical() {
    let image = exposure_ramp_hdr(33, 21, 0.02, 10.0);
    let params = FusionParams {
        boost_local_contrast: true,
        mip_level: 4,
        display_mip: 1,
        ..Default::default()
    };
    let a = LocalToneMapper::new(params.clone()).process(&image);
    let mut mapper = LocalToneMapper::new(params);
    let b = mapper.process(&image);
    let c = mapper.process(&image);
    assert_eq!(a, b);
    assert_eq!(b, c);
}

#[test]
fn output_matches_source_resolution_for_every_display_level() {
    let image = exposure_ramp_hdr(29, 18, 0.05, 8.0);
    let mut mapper = LocalToneMapper::new(FusionParams::default());
    for display_mip in 0..=3 {
        mapper.set_params(FusionParams {
            mip_level: 3,
            display_mip,
            ..Default::default()
        });
        let report = mapper.process_with_diagnostics(&image);
        assert_eq!(report.output.dimensions(), image.dimensions());
        let blend = report.trace.blend.expect("blend stage recorded");
        assert_eq!(blend.levels.len(), 3 - display_mip + 1);
        assert!(blend.levels.iter().all(|l| l.level_index >= display_mip));
    }
    assert_eq!(mapper.workspace().allocations(), 1);
}

#[test]
fn disabled_local_mapping_reproduces_global_tonemap() {
    let color = [0.4, 0.25, 0.1];
    let image = ImageRgbF32::filled(24, 16, color);
    let out = LocalToneMapper::new(FusionParams {
        enable_local_tone_mapping: false,
        ..Default::default()
    })
    .process(&image);
    let expected = display_color(color, 1.0);
    for px in &out.data {
        for (a, b) in px.iter().zip(expected) {
            assert!((a - b).abs() < 1e-3, "px={px:?} expected={expected:?}");
        }
    }
}

#[test]
fn local_mapping_lifts_flat_shadows() {
    let color = [0.02; 3];
    let image = ImageRgbF32::filled(16, 16, color);
    let out = LocalToneMapper::new(FusionParams::default()).process(&image);
    let global = display_color(color, 1.0)[1];
    let local = out.get(8, 8)[1];
    assert!(
        local > global,
        "fused shadows {local:.4} should be brighter than global {global:.4}"
    );
}

#[test]
fn report_serializes_to_json() {
    let image = checkerboard_hdr(16, 12, 3, 0.05, 4.0);
    let mut mapper = LocalToneMapper::new(FusionParams::default());
    let report = mapper.process_with_diagnostics(&image);
    let json = serde_json::to_value(&report).expect("report serializes");
    assert_eq!(json["trace"]["input"]["width"], 16);
    assert!(json["trace"]["pyramid"]["levels"].is_array());
    assert!(json.get("output").is_none());
}
