//! Tone-mapping pipeline driving the five stages end-to-end.
//!
//! The [`LocalToneMapper`] exposes a simple API: feed a linear HDR image and
//! get a display-referred image of the same size. Internally it synthesizes
//! the exposure bracket, computes weights, builds both pyramids, blends from
//! `mip_level` down to `display_mip` and guided-upsamples the result.
//!
//! Typical usage:
//! ```no_run
//! use local_tonemap::{FusionParams, LocalToneMapper};
//! use local_tonemap::image::ImageRgbF32;
//!
//! # fn example(hdr: ImageRgbF32) {
//! let mut mapper = LocalToneMapper::new(FusionParams::default());
//! let report = mapper.process_with_diagnostics(&hdr);
//! println!("total: {:.2} ms", report.trace.timings.total_ms);
//! # }
//! ```
use super::params::FusionParams;
use super::workspace::FusionWorkspace;
use crate::blend::blend_pyramid;
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{
    BlendStage, FusionReport, FusionTrace, InputDescriptor, PyramidStage, TimingBreakdown,
};
use crate::exposure::synthesize_exposures;
use crate::image::{ImageRgbF32, ImageView};
use crate::upsample::guided_upsample;
use crate::weights::compute_weights;
use log::{debug, warn};
use std::time::Instant;

/// Local tone mapper orchestrating exposure synthesis, weighting, pyramid
/// blending and guided upsampling.
pub struct LocalToneMapper {
    params: FusionParams,
    workspace: FusionWorkspace,
}

impl LocalToneMapper {
    /// Create a tone mapper with the supplied parameters.
    pub fn new(params: FusionParams) -> Self {
        Self {
            params,
            workspace: FusionWorkspace::new(),
        }
    }

    pub fn params(&self) -> &FusionParams {
        &self.params
    }

    /// Replace the parameters. Level buffers are kept.
    pub fn set_params(&mut self, params: FusionParams) {
        self.params = params;
    }

    /// Intermediate buffers of the last run.
    pub fn workspace(&self) -> &FusionWorkspace {
        &self.workspace
    }

    /// Tone map `source`, returning only the output image.
    pub fn process(&mut self, source: &ImageRgbF32) -> ImageRgbF32 {
        self.process_with_diagnostics(source).output
    }

    /// Tone map `source` and return the output with a detailed trace.
    pub fn process_with_diagnostics(&mut self, source: &ImageRgbF32) -> FusionReport {
        let (width, height) = source.dimensions();
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();

        if width == 0 || height == 0 {
            warn!("LocalToneMapper::process called with empty {width}x{height} image");
            return FusionReport {
                output: ImageRgbF32::new(width, height),
                trace: FusionTrace {
                    input: InputDescriptor {
                        width,
                        height,
                        pyramid_levels: 0,
                    },
                    params: self.params.clone(),
                    timings,
                    pyramid: None,
                    blend: None,
                    workspace_allocations: self.workspace.allocations(),
                },
            };
        }

        let ws = &mut self.workspace;
        timings.measure("allocate", || ws.ensure(width, height));
        let params = self.params.sanitized(ws.levels());
        debug!(
            "LocalToneMapper::process start w={} h={} levels={} mip={} display={}",
            width,
            height,
            ws.levels(),
            params.mip_level,
            params.display_mip
        );

        let gains = params.exposure_gains();
        timings.measure("exposures", || {
            synthesize_exposures(source, gains, &mut ws.exposures.levels[0])
        });
        timings.measure("weights", || {
            compute_weights(
                &ws.exposures.levels[0],
                params.weight_sigma,
                &mut ws.weights.levels[0],
            )
        });

        let pyr_start = Instant::now();
        ws.exposures.rebuild();
        ws.weights.rebuild();
        let pyr_ms = elapsed_ms(pyr_start);
        timings.push("pyramid", pyr_ms);
        let pyramid_stage = PyramidStage::from_pyramids(&ws.exposures, &ws.weights, pyr_ms);

        let settings = params.blend_settings();
        let blend_levels = timings.measure("blend", || {
            blend_pyramid(
                &ws.exposures,
                &ws.weights,
                settings,
                &mut ws.accumulation,
                &mut ws.coarse_up,
            )
        });

        let display = params.display_mip;
        let mut output = ImageRgbF32::new(width, height);
        timings.measure("upsample", || {
            guided_upsample(
                source,
                &ws.exposures.levels[display],
                &ws.accumulation.levels[display],
                params.exposure,
                &mut output,
            )
        });

        timings.total_ms = elapsed_ms(total_start);
        for stage in &timings.stages {
            debug!("  {:<10} {:8.3} ms", stage.label, stage.elapsed_ms);
        }
        debug!("LocalToneMapper::process done in {:.3} ms", timings.total_ms);

        FusionReport {
            output,
            trace: FusionTrace {
                input: InputDescriptor {
                    width,
                    height,
                    pyramid_levels: ws.levels(),
                },
                timings,
                pyramid: Some(pyramid_stage),
                blend: Some(BlendStage {
                    mip_level: params.mip_level,
                    display_mip: params.display_mip,
                    boost_local_contrast: params.boost_local_contrast,
                    levels: blend_levels,
                }),
                params,
                workspace_allocations: ws.allocations(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exposure::{HIGHLIGHT, MID, SHADOW};

    fn ramp(w: usize, h: usize) -> ImageRgbF32 {
        let mut img = ImageRgbF32::new(w, h);
        for y in 0..h {
            for x in 0..w {
                let v = 0.02 * ((x + 1) as f32).powf(1.5) + 0.1 * y as f32;
                img.set(x, y, [v, v * 0.8, v * 0.6]);
            }
        }
        img
    }

    #[test]
    fn uniform_gray_without_local_mapping_gets_equal_weights() {
        let src = ImageRgbF32::filled(8, 8, [0.5; 3]);
        let mut mapper = LocalToneMapper::new(FusionParams {
            enable_local_tone_mapping: false,
            ..Default::default()
        });
        mapper.process(&src);
        for w in &mapper.workspace().weights().levels[0].data {
            for v in w {
                assert!((v - 1.0 / 3.0).abs() < 1e-4, "w={w:?}");
            }
        }
        let e = mapper.workspace().exposures().levels[0].get(3, 3);
        assert_eq!(e[HIGHLIGHT], e[MID]);
        assert_eq!(e[MID], e[SHADOW]);
    }

    #[test]
    fn repeated_runs_are_identical_and_reuse_buffers() {
        let src = ramp(24, 17);
        let mut mapper = LocalToneMapper::new(FusionParams {
            boost_local_contrast: true,
            ..Default::default()
        });
        let first = mapper.process(&src);
        let second = mapper.process(&src);
        assert_eq!(first, second);
        assert_eq!(mapper.workspace().allocations(), 1);

        mapper.set_params(FusionParams {
            exposure: 2.0,
            ..Default::default()
        });
        mapper.process(&src);
        assert_eq!(mapper.workspace().allocations(), 1);

        mapper.process(&ramp(12, 9));
        assert_eq!(mapper.workspace().allocations(), 2);
    }

    #[test]
    fn report_reflects_clamped_levels() {
        let src = ramp(16, 16);
        let mut mapper = LocalToneMapper::new(FusionParams {
            mip_level: 40,
            display_mip: 50,
            ..Default::default()
        });
        let report = mapper.process_with_diagnostics(&src);
        let trace = &report.trace;
        assert_eq!(trace.input.pyramid_levels, 5);
        assert_eq!(trace.params.mip_level, 4);
        assert_eq!(trace.params.display_mip, 4);
        let blend = trace.blend.as_ref().unwrap();
        assert_eq!(blend.levels.len(), 1);
        assert!(!blend.levels[0].refined);
        assert_eq!(report.output.dimensions(), (16, 16));
    }

    #[test]
    fn output_is_display_referred() {
        let src = ramp(20, 10);
        let mut mapper = LocalToneMapper::new(FusionParams::default());
        let out = mapper.process(&src);
        for px in &out.data {
            assert!(px.iter().all(|v| (0.0..=1.0).contains(v)), "px={px:?}");
        }
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let mut mapper = LocalToneMapper::new(FusionParams::default());
        let report = mapper.process_with_diagnostics(&ImageRgbF32::new(0, 5));
        assert_eq!(report.output.dimensions(), (0, 5));
        assert!(report.trace.pyramid.is_none());
    }
}
