use local_tonemap::config::{load_config, RuntimeConfig};
use local_tonemap::image::io::{load_hdr_image, save_grayscale_f32, save_rgb_f32, write_json_file};
use local_tonemap::{FusionReport, LocalToneMapper, Result};
use log::info;
use std::env;
use std::path::Path;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> std::result::Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path)).map_err(|e| e.to_string())?;
    tonemap_file(&config).map_err(|e| e.to_string())
}

fn tonemap_file(config: &RuntimeConfig) -> Result<()> {
    let hdr = load_hdr_image(&config.input_path)?;
    info!(
        "Loaded {} ({}x{})",
        config.input_path.display(),
        hdr.w,
        hdr.h
    );

    let mut mapper = LocalToneMapper::new(config.params.clone());
    let report = mapper.process_with_diagnostics(&hdr);

    save_rgb_f32(&report.output, &config.output.image_out)?;
    info!(
        "Saved tone-mapped image to {} in {:.2} ms",
        config.output.image_out.display(),
        report.trace.timings.total_ms
    );

    if let Some(json_path) = &config.output.report_json {
        write_json_file(json_path, &report)?;
        info!("Saved report to {}", json_path.display());
    }

    if let Some(dir) = &config.output.debug_dir {
        save_debug_levels(&mapper, &report, dir)?;
        info!("Saved debug levels to {}", dir.display());
    }

    Ok(())
}

/// Write the accumulation levels of the blend walk and the level-0 weight
/// channels as grayscale images.
fn save_debug_levels(mapper: &LocalToneMapper, report: &FusionReport, dir: &Path) -> Result<()> {
    let ws = mapper.workspace();
    if let Some(blend) = &report.trace.blend {
        for level in blend.display_mip..=blend.mip_level {
            let path = dir.join(format!("accumulation_l{level}.png"));
            save_grayscale_f32(&ws.accumulation().levels[level], &path)?;
        }
    }
    if let Some(weights) = ws.weights().levels.first() {
        for (c, name) in ["highlight", "mid", "shadow"].iter().enumerate() {
            save_grayscale_f32(&weights.channel(c), &dir.join(format!("weight_{name}.png")))?;
        }
    }
    Ok(())
}

fn usage() -> String {
    "Usage: local_tonemap <config.json>".to_string()
}
