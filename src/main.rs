use anyhow::{bail, Context, Result};
use clap::Parser;
use env_logger::Env;
use guilloche::{
    convert_svg_to_png, demo_scene, generate_svg, preset_names, registry, render_all, Drawing,
    PatternEntry, Placement, SceneConfig,
};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "guilloche")]
#[command(about = "Draw spirograph and guilloche patterns to SVG or PNG", long_about = None)]
struct Args {
    /// Scene JSON file (defaults to the built-in demo composition)
    #[arg(value_name = "FILE")]
    scene: Option<PathBuf>,

    /// Output file path; use .svg for SVG, .png for PNG
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Draw these presets at the origin instead of a scene (repeatable)
    #[arg(short, long, value_name = "NAME")]
    preset: Vec<String>,

    /// Samples per pattern
    #[arg(long)]
    resolution: Option<usize>,

    /// Directory holding SVG assets for path-tracing patterns
    #[arg(long, value_name = "DIR")]
    assets: Option<PathBuf>,

    /// PNG compression quality (0-100)
    #[arg(long, default_value_t = 75)]
    quality: u8,

    /// PNG resolution in dots per inch
    #[arg(long)]
    dpi: Option<u32>,

    /// List the available presets and exit
    #[arg(long)]
    list_presets: bool,

    /// Verbose logging (RUST_LOG overrides)
    #[arg(long)]
    debug: bool,
}

fn load_scene(args: &Args) -> Result<SceneConfig> {
    let mut scene = match &args.scene {
        Some(path) => {
            let json_content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read scene file: {path:?}"))?;
            let mut scene: SceneConfig = serde_json::from_str(&json_content)
                .with_context(|| format!("Failed to parse scene file: {path:?}"))?;
            if scene.assets_dir.is_relative() {
                if let Some(dir) = path.parent() {
                    scene.assets_dir = dir.join(&scene.assets_dir);
                }
            }
            scene
        }
        None => demo_scene(),
    };

    if !args.preset.is_empty() {
        scene.patterns = args
            .preset
            .iter()
            .map(|name| PatternEntry::preset(name, Placement::default()))
            .collect();
    }
    if let Some(resolution) = args.resolution {
        scene.resolution = resolution;
    }
    if let Some(assets) = &args.assets {
        scene.assets_dir = assets.clone();
    }
    Ok(scene)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let env = if args.debug {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("warn")
    };
    env_logger::Builder::from_env(env).init();

    if args.list_presets {
        for name in preset_names() {
            println!("{name}");
        }
        return Ok(());
    }

    let scene = load_scene(&args)?;
    let presets = registry(&scene.assets_dir);

    let mut failed = 0usize;
    let instances: Vec<_> = scene
        .instances(&presets)
        .into_iter()
        .enumerate()
        .filter_map(|(index, instance)| match instance {
            Ok(instance) => Some(instance),
            Err(e) => {
                log::warn!("skipping pattern {index}: {e}");
                failed += 1;
                None
            }
        })
        .collect();

    let mut drawing = Drawing {
        polylines: Vec::with_capacity(instances.len()),
        stroke: scene.stroke.clone(),
    };
    for result in render_all(&instances, scene.resolution) {
        match result {
            Ok(rendered) => drawing.polylines.push(rendered.polyline),
            Err(_) => failed += 1,
        }
    }
    if drawing.polylines.is_empty() {
        bail!("No pattern could be rendered ({failed} failed)");
    }

    let output_path = args.output.clone().unwrap_or_else(|| match &args.scene {
        Some(scene_path) => scene_path.with_extension("svg"),
        None => PathBuf::from("guilloche.svg"),
    });

    let extension = output_path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("svg");

    let svg_content = generate_svg(&drawing).context("Failed to build SVG")?;
    match extension.to_lowercase().as_str() {
        "png" => {
            convert_svg_to_png(&svg_content, &output_path, None, args.quality, args.dpi)
                .with_context(|| format!("Failed to convert to PNG: {output_path:?}"))?;
        }
        _ => {
            fs::write(&output_path, svg_content)
                .with_context(|| format!("Failed to write SVG file: {output_path:?}"))?;
        }
    }

    println!(
        "Drew {} pattern(s) to {}",
        drawing.polylines.len(),
        output_path.display()
    );
    if failed > 0 {
        eprintln!("{failed} pattern(s) skipped, see warnings above");
    }

    Ok(())
}
