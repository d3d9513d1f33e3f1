//! Voronoi mosaic CLI
//!
//! Samples points from an input image, computes the Delaunay triangulation
//! and clipped Voronoi diagram over them, and writes any of: the flat-filled
//! mosaic PNG, edge-overlay PNGs, and VRML scene files.
//!
//! ## YAML job spec
//!
//! ```yaml
//! points: 400
//! seed: 7
//! z_mode: color-intensity
//! show_sites: true
//! exports: [mosaic, delaunay-wrl]
//! ```
//!
//! Run with: `mosaic -i img.jpg --spec job.yaml`
//!
//! ## Inline flags
//!
//! Or select artifacts directly:
//!
//!   mosaic -i img.jpg --points 400 --mosaic --delaunay-png --voronoi-wrl

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;

use mosaic_core::{
    base_image, cell_colors, delaunay_scene, draw_site_markers, parse_point_list,
    render_delaunay_overlay, render_mosaic, render_voronoi_overlay, serialize_point_list,
    voronoi_scene, write_png, Point, Session, ZMode,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ZModeArg {
    /// Every vertex at z = 0
    Flat,
    /// z carries the cell's averaged color intensity
    ColorIntensity,
}

impl From<ZModeArg> for ZMode {
    fn from(arg: ZModeArg) -> ZMode {
        match arg {
            ZModeArg::Flat => ZMode::Flat,
            ZModeArg::ColorIntensity => ZMode::ColorIntensity,
        }
    }
}

/// One exportable artifact, with its fixed output filename
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Artifact {
    Mosaic,
    DelaunayPng,
    VoronoiPng,
    DelaunayWrl,
    VoronoiWrl,
}

impl Artifact {
    const ALL: [Artifact; 5] = [
        Artifact::Mosaic,
        Artifact::DelaunayPng,
        Artifact::VoronoiPng,
        Artifact::DelaunayWrl,
        Artifact::VoronoiWrl,
    ];

    fn filename(self) -> &'static str {
        match self {
            Artifact::Mosaic => "converted_voronoi.png",
            Artifact::DelaunayPng => "delaunay.png",
            Artifact::VoronoiPng => "voronoi.png",
            Artifact::DelaunayWrl => "delaunay.wrl",
            Artifact::VoronoiWrl => "voronoi.wrl",
        }
    }
}

impl FromStr for Artifact {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mosaic" => Ok(Artifact::Mosaic),
            "delaunay-png" => Ok(Artifact::DelaunayPng),
            "voronoi-png" => Ok(Artifact::VoronoiPng),
            "delaunay-wrl" => Ok(Artifact::DelaunayWrl),
            "voronoi-wrl" => Ok(Artifact::VoronoiWrl),
            _ => Err(format!(
                "unknown export '{}' (expected mosaic, delaunay-png, voronoi-png, delaunay-wrl, or voronoi-wrl)",
                s
            )),
        }
    }
}

/// YAML job spec format (CLI flags override spec values)
#[derive(Debug, Deserialize)]
struct JobSpec {
    #[serde(default)]
    points: Option<usize>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    z_mode: Option<String>,
    #[serde(default)]
    show_sites: Option<bool>,
    #[serde(default)]
    exports: Vec<String>,
}

fn load_spec(path: &PathBuf) -> anyhow::Result<JobSpec> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read spec file: {:?}", path))?;
    serde_yaml::from_str(&contents)
        .with_context(|| format!("failed to parse spec file: {:?}", path))
}

/// Point seed document entry: `[{"x": 1, "y": 2}, ...]`
#[derive(Debug, Deserialize)]
struct JsonPoint {
    x: f64,
    y: f64,
}

/// Load points from a `.json` document or an `x,y; x,y` text file.
fn load_points_file(path: &Path) -> anyhow::Result<Vec<Point>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read points file: {:?}", path))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        let raw: Vec<JsonPoint> = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse points JSON: {:?}", path))?;
        Ok(raw.into_iter().map(|p| Point::new(p.x, p.y)).collect())
    } else {
        Ok(parse_point_list(&contents))
    }
}

#[derive(Parser, Debug)]
#[command(name = "mosaic")]
#[command(about = "Render Voronoi mosaics and exports from an image", long_about = None)]
#[command(arg_required_else_help = true)]
struct Args {
    /// Input image path
    #[arg(short, long)]
    input: PathBuf,

    /// Directory artifacts are written into
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Number of points to sample
    #[arg(long, default_value = "100")]
    points: usize,

    /// Random seed for reproducible sampling
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Seed points from a file instead of sampling
    /// (.json: [{"x":..,"y":..},...]; anything else: "x,y; x,y" text)
    #[arg(long)]
    points_file: Option<PathBuf>,

    /// Export the flat-filled mosaic (converted_voronoi.png)
    #[arg(long)]
    mosaic: bool,

    /// Export the Delaunay edge overlay (delaunay.png)
    #[arg(long)]
    delaunay_png: bool,

    /// Export the Voronoi edge overlay (voronoi.png)
    #[arg(long)]
    voronoi_png: bool,

    /// Export the triangulation scene (delaunay.wrl)
    #[arg(long)]
    delaunay_wrl: bool,

    /// Export the cell-polygon scene (voronoi.wrl)
    #[arg(long)]
    voronoi_wrl: bool,

    /// Export every artifact
    #[arg(long)]
    all: bool,

    /// z coordinate written to VRML vertices
    #[arg(long, value_enum, default_value = "flat")]
    z_mode: ZModeArg,

    /// Draw 3x3 site markers on the overlay exports
    #[arg(long)]
    show_sites: bool,

    /// Print the point set in "x,y; x,y" form
    #[arg(long)]
    print_points: bool,

    /// YAML job spec (CLI flags override spec values)
    #[arg(long)]
    spec: Option<PathBuf>,
}

impl Args {
    /// Artifacts selected by CLI flags alone
    fn flag_artifacts(&self) -> Vec<Artifact> {
        if self.all {
            return Artifact::ALL.to_vec();
        }
        let mut artifacts = Vec::new();
        if self.mosaic {
            artifacts.push(Artifact::Mosaic);
        }
        if self.delaunay_png {
            artifacts.push(Artifact::DelaunayPng);
        }
        if self.voronoi_png {
            artifacts.push(Artifact::VoronoiPng);
        }
        if self.delaunay_wrl {
            artifacts.push(Artifact::DelaunayWrl);
        }
        if self.voronoi_wrl {
            artifacts.push(Artifact::VoronoiWrl);
        }
        artifacts
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load the job spec early (if provided); CLI flags override its values
    let spec = args.spec.as_ref().map(load_spec).transpose()?;

    let (num_points, seed, z_mode, show_sites, artifacts) = if let Some(ref spec) = spec {
        let num_points = if args.points != 100 {
            args.points
        } else {
            spec.points.unwrap_or(args.points)
        };
        let seed = if args.seed != 0 {
            args.seed
        } else {
            spec.seed.unwrap_or(args.seed)
        };
        let z_mode: ZMode = match spec.z_mode.as_deref() {
            Some("flat") => ZMode::Flat,
            Some("color-intensity") => ZMode::ColorIntensity,
            Some(other) => anyhow::bail!(
                "unknown z_mode '{}' in spec (expected flat or color-intensity)",
                other
            ),
            None => args.z_mode.into(),
        };
        let show = args.show_sites || spec.show_sites.unwrap_or(false);

        let mut artifacts = args.flag_artifacts();
        if artifacts.is_empty() {
            for name in &spec.exports {
                let artifact = name
                    .parse::<Artifact>()
                    .map_err(|e| anyhow::anyhow!("{} (in spec exports)", e))?;
                if !artifacts.contains(&artifact) {
                    artifacts.push(artifact);
                }
            }
        }
        (num_points, seed, z_mode, show, artifacts)
    } else {
        (
            args.points,
            args.seed,
            args.z_mode.into(),
            args.show_sites,
            args.flag_artifacts(),
        )
    };

    if artifacts.is_empty() {
        anyhow::bail!(
            "no exports selected (use --mosaic, --delaunay-png, --voronoi-png, \
             --delaunay-wrl, --voronoi-wrl, --all, or an exports list in --spec)"
        );
    }

    // Load input image
    println!("Loading image: {:?}", args.input);
    let mut session = Session::load(&args.input)
        .with_context(|| format!("failed to load image: {:?}", args.input))?;
    let (width, height) = session.pixels().dimensions();
    println!("Image size: {}x{}", width, height);

    // Seed points from a file, or sample randomly
    if let Some(ref path) = args.points_file {
        let points = load_points_file(path)?;
        println!("Loaded {} points from {:?}", points.len(), path);
        session.set_points(points);
    } else {
        session
            .sample(num_points, seed)
            .context("failed to sample points")?;
        println!("Sampled {} points (seed: {})", num_points, seed);
    }

    if args.print_points {
        println!("{}", serialize_point_list(session.points()));
    }

    session
        .recompute()
        .context("failed to compute subdivision")?;
    let subdivision = session
        .subdivision()
        .context("subdivision missing after recompute")?;
    println!(
        "Subdivision: {} triangles, {} cells",
        subdivision.num_triangles(),
        subdivision.cells.len()
    );

    // Averaged colors feed the mosaic fill and the intensity z mode
    let colors = cell_colors(subdivision, session.pixels());

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create output directory: {:?}", args.out_dir))?;

    let progress = ProgressBar::new(artifacts.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    for &artifact in &artifacts {
        progress.set_message(artifact.filename());
        let path = args.out_dir.join(artifact.filename());

        match artifact {
            Artifact::Mosaic => {
                let mut target = base_image(session.pixels());
                render_mosaic(subdivision, &colors, &mut target);
                write_png(&target, &path)
                    .with_context(|| format!("failed to write {:?}", path))?;
            }
            Artifact::DelaunayPng => {
                let mut target =
                    render_delaunay_overlay(subdivision, session.points(), session.pixels());
                if show_sites {
                    draw_site_markers(&mut target, session.points());
                }
                write_png(&target, &path)
                    .with_context(|| format!("failed to write {:?}", path))?;
            }
            Artifact::VoronoiPng => {
                let mut target = render_voronoi_overlay(subdivision, session.pixels());
                if show_sites {
                    draw_site_markers(&mut target, session.points());
                }
                write_png(&target, &path)
                    .with_context(|| format!("failed to write {:?}", path))?;
            }
            Artifact::DelaunayWrl => {
                let scene =
                    delaunay_scene(session.points(), &subdivision.triangles, &colors, z_mode);
                fs::write(&path, scene)
                    .with_context(|| format!("failed to write {:?}", path))?;
            }
            Artifact::VoronoiWrl => {
                let scene = voronoi_scene(&subdivision.cells, &colors, z_mode);
                fs::write(&path, scene)
                    .with_context(|| format!("failed to write {:?}", path))?;
            }
        }
        progress.inc(1);
    }
    progress.finish_with_message("done");

    println!(
        "Wrote {} artifact{} to {:?}",
        artifacts.len(),
        if artifacts.len() == 1 { "" } else { "s" },
        args.out_dir
    );
    Ok(())
}
