use anyhow::Context;
use clap::{Parser, Subcommand};
use glam::Vec3;
use showcase_hud::{CompassLabel, CompassReporter, CompassSampler, HudOverlay};
use showcase_input::InputEvent;
use showcase_kernel::{MoveOutcome, SceneGraph, Showcase, ShowcaseConfig, ZoneEvent};
use showcase_render::{DebugTextRenderer, Frame, Renderer};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "showcase-cli", about = "Headless driver for the showcase scene")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON configuration file; defaults apply when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions
    Info,
    /// Print the effective configuration as JSON
    Config,
    /// Run the scene for a number of ticks with scripted input
    Run {
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "120")]
        ticks: u64,
        /// Simulated frame rate
        #[arg(short, long, default_value = "60")]
        fps: f32,
        /// Keys held for the whole run, e.g. --hold w --hold d
        #[arg(long)]
        hold: Vec<String>,
        /// Hold the trigger for the whole run
        #[arg(long)]
        fire: bool,
        /// Pointer-lock mouse movement per tick as "dx,dy"
        #[arg(long, value_parser = parse_pair, allow_hyphen_values = true)]
        orbit_mouse: Option<(f32, f32)>,
    },
    /// Print the compass label for a facing vector
    Compass {
        #[arg(long, allow_hyphen_values = true)]
        x: f32,
        #[arg(long, allow_hyphen_values = true)]
        z: f32,
    },
}

fn parse_pair(s: &str) -> Result<(f32, f32), String> {
    let (a, b) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"dx,dy\", got {s:?}"))?;
    let dx = a.trim().parse::<f32>().map_err(|e| format!("dx: {e}"))?;
    let dy = b.trim().parse::<f32>().map_err(|e| format!("dy: {e}"))?;
    Ok((dx, dy))
}

struct RunScript {
    ticks: u64,
    fps: f32,
    hold: Vec<String>,
    fire: bool,
    orbit_mouse: Option<(f32, f32)>,
}

/// What a run reported on the compass timer.
#[derive(Debug, Default)]
struct RunSummary {
    reports: u64,
    last_label: Option<CompassLabel>,
}

fn run(config: ShowcaseConfig, script: RunScript) -> anyhow::Result<RunSummary> {
    anyhow::ensure!(
        script.fps.is_finite() && script.fps > 0.0,
        "fps must be positive, got {}",
        script.fps
    );
    let dt = 1.0 / script.fps;
    let frame_time = Duration::from_secs_f32(dt);

    let mut scene = SceneGraph::new();
    let mut sampler = CompassSampler::new(Duration::from_millis(config.compass_interval_ms));
    let mut hud = HudOverlay::new();
    let renderer = DebugTextRenderer::new();

    let mut show = Showcase::new(config);
    show.mount(&mut scene);
    show.bind_avatar(&mut scene);

    let input = show.input_sender();
    for key in &script.hold {
        input.send(InputEvent::KeyDown(key.clone()));
    }
    if script.fire {
        input.send(InputEvent::MouseDown);
    }
    if script.orbit_mouse.is_some() {
        input.send(InputEvent::PointerLockChanged(true));
    }

    println!(
        "Running {} ticks at {} fps (dt={:.4}s)",
        script.ticks, script.fps, dt
    );

    let mut summary = RunSummary::default();
    let mut zone_log: Vec<ZoneEvent> = Vec::new();
    let mut blocked = 0u64;
    for _ in 0..script.ticks {
        if let Some((dx, dy)) = script.orbit_mouse {
            input.send(InputEvent::PointerMove { dx, dy });
        }

        let report = show.tick(dt, &mut scene);
        if let Some(cam) = report.camera {
            scene.set_camera(cam);
        }
        if matches!(report.movement, MoveOutcome::Blocked { .. }) {
            blocked += 1;
        }
        zone_log.extend(report.zone_events);
        scene.present();
        scene.drain_events();

        // Frame and compass are reported on the compass timer, not every tick.
        if let Some(label) = sampler.poll(frame_time, show.pose_snapshot().forward()) {
            if hud.push_compass(label) {
                tracing::debug!(tick = report.tick, %label, "compass changed");
            }
            print!("{}", renderer.render(Frame { scene: &scene, hud: &hud }));
            println!("Compass: {label}");
            summary.reports += 1;
            summary.last_label = Some(label);
        }
    }

    let pose = show.pose_snapshot();
    let (p, t) = (pose.position, pose.target);
    println!(
        "Avatar: pos=({:.2}, {:.2}, {:.2}) target=({:.2}, {:.2}, {:.2})",
        p.x, p.y, p.z, t.x, t.y, t.z
    );
    println!(
        "Projectiles: live={} fired={}  Blocked moves: {}",
        show.projectiles().live().len(),
        show.projectiles().fired(),
        blocked
    );
    for event in &zone_log {
        match event {
            ZoneEvent::Entered { id } => println!("  entered {id}"),
            ZoneEvent::Exited { id } => println!("  left {id}"),
        }
    }

    show.teardown(&mut scene);
    println!("After teardown: renderables={}", scene.len());
    Ok(summary)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = match &cli.config {
        Some(path) => ShowcaseConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ShowcaseConfig::default(),
    };

    match cli.command {
        Commands::Info => {
            println!("showcase-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", showcase_common::crate_info());
            println!("input: {}", showcase_input::crate_info());
            println!("kernel: {}", showcase_kernel::crate_info());
            println!("hud: {}", showcase_hud::crate_info());
            println!("render: {}", showcase_render::crate_info());
        }
        Commands::Config => {
            println!("{}", config.to_json_pretty()?);
        }
        Commands::Run {
            ticks,
            fps,
            hold,
            fire,
            orbit_mouse,
        } => {
            let summary = run(
                config,
                RunScript {
                    ticks,
                    fps,
                    hold,
                    fire,
                    orbit_mouse,
                },
            )?;
            if let Some(label) = summary.last_label {
                println!("Compass reports: {} (last {label})", summary.reports);
            }
        }
        Commands::Compass { x, z } => {
            let forward = Vec3::new(x, 0.0, z);
            println!(
                "{} ({:.1} deg)",
                CompassReporter::sample(forward),
                CompassReporter::heading_degrees(forward)
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_pair_accepts_signed_values() {
        assert_eq!(parse_pair("3,-1.5").unwrap(), (3.0, -1.5));
        assert_eq!(parse_pair(" 2 , 4 ").unwrap(), (2.0, 4.0));
    }

    #[test]
    fn parse_pair_rejects_garbage() {
        assert!(parse_pair("3").is_err());
        assert!(parse_pair("a,1").is_err());
    }

    #[test]
    fn cli_parses_run_script() {
        let cli = Cli::try_parse_from([
            "showcase-cli",
            "run",
            "--ticks",
            "10",
            "--hold",
            "w",
            "--hold",
            "d",
            "--orbit-mouse",
            "-2,1",
        ])
        .unwrap();
        match cli.command {
            Commands::Run {
                ticks,
                hold,
                orbit_mouse,
                ..
            } => {
                assert_eq!(ticks, 10);
                assert_eq!(hold, vec!["w", "d"]);
                assert_eq!(orbit_mouse, Some((-2.0, 1.0)));
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn bare_mouse_flag_is_rejected() {
        assert!(Cli::try_parse_from(["showcase-cli", "run", "--mouse", "1,1"]).is_err());
    }

    #[test]
    fn run_rejects_zero_fps() {
        let script = RunScript {
            ticks: 1,
            fps: 0.0,
            hold: Vec::new(),
            fire: false,
            orbit_mouse: None,
        };
        assert!(run(ShowcaseConfig::default(), script).is_err());
    }

    #[test]
    fn short_run_completes() {
        let script = RunScript {
            ticks: 30,
            fps: 60.0,
            hold: vec!["w".into()],
            fire: true,
            orbit_mouse: Some((1.0, 0.0)),
        };
        run(ShowcaseConfig::default(), script).unwrap();
    }

    #[test]
    fn run_reports_on_compass_timer() {
        let script = RunScript {
            ticks: 60,
            fps: 60.0,
            hold: Vec::new(),
            fire: false,
            orbit_mouse: None,
        };
        let summary = run(ShowcaseConfig::default(), script).unwrap();
        // One second of simulated time at a 100 ms interval.
        assert!((9..=10).contains(&summary.reports), "{summary:?}");
        assert!(summary.last_label.is_some());
    }
}
