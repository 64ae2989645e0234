use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use hullscan::api::{
    sample_disk, Delivery, DiskSampleCfg, HullChannel, HullCfg, Outcome, Point, Response,
    SampleReplay,
};
use serde_json::json;
use std::fs;
use tracing_subscriber::fmt::SubscriberBuilder;

mod points;
mod provenance;

use provenance::{write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Convex hull runner (Graham scan)")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Compute a convex hull and write the response JSON (plus provenance)
    Hull {
        /// Points file (.json, .csv, .parquet)
        #[arg(long, conflicts_with = "sample", required_unless_present = "sample")]
        input: Option<String>,
        /// Sample this many points in a disk instead of reading a file
        #[arg(long)]
        sample: Option<usize>,
        #[command(flatten)]
        disk: DiskArgs,
        /// Relative collinearity tolerance
        #[arg(long, default_value_t = HullCfg::default().eps_collinear)]
        eps: f64,
        #[arg(long)]
        out: String,
    },
    /// Write a sampled point set as JSON (plus provenance)
    Sample {
        #[arg(long, default_value_t = 100)]
        count: usize,
        #[command(flatten)]
        disk: DiskArgs,
        #[arg(long)]
        out: String,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Args, Clone, Copy)]
struct DiskArgs {
    #[arg(long, default_value_t = 0)]
    seed: u64,
    #[arg(long, default_value_t = DiskSampleCfg::default().radius)]
    radius: f64,
    /// Floor sampled coordinates to the integer grid
    #[arg(long)]
    grid: bool,
}

impl DiskArgs {
    fn cfg(self, count: usize) -> DiskSampleCfg {
        DiskSampleCfg {
            count,
            radius: self.radius,
            snap_to_grid: self.grid,
            ..DiskSampleCfg::default()
        }
    }

    fn replay(self) -> SampleReplay {
        SampleReplay {
            seed: self.seed,
            index: 0,
        }
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Hull {
            input,
            sample,
            disk,
            eps,
            out,
        } => hull(input, sample, disk, eps, out),
        Action::Sample { count, disk, out } => sample(count, disk, out),
        Action::Report => report(),
    }
}

fn hull(
    input: Option<String>,
    sample: Option<usize>,
    disk: DiskArgs,
    eps: f64,
    out: String,
) -> Result<()> {
    let (pts, mut payload) = match (input, sample) {
        (Some(input), _) => {
            let pts = points::load(&input)?;
            (pts, Payload::new(json!({"eps": eps})).with_input(input))
        }
        (None, Some(count)) => {
            let pts = sample_disk(disk.cfg(count), disk.replay());
            let params = json!({
                "eps": eps,
                "sample": count,
                "seed": disk.seed,
                "radius": disk.radius,
                "grid": disk.grid
            });
            (pts, Payload::new(params))
        }
        (None, None) => bail!("either --input or --sample is required"),
    };
    tracing::info!(points = pts.len(), eps, out, "hull");

    let runtime = tokio::runtime::Runtime::new().context("starting runtime")?;
    let response = runtime.block_on(compute(&pts, HullCfg { eps_collinear: eps }))?;
    match &response.outcome {
        Outcome::Hull(h) => tracing::info!(tag = response.tag, vertices = h.len(), "hull_done"),
        Outcome::Error(err) => tracing::warn!(tag = response.tag, %err, "hull_failed"),
    }

    points::ensure_parent(&out)?;
    fs::write(&out, serde_json::to_vec_pretty(&response)?).with_context(|| format!("writing {out}"))?;
    if let serde_json::Value::Object(map) = &mut payload.params {
        map.insert("input_points".into(), json!(pts.len()));
    }
    write_sidecar(&out, payload)?;
    Ok(())
}

async fn compute(pts: &[Point<f64>], cfg: HullCfg) -> Result<Response<f64>> {
    let channel = HullChannel::with_graham(cfg)?;
    match channel.submit(pts).await {
        Delivery::Delivered(response) => Ok(response),
        Delivery::Superseded { tag, latest } => bail!("request {tag} superseded by {latest}"),
    }
}

fn sample(count: usize, disk: DiskArgs, out: String) -> Result<()> {
    tracing::info!(count, seed = disk.seed, out, "sample");
    let pts = sample_disk(disk.cfg(count), disk.replay());
    points::save(&out, &pts)?;
    let params = json!({
        "count": count,
        "seed": disk.seed,
        "radius": disk.radius,
        "grid": disk.grid
    });
    write_sidecar(&out, Payload::new(params))?;
    Ok(())
}

fn report() -> Result<()> {
    let doc = provenance::document(&Payload::new(json!({})), &[]);
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn hull_command_writes_response_and_sidecar() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("square.json");
        fs::write(
            &input,
            r#"[{"x":0,"y":0},{"x":4,"y":0},{"x":4,"y":4},{"x":0,"y":4},{"x":2,"y":2}]"#,
        )
        .unwrap();
        let out = dir.path().join("out/hull.json");
        hull(
            Some(input.to_string_lossy().into_owned()),
            None,
            DiskArgs {
                seed: 0,
                radius: 1.0,
                grid: false,
            },
            1e-12,
            out.to_string_lossy().into_owned(),
        )
        .unwrap();
        let resp: Response<f64> = serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
        assert_eq!(resp.tag, 1);
        assert_eq!(resp.into_result().unwrap().len(), 4);
        assert!(dir.path().join("out/hull.provenance.json").exists());
    }

    #[test]
    fn hull_command_reads_csv_and_drops_collinear_points() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("pts.csv");
        fs::write(&input, "x,y\n0,0\n1,0\n2,0\n2,2\n0,2\n").unwrap();
        let out = dir.path().join("csv_hull.json");
        hull(
            Some(input.to_string_lossy().into_owned()),
            None,
            DiskArgs {
                seed: 0,
                radius: 1.0,
                grid: false,
            },
            1e-12,
            out.to_string_lossy().into_owned(),
        )
        .unwrap();
        let v: serde_json::Value = serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
        assert_eq!(
            v["hull"],
            json!([{"x": 0.0, "y": 0.0}, {"x": 2.0, "y": 0.0}, {"x": 2.0, "y": 2.0}, {"x": 0.0, "y": 2.0}])
        );
    }

    #[test]
    fn sample_command_is_reproducible() {
        let dir = tempdir().unwrap();
        let disk = DiskArgs {
            seed: 7,
            radius: 50.0,
            grid: true,
        };
        let a = dir.path().join("a.json");
        let b = dir.path().join("b.json");
        sample(25, disk, a.to_string_lossy().into_owned()).unwrap();
        sample(25, disk, b.to_string_lossy().into_owned()).unwrap();
        assert_eq!(fs::read(&a).unwrap(), fs::read(&b).unwrap());
        let pts = points::load(a.to_str().unwrap()).unwrap();
        assert_eq!(pts.len(), 25);
    }

    #[test]
    fn cli_parses_hull_with_sample() {
        let cmd = Cmd::try_parse_from(["cli", "hull", "--sample", "10", "--seed", "3", "--out", "x.json"])
            .unwrap();
        assert!(matches!(cmd.action, Action::Hull { sample: Some(10), .. }));
        assert!(Cmd::try_parse_from(["cli", "hull", "--out", "x.json"]).is_err());
    }
}
