//! Point-set files: JSON (bare array or `{tag, points}` request), CSV, Parquet.
//! Tabular inputs need `x` and `y` columns.

use anyhow::{bail, Context, Result};
use hullscan::api::{Point, Request};
use polars::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Deserialize)]
#[serde(untagged)]
enum PointsFile {
    Bare(Vec<Point<f64>>),
    Request(Request<f64>),
}

pub fn load(path: &str) -> Result<Vec<Point<f64>>> {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("csv") => {
            let lf = LazyCsvReader::new(path)
                .with_infer_schema_length(Some(100))
                .finish()?;
            from_frame(lf)
        }
        Some("parquet") => from_frame(LazyFrame::scan_parquet(path, ScanArgsParquet::default())?),
        _ => {
            let text = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            let parsed: PointsFile =
                serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
            Ok(match parsed {
                PointsFile::Bare(points) => points,
                PointsFile::Request(req) => req.points,
            })
        }
    }
}

fn from_frame(lf: LazyFrame) -> Result<Vec<Point<f64>>> {
    let df = lf
        .select([
            col("x").cast(DataType::Float64),
            col("y").cast(DataType::Float64),
        ])
        .collect()?;
    tracing::info!(rows = df.height(), "points_table_loaded");
    let xs = df.column("x")?.f64()?;
    let ys = df.column("y")?.f64()?;
    let mut points = Vec::with_capacity(df.height());
    for (row, (x, y)) in xs.into_iter().zip(ys.into_iter()).enumerate() {
        match (x, y) {
            (Some(x), Some(y)) => points.push(Point::new(x, y)),
            _ => bail!("row {row}: missing coordinate"),
        }
    }
    Ok(points)
}

pub fn save(path: &str, points: &[Point<f64>]) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, serde_json::to_vec_pretty(points)?).with_context(|| format!("writing {path}"))
}

pub fn ensure_parent(path: &str) -> Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}
