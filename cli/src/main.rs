//! Drawing-pad pipeline driver.
//!
//! Replays a stroke trace through the pad engine, then runs the
//! recognition → tutor pipeline against live service endpoints, printing
//! every published event. Useful for exercising the full pipeline without
//! a UI host.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use mathpad::pipeline::{Pipeline, PipelineEvents, PipelinePhase};
use mathpad::recognition::RecognitionClient;
use mathpad::tutor::{SUBMISSION_DRAWING, TutorClient};
use pad::engine::PadEngine;
use pad::geometry::Point;
use pad::input::{DisplayRect, PointerSample};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("pad: {0}")]
    Pad(#[from] pad::engine::PadError),
    #[error("recognition client: {0}")]
    Recognition(#[from] mathpad::recognition::RecognitionError),
    #[error("tutor client: {0}")]
    Tutor(#[from] mathpad::tutor::TutorError),
    #[error("pipeline: {0}")]
    Pipeline(#[from] mathpad::pipeline::PipelineError),
    #[error("trace read failed: {0}")]
    TraceRead(#[from] std::io::Error),
    #[error("trace parse failed: {0}")]
    TraceParse(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "mathpad-cli", about = "Handwritten-math recognition pipeline driver")]
struct Cli {
    #[arg(long, env = "RECOGNITION_URL")]
    recognition_url: String,

    #[arg(long, env = "RECOGNITION_APP_ID")]
    recognition_app_id: String,

    #[arg(long, env = "RECOGNITION_APP_KEY")]
    recognition_app_key: String,

    #[arg(long, env = "TUTOR_URL")]
    tutor_url: String,

    /// JSON stroke trace: an array of strokes, each an array of {x, y}
    /// points in logical coordinates. Defaults to a built-in drawing.
    #[arg(long)]
    trace: Option<PathBuf>,

    #[arg(long, default_value_t = 400.0)]
    width: f64,

    #[arg(long, default_value_t = 400.0)]
    height: f64,

    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Stop after recognition; skip the tutor call.
    #[arg(long, default_value_t = false)]
    preview_only: bool,
}

struct StdoutEvents;

impl PipelineEvents for StdoutEvents {
    fn on_recognized(&mut self, latex: &str) {
        println!("recognized: {latex}");
    }

    fn on_preview_update(&mut self, latex: Option<&str>) {
        match latex {
            Some(latex) => println!("preview: {latex}"),
            None => println!("preview cleared"),
        }
    }

    fn on_answer(&mut self, text: &str) {
        println!("answer: {text}");
    }

    fn on_error(&mut self, message: &str) {
        eprintln!("error: {message}");
    }

    fn on_clear(&mut self) {
        println!("cleared");
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let strokes = match &cli.trace {
        Some(path) => serde_json::from_str::<Vec<Vec<Point>>>(&fs::read_to_string(path)?)?,
        None => builtin_trace(),
    };

    let mut pad = PadEngine::new();
    pad.configure(cli.width, cli.height, cli.dpr);
    replay(&mut pad, &strokes, cli.width, cli.height)?;

    let recognizer = RecognitionClient::new(
        cli.recognition_url,
        cli.recognition_app_id,
        cli.recognition_app_key,
    )?;
    let mut pipeline = Pipeline::new(StdoutEvents);
    pipeline.preview(&pad, &recognizer).await?;

    if !cli.preview_only && pipeline.state().phase == PipelinePhase::Previewing {
        let tutor = TutorClient::new(cli.tutor_url)?;
        pipeline.submit_for_answer(&tutor, SUBMISSION_DRAWING).await?;
    }

    Ok(())
}

fn replay(
    pad: &mut PadEngine,
    strokes: &[Vec<Point>],
    width: f64,
    height: f64,
) -> Result<(), CliError> {
    let rect = DisplayRect::new(0.0, 0.0, width, height);
    for stroke in strokes {
        let mut points = stroke.iter();
        let Some(first) = points.next() else {
            continue;
        };
        pad.on_pointer_down(&PointerSample::Mouse { x: first.x, y: first.y }, rect)?;
        for point in points {
            pad.on_pointer_move(&PointerSample::Mouse { x: point.x, y: point.y }, rect)?;
        }
        pad.on_pointer_up();
    }
    Ok(())
}

/// A plus sign, for running the pipeline without a trace file.
fn builtin_trace() -> Vec<Vec<Point>> {
    let horizontal = (80..=320)
        .step_by(8)
        .map(|x| Point::new(f64::from(x), 200.0))
        .collect();
    let vertical = (80..=320)
        .step_by(8)
        .map(|y| Point::new(200.0, f64::from(y)))
        .collect();
    vec![horizontal, vertical]
}
