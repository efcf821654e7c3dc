//! Timing comparison between the two blur variants.
//!
//! The harness moves through a fixed sequence of states:
//! `Idle -> Loaded -> TimingFull2d -> TimingSeparable -> Reported`.
//! A failed load or a failed timing run jumps to the terminal `Failed`
//! state. Variants run one after the other on the calling thread; each
//! variant reuses a single destination buffer for all of its repetitions,
//! and only the output of the last repetition is kept.

use crate::kernel::Variant;
use crate::raster::RasterImage;
use crate::trace::{trace_event, trace_span};
use crate::util::{BlurError, BlurResult};
use std::time::{Duration, Instant};

/// Repetitions per variant used by the reference timing run.
pub const DEFAULT_REPETITIONS: usize = 10;

/// Harness configuration.
#[derive(Clone, Debug)]
pub struct BenchConfig {
    /// Number of timed calls per variant. Must be at least 1.
    pub repetitions: usize,
    /// Run the row-parallel convolvers (requires the `rayon` feature).
    pub parallel: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            repetitions: DEFAULT_REPETITIONS,
            parallel: false,
        }
    }
}

/// Where the harness is in its run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HarnessState {
    /// No source image yet.
    Idle,
    /// Source image loaded, timing not started.
    Loaded,
    /// Timing the direct 5x5 convolver.
    TimingFull2d,
    /// Timing the separable convolver.
    TimingSeparable,
    /// Both variants timed; the report has been produced.
    Reported,
    /// Loading or timing failed. Terminal.
    Failed,
}

impl HarnessState {
    /// Lowercase state name for error messages.
    pub fn name(self) -> &'static str {
        match self {
            HarnessState::Idle => "idle",
            HarnessState::Loaded => "loaded",
            HarnessState::TimingFull2d => "timing full_2d",
            HarnessState::TimingSeparable => "timing separable",
            HarnessState::Reported => "reported",
            HarnessState::Failed => "failed",
        }
    }

    fn timing(variant: Variant) -> Self {
        match variant {
            Variant::Full2d => HarnessState::TimingFull2d,
            Variant::Separable => HarnessState::TimingSeparable,
        }
    }
}

/// Total wall-clock time spent on `repetitions` calls of one variant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimingSample {
    pub variant: Variant,
    pub repetitions: usize,
    pub total: Duration,
}

impl TimingSample {
    /// Mean seconds per call.
    pub fn seconds_per_image(&self) -> f64 {
        self.total.as_secs_f64() / self.repetitions as f64
    }

    /// `Time per image (<id>): <seconds> seconds`, with four decimals.
    pub fn report_line(&self) -> String {
        format!(
            "Time per image ({}): {:.4} seconds",
            self.variant.id(),
            self.seconds_per_image()
        )
    }
}

/// Timing and final output for one variant.
#[derive(Clone, Debug)]
pub struct VariantRun {
    pub sample: TimingSample,
    pub output: RasterImage,
}

/// Results of a completed harness run, in variant order.
#[derive(Clone, Debug)]
pub struct BenchReport {
    runs: Vec<VariantRun>,
}

impl BenchReport {
    /// Per-variant results.
    pub fn runs(&self) -> &[VariantRun] {
        &self.runs
    }

    /// Result for a specific variant.
    pub fn run(&self, variant: Variant) -> Option<&VariantRun> {
        self.runs.iter().find(|run| run.sample.variant == variant)
    }

    /// One report line per variant.
    pub fn report_lines(&self) -> Vec<String> {
        self.runs.iter().map(|run| run.sample.report_line()).collect()
    }

    /// Deterministic artifact stem for a variant's output, without extension.
    pub fn artifact_name(variant: Variant) -> String {
        format!("blur5x5_{}_output", variant.id())
    }

    /// Hands every variant run to `sink` under its artifact name.
    ///
    /// Returns the names in variant order. Stops at the first sink error.
    pub fn persist<F>(&self, mut sink: F) -> BlurResult<Vec<String>>
    where
        F: FnMut(&str, &VariantRun) -> BlurResult<()>,
    {
        let mut names = Vec::with_capacity(self.runs.len());
        for run in &self.runs {
            let name = Self::artifact_name(run.sample.variant);
            sink(&name, run)?;
            names.push(name);
        }
        Ok(names)
    }
}

/// Sequential timing harness for the two blur variants.
pub struct BenchmarkHarness {
    cfg: BenchConfig,
    state: HarnessState,
    source: Option<RasterImage>,
}

impl BenchmarkHarness {
    /// Creates an idle harness.
    pub fn new(cfg: BenchConfig) -> Self {
        Self {
            cfg,
            state: HarnessState::Idle,
            source: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> HarnessState {
        self.state
    }

    /// Installs an already decoded source image.
    pub fn load(&mut self, source: RasterImage) -> BlurResult<()> {
        self.expect_state(HarnessState::Idle)?;
        self.source = Some(source);
        self.state = HarnessState::Loaded;
        Ok(())
    }

    /// Runs a fallible loader; a failure moves the harness to `Failed`.
    pub fn load_with<F>(&mut self, loader: F) -> BlurResult<()>
    where
        F: FnOnce() -> BlurResult<RasterImage>,
    {
        self.expect_state(HarnessState::Idle)?;
        match loader() {
            Ok(source) => self.load(source),
            Err(err) => {
                self.state = HarnessState::Failed;
                Err(err)
            }
        }
    }

    /// Times every variant against the loaded source and returns the report.
    ///
    /// Configuration errors are reported while still `Loaded`. An error
    /// during timing moves the harness to the terminal `Failed` state.
    pub fn run(&mut self) -> BlurResult<BenchReport> {
        self.expect_state(HarnessState::Loaded)?;
        if self.cfg.repetitions == 0 {
            return Err(BlurError::InvalidInput("repetitions must be at least 1"));
        }
        if self.cfg.parallel && !cfg!(feature = "rayon") {
            return Err(BlurError::FeatureDisabled("rayon"));
        }
        let source = self
            .source
            .as_ref()
            .ok_or(BlurError::InvalidInput("no source image loaded"))?;

        let mut runs = Vec::with_capacity(Variant::ALL.len());
        for variant in Variant::ALL {
            self.state = HarnessState::timing(variant);
            match time_variant(variant, source, &self.cfg) {
                Ok(run) => runs.push(run),
                Err(err) => {
                    self.state = HarnessState::Failed;
                    return Err(err);
                }
            }
        }

        self.state = HarnessState::Reported;
        Ok(BenchReport { runs })
    }

    fn expect_state(&self, expected: HarnessState) -> BlurResult<()> {
        if self.state != expected {
            return Err(BlurError::HarnessState {
                expected: expected.name(),
                found: self.state.name(),
            });
        }
        Ok(())
    }
}

fn time_variant(
    variant: Variant,
    source: &RasterImage,
    cfg: &BenchConfig,
) -> BlurResult<VariantRun> {
    let _span = trace_span!(
        "time_variant",
        variant = variant.name(),
        repetitions = cfg.repetitions
    )
    .entered();

    let src = source.view();
    let mut dst = RasterImage::zeros(src.width(), src.height())?;

    let start = Instant::now();
    for _ in 0..cfg.repetitions {
        variant.convolve_into(src, &mut dst, cfg.parallel)?;
    }
    let total = start.elapsed();

    let sample = TimingSample {
        variant,
        repetitions: cfg.repetitions,
        total,
    };
    trace_event!(
        "variant_timed",
        variant = variant.name(),
        seconds_per_image = sample.seconds_per_image()
    );
    Ok(VariantRun {
        sample,
        output: dst,
    })
}
