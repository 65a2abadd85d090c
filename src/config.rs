//! Invocation configuration for a generation run.
//!
//! Built from the command line (`-g <generations> -a <angle> <grammar>`, see
//! [`CliArgs`]), from a JSON file, or programmatically with the `with_*`
//! builders.

use crate::error::{LSystemError, Result};
use crate::geometry::DEFAULT_LINE_COLOR;
use crate::interpreter::TurtleConfig;
use crate::rewriter::{DEFAULT_MAX_GENERATIONS, DEFAULT_MAX_SYMBOLS};
use argh::FromArgs;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Parameters for one plant generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Number of rewriting generations.
    pub generations: u32,
    /// Turn angle for `+` / `-`, in degrees.
    pub turn_angle: f32,
    /// Path to the grammar text file.
    pub grammar_path: PathBuf,
    /// Step length; when unset it is picked from the generation count.
    pub step_length: Option<f32>,
    /// Per-generation shrink; steps are scaled by `scale_factor^generations`.
    pub scale_factor: f32,
    /// Start point of the first edge.
    pub origin: Vec3,
    /// Line color for every vertex.
    pub color: Vec3,
    pub max_symbols: usize,
    pub max_generations: u32,
    pub max_stack_depth: usize,
    /// Keep every intermediate generation, not just the last one.
    pub keep_history: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            generations: 0,
            turn_angle: 25.7,
            grammar_path: PathBuf::new(),
            step_length: None,
            scale_factor: 0.7,
            origin: Vec3::new(0.0, -0.8, 0.0),
            color: DEFAULT_LINE_COLOR,
            max_symbols: DEFAULT_MAX_SYMBOLS,
            max_generations: DEFAULT_MAX_GENERATIONS,
            max_stack_depth: 4096,
            keep_history: false,
        }
    }
}

impl GenerationConfig {
    pub fn new(grammar_path: impl Into<PathBuf>) -> Self {
        Self {
            grammar_path: grammar_path.into(),
            ..Default::default()
        }
    }

    pub fn with_generations(mut self, generations: u32) -> Self {
        self.generations = generations;
        self
    }

    pub fn with_turn_angle(mut self, degrees: f32) -> Self {
        self.turn_angle = degrees;
        self
    }

    pub fn with_step_length(mut self, step_length: f32) -> Self {
        self.step_length = Some(step_length);
        self
    }

    pub fn with_scale_factor(mut self, factor: f32) -> Self {
        self.scale_factor = factor;
        self
    }

    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    pub fn with_max_symbols(mut self, max_symbols: usize) -> Self {
        self.max_symbols = max_symbols;
        self
    }

    pub fn with_max_generations(mut self, max_generations: u32) -> Self {
        self.max_generations = max_generations;
        self
    }

    pub fn with_history(mut self, keep_history: bool) -> Self {
        self.keep_history = keep_history;
        self
    }

    /// Reads a JSON config file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LSystemError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text)
            .map_err(|e| LSystemError::config(format!("{}: {e}", path.display())))
    }

    /// Step length actually used: the explicit one, or a generation-tiered
    /// default so deeper trees stay on screen.
    pub fn effective_step_length(&self) -> f32 {
        self.step_length.unwrap_or(match self.generations {
            0..=3 => 0.25,
            4..=5 => 0.12,
            _ => 0.08,
        })
    }

    /// Accumulated shrink after all generations.
    pub fn effective_scale(&self) -> f32 {
        self.scale_factor.powi(self.generations.min(i32::MAX as u32) as i32)
    }

    pub fn turtle_config(&self) -> TurtleConfig {
        TurtleConfig {
            turn_angle: self.turn_angle,
            step_length: self.effective_step_length(),
            scale: self.effective_scale(),
            origin: self.origin,
            max_stack_depth: self.max_stack_depth,
        }
    }

    /// Rejects parameters the pipeline cannot work with.
    ///
    /// This is the only place invocation parameters are checked; the command
    /// line and JSON loaders both end here.
    pub fn validate(&self) -> Result<()> {
        if !(self.scale_factor > 0.0 && self.scale_factor <= 1.0) {
            return Err(LSystemError::config(format!(
                "scale factor must be in (0, 1], got {}",
                self.scale_factor
            )));
        }
        if self.generations > self.max_generations {
            return Err(LSystemError::config(format!(
                "{} generations requested (limit {})",
                self.generations, self.max_generations
            )));
        }
        if !self.color.is_finite() {
            return Err(LSystemError::config("color must be finite"));
        }
        if self.max_symbols == 0 {
            return Err(LSystemError::config("symbol limit must be non-zero"));
        }
        self.turtle_config().validate()
    }
}

/// Generate an L-System plant and write its line geometry as JSON.
#[derive(FromArgs, PartialEq, Debug, Default)]
pub struct CliArgs {
    /// number of rewriting generations
    #[argh(option, short = 'g')]
    pub generations: Option<i64>,
    /// turn angle for `+` and `-`, in degrees
    #[argh(option, short = 'a')]
    pub angle: Option<f32>,
    /// step length (default picked from the generation count)
    #[argh(option)]
    pub step: Option<f32>,
    /// per-generation shrink factor in (0, 1]
    #[argh(option)]
    pub scale: Option<f32>,
    /// cap on the symbols held while rewriting
    #[argh(option)]
    pub max_symbols: Option<usize>,
    /// cap on the generation count
    #[argh(option)]
    pub max_generations: Option<u32>,
    /// config file (JSON); flags on the command line override it
    #[argh(option)]
    pub config: Option<PathBuf>,
    /// write the output here instead of stdout
    #[argh(option)]
    pub out: Option<PathBuf>,
    /// print every generation of the derivation to stderr
    #[argh(switch)]
    pub history: bool,
    /// log filter, e.g. "debug" or "lsystem_tree=trace"
    #[argh(option)]
    pub log: Option<String>,
    /// start with a wireframe floor
    #[argh(switch)]
    pub wireframe: bool,
    /// directory holding the six skybox face images
    #[argh(option)]
    pub skybox: Option<PathBuf>,
    /// grammar file
    #[argh(positional)]
    pub grammar: Option<PathBuf>,
}

/// Validated command line.
#[derive(Clone, Debug, PartialEq)]
pub struct CliOptions {
    pub config: GenerationConfig,
    pub output: Option<PathBuf>,
    pub log_filter: Option<String>,
    pub floor_wireframe: bool,
    pub skybox_dir: Option<PathBuf>,
}

impl CliArgs {
    /// Applies `--config` first, then every flag that was given, then
    /// [`GenerationConfig::validate`].
    pub fn into_options(self) -> Result<CliOptions> {
        let mut config = match &self.config {
            Some(path) => GenerationConfig::from_json_file(path)?,
            None => GenerationConfig::default(),
        };

        if let Some(n) = self.generations {
            config.generations = u32::try_from(n).map_err(|_| {
                LSystemError::config(format!("generation count must be non-negative, got {n}"))
            })?;
        }
        if let Some(angle) = self.angle {
            config.turn_angle = angle;
        }
        if self.step.is_some() {
            config.step_length = self.step;
        }
        if let Some(scale) = self.scale {
            config.scale_factor = scale;
        }
        if let Some(max) = self.max_symbols {
            config.max_symbols = max;
        }
        if let Some(max) = self.max_generations {
            config.max_generations = max;
        }
        if let Some(path) = self.grammar {
            config.grammar_path = path;
        }
        config.keep_history |= self.history;

        if config.grammar_path.as_os_str().is_empty() {
            return Err(LSystemError::config("no grammar file given"));
        }
        config.validate()?;

        Ok(CliOptions {
            config,
            output: self.out,
            log_filter: self.log,
            floor_wireframe: self.wireframe,
            skybox_dir: self.skybox,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliOptions> {
        CliArgs::from_args(&["lsystem-tree"], args)
            .map_err(|e| LSystemError::config(e.output))?
            .into_options()
    }

    #[test]
    fn parses_short_flag_invocation() {
        let opts = parse(&["-g", "4", "-a", "25.7", "plant.txt"]).unwrap();
        assert_eq!(opts.config.generations, 4);
        assert_eq!(opts.config.turn_angle, 25.7);
        assert_eq!(opts.config.grammar_path, PathBuf::from("plant.txt"));
        assert!(!opts.config.keep_history);
        assert_eq!(opts.output, None);
        assert_eq!(opts.log_filter, None);
    }

    #[test]
    fn long_flags_fill_the_config() {
        let opts = parse(&[
            "--step", "0.5", "--max-generations", "8", "--history", "--log", "debug",
            "--wireframe", "--out", "plant.json", "plant.txt",
        ])
        .unwrap();
        assert_eq!(opts.config.step_length, Some(0.5));
        assert_eq!(opts.config.max_generations, 8);
        assert!(opts.config.keep_history);
        assert_eq!(opts.log_filter.as_deref(), Some("debug"));
        assert!(opts.floor_wireframe);
        assert_eq!(opts.output, Some(PathBuf::from("plant.json")));
    }

    #[test]
    fn negative_generations_rejected() {
        let args = CliArgs {
            generations: Some(-2),
            grammar: Some("plant.txt".into()),
            ..Default::default()
        };
        assert!(matches!(args.into_options(), Err(LSystemError::Config(_))));
    }

    #[test]
    fn generations_above_cap_rejected() {
        let err = parse(&["-g", "65", "plant.txt"]).unwrap_err();
        assert!(matches!(err, LSystemError::Config(_)));
        assert!(parse(&["-g", "65", "--max-generations", "70", "plant.txt"]).is_ok());
    }

    #[test]
    fn non_positive_step_rejected() {
        let err = parse(&["--step", "0", "plant.txt"]).unwrap_err();
        assert!(matches!(err, LSystemError::Config(_)));
    }

    #[test]
    fn missing_grammar_rejected() {
        let err = parse(&["-g", "2"]).unwrap_err();
        assert!(matches!(err, LSystemError::Config(_)));
    }

    #[test]
    fn unknown_flag_rejected() {
        assert!(CliArgs::from_args(&["lsystem-tree"], &["--wat", "plant.txt"]).is_err());
    }

    #[test]
    fn zero_stack_depth_fails_validation() {
        let mut c = GenerationConfig::new("x");
        c.max_stack_depth = 0;
        assert!(matches!(c.validate(), Err(LSystemError::Config(_))));
    }

    #[test]
    fn step_length_tiers_follow_generation_count() {
        let c = GenerationConfig::new("x");
        assert_eq!(c.clone().with_generations(3).effective_step_length(), 0.25);
        assert_eq!(c.clone().with_generations(5).effective_step_length(), 0.12);
        assert_eq!(c.clone().with_generations(6).effective_step_length(), 0.08);
        assert_eq!(c.with_step_length(1.5).effective_step_length(), 1.5);
    }

    #[test]
    fn scale_compounds_per_generation() {
        let c = GenerationConfig::new("x")
            .with_generations(2)
            .with_scale_factor(0.5);
        assert_eq!(c.effective_scale(), 0.25);
        assert_eq!(c.turtle_config().scale, 0.25);
    }

    #[test]
    fn json_config_fills_defaults_and_flags_override() {
        let path = std::env::temp_dir().join("lsystem_tree_config_test.json");
        std::fs::write(&path, r#"{ "generations": 2, "turn_angle": 30.0 }"#).unwrap();
        let c = GenerationConfig::from_json_file(&path).unwrap();
        assert_eq!(c.generations, 2);
        assert_eq!(c.turn_angle, 30.0);
        assert_eq!(c.scale_factor, 0.7);
        assert_eq!(c.max_generations, DEFAULT_MAX_GENERATIONS);

        let config_arg = path.to_str().unwrap();
        let opts = parse(&["--config", config_arg, "-a", "20", "plant.txt"]).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(opts.config.generations, 2);
        assert_eq!(opts.config.turn_angle, 20.0);
    }
}
