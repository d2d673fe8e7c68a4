use std::path::Path;

use anyhow::Context;

use crate::cadence::state::CadenceConfig;
use crate::engine::context::PulldownMode;
use crate::foundation::error::{DeinterlaceError, DeinterlaceResult};

/// Output field rate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FramerateMode {
    /// One output frame per field, in field order.
    #[default]
    Full,
    /// One output frame per input frame, built from the top field.
    HalfTop,
    /// One output frame per input frame, built from the bottom field.
    HalfBottom,
}

/// Options controlling a [`DeinterlaceStage`](crate::DeinterlaceStage).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StageOpts {
    /// Method short name or full name. `None` picks the first registered method.
    pub method: Option<String>,
    /// Deinterlace at all; when off every frame passes through.
    pub enabled: bool,
    /// Telecine detection.
    pub pulldown: PulldownMode,
    /// Output field rate.
    pub framerate: FramerateMode,
    /// Retime film-mode output to 24 fps.
    pub judder_correction: bool,
    /// Treat `progressive_frame` and `repeat_first_field` as proof of progressive content.
    pub use_progressive_frame_flag: bool,
    /// Run the 3-3-2 vertical chroma filter over reconstructed frames.
    pub chroma_filter: bool,
    /// Phase-lock tuning.
    pub cadence: CadenceConfig,
    /// Allow frame methods to use the rayon pool.
    pub parallel: bool,
}

impl Default for StageOpts {
    fn default() -> Self {
        Self {
            method: None,
            enabled: true,
            pulldown: PulldownMode::Vektor,
            framerate: FramerateMode::Full,
            judder_correction: true,
            use_progressive_frame_flag: true,
            chroma_filter: false,
            cadence: CadenceConfig::default(),
            parallel: true,
        }
    }
}

impl StageOpts {
    /// Reject option combinations the stage cannot run.
    pub fn validate(&self) -> DeinterlaceResult<()> {
        if self.method.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(DeinterlaceError::validation("method name must not be empty"));
        }
        self.cadence.validate()
    }

    /// Parse options from JSON; missing keys take their defaults.
    pub fn from_json_str(s: &str) -> DeinterlaceResult<Self> {
        let opts: Self =
            serde_json::from_str(s).map_err(|e| DeinterlaceError::serde(e.to_string()))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Read and parse a JSON options file.
    pub fn from_json_path(path: &Path) -> DeinterlaceResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read stage options '{}'", path.display()))?;
        Self::from_json_str(&s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/opts.rs"]
mod tests;
