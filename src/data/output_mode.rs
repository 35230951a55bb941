/// What the run emits per frame: the probability-layer distribution or
/// the flattened activations of a named feature layer. One driver
/// parameterized by this enum replaces per-schema scripts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    #[default] Classify,
    ExtractFeatures,
}

const CLASSIFY: [&str; 2] = ["classify", "_class.txt"];
const FEATURES: [&str; 2] = ["features", "_coolnet_extracted.csv"];

impl OutputMode {
    pub fn from_str(mode: &str) -> Option<Self> {
        match mode.to_lowercase().as_str() {
            "classify" | "class" => Some(OutputMode::Classify),
            "features" | "extract" => Some(OutputMode::ExtractFeatures),
            _ => None,
        }
    }

    pub fn str(&self) -> &'static str {
        match self {
            OutputMode::Classify => CLASSIFY[0],
            OutputMode::ExtractFeatures => FEATURES[0],
        }
    }

    /// Suffix replacing the video extension in the derived output path.
    pub fn output_suffix(&self) -> &'static str {
        match self {
            OutputMode::Classify => CLASSIFY[1],
            OutputMode::ExtractFeatures => FEATURES[1],
        }
    }
}
