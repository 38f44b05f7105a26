use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_MIN_ENDPOINTING_DELAY: f64 = 0.5;
pub const DEFAULT_MAX_ENDPOINTING_DELAY: f64 = 6.0;
pub const DEFAULT_MIN_SPEECH_DURATION: f64 = 0.05;
pub const DEFAULT_MIN_SILENCE_DURATION: f64 = 0.55;
pub const DEFAULT_PREFIX_PADDING_DURATION: f64 = 0.5;
pub const DEFAULT_MAX_BUFFERED_SPEECH: f64 = 60.0;
pub const DEFAULT_ACTIVATION_THRESHOLD: f64 = 0.5;

/// Per-user voice activity tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TuningParameters {
    pub min_endpointing_delay: f64,
    pub max_endpointing_delay: f64,
    pub min_speech_duration: f64,
    pub min_silence_duration: f64,
    pub prefix_padding_duration: f64,
    pub max_buffered_speech: f64,
    pub activation_threshold: f64,
}

impl Default for TuningParameters {
    fn default() -> Self {
        Self {
            min_endpointing_delay: DEFAULT_MIN_ENDPOINTING_DELAY,
            max_endpointing_delay: DEFAULT_MAX_ENDPOINTING_DELAY,
            min_speech_duration: DEFAULT_MIN_SPEECH_DURATION,
            min_silence_duration: DEFAULT_MIN_SILENCE_DURATION,
            prefix_padding_duration: DEFAULT_PREFIX_PADDING_DURATION,
            max_buffered_speech: DEFAULT_MAX_BUFFERED_SPEECH,
            activation_threshold: DEFAULT_ACTIVATION_THRESHOLD,
        }
    }
}

impl TuningParameters {
    /// Reads each parameter from remote metadata, substituting the default
    /// per field when the key is absent or not numeric.
    pub fn from_metadata(metadata: &Map<String, Value>) -> Self {
        let defaults = Self::default();
        let read = |key: &str, default: f64| numeric(metadata.get(key)).unwrap_or(default);

        Self {
            min_endpointing_delay: read("min_endpointing_delay", defaults.min_endpointing_delay),
            max_endpointing_delay: read("max_endpointing_delay", defaults.max_endpointing_delay),
            min_speech_duration: read("min_speech_duration", defaults.min_speech_duration),
            min_silence_duration: read("min_silence_duration", defaults.min_silence_duration),
            prefix_padding_duration: read(
                "prefix_padding_duration",
                defaults.prefix_padding_duration,
            ),
            max_buffered_speech: read("max_buffered_speech", defaults.max_buffered_speech),
            activation_threshold: read("activation_threshold", defaults.activation_threshold),
        }
    }
}

// Metadata editors store numbers as strings often enough to accept both.
fn numeric(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed.filter(|v| v.is_finite())
}
