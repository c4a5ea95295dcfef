mod effects;
mod synthesizer;
mod types;

pub use effects::OrbitalEffects;
pub use synthesizer::TelemetrySynthesizer;
pub use types::TelemetrySnapshot;
