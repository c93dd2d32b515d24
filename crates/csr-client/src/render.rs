use crate::surface::{TextRegion, Tone};

/// A message paired with the tone it is shown in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    pub tone: Tone,
}

impl Rendered {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self { text: text.into(), tone }
    }

    pub fn ok(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Ok)
    }

    pub fn warn(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Warn)
    }

    pub fn ng(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Ng)
    }

    pub fn neutral(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Neutral)
    }

    pub fn show_on(&self, target: &dyn TextRegion) {
        render(target, &self.text, self.tone);
    }
}

/// Replace the target's text, tagging it with exactly one tone.
pub fn render(target: &dyn TextRegion, text: &str, tone: Tone) {
    tracing::trace!(%tone, text, "render");
    target.show(text, tone);
}
