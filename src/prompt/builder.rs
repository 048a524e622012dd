use std::collections::HashMap;

use super::defaults;
use crate::mood::{BandText, IntensityBand, Mood};

/// Everything needed to turn a mood and an intensity into a system prompt.
///
/// Built once at startup and shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    guidance: HashMap<Mood, String>,
    default_guidance: String,
    band_suffixes: BandText,
    closing: String,
}

impl PromptTemplate {
    pub fn new(
        default_guidance: impl Into<String>,
        band_suffixes: BandText,
        closing: impl Into<String>,
    ) -> Self {
        Self {
            guidance: HashMap::new(),
            default_guidance: default_guidance.into(),
            band_suffixes,
            closing: closing.into(),
        }
    }

    /// Dedicated guidance for `mood`. Ignored for `Mood::Unmapped`.
    pub fn with_guidance(mut self, mood: Mood, text: impl Into<String>) -> Self {
        if mood.is_mapped() {
            self.guidance.insert(mood, text.into());
        }
        self
    }

    /// The built-in French template.
    pub fn builtin() -> Self {
        let template = Self::new(
            defaults::DEFAULT_GUIDANCE,
            BandText::new(
                defaults::LOW_INTENSITY_SUFFIX,
                defaults::MEDIUM_INTENSITY_SUFFIX,
                defaults::HIGH_INTENSITY_SUFFIX,
            ),
            defaults::CLOSING_DIRECTIVE,
        );

        Mood::MAPPED.into_iter().fold(template, |template, mood| {
            match defaults::guidance(mood) {
                Some(text) => template.with_guidance(mood, text),
                None => template,
            }
        })
    }

    pub fn guidance_for(&self, mood: Mood) -> &str {
        self.guidance
            .get(&mood)
            .map(String::as_str)
            .unwrap_or(&self.default_guidance)
    }

    #[cfg(test)]
    pub(crate) fn default_guidance(&self) -> &str {
        &self.default_guidance
    }

    pub fn band_suffix(&self, band: IntensityBand) -> &str {
        self.band_suffixes.get(band)
    }

    /// Builds the system instruction for a mood label and intensity.
    ///
    /// Never fails: unknown labels get the default guidance, intensities
    /// outside 1-10 saturate into the nearest band.
    pub fn build_system_prompt(&self, mood: &str, intensity: i32) -> String {
        let mood = Mood::parse(mood);
        let band = IntensityBand::from_intensity(intensity);

        let mut prompt = String::with_capacity(512);
        prompt.push_str(self.guidance_for(mood));
        prompt.push(' ');
        prompt.push_str(self.band_suffix(band));
        prompt.push(' ');
        prompt.push_str(&self.closing);
        prompt
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::builtin()
    }
}

/// User-side phrase sent to the model for a mood check-in.
///
/// The mood label is echoed as the user typed it.
pub fn build_user_text(mood: &str, intensity: i32, message: Option<&str>) -> String {
    match message.map(str::trim).filter(|m| !m.is_empty()) {
        Some(message) => format!("Je me sens {mood} (intensité: {intensity}/10). {message}"),
        None => format!("Je me sens {mood} avec une intensité de {intensity}/10. Peux-tu m'aider ?"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapped_mood_uses_its_guidance() {
        let template = PromptTemplate::builtin();
        let prompt = template.build_system_prompt("sad", 2);

        assert!(prompt.starts_with(defaults::guidance(Mood::Sad).unwrap()));
        assert!(prompt.contains(defaults::LOW_INTENSITY_SUFFIX));
        assert!(prompt.ends_with(defaults::CLOSING_DIRECTIVE));
    }

    #[test]
    fn test_lookup_ignores_case() {
        let template = PromptTemplate::builtin();
        assert_eq!(
            template.build_system_prompt("ANXIOUS", 5),
            template.build_system_prompt("anxious", 5)
        );
    }

    #[test]
    fn test_unknown_moods_get_default_guidance_and_band_suffix() {
        let template = PromptTemplate::builtin();

        for label in ["unknown_mood", "nostalgic", "", "bored"] {
            for (intensity, suffix) in [
                (1, defaults::LOW_INTENSITY_SUFFIX),
                (5, defaults::MEDIUM_INTENSITY_SUFFIX),
                (9, defaults::HIGH_INTENSITY_SUFFIX),
            ] {
                let prompt = template.build_system_prompt(label, intensity);
                let expected = format!(
                    "{} {}",
                    defaults::DEFAULT_GUIDANCE,
                    suffix
                );
                assert!(prompt.starts_with(&expected), "label={label} intensity={intensity}");
            }
        }
    }

    #[test]
    fn test_band_boundaries_pick_adjacent_suffixes() {
        let template = PromptTemplate::builtin();

        assert!(template.build_system_prompt("calm", 3).contains(defaults::LOW_INTENSITY_SUFFIX));
        assert!(template.build_system_prompt("calm", 4).contains(defaults::MEDIUM_INTENSITY_SUFFIX));
        assert!(template.build_system_prompt("calm", 6).contains(defaults::MEDIUM_INTENSITY_SUFFIX));
        assert!(template.build_system_prompt("calm", 7).contains(defaults::HIGH_INTENSITY_SUFFIX));
    }

    #[test]
    fn test_out_of_range_intensity_still_builds() {
        let template = PromptTemplate::builtin();
        assert!(template.build_system_prompt("happy", 0).contains(defaults::LOW_INTENSITY_SUFFIX));
        assert!(template.build_system_prompt("happy", 99).contains(defaults::HIGH_INTENSITY_SUFFIX));
    }

    #[test]
    fn test_unmapped_guidance_is_never_stored() {
        let template = PromptTemplate::builtin().with_guidance(Mood::Unmapped, "ignored");
        assert_eq!(template.guidance_for(Mood::Unmapped), defaults::DEFAULT_GUIDANCE);
    }

    #[test]
    fn test_user_text_variants() {
        assert_eq!(
            build_user_text("sad", 8, None),
            "Je me sens sad avec une intensité de 8/10. Peux-tu m'aider ?"
        );
        assert_eq!(
            build_user_text("sad", 8, Some("Ma journée était longue.")),
            "Je me sens sad (intensité: 8/10). Ma journée était longue."
        );
        assert_eq!(build_user_text("sad", 8, Some("   ")), build_user_text("sad", 8, None));
    }
}
