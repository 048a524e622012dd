// src/companion/tables.rs
// Fallback sentences, chat starters and the optional TOML override file

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::mood::{BandText, IntensityBand, Mood};
use crate::prompt::PromptTemplate;

/// Used only if a sequence somehow ends up empty.
const LAST_RESORT_SENTENCE: &str = "Je suis là pour toi, prends le temps dont tu as besoin.";

#[derive(Debug, Error)]
pub enum TablesError {
    #[error("failed to read response tables from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid response tables: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown mood '{0}' in response tables")]
    UnknownMood(String),

    #[error("fallback sequence for '{0}' is empty")]
    EmptySequence(String),

    #[error("blank text in response tables at '{0}'")]
    BlankText(String),
}

/// Pre-written answers, one per intensity band, used when no model reply is available.
#[derive(Debug, Clone)]
pub struct FallbackTable {
    by_mood: HashMap<Mood, Vec<String>>,
    default: Vec<String>,
}

impl FallbackTable {
    pub fn new(default: Vec<String>) -> Result<Self, TablesError> {
        validate_sequence("default", &default)?;
        Ok(Self {
            by_mood: HashMap::new(),
            default,
        })
    }

    pub fn with_sequence(mut self, mood: Mood, sentences: Vec<String>) -> Result<Self, TablesError> {
        if !mood.is_mapped() {
            return Err(TablesError::UnknownMood(mood.to_string()));
        }
        validate_sequence(mood.as_str(), &sentences)?;
        self.by_mood.insert(mood, sentences);
        Ok(self)
    }

    pub fn builtin() -> Self {
        let by_mood = Mood::MAPPED
            .into_iter()
            .filter_map(|mood| builtin_sequence(mood).map(|seq| (mood, owned(seq))))
            .collect();

        Self {
            by_mood,
            default: owned(BUILTIN_DEFAULT_SEQUENCE),
        }
    }

    pub fn sequence(&self, mood: Mood) -> &[String] {
        self.by_mood.get(&mood).unwrap_or(&self.default)
    }

    /// Sentence for `band`. Short sequences reuse their last entry.
    pub fn select(&self, mood: Mood, band: IntensityBand) -> &str {
        let sequence = self.sequence(mood);
        sequence
            .get(band.index())
            .or_else(|| sequence.last())
            .map(String::as_str)
            .unwrap_or(LAST_RESORT_SENTENCE)
    }
}

/// Conversational prefixes for replies inside an ongoing chat.
#[derive(Debug, Clone)]
pub struct ChatStarterTable {
    starters: BandText,
}

impl ChatStarterTable {
    pub fn new(starters: BandText) -> Result<Self, TablesError> {
        for (band, text) in starters.iter() {
            if text.trim().is_empty() {
                return Err(TablesError::BlankText(format!("starters.{band}")));
            }
        }
        Ok(Self { starters })
    }

    pub fn builtin() -> Self {
        Self {
            starters: BandText::new(
                "Je suis toujours là avec toi. ",
                "Merci de continuer à te confier à moi. ",
                "Je reste à tes côtés, on traverse ça ensemble. ",
            ),
        }
    }

    pub fn starter(&self, band: IntensityBand) -> &str {
        self.starters.get(band)
    }
}

/// All lookup data the companion needs, loaded once at startup.
#[derive(Debug, Clone)]
pub struct CompanionTables {
    pub prompts: PromptTemplate,
    pub fallbacks: FallbackTable,
    pub starters: ChatStarterTable,
}

impl CompanionTables {
    pub fn builtin() -> Self {
        Self {
            prompts: PromptTemplate::builtin(),
            fallbacks: FallbackTable::builtin(),
            starters: ChatStarterTable::builtin(),
        }
    }

    /// Parses a TOML override. Sections that are absent keep the built-in table.
    pub fn from_toml_str(source: &str) -> Result<Self, TablesError> {
        let file: TablesFile = toml::from_str(source)?;
        let mut tables = Self::builtin();

        if let Some(prompt) = file.prompt {
            check_text("prompt.default", &prompt.default)?;
            check_text("prompt.closing", &prompt.closing)?;
            for (band, text) in prompt.bands.iter() {
                check_text(&format!("prompt.bands.{band}"), text)?;
            }

            let mut template = PromptTemplate::new(prompt.default, prompt.bands, prompt.closing);
            for (label, text) in prompt.moods {
                let mood = mapped_mood(&label)?;
                check_text(&format!("prompt.moods.{label}"), &text)?;
                template = template.with_guidance(mood, text);
            }
            tables.prompts = template;
        }

        if let Some(fallback) = file.fallback {
            let mut table = FallbackTable::new(fallback.default)?;
            for (label, sentences) in fallback.moods {
                table = table.with_sequence(mapped_mood(&label)?, sentences)?;
            }
            tables.fallbacks = table;
        }

        if let Some(starters) = file.starters {
            tables.starters = ChatStarterTable::new(starters)?;
        }

        Ok(tables)
    }

    pub fn load(path: &Path) -> Result<Self, TablesError> {
        let source = std::fs::read_to_string(path).map_err(|source| TablesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }
}

impl Default for CompanionTables {
    fn default() -> Self {
        Self::builtin()
    }
}

#[derive(Debug, Deserialize)]
struct TablesFile {
    prompt: Option<PromptSection>,
    fallback: Option<FallbackSection>,
    starters: Option<BandText>,
}

#[derive(Debug, Deserialize)]
struct PromptSection {
    default: String,
    closing: String,
    bands: BandText,
    #[serde(default)]
    moods: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct FallbackSection {
    default: Vec<String>,
    #[serde(default)]
    moods: HashMap<String, Vec<String>>,
}

fn mapped_mood(label: &str) -> Result<Mood, TablesError> {
    match Mood::parse(label) {
        Mood::Unmapped => Err(TablesError::UnknownMood(label.to_string())),
        mood => Ok(mood),
    }
}

fn check_text(location: &str, text: &str) -> Result<(), TablesError> {
    if text.trim().is_empty() {
        return Err(TablesError::BlankText(location.to_string()));
    }
    Ok(())
}

fn validate_sequence(label: &str, sentences: &[String]) -> Result<(), TablesError> {
    if sentences.is_empty() {
        return Err(TablesError::EmptySequence(label.to_string()));
    }
    for (i, sentence) in sentences.iter().enumerate() {
        check_text(&format!("fallback.{label}[{i}]"), sentence)?;
    }
    Ok(())
}

fn owned(sentences: [&str; 3]) -> Vec<String> {
    sentences.iter().map(|s| s.to_string()).collect()
}

const BUILTIN_DEFAULT_SEQUENCE: [&str; 3] = [
    "Merci de partager ce que tu ressens. Prends un instant pour respirer calmement, je suis là pour toi.",
    "Ce que tu vis compte, et tu as le droit de le ressentir. Veux-tu m'en dire un peu plus ?",
    "Ce que tu traverses semble intense, et tu n'es pas seul. Respire profondément, nous allons avancer pas à pas.",
];

fn builtin_sequence(mood: Mood) -> Option<[&'static str; 3]> {
    let sequence = match mood {
        Mood::Happy => [
            "Quelle belle nouvelle ! Savoure ce petit moment de bonheur.",
            "Ta joie fait plaisir à voir ! Qu'est-ce qui a illuminé ta journée ?",
            "Quelle énergie magnifique ! Profite pleinement de ce bonheur et partage-le autour de toi.",
        ],
        Mood::Sad => [
            "Un petit nuage passe, et c'est normal. Accorde-toi un moment de douceur.",
            "Je sens que tu traverses un moment difficile. Tu n'es pas seul, je suis là pour t'écouter.",
            "Ta tristesse est profonde et elle mérite toute mon attention. Respire doucement, je reste avec toi et tu peux tout me dire.",
        ],
        Mood::Anxious => [
            "Un peu d'inquiétude, c'est humain. Prends une grande inspiration et relâche doucement.",
            "L'anxiété est là, mais elle est passagère. Essayons ensemble : inspire sur quatre temps, expire sur six.",
            "Je sens que l'angoisse est forte en ce moment. Pose tes pieds au sol, respire lentement : cette vague va passer, et je suis là.",
        ],
        Mood::Calm => [
            "Quelle douce sérénité. Profite de ce moment de paix.",
            "Ton calme est précieux. Prends le temps de le savourer et de l'ancrer en toi.",
            "Cette paix profonde est un vrai trésor. Laisse-la t'envelopper et garde-la comme un refuge.",
        ],
        Mood::Excited => [
            "Une petite étincelle d'enthousiasme, c'est chouette ! Qu'est-ce qui te motive ?",
            "Ton excitation est contagieuse ! Quel projet te donne autant d'élan ?",
            "Quelle énergie incroyable ! Canalise-la dans quelque chose qui te tient à cœur, tout est possible.",
        ],
        Mood::Angry => [
            "Un peu d'agacement, ça arrive. Prends quelques secondes pour respirer avant de réagir.",
            "Ta colère est légitime. Essaie de mettre des mots sur ce qui t'a blessé, je t'écoute.",
            "Je sens une colère très forte. Éloigne-toi un instant, respire profondément : tu as le droit de ressentir cela, et nous allons l'apaiser ensemble.",
        ],
        Mood::Tired => [
            "Un peu de fatigue, c'est le signe qu'une pause te ferait du bien.",
            "Tu sembles fatigué. Accorde-toi du repos, tu le mérites vraiment.",
            "L'épuisement est lourd à porter. Ralentis, repose-toi sans culpabilité : prendre soin de toi est la priorité.",
        ],
        Mood::Confused => [
            "Un peu de confusion, c'est normal. Prenons les choses une par une.",
            "Tout semble flou en ce moment. Qu'est-ce qui te préoccupe le plus ? Démêlons cela ensemble.",
            "Je comprends que tout soit très embrouillé. Respire, pose-toi, et commençons par une seule pensée à la fois.",
        ],
        Mood::Proud => [
            "Tu peux être fier de toi, chaque petit pas compte !",
            "Bravo ! Ce que tu as accompli mérite d'être célébré.",
            "Quelle réussite ! Tu as travaillé dur pour cela, savoure pleinement cette fierté méritée.",
        ],
        Mood::Unmapped => return None,
    };
    Some(sequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_tables_cover_every_mapped_mood() {
        let table = FallbackTable::builtin();
        for mood in Mood::MAPPED {
            assert_eq!(table.sequence(mood).len(), 3, "mood {mood}");
        }
        assert_eq!(table.sequence(Mood::Unmapped), BUILTIN_DEFAULT_SEQUENCE);
    }

    #[test]
    fn test_select_indexes_by_band() {
        let table = FallbackTable::builtin();
        let seq = table.sequence(Mood::Sad);
        assert_eq!(table.select(Mood::Sad, IntensityBand::Low), seq[0]);
        assert_eq!(table.select(Mood::Sad, IntensityBand::Medium), seq[1]);
        assert_eq!(table.select(Mood::Sad, IntensityBand::High), seq[2]);
    }

    #[test]
    fn test_short_sequences_clamp_to_last_entry() {
        let table = FallbackTable::new(vec!["only one".to_string()])
            .unwrap()
            .with_sequence(Mood::Tired, vec!["rest".to_string(), "sleep".to_string()])
            .unwrap();

        assert_eq!(table.select(Mood::Unmapped, IntensityBand::High), "only one");
        assert_eq!(table.select(Mood::Tired, IntensityBand::Low), "rest");
        assert_eq!(table.select(Mood::Tired, IntensityBand::Medium), "sleep");
        assert_eq!(table.select(Mood::Tired, IntensityBand::High), "sleep");
    }

    #[test]
    fn test_empty_sequences_are_rejected() {
        assert!(matches!(FallbackTable::new(vec![]), Err(TablesError::EmptySequence(_))));
        assert!(matches!(
            FallbackTable::builtin().with_sequence(Mood::Unmapped, vec!["x".to_string()]),
            Err(TablesError::UnknownMood(_))
        ));
    }

    #[test]
    fn test_toml_override_replaces_sections() {
        let source = r#"
            [fallback]
            default = ["d0", "d1", "d2"]

            [fallback.moods]
            Sad = ["s0", "s1", "s2"]

            [starters]
            low = "L "
            medium = "M "
            high = "H "
        "#;

        let tables = CompanionTables::from_toml_str(source).unwrap();
        assert_eq!(tables.fallbacks.select(Mood::Sad, IntensityBand::High), "s2");
        assert_eq!(tables.fallbacks.select(Mood::Happy, IntensityBand::Low), "d0");
        assert_eq!(tables.starters.starter(IntensityBand::Medium), "M ");
        // prompt section absent, built-in kept
        assert_eq!(
            tables.prompts.default_guidance(),
            PromptTemplate::builtin().default_guidance()
        );
    }

    #[test]
    fn test_toml_prompt_section() {
        let source = r#"
            [prompt]
            default = "You are a kind companion."
            closing = "Answer in English."

            [prompt.bands]
            low = "Gently."
            medium = "Attentively."
            high = "Strongly."

            [prompt.moods]
            happy = "The user is happy."
        "#;

        let tables = CompanionTables::from_toml_str(source).unwrap();
        assert_eq!(
            tables.prompts.build_system_prompt("happy", 8),
            "The user is happy. Strongly. Answer in English."
        );
        assert_eq!(
            tables.prompts.build_system_prompt("lost", 1),
            "You are a kind companion. Gently. Answer in English."
        );
    }

    #[test]
    fn test_toml_rejects_bad_content() {
        let unknown = "[fallback]\ndefault = [\"a\"]\n[fallback.moods]\nnostalgic = [\"b\"]\n";
        assert!(matches!(
            CompanionTables::from_toml_str(unknown),
            Err(TablesError::UnknownMood(_))
        ));

        let empty = "[fallback]\ndefault = []\n";
        assert!(matches!(
            CompanionTables::from_toml_str(empty),
            Err(TablesError::EmptySequence(_))
        ));

        let blank = "[starters]\nlow = \" \"\nmedium = \"m\"\nhigh = \"h\"\n";
        assert!(matches!(
            CompanionTables::from_toml_str(blank),
            Err(TablesError::BlankText(_))
        ));

        assert!(matches!(
            CompanionTables::from_toml_str("[fallback"),
            Err(TablesError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[fallback]\ndefault = [\"from file\"]").unwrap();

        let tables = CompanionTables::load(file.path()).unwrap();
        assert_eq!(tables.fallbacks.select(Mood::Unmapped, IntensityBand::Medium), "from file");

        let missing = CompanionTables::load(Path::new("/nonexistent/companion.toml"));
        assert!(matches!(missing, Err(TablesError::Io { .. })));
    }

    #[test]
    fn test_demo_table_file_parses() {
        let tables =
            CompanionTables::from_toml_str(include_str!("../../demos/responses.example.toml")).unwrap();

        assert_eq!(
            tables.fallbacks.select(Mood::Tired, IntensityBand::High),
            "La fatigue s'accumule. Accorde-toi une vraie pause aujourd'hui."
        );
        assert_eq!(tables.starters.starter(IntensityBand::Low), "Je t'entends. ");
        assert!(tables.prompts.build_system_prompt("sad", 2).starts_with("La personne se sent triste."));
    }
}
