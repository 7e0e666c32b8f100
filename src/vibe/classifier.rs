use std::sync::Arc;

use tracing::{debug, warn};

use crate::llm::LanguageModel;

use super::genres::{GENRE_WHITELIST, MAX_GENRES};

/// Outcome of classifying a vibe.
///
/// Both paths carry 1..=5 tags; the variant records which path produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Primary(Vec<String>),
    Fallback(Vec<String>),
}

impl Classification {
    pub fn tags(&self) -> &[String] {
        match self {
            Classification::Primary(tags) | Classification::Fallback(tags) => tags,
        }
    }

    pub fn into_tags(self) -> Vec<String> {
        match self {
            Classification::Primary(tags) | Classification::Fallback(tags) => tags,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Classification::Fallback(_))
    }
}

/// Tags a vibe with genres through a language model.
#[derive(Clone)]
pub struct VibeClassifier {
    model: Arc<dyn LanguageModel>,
}

impl VibeClassifier {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Classifies a vibe. Never fails: any model error or unusable output
    /// switches to the offline keyword heuristic.
    pub async fn classify(&self, vibe: &str) -> Classification {
        let prompt = build_prompt(vibe);

        match self.model.complete(&prompt).await {
            Ok(text) => {
                let tags = parse_genre_list(&text);
                if tags.is_empty() {
                    warn!(vibe, "language model returned no genres, using fallback");
                    Classification::Fallback(fallback_genres(vibe))
                } else {
                    debug!(?tags, "language model genres");
                    Classification::Primary(tags)
                }
            }
            Err(e) => {
                warn!(vibe, error = %e, code = e.code(), "genre classification failed, using fallback");
                Classification::Fallback(fallback_genres(vibe))
            }
        }
    }
}

pub fn build_prompt(vibe: &str) -> String {
    format!(
        "User vibe: \"{vibe}\"\n\n\
         Based on this vibe, suggest 3-5 Spotify genres from this list:\n\
         {genres}\n\n\
         Consider the mood, energy level, and context. Return only the genre names separated by commas, no explanations.",
        genres = GENRE_WHITELIST.join(", ")
    )
}

/// Splits a comma-separated completion into at most five trimmed tags.
pub fn parse_genre_list(text: &str) -> Vec<String> {
    text.trim()
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .take(MAX_GENRES)
        .map(str::to_string)
        .collect()
}

/// Offline keyword heuristic used when the model is unavailable.
pub fn fallback_genres(vibe: &str) -> Vec<String> {
    let vibe = vibe.to_lowercase();
    let genres: [&str; 3] = if vibe.contains("chill") || vibe.contains("relax") {
        ["chill", "ambient", "acoustic"]
    } else if vibe.contains("energy") || vibe.contains("workout") {
        ["electronic", "dance", "pop"]
    } else {
        ["pop", "indie", "alternative"]
    };
    genres.iter().map(|g| g.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::{Error, Res};

    struct ScriptedModel {
        reply: Res<String>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedModel {
        fn ok(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: Err(Error::Classification("provider down".into())),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LanguageModel for ScriptedModel {
        async fn complete(&self, prompt: &str) -> Res<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(e) => Err(Error::Classification(e.to_string())),
            }
        }
    }

    #[tokio::test]
    async fn primary_path_splits_and_trims() {
        let model = ScriptedModel::ok(" electronic, dance ,  , pop\n");
        let classifier = VibeClassifier::new(model.clone());

        let result = classifier.classify("coding energy").await;
        assert_eq!(
            result,
            Classification::Primary(vec![
                "electronic".to_string(),
                "dance".to_string(),
                "pop".to_string()
            ])
        );

        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("User vibe: \"coding energy\""));
        assert!(prompts[0].contains("world-music"));
    }

    #[tokio::test]
    async fn primary_path_truncates_to_five() {
        let classifier = VibeClassifier::new(ScriptedModel::ok("a, b, c, d, e, f, g"));
        let result = classifier.classify("anything").await;
        assert_eq!(result.tags().len(), 5);
        assert!(!result.is_fallback());
    }

    #[tokio::test]
    async fn model_failure_uses_fallback() {
        let classifier = VibeClassifier::new(ScriptedModel::failing());

        let chill = classifier.classify("Sunday chill").await;
        assert_eq!(chill, Classification::Fallback(fallback_genres("chill")));
        assert_eq!(chill.tags(), ["chill", "ambient", "acoustic"]);

        let workout = classifier.classify("morning WORKOUT").await;
        assert_eq!(workout.tags(), ["electronic", "dance", "pop"]);

        let other = classifier.classify("rainy window").await;
        assert_eq!(other.tags(), ["pop", "indie", "alternative"]);
    }

    #[tokio::test]
    async fn blank_completion_uses_fallback() {
        let classifier = VibeClassifier::new(ScriptedModel::ok(" , ,\n"));
        let result = classifier.classify("relax by the sea").await;
        assert!(result.is_fallback());
        assert_eq!(result.into_tags(), vec!["chill", "ambient", "acoustic"]);
    }

    #[tokio::test]
    async fn classification_always_yields_one_to_five_tags() {
        for reply in ["", "pop", "a,b,c,d,e,f,g,h", ",,,"] {
            let classifier = VibeClassifier::new(ScriptedModel::ok(reply));
            let n = classifier.classify("late night drive").await.tags().len();
            assert!((1..=5).contains(&n), "{reply:?} produced {n} tags");
        }
        let classifier = VibeClassifier::new(ScriptedModel::failing());
        let n = classifier.classify("late night drive").await.tags().len();
        assert!((1..=5).contains(&n));
    }

    #[test]
    fn energy_triggers_genre_fallback_but_chill_wins() {
        assert_eq!(fallback_genres("chill energy"), vec!["chill", "ambient", "acoustic"]);
    }
}
