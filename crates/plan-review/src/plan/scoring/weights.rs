use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Upper bound for `fieldMaxScore`; keeps plan totals far from `u32` limits.
pub const FIELD_MAX_SCORE_LIMIT: u32 = 1_000;

/// Heuristic scoring policy. Every constant the field rules use lives here so
/// it can be tuned from a JSON file without touching the rules themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoringWeights {
    /// Ceiling applied to every field score.
    pub field_max_score: u32,
    /// Flat score for select, date, and chart fields.
    pub default_score: u32,
    pub text: TextWeights,
    pub numeric: NumericWeights,
    pub table: TableWeights,
    pub multiselect: MultiselectWeights,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            field_max_score: 10,
            default_score: 5,
            text: TextWeights::default(),
            numeric: NumericWeights::default(),
            table: TableWeights::default(),
            multiselect: MultiselectWeights::default(),
        }
    }
}

impl ScoringWeights {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, WeightsError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| WeightsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse a (possibly partial) weights document; omitted keys keep their defaults.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, WeightsError> {
        let weights: Self = serde_json::from_reader(reader)?;
        weights.check()?;
        Ok(weights)
    }

    fn check(&self) -> Result<(), WeightsError> {
        if self.field_max_score == 0 {
            return Err(WeightsError::ZeroFieldMax);
        }
        if self.field_max_score > FIELD_MAX_SCORE_LIMIT {
            return Err(WeightsError::FieldMaxTooLarge(self.field_max_score));
        }
        if let Some(tier) = self
            .table
            .fill_tiers
            .iter()
            .find(|tier| tier.min_percent > 100)
        {
            return Err(WeightsError::FillTierOutOfRange(tier.min_percent));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WeightsError {
    #[error("unable to read scoring weights from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("scoring weights are not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("fieldMaxScore must be greater than zero")]
    ZeroFieldMax,
    #[error("fieldMaxScore of {0} exceeds the limit of {limit}", limit = FIELD_MAX_SCORE_LIMIT)]
    FieldMaxTooLarge(u32),
    #[error("table fill tier of {0}% exceeds 100%")]
    FillTierOutOfRange(u32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextWeights {
    pub base: u32,
    /// Cumulative: every tier whose length is reached adds its points.
    pub length_tiers: Vec<LengthTier>,
    pub keyword_bonus: u32,
    pub generic_keywords: Vec<String>,
    /// Checked in order; the first group whose fragment occurs in the field id
    /// replaces the generic keyword list.
    pub topic_keywords: Vec<TopicKeywords>,
}

impl Default for TextWeights {
    fn default() -> Self {
        Self {
            base: 4,
            length_tiers: vec![
                LengthTier {
                    min_chars: 50,
                    points: 2,
                },
                LengthTier {
                    min_chars: 100,
                    points: 2,
                },
            ],
            keyword_bonus: 2,
            generic_keywords: words(&[
                "business", "customer", "client", "market", "product", "service", "revenue",
                "growth", "strategy", "value", "negocio", "cliente", "mercado", "producto",
                "servicio", "ingresos", "estrategia",
            ]),
            topic_keywords: vec![
                TopicKeywords::new(
                    &["problem"],
                    &[
                        "problem", "pain", "need", "challenge", "gap", "problema", "necesidad",
                        "dificultad",
                    ],
                ),
                TopicKeywords::new(
                    &["solution"],
                    &[
                        "solution", "product", "service", "platform", "innovation", "benefit",
                        "solución", "producto", "servicio", "innovación",
                    ],
                ),
                TopicKeywords::new(
                    &["market"],
                    &[
                        "market", "customer", "segment", "competition", "competitor", "demand",
                        "mercado", "cliente", "segmento", "competencia",
                    ],
                ),
                TopicKeywords::new(
                    &["financial", "finance"],
                    &[
                        "revenue", "cost", "profit", "margin", "cash flow", "investment",
                        "break-even", "ingresos", "costos", "utilidad", "inversión",
                    ],
                ),
            ],
        }
    }
}

impl TextWeights {
    /// Keyword list that applies to a field: the first matching topic, else the generic list.
    pub fn keywords_for(&self, field_id: &str) -> &[String] {
        let field_id = field_id.to_lowercase();
        self.topic_keywords
            .iter()
            .find(|topic| topic.matches(&field_id))
            .map(|topic| topic.keywords.as_slice())
            .unwrap_or(self.generic_keywords.as_slice())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LengthTier {
    pub min_chars: usize,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicKeywords {
    pub id_fragments: Vec<String>,
    pub keywords: Vec<String>,
}

impl TopicKeywords {
    pub fn new(id_fragments: &[&str], keywords: &[&str]) -> Self {
        Self {
            id_fragments: words(id_fragments),
            keywords: words(keywords),
        }
    }

    fn matches(&self, lowercase_id: &str) -> bool {
        self.id_fragments
            .iter()
            .any(|fragment| lowercase_id.contains(&fragment.to_lowercase()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NumericWeights {
    pub base: u32,
    /// Cumulative tiers applied to every numeric field.
    pub magnitude_tiers: Vec<MagnitudeTier>,
    /// Checked in order; only the first group whose fragment occurs in the field id applies.
    pub domain_bonuses: Vec<DomainBonus>,
}

impl Default for NumericWeights {
    fn default() -> Self {
        Self {
            base: 5,
            magnitude_tiers: vec![MagnitudeTier::new(1.0, 2), MagnitudeTier::new(10_000.0, 2)],
            domain_bonuses: vec![
                DomainBonus::new(
                    &["revenue", "income"],
                    vec![MagnitudeTier::new(0.0, 3), MagnitudeTier::new(10_000.0, 2)],
                ),
                DomainBonus::new(
                    &["employees", "team"],
                    vec![MagnitudeTier::new(1.0, 3), MagnitudeTier::new(5.0, 2)],
                ),
                DomainBonus::new(
                    &["funding", "investment"],
                    vec![MagnitudeTier::new(1_000.0, 3), MagnitudeTier::new(50_000.0, 2)],
                ),
            ],
        }
    }
}

impl NumericWeights {
    pub fn domain_bonus_for(&self, field_id: &str) -> Option<&DomainBonus> {
        let field_id = field_id.to_lowercase();
        self.domain_bonuses.iter().find(|bonus| {
            bonus
                .id_fragments
                .iter()
                .any(|fragment| field_id.contains(&fragment.to_lowercase()))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MagnitudeTier {
    pub at_least: f64,
    pub points: u32,
}

impl MagnitudeTier {
    pub fn new(at_least: f64, points: u32) -> Self {
        Self { at_least, points }
    }
}

/// Sum of the points of every tier `value` reaches.
pub(crate) fn magnitude_points(tiers: &[MagnitudeTier], value: f64) -> u32 {
    tiers
        .iter()
        .filter(|tier| value >= tier.at_least)
        .map(|tier| tier.points)
        .sum()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainBonus {
    pub id_fragments: Vec<String>,
    pub tiers: Vec<MagnitudeTier>,
}

impl DomainBonus {
    pub fn new(id_fragments: &[&str], tiers: Vec<MagnitudeTier>) -> Self {
        Self {
            id_fragments: words(id_fragments),
            tiers,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableWeights {
    pub base: u32,
    /// Exclusive: only the highest tier reached applies. Below every tier a
    /// low-fill warning is raised instead.
    pub fill_tiers: Vec<FillTier>,
}

impl Default for TableWeights {
    fn default() -> Self {
        Self {
            base: 5,
            fill_tiers: vec![
                FillTier {
                    min_percent: 80,
                    points: 3,
                },
                FillTier {
                    min_percent: 50,
                    points: 2,
                },
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillTier {
    pub min_percent: u32,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MultiselectWeights {
    pub base: u32,
    /// Cumulative.
    pub selection_tiers: Vec<SelectionTier>,
}

impl Default for MultiselectWeights {
    fn default() -> Self {
        Self {
            base: 3,
            selection_tiers: vec![
                SelectionTier {
                    min_selected: 3,
                    points: 2,
                },
                SelectionTier {
                    min_selected: 5,
                    points: 2,
                },
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionTier {
    pub min_selected: usize,
    pub points: u32,
}

fn words(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}
