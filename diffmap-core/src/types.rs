use crate::{DiffmapError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

/// Upper bound on search snippets handed to the discovery prompt.
pub const MAX_SEARCH_RESULTS: usize = 10;

/// The user-submitted startup idea. Validated once, immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Query(String);

impl Query {
    /// Trims the raw idea text and rejects empty or whitespace-only input.
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let trimmed = raw.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(DiffmapError::InvalidInput(
                "idea text is empty or whitespace-only".to_string(),
            ));
        }
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One web search result, in provider order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub snippet: String,
    pub url: String,
}

/// A discovered market player. Created by discovery, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub notable_features: Vec<String>,
    #[serde(default)]
    pub source_urls: BTreeSet<String>,
}

impl Competitor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            notable_features: Vec::new(),
            source_urls: BTreeSet::new(),
        }
    }

    pub fn with_feature(mut self, feature: impl Into<String>) -> Self {
        self.notable_features.push(feature.into());
        self
    }

    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_urls.insert(url.into());
        self
    }
}

/// Presence of one feature for one competitor: a boolean or a short
/// qualitative note (e.g. "beta", "enterprise only").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Presence {
    Flag(bool),
    Note(String),
}

impl Presence {
    /// Chart semantics: notes count as present unless they read as a negative.
    pub fn is_present(&self) -> bool {
        match self {
            Presence::Flag(b) => *b,
            Presence::Note(s) => {
                let s = s.trim();
                !s.is_empty()
                    && !s.eq_ignore_ascii_case("no")
                    && !s.eq_ignore_ascii_case("none")
                    && !s.eq_ignore_ascii_case("n/a")
            }
        }
    }
}

/// Competitor × feature presence table. BTreeMaps keep display order stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureMatrix {
    entries: BTreeMap<String, BTreeMap<String, Presence>>,
}

impl FeatureMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of competitor rows.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn insert(
        &mut self,
        competitor: impl Into<String>,
        feature: impl Into<String>,
        presence: Presence,
    ) {
        self.entries.entry(competitor.into()).or_default().insert(feature.into(), presence);
    }

    /// Adds an empty row so the competitor appears even with no known features.
    pub fn ensure_row(&mut self, competitor: impl Into<String>) {
        self.entries.entry(competitor.into()).or_default();
    }

    pub fn competitor_names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Union of feature names across all competitors, sorted.
    pub fn feature_names(&self) -> Vec<String> {
        let mut names = BTreeSet::new();
        for row in self.entries.values() {
            names.extend(row.keys().cloned());
        }
        names.into_iter().collect()
    }

    pub fn presence(&self, competitor: &str, feature: &str) -> Option<&Presence> {
        self.entries.get(competitor).and_then(|row| row.get(feature))
    }

    pub fn row(&self, competitor: &str) -> Option<&BTreeMap<String, Presence>> {
        self.entries.get(competitor)
    }

    pub fn rows(&self) -> impl Iterator<Item = (&String, &BTreeMap<String, Presence>)> {
        self.entries.iter()
    }

    /// Drops rows whose competitor is not in `known`, returning the removed
    /// names. Enforces the no-orphan-keys invariant.
    pub fn retain_competitors(&mut self, known: &BTreeSet<String>) -> Vec<String> {
        let orphans: Vec<String> =
            self.entries.keys().filter(|name| !known.contains(*name)).cloned().collect();
        for name in &orphans {
            self.entries.remove(name);
        }
        orphans
    }
}

/// Narrative output of the strategist step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifferentiationReport {
    #[serde(default)]
    pub gaps: Vec<String>,
    #[serde(default)]
    pub opportunities: Vec<String>,
    pub positioning_narrative: String,
}

impl DifferentiationReport {
    /// Stand-in report used when the strategist call fails (degrade, not abort).
    pub fn placeholder() -> Self {
        Self {
            gaps: Vec::new(),
            opportunities: Vec::new(),
            positioning_narrative:
                "Differentiation analysis could not be completed for this run.".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapKind {
    /// No competitor covers the feature.
    Complete,
    /// Fewer than half of the competitors cover the feature.
    Partial,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureGap {
    pub feature: String,
    pub kind: GapKind,
    #[serde(default)]
    pub covered_by: Vec<String>,
}

/// One chart row: a feature with a 0/1 cell per competitor, in axis order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRow {
    pub feature: String,
    pub presence: Vec<u8>,
}

/// Chart-ready projection of a feature matrix: competitor axis, feature
/// axis, heatmap cells, and classified gaps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureGapChart {
    pub competitors: Vec<String>,
    pub features: Vec<String>,
    pub rows: Vec<ChartRow>,
    pub gaps: Vec<FeatureGap>,
}

impl FeatureGapChart {
    /// Placeholder chart rendered when the matrix was empty.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.competitors.is_empty() && self.features.is_empty()
    }
}

/// The complete, exportable result of one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisBundle {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub query: Query,
    pub competitors: Vec<Competitor>,
    pub feature_matrix: FeatureMatrix,
    pub report: DifferentiationReport,
    pub chart: FeatureGapChart,
    /// Human-readable notices for steps that degraded instead of failing.
    #[serde(default)]
    pub notices: Vec<String>,
}

impl AnalysisBundle {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// File name for the JSON download, matching the exported artifact shape.
    pub fn export_file_name(&self) -> String {
        format!("competitor_analysis_{}.json", self.generated_at.format("%Y%m%d_%H%M%S"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_rejects_blank_input() {
        assert!(Query::new("").is_err());
        assert!(Query::new("   \t\n").is_err());
    }

    #[test]
    fn test_query_trims() {
        let q = Query::new("  artisanal coffee boxes  ").unwrap();
        assert_eq!(q.as_str(), "artisanal coffee boxes");
    }

    #[test]
    fn test_competitor_builder() {
        let comp = Competitor::new("Acme", "Widgets as a service")
            .with_feature("API access")
            .with_source_url("https://acme.example");
        assert_eq!(comp.notable_features, vec!["API access"]);
        assert!(comp.source_urls.contains("https://acme.example"));
    }

    #[test]
    fn test_presence_semantics() {
        assert!(Presence::Flag(true).is_present());
        assert!(!Presence::Flag(false).is_present());
        assert!(Presence::Note("beta".into()).is_present());
        assert!(!Presence::Note("no".into()).is_present());
        assert!(!Presence::Note("N/A".into()).is_present());
        assert!(!Presence::Note("  ".into()).is_present());
    }

    #[test]
    fn test_presence_serde_untagged() {
        let flag: Presence = serde_json::from_str("true").unwrap();
        assert_eq!(flag, Presence::Flag(true));

        let note: Presence = serde_json::from_str("\"partial\"").unwrap();
        assert_eq!(note, Presence::Note("partial".into()));

        assert_eq!(serde_json::to_string(&Presence::Flag(false)).unwrap(), "false");
    }

    #[test]
    fn test_feature_matrix_union_and_order() {
        let mut matrix = FeatureMatrix::new();
        matrix.insert("Beta Corp", "mobile app", Presence::Flag(true));
        matrix.insert("Acme", "api", Presence::Flag(true));
        matrix.insert("Acme", "mobile app", Presence::Flag(false));

        assert_eq!(matrix.competitor_names(), vec!["Acme", "Beta Corp"]);
        assert_eq!(matrix.feature_names(), vec!["api", "mobile app"]);
        assert_eq!(matrix.presence("Acme", "api"), Some(&Presence::Flag(true)));
        assert_eq!(matrix.presence("Beta Corp", "api"), None);
    }

    #[test]
    fn test_feature_matrix_retain_drops_orphans() {
        let mut matrix = FeatureMatrix::new();
        matrix.insert("Acme", "api", Presence::Flag(true));
        matrix.insert("Ghost Inc", "api", Presence::Flag(true));

        let known: BTreeSet<String> = ["Acme".to_string()].into_iter().collect();
        let orphans = matrix.retain_competitors(&known);

        assert_eq!(orphans, vec!["Ghost Inc"]);
        assert_eq!(matrix.competitor_names(), vec!["Acme"]);
    }

    #[test]
    fn test_bundle_round_trip() {
        let mut matrix = FeatureMatrix::new();
        matrix.insert("Acme", "api", Presence::Flag(true));
        matrix.insert("Acme", "sso", Presence::Note("enterprise only".into()));

        let bundle = AnalysisBundle {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            query: Query::new("a devtools startup").unwrap(),
            competitors: vec![Competitor::new("Acme", "Widgets")],
            feature_matrix: matrix,
            report: DifferentiationReport {
                gaps: vec!["no self-serve tier".into()],
                opportunities: vec!["SMB segment".into()],
                positioning_narrative: "Go down-market.".into(),
            },
            chart: FeatureGapChart::empty(),
            notices: vec![],
        };

        let encoded = bundle.to_json_pretty().unwrap();
        let decoded: AnalysisBundle = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded.query, bundle.query);
        assert_eq!(decoded.competitors, bundle.competitors);
        assert_eq!(decoded.feature_matrix, bundle.feature_matrix);
        assert_eq!(decoded.report.positioning_narrative, "Go down-market.");
    }

    #[test]
    fn test_export_file_name() {
        let bundle = AnalysisBundle {
            id: Uuid::new_v4(),
            generated_at: "2026-08-24T10:30:00Z".parse().unwrap(),
            query: Query::new("x").unwrap(),
            competitors: vec![],
            feature_matrix: FeatureMatrix::new(),
            report: DifferentiationReport::placeholder(),
            chart: FeatureGapChart::empty(),
            notices: vec![],
        };
        assert_eq!(bundle.export_file_name(), "competitor_analysis_20260824_103000.json");
    }
}
