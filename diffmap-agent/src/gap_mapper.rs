use diffmap_core::{
    ChartRow, Competitor, DiffmapError, FeatureGap, FeatureGapChart, FeatureMatrix, GapKind,
    Result,
};
use std::collections::BTreeSet;

/// Deterministic, local projection of the feature matrix into a
/// chart-ready structure. No external calls.
pub struct VisualGapMapperAgent;

impl VisualGapMapperAgent {
    pub fn new() -> Self {
        Self
    }

    /// An empty matrix renders as an empty placeholder chart. A matrix row
    /// naming an unknown competitor is a render error; the matrix builder
    /// should have dropped it.
    pub fn map(
        &self,
        competitors: &[Competitor],
        matrix: &FeatureMatrix,
    ) -> Result<FeatureGapChart> {
        if matrix.is_empty() {
            return Ok(FeatureGapChart::empty());
        }

        let known: BTreeSet<&str> = competitors.iter().map(|c| c.name.as_str()).collect();
        for name in matrix.competitor_names() {
            if !known.contains(name.as_str()) {
                return Err(DiffmapError::Render(format!(
                    "matrix references unknown competitor '{name}'"
                )));
            }
        }

        let competitor_axis = matrix.competitor_names();
        let feature_axis = matrix.feature_names();

        let mut rows = Vec::with_capacity(feature_axis.len());
        let mut gaps = Vec::new();

        for feature in &feature_axis {
            let mut presence = Vec::with_capacity(competitor_axis.len());
            let mut covered_by = Vec::new();

            for competitor in &competitor_axis {
                let present = matrix
                    .presence(competitor, feature)
                    .map(|p| p.is_present())
                    .unwrap_or(false);
                presence.push(u8::from(present));
                if present {
                    covered_by.push(competitor.clone());
                }
            }

            // No competitor covers it -> complete gap; fewer than half
            // cover it -> partial gap.
            if covered_by.is_empty() {
                gaps.push(FeatureGap {
                    feature: feature.clone(),
                    kind: GapKind::Complete,
                    covered_by: Vec::new(),
                });
            } else if covered_by.len() * 2 < competitor_axis.len() {
                gaps.push(FeatureGap {
                    feature: feature.clone(),
                    kind: GapKind::Partial,
                    covered_by: covered_by.clone(),
                });
            }

            rows.push(ChartRow { feature: feature.clone(), presence });
        }

        Ok(FeatureGapChart { competitors: competitor_axis, features: feature_axis, rows, gaps })
    }
}

impl Default for VisualGapMapperAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diffmap_core::Presence;

    fn competitors() -> Vec<Competitor> {
        vec![
            Competitor::new("Acme", "Widget platform"),
            Competitor::new("Beta Corp", "Widget vendor"),
            Competitor::new("Gamma", "Widget reseller"),
        ]
    }

    #[test]
    fn test_empty_matrix_renders_placeholder() {
        let chart = VisualGapMapperAgent::new().map(&competitors(), &FeatureMatrix::new()).unwrap();
        assert!(chart.is_empty());
        assert!(chart.gaps.is_empty());
    }

    #[test]
    fn test_chart_axes_and_cells() {
        let mut matrix = FeatureMatrix::new();
        matrix.insert("Acme", "api", Presence::Flag(true));
        matrix.insert("Beta Corp", "api", Presence::Flag(false));
        matrix.insert("Gamma", "api", Presence::Note("beta".into()));

        let chart = VisualGapMapperAgent::new().map(&competitors(), &matrix).unwrap();

        assert_eq!(chart.competitors, vec!["Acme", "Beta Corp", "Gamma"]);
        assert_eq!(chart.features, vec!["api"]);
        assert_eq!(chart.rows[0].presence, vec![1, 0, 1]);
    }

    #[test]
    fn test_gap_classification() {
        let mut matrix = FeatureMatrix::new();
        // "api": everyone has it (no gap). "sso": one of three (partial).
        // "audit log": nobody (complete).
        for name in ["Acme", "Beta Corp", "Gamma"] {
            matrix.insert(name, "api", Presence::Flag(true));
            matrix.insert(name, "audit log", Presence::Flag(false));
        }
        matrix.insert("Acme", "sso", Presence::Flag(true));
        matrix.insert("Beta Corp", "sso", Presence::Flag(false));
        matrix.insert("Gamma", "sso", Presence::Flag(false));

        let chart = VisualGapMapperAgent::new().map(&competitors(), &matrix).unwrap();

        assert_eq!(chart.gaps.len(), 2);
        let complete = chart.gaps.iter().find(|g| g.feature == "audit log").unwrap();
        assert_eq!(complete.kind, GapKind::Complete);

        let partial = chart.gaps.iter().find(|g| g.feature == "sso").unwrap();
        assert_eq!(partial.kind, GapKind::Partial);
        assert_eq!(partial.covered_by, vec!["Acme"]);
    }

    #[test]
    fn test_unknown_competitor_is_render_error() {
        let mut matrix = FeatureMatrix::new();
        matrix.insert("Ghost Inc", "api", Presence::Flag(true));

        let err = VisualGapMapperAgent::new().map(&competitors(), &matrix).unwrap_err();
        assert!(matches!(err, DiffmapError::Render(_)));
    }

    #[test]
    fn test_map_is_deterministic() {
        let mut matrix = FeatureMatrix::new();
        matrix.insert("Acme", "api", Presence::Flag(true));
        matrix.insert("Beta Corp", "sso", Presence::Flag(true));

        let mapper = VisualGapMapperAgent::new();
        let first = mapper.map(&competitors(), &matrix).unwrap();
        let second = mapper.map(&competitors(), &matrix).unwrap();
        assert_eq!(first, second);
    }
}
