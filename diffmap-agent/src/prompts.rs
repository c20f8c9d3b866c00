//! Prompt templates and response schemas for the pipeline's model calls.

use diffmap_core::{Competitor, FeatureMatrix, SearchHit};
use serde_json::json;

/// Search query derived from the idea text.
pub fn discovery_search_query(idea: &str) -> String {
    format!(
        "top competitors and alternatives for {idea}, include company names, websites, and features"
    )
}

/// Discovery prompt: the idea plus numbered search snippets, asking for a
/// structured competitor list.
pub fn discovery_prompt(idea: &str, hits: &[SearchHit]) -> String {
    let mut snippets = String::new();
    for (i, hit) in hits.iter().enumerate() {
        snippets.push_str(&format!(
            "{}. {}\n   {}\n   Source: {}\n",
            i + 1,
            hit.title,
            hit.snippet,
            hit.url
        ));
    }

    format!(
        "You are a market analyst. A founder is exploring this startup idea:\n\
         \n{idea}\n\n\
         Web search returned these results:\n\n{snippets}\n\
         From the search results, identify the real competitor companies for this idea. \
         Skip comparison sites, directories, and review aggregators. For each competitor \
         return its name, a one-to-two sentence description, a list of notable features, \
         and the source URLs (from the results above) that mention it.\n\n\
         Respond with a JSON array of objects with keys: name, description, \
         notable_features, source_urls. Return an empty array if no real competitors appear."
    )
}

pub fn competitor_list_schema() -> serde_json::Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "name": { "type": "STRING" },
                "description": { "type": "STRING" },
                "notable_features": { "type": "ARRAY", "items": { "type": "STRING" } },
                "source_urls": { "type": "ARRAY", "items": { "type": "STRING" } }
            },
            "required": ["name", "description"]
        }
    })
}

/// Matrix prompt: per-competitor descriptions and features, asking for a
/// unified feature list and presence values.
pub fn matrix_prompt(competitors: &[Competitor]) -> String {
    let mut listing = String::new();
    for comp in competitors {
        listing.push_str(&format!("- {}: {}\n", comp.name, comp.description));
        if !comp.notable_features.is_empty() {
            listing.push_str(&format!("  Known features: {}\n", comp.notable_features.join(", ")));
        }
    }

    format!(
        "You are a product analyst comparing these competitors:\n\n{listing}\n\
         Infer a single list of 5-10 comparable product features across all of them, then \
         rate each competitor on each feature.\n\n\
         Respond with a JSON object of the form:\n\
         {{\n\
           \"features\": [\"feature one\", \"feature two\", ...],\n\
           \"matrix\": {{\n\
             \"<competitor name>\": {{ \"<feature>\": true | false | \"short note\" }}\n\
           }}\n\
         }}\n\n\
         Use the competitor names exactly as given. Use a boolean where presence is clear \
         and a short qualitative note (e.g. \"beta\", \"enterprise only\") where it is not."
    )
}

/// Strategist prompt embedding both the competitor list and the matrix.
pub fn strategist_prompt(idea: &str, competitors: &[Competitor], matrix: &FeatureMatrix) -> String {
    let competitors_json =
        serde_json::to_string_pretty(competitors).unwrap_or_else(|_| "[]".to_string());
    let matrix_json = serde_json::to_string_pretty(matrix).unwrap_or_else(|_| "{}".to_string());

    format!(
        "You are a business strategy consultant. A founder is building:\n\n{idea}\n\n\
         The competitive landscape:\n{competitors_json}\n\n\
         The feature comparison matrix (competitor -> feature -> presence):\n{matrix_json}\n\n\
         Produce a differentiation report. Respond with a JSON object with keys:\n\
         - gaps: 3-5 concrete feature or market gaps none of the competitors cover\n\
         - opportunities: 3-5 specific, actionable positioning opportunities\n\
         - positioning_narrative: a short paragraph recommending how this startup should \
           position itself against these competitors"
    )
}

pub fn report_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "gaps": { "type": "ARRAY", "items": { "type": "STRING" } },
            "opportunities": { "type": "ARRAY", "items": { "type": "STRING" } },
            "positioning_narrative": { "type": "STRING" }
        },
        "required": ["positioning_narrative"]
    })
}
