use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use shopwise_core::catalog::Catalog;
use shopwise_core::confidence::{calculate_confidence, confidence_label};
use shopwise_core::domain::recommendation::ProductRecommendation;
use shopwise_core::domain::session::{BehaviorEvent, SessionProfile};
use shopwise_core::learner::{create_default_profile, track_event};
use shopwise_core::narrative::price_sensitivity_insight;
use shopwise_core::recommendations::{
    PageKind, RecommendRequest, RecommendationContext, RecommendationEngine,
};

use crate::commands::{CommandResult, EXIT_INPUT};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SimulationReport {
    events_replayed: usize,
    learning_status: &'static str,
    profile: SessionProfile,
    message: String,
    confidence: f64,
    session_insight: String,
    price_sensitivity_insight: &'static str,
    recommendations: Vec<ProductRecommendation>,
}

pub fn run(events_path: &Path, query: Option<&str>, limit: Option<usize>) -> CommandResult {
    let events = match load_events(events_path) {
        Ok(events) => events,
        Err(error) => {
            return CommandResult::failure("simulate", "input", format!("{error:#}"), EXIT_INPUT);
        }
    };

    CommandResult::json("simulate", &simulate(&Catalog::seeded(), &events, query, limit))
}

fn load_events(path: &Path) -> anyhow::Result<Vec<BehaviorEvent>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read events file `{}`", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("events file `{}` is not a JSON array of events", path.display()))
}

fn simulate(
    catalog: &Catalog,
    events: &[BehaviorEvent],
    query: Option<&str>,
    limit: Option<usize>,
) -> SimulationReport {
    let profile = events
        .iter()
        .fold(create_default_profile(), |profile, event| track_event(&profile, event, catalog));

    let mut context = RecommendationContext::new(PageKind::Home);
    context.limit = limit;
    let mut request = RecommendRequest::new(context);
    if let Some(query) = query {
        request = request.with_chat_query(query);
    }

    let response = RecommendationEngine::new(catalog).recommend(&profile, &request);

    SimulationReport {
        events_replayed: events.len(),
        learning_status: confidence_label(calculate_confidence(&profile, &[])),
        price_sensitivity_insight: price_sensitivity_insight(profile.price_range.sensitivity),
        message: response.message,
        confidence: response.confidence,
        session_insight: response.session_insight,
        recommendations: response.recommendations,
        profile,
    }
}
