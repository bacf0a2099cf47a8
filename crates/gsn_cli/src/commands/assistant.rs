//! Assistant commands: ask, summarize and plan-route.

use crate::data::Session;
use crate::error::CliResult;
use gsn_assistant::{
    Assistant, FixedLocation, GeolocationError, GroundedText, LatLng, LocationProvider,
    NoLocation, TextGenerator,
};
use gsn_core::Notifier;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Position used when a command has no location to offer.
fn no_location() -> NoLocation {
    NoLocation(GeolocationError::Unavailable("no position given".to_string()))
}

/// Sends one prompt to the assistant.
pub async fn ask<G: TextGenerator>(generator: G, prompt: &str) -> CliResult<String> {
    let assistant = Assistant::new(generator, no_location(), Arc::new(Notifier::default()));
    Ok(assistant.ask(prompt).await)
}

/// Summarizes a stored proposal.
pub async fn summarize<G: TextGenerator>(
    session: &Session,
    generator: G,
    id: &str,
) -> CliResult<String> {
    let proposal = session.navigator.proposals.store().read().require(id)?.clone();
    let assistant = Assistant::new(
        generator,
        no_location(),
        Arc::clone(session.navigator.notifier()),
    );
    Ok(assistant.summarize(&proposal).await)
}

/// Plans a visit route through the addresses listed in `addresses`, one
/// per line, starting at `latitude`/`longitude`.
pub async fn plan_route<G: TextGenerator>(
    generator: G,
    latitude: f64,
    longitude: f64,
    addresses: &Path,
) -> CliResult<String> {
    let input = fs::read_to_string(addresses)?;
    let location = FixedLocation(LatLng::new(latitude, longitude));
    plan(generator, location, &input).await
}

async fn plan<G: TextGenerator, L: LocationProvider>(
    generator: G,
    location: L,
    input: &str,
) -> CliResult<String> {
    let assistant = Assistant::new(generator, location, Arc::new(Notifier::default()));
    Ok(render_plan(&assistant.plan_route(input).await?))
}

fn render_plan(plan: &GroundedText) -> String {
    let mut out = plan.text.clone();
    let links: Vec<String> = plan
        .navigation_links()
        .map(|source| format!("- {}: {}", source.title, source.uri))
        .collect();
    if !links.is_empty() {
        out.push_str("\n\nNavigation links:\n");
        out.push_str(&links.join("\n"));
    }
    out
}
