use std::path::Path;

use roadplan_core::prelude::*;
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::model::read_json;
use crate::{CliError, Engine, OutputFormat};

/// Renders one planning outcome. Failed requests become `{"error": ...}`.
pub fn render(
    engine: &Engine,
    outcome: Result<TripResult, PlanError>,
    format: OutputFormat,
) -> Value {
    let result = match outcome {
        Ok(result) => result,
        Err(e) => {
            warn!("Trip could not be planned: {e}");
            return json!({ "error": e.to_string() });
        }
    };

    let rendered = match format {
        OutputFormat::Json => serde_json::to_value(&result).map_err(|e| e.to_string()),
        OutputFormat::Geojson => result
            .to_geojson(&engine.network)
            .map_err(|e| e.to_string())
            .and_then(|collection| serde_json::to_value(&collection).map_err(|e| e.to_string())),
    };
    rendered.unwrap_or_else(|e| json!({ "error": e }))
}

/// `plan` command
///
/// # Errors
///
/// Fails only if the request file cannot be read or parsed.
pub fn plan_file(engine: &Engine, path: &Path, format: OutputFormat) -> Result<Value, CliError> {
    let request: TripRequest = read_json(path)?;
    let outcome = engine.planner().plan(&request);
    Ok(render(engine, outcome, format))
}

/// `batch` command
///
/// # Errors
///
/// Fails only if the requests file cannot be read or parsed.
pub fn plan_batch_file(engine: &Engine, path: &Path) -> Result<Value, CliError> {
    let requests: Vec<TripRequest> = read_json(path)?;
    let outcomes = engine.planner().plan_batch(&requests);

    let failed = outcomes.iter().filter(|outcome| outcome.is_err()).count();
    info!(requests = requests.len(), failed, "Batch planned");

    Ok(Value::Array(
        outcomes
            .into_iter()
            .map(|outcome| render(engine, outcome, OutputFormat::Json))
            .collect(),
    ))
}
