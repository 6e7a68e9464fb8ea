use lambda_runtime::{Error, LambdaEvent};
use tracing::debug;

use snapsight_core::{AnalysisOrchestrator, HandlerResponse, S3Event};

/// Invocation entry point.
///
/// Analysis failures come back as a 500 envelope; only an event that names
/// no object fails the invocation.
pub async fn handle(
    orchestrator: &AnalysisOrchestrator,
    event: LambdaEvent<S3Event>,
) -> Result<HandlerResponse, Error> {
    let (payload, context) = event.into_parts();
    debug!(request_id = %context.request_id, "Invocation received");

    let response = orchestrator.handle(&payload).await?;
    Ok(response)
}
