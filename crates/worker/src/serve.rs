// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use le_adapters::{CommandRunner, EngineLoader, EngineProcess, PathFinder};
use le_core::protocol::{encode, read_frame, write_frame, write_message};
use le_core::{
    FailureKind, JobFailure, ProtocolError, WorkerEvent, WorkerRequest, PROTOCOL_VERSION,
};
use le_engine::JobRunner;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::Instrument;

/// Announce readiness, then run jobs one at a time until the input closes.
pub async fn serve<F, C, L, E, R, W>(
    runner: &JobRunner<F, C, L, E>,
    mut input: R,
    mut output: W,
) -> Result<(), ProtocolError>
where
    F: PathFinder,
    C: CommandRunner,
    L: EngineLoader,
    E: EngineProcess,
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    write_frame(
        &mut output,
        &WorkerEvent::Ready {
            version: PROTOCOL_VERSION.to_string(),
        },
    )
    .await?;
    tracing::info!(version = PROTOCOL_VERSION, "worker ready");

    loop {
        let request: WorkerRequest = match read_frame(&mut input).await {
            Ok(request) => request,
            Err(ProtocolError::ConnectionClosed) => {
                tracing::info!("input closed, exiting");
                return Ok(());
            }
            // The whole frame was consumed, so the stream is still aligned
            Err(ProtocolError::Json(e)) => {
                tracing::warn!(error = %e, "dropping malformed request");
                continue;
            }
            Err(e) => return Err(e),
        };

        let span = tracing::info_span!(
            "job",
            id = %request.id,
            kind = ?request.job.kind,
            file = %request.job.file_path.display(),
        );
        let event = match runner.run(&request.job).instrument(span).await {
            Ok(response) => WorkerEvent::Done {
                id: request.id,
                response,
            },
            Err(failure) => {
                tracing::warn!(id = %request.id, kind = %failure.kind, "job failed: {}", failure.message);
                WorkerEvent::Failed {
                    id: request.id,
                    failure,
                }
            }
        };
        write_message(&mut output, &encode_event(event)?).await?;
    }
}

/// A response too large to frame is reported as that job's failure.
fn encode_event(event: WorkerEvent) -> Result<Vec<u8>, ProtocolError> {
    match encode(&event) {
        Err(ProtocolError::MessageTooLarge { size, max }) => {
            let Some(id) = event.job_id().cloned() else {
                return Err(ProtocolError::MessageTooLarge { size, max });
            };
            tracing::warn!(%id, size, "response too large to send");
            encode(&WorkerEvent::Failed {
                id,
                failure: JobFailure {
                    kind: FailureKind::Engine,
                    message: format!("response too large: {size} bytes (max {max})"),
                },
            })
        }
        result => result,
    }
}

#[cfg(test)]
#[path = "serve_tests.rs"]
mod tests;
