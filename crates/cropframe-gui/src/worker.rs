use std::sync::mpsc;

use cropframe_core::error::CropError;
use cropframe_core::source;
use cropframe_core::upload::{HttpUploader, Uploader};

use crate::messages::{WorkerCommand, WorkerResult};

/// Spawn the worker thread. Returns the command sender.
pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) -> std::io::Result<mpsc::Sender<WorkerCommand>> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("cropframe-worker".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx);
        })?;

    Ok(cmd_tx)
}

fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

fn send_log(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, msg: impl Into<String>) {
    send(tx, ctx, WorkerResult::Log { message: msg.into() });
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) {
    // One client for the worker's lifetime so its cookie store persists.
    let uploader = HttpUploader::new();

    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            WorkerCommand::Load { epoch, request } => {
                send_log(&tx, &ctx, format!("Loading {}", request.origin));
                let result = source::load(&request.origin);
                send(
                    &tx,
                    &ctx,
                    WorkerResult::Loaded {
                        epoch,
                        ticket: request.ticket,
                        result,
                    },
                );
            }
            WorkerCommand::Upload { epoch, request } => {
                send_log(
                    &tx,
                    &ctx,
                    format!("Uploading {} bytes to {}", request.bytes.len(), request.action),
                );
                let result = match &uploader {
                    Ok(client) => client.upload(&request),
                    Err(e) => Err(CropError::Config(format!("HTTP client unavailable: {e}"))),
                };
                send(
                    &tx,
                    &ctx,
                    WorkerResult::Uploaded {
                        epoch,
                        ticket: request.ticket,
                        result,
                    },
                );
            }
        }
    }
}
