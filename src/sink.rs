use crate::types::{PortState, ScanResult};
use colored::Colorize;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::warn;

/// Drain the result channel until the executor drops its sender.
///
/// Rendering policy:
/// - `Open` — green `[+] <addr>:<port> is open` on stdout; if an output file
///   is given, the same line is appended without any ANSI styling (the plain
///   line is built separately, escape codes never reach the file).
/// - `Error` — yellow `[!] Error scanning <addr>:<port>: <detail>` on stdout.
/// - `Closed` — silent.
///
/// Failures writing the output file are logged and never propagate; the
/// executor keeps scanning regardless of sink-side trouble. File writes are
/// serialized by virtue of this being the only writer.
pub async fn drain(mut rx: UnboundedReceiver<ScanResult>, mut outfile: Option<File>) {
    while let Some(result) = rx.recv().await {
        match result.state {
            PortState::Open => {
                let line = format!("[+] {}:{} is open", result.addr, result.port);
                println!("{}", line.green());
                if let Some(file) = outfile.as_mut() {
                    if let Err(e) = file.write_all(format!("{line}\n").as_bytes()).await {
                        warn!(error = %e, "failed to write finding to output file");
                    }
                }
            }
            PortState::Error => {
                let detail = result.detail.as_deref().unwrap_or("unknown error");
                let line = format!(
                    "[!] Error scanning {}:{}: {}",
                    result.addr, result.port, detail
                );
                println!("{}", line.yellow());
            }
            PortState::Closed => {}
        }
    }

    if let Some(file) = outfile.as_mut() {
        if let Err(e) = file.flush().await {
            warn!(error = %e, "failed to flush output file");
        }
    }
}
