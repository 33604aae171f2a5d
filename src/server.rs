use std::io::{self, Write};

use crate::{error::StartupError, host, net::Listener};

pub const PORT: u16 = 3000;

pub fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cpus = num_cpus::get_physical();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(cpus)
        .enable_all()
        .build()
        .map_err(StartupError::Runtime)?;
    tracing::debug!(message = "Started runtime", threads = cpus);

    runtime.block_on(run())?;
    Ok(())
}

/// Resolves the hostname, binds to it and serves until the process is killed.
async fn run() -> Result<(), StartupError> {
    let hostname = host::resolve()?;
    let listener = start(&hostname, PORT, &mut io::stdout().lock())?;
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(message = "Accepting requests.", addr = %addr);
    }

    listener.serve().await;
    Ok(())
}

/// Announces `hostname`, binds it and announces the listening address.
///
/// The second line is only written once the bind has succeeded.
fn start(hostname: &str, port: u16, out: &mut impl Write) -> Result<Listener, StartupError> {
    writeln!(out, "{}", host::hosted_name_line(hostname)).map_err(StartupError::Banner)?;

    let listener = Listener::bind(hostname, port)?;
    writeln!(out, "{}", running_line(hostname, port)).map_err(StartupError::Banner)?;
    out.flush().map_err(StartupError::Banner)?;
    Ok(listener)
}

pub fn running_line(hostname: &str, port: u16) -> String {
    format!("Server running at http://{hostname}:{port}/")
}
