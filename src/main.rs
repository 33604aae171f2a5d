mod error;
mod handler;
mod host;
mod net;
mod server;

fn main() -> anyhow::Result<()> {
    server::main()
}
