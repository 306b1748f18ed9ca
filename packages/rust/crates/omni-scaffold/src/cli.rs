use clap::Parser;

#[derive(Parser)]
#[command(name = "omni-scaffold", version)]
#[command(about = "Generate a FastAPI + Dapr agent service for a registered role.")]
pub(crate) struct Cli {
    /// Role identifier (case-insensitive), e.g. `debug`.
    pub(crate) role: Option<String>,
}
