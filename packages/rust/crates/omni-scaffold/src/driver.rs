//! Driver - validates the requested role, materializes it, prints a summary.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use tracing::warn;

use omni_roles::{RoleError, RoleRegistry, to_type_name};

use crate::materializer::{MaterializeReport, Materializer};

/// Exit status for a missing or unknown role argument.
pub const EXIT_USAGE: u8 = 1;

/// What the driver did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriveOutcome {
    /// The tree was written.
    Generated(MaterializeReport),
    /// No role argument was given.
    Usage,
    /// The role is not in the registry.
    UnknownRole,
}

impl DriveOutcome {
    /// Process exit status for this outcome.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Generated(_) => 0,
            Self::Usage | Self::UnknownRole => EXIT_USAGE,
        }
    }
}

/// Generate the service for `requested` under `output_root`, reporting to `out`.
///
/// The role argument is trimmed and lower-cased before lookup.
///
/// # Errors
///
/// Rendering or filesystem failures, and failures writing to `out`.
pub fn drive<W: Write>(
    requested: Option<&str>,
    output_root: &Path,
    materializer: &Materializer,
    out: &mut W,
) -> anyhow::Result<DriveOutcome> {
    let Some(raw) = requested.map(str::trim).filter(|r| !r.is_empty()) else {
        write_usage(materializer.registry(), out)?;
        return Ok(DriveOutcome::Usage);
    };
    let identifier = raw.to_lowercase();

    if let Err(RoleError::UnknownRole { requested: unknown, valid }) =
        materializer.registry().lookup(&identifier)
    {
        warn!(role = %unknown, "unknown role requested");
        writeln!(out, "Error: Unknown role '{unknown}'")?;
        writeln!(out, "Valid roles: {}", valid.join(", "))?;
        return Ok(DriveOutcome::UnknownRole);
    }

    writeln!(out, "Generating {identifier} agent...")?;
    let report = materializer
        .materialize(&identifier, output_root)
        .with_context(|| format!("failed to generate {identifier} agent"))?;
    write_summary(out, &report)?;
    Ok(DriveOutcome::Generated(report))
}

/// Print the usage line and every registered role identifier.
///
/// # Errors
///
/// Failures writing to `out`.
pub fn write_usage<W: Write>(registry: &RoleRegistry, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "Usage: omni-scaffold <role>")?;
    writeln!(out)?;
    writeln!(out, "Available roles: {}", registry.identifiers().join(", "))
}

fn write_summary<W: Write>(out: &mut W, report: &MaterializeReport) -> std::io::Result<()> {
    for path in &report.written {
        writeln!(out, "  ✓ {}", path.display())?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "{} agent generated successfully!",
        to_type_name(&report.role)
    )?;
    writeln!(out, "   Location: {}", report.role_dir.display())?;
    writeln!(out, "   Files: {}", report.count())?;
    writeln!(out)?;
    writeln!(out, "Next steps:")?;
    writeln!(out, "1. cd {}", report.role)?;
    writeln!(out, "2. cp .env.example .env && edit .env")?;
    writeln!(out, "3. docker build -t {}-agent .", report.role)?;
    writeln!(out, "4. kubectl apply -f k8s/")?;
    Ok(())
}
