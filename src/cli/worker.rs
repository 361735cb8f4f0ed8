use clap::Args;

use crate::exec;
use crate::solver::distance::EditCosts;

/// Arguments of the hidden `solve-worker` subcommand. The parent harness
/// builds these; they are not part of the public surface.
#[derive(Args)]
pub struct WorkerArgs {
    /// First canonical word
    pub word_a: String,

    /// Second canonical word
    pub word_b: String,

    #[arg(long, default_value_t = 1)]
    pub substitution: u32,

    #[arg(long, default_value_t = 1)]
    pub insertion: u32,

    #[arg(long, default_value_t = 1)]
    pub deletion: u32,
}

/// Execute the worker: solve exactly, print the fixed-arity reply line,
/// exit. The parent kills this process on deadline, so there is no
/// cooperation point here.
///
/// # Errors
///
/// Returns an error only if stdout cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: WorkerArgs) -> anyhow::Result<()> {
    let costs = EditCosts {
        substitution: args.substitution,
        insertion: args.insertion,
        deletion: args.deletion,
    };
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    exec::run_worker(&args.word_a, &args.word_b, costs, &mut lock)?;
    Ok(())
}
