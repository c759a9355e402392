//! `mdk init` command - Create a project

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::core::project::Project;
use crate::entities::EntityKind;

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Re-create missing directories and reset the project config
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs) -> Result<()> {
    let cwd = std::env::current_dir().into_diagnostic()?;
    let project = Project::init(&cwd, args.force).map_err(|e| miette::miette!("{}", e))?;

    println!(
        "{} Initialized mdk project in {}",
        style("✓").green(),
        style(project.root().display()).cyan()
    );
    for kind in EntityKind::all() {
        println!("   {}/", style(kind.dir()).dim());
    }
    println!("   {}/", style(crate::core::project::PROFILE_DIR).dim());
    Ok(())
}
