//! Command dispatch

use std::io;
use std::path::Path;

use clap::CommandFactory;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::hierarchy::{self, EntryTree};
use crate::tree_traits::{IterableTree, TreeNodeConvert};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    execute_command_with(cli, global_config_path().as_deref())
}

/// Run a command with an explicit global config file instead of the XDG location.
pub fn execute_command_with(cli: &Cli, global_config: Option<&Path>) -> CliResult<()> {
    let ctx = Ctx { global_config };
    match &cli.command {
        Some(Commands::Tree { file, from }) => cmd_tree(&ctx, file, from.as_deref()),
        Some(Commands::Parents { file, node }) => cmd_parents(&ctx, file, node),
        Some(Commands::Children { file, node }) => cmd_children(&ctx, file, node),
        Some(Commands::Younger { file, node }) => cmd_younger(&ctx, file, node),
        Some(Commands::Common { file, nodes }) => cmd_common(&ctx, file, nodes),
        Some(Commands::Local { file, nodes }) => cmd_local(&ctx, file, nodes),
        Some(Commands::Branches { file }) => cmd_branches(&ctx, file),
        Some(Commands::Leaves { file }) => cmd_leaves(&ctx, file),
        Some(Commands::Validate { file }) => cmd_validate(&ctx, file),
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show { dir } => cmd_config_show(&ctx, dir.as_deref()),
            ConfigCommands::Template => {
                output::info(&Settings::template());
                Ok(())
            }
        },
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Ok(()),
    }
}

#[derive(Debug)]
struct Ctx<'a> {
    global_config: Option<&'a Path>,
}

impl Ctx<'_> {
    fn settings(&self, local_dir: Option<&Path>) -> CliResult<Settings> {
        Ok(Settings::load_layers(self.global_config, local_dir)?)
    }
}

/// Settings from the hierarchy file's directory, then the validated tree.
fn load(ctx: &Ctx, file: &Path) -> CliResult<(EntryTree, Settings)> {
    let dir = file.parent().filter(|d| !d.as_os_str().is_empty());
    let settings = ctx.settings(dir)?;
    if !settings.output.color {
        output::disable_colors();
    }
    let tree = hierarchy::load(file, settings.tree)?;
    debug!("tree with {} entries", tree.len());
    Ok((tree, settings))
}

fn print_names<'a>(names: impl IntoIterator<Item = &'a hierarchy::Entry>, empty: &str) {
    let mut printed = false;
    for entry in names {
        output::info(entry);
        printed = true;
    }
    if !printed {
        output::warning(empty);
    }
}

#[instrument(skip(ctx))]
fn cmd_tree(ctx: &Ctx, file: &Path, from: Option<&str>) -> CliResult<()> {
    let (tree, _) = load(ctx, file)?;
    let rendered = match from {
        Some(name) => {
            let node = hierarchy::find(&tree, name)?;
            let subtree = tree.subtree(node).map_err(|e| hierarchy::HierarchyError::Tree(e.map(|n| n.name)))?;
            subtree.to_tree_string()
        }
        None => tree.to_tree_string(),
    };
    output::info(&rendered);
    Ok(())
}

#[instrument(skip(ctx))]
fn cmd_parents(ctx: &Ctx, file: &Path, name: &str) -> CliResult<()> {
    let (tree, _) = load(ctx, file)?;
    let node = hierarchy::find(&tree, name)?;
    print_names(tree.find_parents(node), &format!("{name} has no parents"));
    Ok(())
}

#[instrument(skip(ctx))]
fn cmd_children(ctx: &Ctx, file: &Path, name: &str) -> CliResult<()> {
    let (tree, _) = load(ctx, file)?;
    let node = hierarchy::find(&tree, name)?;
    print_names(tree.find_children(node), &format!("{name} has no children"));
    Ok(())
}

#[instrument(skip(ctx))]
fn cmd_younger(ctx: &Ctx, file: &Path, name: &str) -> CliResult<()> {
    let (tree, _) = load(ctx, file)?;
    let node = hierarchy::find(&tree, name)?;
    print_names(tree.find_younger(node), &format!("{name} has no descendants"));
    Ok(())
}

#[instrument(skip(ctx))]
fn cmd_common(ctx: &Ctx, file: &Path, names: &[String]) -> CliResult<()> {
    let (tree, _) = load(ctx, file)?;
    let nodes = hierarchy::find_all(&tree, names)?;

    let shared = tree.find_same_parents(nodes.iter().copied());
    output::header(&format!("Shared ancestors of {}", names.join(", ")));
    for entry in &shared {
        output::detail(entry);
    }
    match shared.last() {
        Some(nearest) => output::action("nearest", nearest),
        None => output::warning("no common ancestor"),
    }
    Ok(())
}

#[instrument(skip(ctx))]
fn cmd_local(ctx: &Ctx, file: &Path, names: &[String]) -> CliResult<()> {
    let (tree, _) = load(ctx, file)?;
    let nodes = hierarchy::find_all(&tree, names)?;
    let local = tree
        .local_tree(nodes.iter().copied())
        .map_err(|e| hierarchy::HierarchyError::Tree(e.map(|n| n.name)))?;
    output::info(&local.to_tree_string());
    Ok(())
}

#[instrument(skip(ctx))]
fn cmd_branches(ctx: &Ctx, file: &Path) -> CliResult<()> {
    let (tree, settings) = load(ctx, file)?;
    for branch in tree.branches() {
        output::info(&branch.iter().join(&settings.output.branch_separator));
    }
    Ok(())
}

#[instrument(skip(ctx))]
fn cmd_leaves(ctx: &Ctx, file: &Path) -> CliResult<()> {
    let (tree, _) = load(ctx, file)?;
    print_names(tree.leaf_nodes(), "empty hierarchy");
    Ok(())
}

#[instrument(skip(ctx))]
fn cmd_validate(ctx: &Ctx, file: &Path) -> CliResult<()> {
    let (tree, _) = load(ctx, file)?;
    output::success(&format!(
        "{}: {} entries, depth {}",
        file.display(),
        tree.len(),
        tree.depth()
    ));
    Ok(())
}

#[instrument(skip(ctx))]
fn cmd_config_show(ctx: &Ctx, dir: Option<&Path>) -> CliResult<()> {
    if let Some(dir) = dir {
        if !dir.is_dir() {
            return Err(CliError::InvalidArgs(format!("not a directory: {}", dir.display())));
        }
    }
    let settings = ctx.settings(dir)?;
    output::info(&settings.to_toml()?);
    Ok(())
}
