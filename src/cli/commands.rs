//! Command dispatch for the outdiff CLI

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::services::DiffRequest;
use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::MatchPolicyKind;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let project_dir = resolve_project_dir(cli.project_dir.as_deref())?;

    match &cli.command {
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Some(Commands::Config { command }) => cmd_config(command, &project_dir),
        Some(command) => {
            let settings = Settings::load(Some(project_dir.as_path()))?;
            let container = ServiceContainer::new(settings);
            match command {
                Commands::Diff {
                    before,
                    after,
                    output,
                    match_policy,
                    no_header,
                } => cmd_diff(
                    &container,
                    before.as_deref(),
                    after.as_deref(),
                    output.as_deref(),
                    *match_policy,
                    *no_header,
                ),
                Commands::Tree { file } => cmd_tree(&container, file),
                Commands::Paths {
                    file,
                    by_name,
                    match_policy,
                } => cmd_paths(&container, file, *by_name, *match_policy),
                Commands::Completion { .. } | Commands::Config { .. } => Ok(()),
            }
        }
        None => {
            let mut cmd = Cli::command();
            cmd.print_help()
                .map_err(|e| InfraError::io("print help", e))?;
            Ok(())
        }
    }
}

fn resolve_project_dir(project_dir: Option<&Path>) -> CliResult<PathBuf> {
    match project_dir {
        Some(dir) if dir.is_dir() => Ok(dir.to_path_buf()),
        Some(dir) => Err(CliError::InvalidArgs(format!(
            "project directory does not exist: {}",
            dir.display()
        ))),
        None => std::env::current_dir()
            .map_err(|e| InfraError::io("determine current directory", e).into()),
    }
}

#[instrument(skip(container))]
fn cmd_diff(
    container: &ServiceContainer,
    before: Option<&Path>,
    after: Option<&Path>,
    output: Option<&Path>,
    match_policy: Option<MatchPolicyKind>,
    no_header: bool,
) -> CliResult<()> {
    let settings = &container.settings;
    let request = DiffRequest {
        before: before
            .map(Path::to_path_buf)
            .or_else(|| settings.before.clone())
            .ok_or(ApplicationError::MissingInput("before"))?,
        after: after
            .map(Path::to_path_buf)
            .or_else(|| settings.after.clone())
            .ok_or(ApplicationError::MissingInput("after"))?,
        output: output.map(Path::to_path_buf).or_else(|| settings.output.clone()),
        match_policy: match_policy.unwrap_or(settings.match_policy),
        header: settings.header && !no_header,
    };
    debug!("request: {:?}", request);

    let outcome = container.diff_service().diff_files(&request)?;

    if let Some(path) = &outcome.written_to {
        output::success(&format!("Diff output written to {}", path.display()));
        return Ok(());
    }

    for line in outcome.report.lines() {
        match numbered_step(line) {
            Some((number, step)) => output::step(number, step),
            None => output::info(line),
        }
    }
    Ok(())
}

/// Split a report line `N. step` into its number and step text.
fn numbered_step(line: &str) -> Option<(usize, &str)> {
    let (number, step) = line.split_once(". ")?;
    Some((number.parse().ok()?, step))
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let tree = container.diff_service().load_outline(file)?;
    output::info(&tree.to_termtree(&file.display().to_string()));
    output::detail(&format!("{} nodes, depth {}", tree.len(), tree.depth()));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_paths(
    container: &ServiceContainer,
    file: &Path,
    by_name: bool,
    match_policy: Option<MatchPolicyKind>,
) -> CliResult<()> {
    let policy = match_policy.unwrap_or(container.settings.match_policy);
    let index = container.diff_service().load_index(file, policy)?;

    if by_name {
        for (key, paths) in index.names() {
            output::header(key);
            for path in paths {
                output::detail(path);
            }
        }
        return Ok(());
    }

    for (path, record) in index.paths() {
        output::info(path);
        output::detail(&format!(
            "parent: {}",
            record.parent_path.as_deref().unwrap_or("(root)")
        ));
        if !record.child_names.is_empty() {
            output::detail(&format!("children: {}", record.child_names.iter().join(", ")));
        }
    }
    Ok(())
}

fn cmd_config(command: &ConfigCommands, project_dir: &Path) -> CliResult<()> {
    let fs = RealFileSystem;
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(Some(project_dir))?;
            output::info(settings.to_toml()?.trim_end());
        }
        ConfigCommands::Path => {
            let local = local_config_path(project_dir);
            match global_config_path() {
                Some(global) => print_config_location(&fs, "global", &global),
                None => output::failure("global: no config directory on this platform"),
            }
            print_config_location(&fs, "local", &local);
        }
        ConfigCommands::Template => output::info(Settings::template().trim_end()),
        ConfigCommands::Init { local } => {
            let target = if *local {
                local_config_path(project_dir)
            } else {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("no global config directory on this platform".into())
                })?
            };
            write_config_template(&fs, &target)?;
            output::success(&format!("Created {}", target.display()));
        }
    }
    Ok(())
}

/// Write the commented template to `target`, refusing to overwrite.
fn write_config_template(fs: &dyn FileSystem, target: &Path) -> CliResult<()> {
    if fs.exists(target) {
        return Err(CliError::Usage(format!(
            "config already exists: {}",
            target.display()
        )));
    }
    fs.ensure_parent(target)
        .map_err(|e| InfraError::io(format!("create parent of {}", target.display()), e))?;
    fs.write(target, &Settings::template())
        .map_err(|e| InfraError::io(format!("write {}", target.display()), e))?;
    Ok(())
}

fn print_config_location(fs: &dyn FileSystem, label: &str, path: &Path) {
    if fs.exists(path) {
        output::success(&format!("{label}: {}", path.display()));
    } else {
        output::failure(&format!("{label}: {} (not found)", path.display()));
    }
}
