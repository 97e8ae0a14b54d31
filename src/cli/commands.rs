//! Command dispatch: each command returns the text to print on stdout.

use std::io::{self, Read};

use clap::CommandFactory;
use clap_complete::generate;
use serde_json::{json, Value};
use tracing::{debug, instrument};

use crate::arena::{BinaryTree, NodeId};
use crate::builder::TreeBuilder;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output::render;
use crate::config::Settings;
use crate::tree_traits::TreeNodeConvert;

pub fn execute_command(cli: &Cli, settings: &Settings) -> CliResult<String> {
    execute_command_with(cli, settings, &mut io::stdin().lock())
}

/// Like [`execute_command`], with `input` standing in for stdin when a tree is `-`.
pub fn execute_command_with(
    cli: &Cli,
    settings: &Settings,
    input: &mut dyn Read,
) -> CliResult<String> {
    let format = cli.output.unwrap_or(settings.output);
    let result = match &cli.command {
        Some(Commands::MinDepth { tree }) => json!(load_tree(tree, settings, input)?.min_depth()),
        Some(Commands::MaxDepth { tree }) => json!(load_tree(tree, settings, input)?.max_depth()),
        Some(Commands::MaxSum { tree }) => json!(load_tree(tree, settings, input)?.max_sum()),
        Some(Commands::NextLarger { tree, bound }) => {
            json!(load_tree(tree, settings, input)?.next_larger(*bound))
        }
        Some(Commands::Cousins { tree, a, b }) => _cousins(&load_tree(tree, settings, input)?, *a, *b)?,
        Some(Commands::Lca { tree, a, b }) => _lca(&load_tree(tree, settings, input)?, *a, *b)?,
        Some(Commands::Show { tree }) => {
            // the rendering is the output regardless of format
            return Ok(load_tree(tree, settings, input)?
                .to_tree_string_with(&settings.display)
                .to_string());
        }
        Some(Commands::Normalize { tree }) => Value::String(load_tree(tree, settings, input)?.serialize()),
        Some(Commands::Config { command }) => return _config(command, settings),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            let mut buf = Vec::new();
            generate(*shell, &mut cmd, name, &mut buf);
            return Ok(String::from_utf8_lossy(&buf).into_owned());
        }
        None => return Ok(String::new()),
    };
    Ok(render(format, &result))
}

/// Reads the serialized tree from the argument, or from stdin for `-`.
#[instrument(level = "debug", skip(settings, input))]
fn load_tree(arg: &str, settings: &Settings, input: &mut dyn Read) -> CliResult<BinaryTree> {
    let text = if arg == "-" {
        let mut buf = String::new();
        input.read_to_string(&mut buf)?;
        buf
    } else {
        arg.to_string()
    };
    let tree = TreeBuilder::new()
        .with_max_tokens(settings.input.max_tokens)
        .build_from_str(&text)?;
    debug!(nodes = tree.len(), "tree loaded");
    Ok(tree)
}

fn node_at(tree: &BinaryTree, position: usize) -> CliResult<NodeId> {
    tree.nth_preorder(position).ok_or_else(|| {
        CliError::InvalidArgs(format!(
            "no node at pre-order position {} (tree has {} nodes)",
            position,
            tree.len()
        ))
    })
}

#[instrument(level = "debug", skip(tree))]
fn _cousins(tree: &BinaryTree, a: usize, b: usize) -> CliResult<Value> {
    let (a, b) = (node_at(tree, a)?, node_at(tree, b)?);
    Ok(json!(tree.are_cousins(a, b)))
}

#[instrument(level = "debug", skip(tree))]
fn _lca(tree: &BinaryTree, a: usize, b: usize) -> CliResult<Value> {
    let (a, b) = (node_at(tree, a)?, node_at(tree, b)?);
    let Some(ancestor) = tree.lowest_common_ancestor(a, b) else {
        return Ok(Value::Null);
    };
    let position = tree.preorder().position(|(id, _)| id == ancestor);
    Ok(json!({
        "position": position,
        "value": tree.value(ancestor),
    }))
}

fn _config(command: &ConfigCommands, settings: &Settings) -> CliResult<String> {
    match command {
        ConfigCommands::Show => Ok(settings.to_toml()?),
        ConfigCommands::Template => Ok(Settings::template()),
    }
}
