//! Clap command tree definition.

use clap::{Arg, ArgAction, Command};

/// Build the complete CLI command tree.
pub fn build_cli() -> Command {
    Command::new("forestrecorder")
        .about("Record forest mutations in an append-only log and replay them")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("PATH")
                .help("Config file (default: $FORESTRECORDER_CONFIG or ~/.config/forestrecorder/forestrecorder.toml)")
                .global(true),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("JSON output mode")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log more to stderr (-v info, -vv debug, -vvv trace)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(build_configure())
        .subcommand(build_add())
        .subcommand(build_move())
        .subcommand(build_remove())
        .subcommand(Command::new("history").about("List every recorded action in order"))
        .subcommand(Command::new("dump").about("Print the current forest"))
        .subcommand(Command::new("version").about("Print the version"))
}

fn build_configure() -> Command {
    Command::new("configure")
        .about("Write the config file")
        .arg(
            Arg::new("log")
                .long("log")
                .value_name("PATH")
                .help("Action log file (relative paths resolve against the config directory)"),
        )
        .arg(
            Arg::new("timezone")
                .long("timezone")
                .value_name("NAME")
                .help("Timezone name stored with each action (default: $TZ or UTC)"),
        )
        .arg(
            Arg::new("durability")
                .long("durability")
                .value_name("MODE")
                .help("Durability mode: always or standard"),
        )
        .arg(
            Arg::new("force")
                .long("force")
                .short('f')
                .help("Overwrite an existing config file")
                .action(ArgAction::SetTrue),
        )
}

fn node_arg() -> Arg {
    Arg::new("node").required(true).value_name("NODE")
}

fn parent_arg() -> Arg {
    Arg::new("parent")
        .long("parent")
        .short('p')
        .value_name("PARENT")
        .help("Parent node (default: the root)")
}

fn children_arg() -> Arg {
    Arg::new("children")
        .num_args(0..)
        .value_name("CHILD")
        .help("Direct children of the parent to adopt")
}

fn build_add() -> Command {
    Command::new("add")
        .about("Create a node, adopting some of the parent's children")
        .arg(node_arg().help("Node to create"))
        .arg(parent_arg())
        .arg(children_arg())
}

fn build_move() -> Command {
    Command::new("move")
        .about("Move a node under a new parent, adopting some of the new parent's children")
        .arg(node_arg().help("Node to move"))
        .arg(parent_arg())
        .arg(children_arg())
}

fn build_remove() -> Command {
    Command::new("remove")
        .about("Remove a node, handing its children to its parent")
        .arg(node_arg().help("Node to remove"))
        .arg(
            Arg::new("recursive")
                .long("recursive")
                .short('r')
                .help("Remove the whole subtree instead")
                .action(ArgAction::SetTrue),
        )
}
