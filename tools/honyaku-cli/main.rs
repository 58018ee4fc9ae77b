use clap::Parser;
use honyaku::prelude::*;
use std::process::ExitCode;

/// Translate the nodes of a decoded workflow dump into SQL.
#[derive(Parser)]
#[command(name = "honyaku-cli", version, about)]
struct Cli {
    /// Path to the decoded workflow dump (JSON with `descriptor` and
    /// `settings` sections).
    workflow: String,

    /// Translate only this node id instead of every node.
    #[arg(short, long)]
    node: Option<NodeId>,

    /// List the nodes with their order and state without translating.
    #[arg(short, long)]
    list: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "honyaku=warn".into()),
        )
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let dump: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&cli.workflow)?)?;

    let descriptor_tree = ConfigElement::from_json("workflow", &dump["descriptor"]);
    let descriptor = WorkflowDescriptor::from_tree(&descriptor_tree)?;

    let settings_docs: Vec<(String, ConfigElement)> = dump["settings"]
        .as_object()
        .into_iter()
        .flatten()
        .map(|(folder, tree)| (folder.clone(), ConfigElement::from_json("settings", tree)))
        .collect();

    let graph = WorkflowGraph::build(&descriptor, settings_docs);

    if cli.list {
        for node in graph.nodes_in_order() {
            let order = node
                .order_index
                .map(|i| i.to_string())
                .unwrap_or_else(|| "unresolved".to_string());
            println!(
                "[{}] #{} {} ({})",
                order,
                node.id.map(|i| i.to_string()).unwrap_or_else(|| "?".into()),
                node.name.as_deref().unwrap_or("<unnamed>"),
                node.state.as_deref().unwrap_or("unknown state"),
            );
        }
        return Ok(());
    }

    let converter = SqlConverter::new();
    let ids: Vec<NodeId> = match cli.node {
        Some(id) => vec![id],
        None => graph.nodes_in_order().iter().filter_map(|n| n.id).collect(),
    };
    for id in ids {
        let result = converter.convert_node(&graph, id, &NoColumns);
        println!("-- node #{}\n{}\n", id, result);
    }
    Ok(())
}
