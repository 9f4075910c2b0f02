use clap::Parser;
use rand::{Rng, rngs::ThreadRng};
use serde_json::{Map, Value, json};
use shindan::data::Telemetry;
use shindan::workflow::{WorkflowDocument, WorkflowNode};
use std::fs;

/// Gas readings a generated condition can reference.
const GASES: [&str; 7] = [
    "h2",
    "ch4",
    "c2h6",
    "c2h4",
    "c2h2",
    "h2_gas_generation_rate",
    "total_hydrocarbons_content",
];

const OPERATIONS: [&str; 4] = ["larger", "largerEqual", "smaller", "smallerEqual"];

/// A CLI tool to generate workflow documents for the shindan engine
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated workflow JSON to
    #[arg(short, long, default_value = "generated_workflow.json")]
    output: String,

    /// Optional path to also write matching random telemetry to
    #[arg(short, long)]
    telemetry: Option<String>,

    /// Number of nodes below the trigger
    #[arg(long, default_value_t = 12)]
    nodes: usize,

    /// Maximum fan-out of a single node
    #[arg(long, default_value_t = 3)]
    max_children: usize,

    /// Probability that a node is a condition node
    #[arg(long, default_value_t = 0.4)]
    condition_ratio: f64,

    /// Number of back edges to add, producing cycles
    #[arg(long, default_value_t = 0)]
    cycles: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.max_children == 0 {
        eprintln!("Error: --max-children must be at least 1");
        std::process::exit(1);
    }
    if !(0.0..=1.0).contains(&cli.condition_ratio) {
        eprintln!(
            "Error: --condition-ratio ({}) must be between 0 and 1",
            cli.condition_ratio
        );
        std::process::exit(1);
    }

    println!(
        "Generating workflow with {} nodes (fan-out up to {}, {} back edges)...",
        cli.nodes + 1,
        cli.max_children,
        cli.cycles
    );

    let document = generate_workflow(&mut rng, &cli);
    fs::write(&cli.output, serde_json::to_string_pretty(&document)?)?;
    println!("Successfully saved workflow to '{}'", cli.output);

    if let Some(path) = &cli.telemetry {
        let telemetry = generate_telemetry(&mut rng);
        fs::write(path, serde_json::to_string_pretty(&telemetry)?)?;
        println!("Successfully saved telemetry to '{}'", path);
    }

    Ok(())
}

/// A trigger followed by a random tree, plus optional back edges.
fn generate_workflow(rng: &mut ThreadRng, cli: &Cli) -> WorkflowDocument {
    let mut nodes = vec![WorkflowNode {
        position: Some([0.0, 0.0]),
        ..WorkflowNode::new("trigger", "数据接收", "n8n-nodes-base.webhook")
    }];
    let mut targets: Vec<Vec<String>> = vec![Vec::new()];

    for i in 1..=cli.nodes {
        let id = format!("node_{}", i);
        // attach to an earlier node that still has room
        let open: Vec<usize> = (0..nodes.len())
            .filter(|&p| targets[p].len() < cli.max_children)
            .collect();
        let parent = open[rng.random_range(0..open.len())];
        targets[parent].push(id.clone());

        let node = if rng.random_bool(cli.condition_ratio) {
            generate_condition_node(rng, id, i)
        } else {
            generate_processing_node(rng, id, i)
        };
        nodes.push(node);
        targets.push(Vec::new());
    }

    for _ in 0..cli.cycles {
        if nodes.len() < 2 {
            break;
        }
        let from = rng.random_range(1..nodes.len());
        let to = rng.random_range(1..=from);
        targets[from].push(nodes[to].id.clone());
    }

    let mut connections = Map::new();
    for (node, node_targets) in nodes.iter().zip(&targets) {
        if node_targets.is_empty() {
            continue;
        }
        let slot: Vec<Value> = node_targets
            .iter()
            .map(|t| json!({ "node": t, "type": "main", "index": 0 }))
            .collect();
        connections.insert(node.id.clone(), json!({ "main": [slot] }));
    }

    println!(
        "-> Generated {} node(s) and {} connection source(s).",
        nodes.len(),
        connections.len()
    );
    WorkflowDocument { nodes, connections }
}

fn generate_condition_node(rng: &mut ThreadRng, id: String, index: usize) -> WorkflowNode {
    let leaves: Vec<Value> = (0..rng.random_range(1..=3))
        .map(|_| {
            let gas = GASES[rng.random_range(0..GASES.len())];
            let operation = OPERATIONS[rng.random_range(0..OPERATIONS.len())];
            let threshold = rng.random_range(10..500);
            json!({
                "leftValue": format!("$json.{}", gas),
                "rightValue": threshold,
                "operator": { "type": "number", "operation": operation },
            })
        })
        .collect();
    let combinator = if rng.random_bool(0.5) { "and" } else { "or" };

    let mut parameters = Map::new();
    parameters.insert(
        "conditions".to_string(),
        json!({ "combinator": combinator, "conditions": leaves }),
    );
    WorkflowNode {
        parameters: Some(parameters),
        position: Some(random_position(rng, index)),
        ..WorkflowNode::new(id, format!("{}. If：条件{}", index, index), "n8n-nodes-base.if")
    }
}

fn generate_processing_node(rng: &mut ThreadRng, id: String, index: usize) -> WorkflowNode {
    let (name, node_type) = match rng.random_range(0..3) {
        0 => (format!("{}. 数据处理", index), "n8n-nodes-base.code"),
        1 => (format!("{}. 分支选择", index), "n8n-nodes-base.switch"),
        _ => (format!("{}. 故障记录", index), "n8n-nodes-base.set"),
    };
    WorkflowNode {
        position: Some(random_position(rng, index)),
        ..WorkflowNode::new(id, name, node_type)
    }
}

fn random_position(rng: &mut ThreadRng, index: usize) -> [f64; 2] {
    [
        index as f64 * 220.0,
        rng.random_range(-400.0..400.0_f64).round(),
    ]
}

fn generate_telemetry(rng: &mut ThreadRng) -> Telemetry {
    let telemetry: Telemetry = GASES
        .iter()
        .map(|gas| (*gas, rng.random_range(0.0..600.0_f64).round()))
        .collect();
    println!("-> Generated {} telemetry reading(s).", telemetry.len());
    telemetry
}
