use clap::{Parser, ValueEnum};
use shindan::prelude::*;
use std::fs;
use std::time::Instant;

/// CLI-side strategy names for clap.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyCli {
    Hierarchical,
    Radial,
    Compact,
}

impl From<StrategyCli> for LayoutStrategy {
    fn from(value: StrategyCli) -> Self {
        match value {
            StrategyCli::Hierarchical => LayoutStrategy::Hierarchical,
            StrategyCli::Radial => LayoutStrategy::Radial,
            StrategyCli::Compact => LayoutStrategy::Compact,
        }
    }
}

/// Builds, lays out and evaluates fault trees from workflow documents
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a workflow JSON document (or one carrying `ftree_json`)
    input_path: String,

    /// Layout strategy
    #[arg(short, long, value_enum, default_value = "hierarchical")]
    strategy: StrategyCli,

    /// Viewport width in pixels, selects the spacing preset
    #[arg(long, default_value_t = 1920.0)]
    viewport_width: f64,

    /// Telemetry JSON used to evaluate the gates
    #[arg(short, long)]
    telemetry: Option<String>,

    /// Evaluate with the built-in dissolved-gas sample when no telemetry file is given
    #[arg(long)]
    sample: bool,

    /// Print the upstream path of the first node matching this keyword
    #[arg(long)]
    diagnose: Option<String>,

    /// Emit the tree, layout and reasoning as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    run(cli);
}

fn run(cli: Cli) {
    let total_start = Instant::now();

    // --- 1. Loading ---
    let load_start = Instant::now();
    let document = fs::read_to_string(&cli.input_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read input file '{}': {}",
            cli.input_path, e
        ))
    });
    let telemetry = match (&cli.telemetry, cli.sample) {
        (Some(path), _) => Some(Telemetry::from_file(path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to load telemetry from '{}': {}", path, e))
        })),
        (None, true) => Some(Telemetry::dga_sample()),
        (None, false) => None,
    };
    let load_duration = load_start.elapsed();

    // --- 2. Ingestion ---
    let parse_start = Instant::now();
    let mut ingested = ingest(&document, &WorkflowParser::default())
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to build fault tree: {}", e)));
    let parse_duration = parse_start.elapsed();

    // --- 3. Evaluation ---
    let eval_start = Instant::now();
    let report = telemetry.as_ref().map(|telemetry| match &mut ingested {
        Ingested::Workflow(parsed) => parsed.evaluate_logic_gates(telemetry),
        Ingested::Prebuilt(tree) => Evaluator::new(telemetry).evaluate_tree(tree),
    });
    let eval_duration = eval_start.elapsed();

    // --- 4. Layout ---
    let layout_start = Instant::now();
    let layout = LayoutEngine::new().calculate_layout(
        ingested.fault_tree(),
        cli.strategy.into(),
        &ViewportConfig::new(cli.viewport_width),
    );
    let layout_duration = layout_start.elapsed();

    let diagnosis = cli.diagnose.as_deref().map(|keyword| match &ingested {
        Ingested::Workflow(parsed) => parsed.diagnosis_path(keyword),
        Ingested::Prebuilt(_) => Vec::new(),
    });

    if cli.json {
        let output = serde_json::json!({
            "fault_tree": ingested.fault_tree(),
            "layout": &layout,
            "view_bounds": layout.view_bounds(),
            "reasoning": report.as_ref().map(|r| &r.steps),
            "diagnosis_path": diagnosis,
        });
        let text = serde_json::to_string_pretty(&output)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize output: {}", e)));
        println!("{}", text);
        return;
    }

    // --- 5. Summary ---
    println!("\n--- Fault Tree ---");
    print!(
        "{}",
        DisplayTree {
            root: ingested.fault_tree()
        }
    );

    println!("\n--- Layout ({}) ---", layout.strategy);
    for (id, p) in layout.positions.iter() {
        println!("  {:<24} x={:>9.1} y={:>9.1} level={}", id, p.x, p.y, p.level);
    }
    let bounds = layout.view_bounds();
    let transform = layout.fit_to_canvas(&CanvasSize::default());
    println!(
        "Bounds: {:.0}x{:.0} at ({:.0}, {:.0}), canvas scale {:.3}",
        bounds.width, bounds.height, bounds.min_x, bounds.min_y, transform.scale
    );
    println!("Connections: {}", layout.connections.len());

    if let Some(report) = &report {
        println!("\n--- Reasoning ---");
        if report.steps.is_empty() {
            println!("  -> No logic gates to evaluate");
        } else {
            println!("{}", TraceFormatter::format_steps(&report.steps));
        }
        println!(
            "true: {}, false: {}, unknown: {}",
            report.count(GateState::True),
            report.count(GateState::False),
            report.count(GateState::Unknown)
        );
        if !report.degraded.is_empty() {
            println!("Degraded gates: {}", report.degraded.join(", "));
        }
    }

    if let Some(path) = &diagnosis {
        println!("\n--- Diagnosis Path ---");
        if path.is_empty() {
            println!("  -> No matching node");
        } else {
            println!("  {}", path.join(" -> "));
        }
    }

    let total_duration = total_start.elapsed();
    println!("\n--- Performance Summary ---");
    println!("File Loading:   {:?}", load_duration);
    println!("Tree Building:  {:?}", parse_duration);
    println!("Evaluation:     {:?}", eval_duration);
    println!("Layout:         {:?}", layout_duration);
    println!("-----------------------------");
    println!("Total:          {:?}", total_duration);
    println!();
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
