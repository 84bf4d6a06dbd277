//! Usage demonstration: builds the reference graph and prints
//! its table, a forward lookup and a reverse lookup.

use std::process;

use assoc_graph::{GraphError, IncidenceGraph};

fn run() -> Result<(), GraphError> {
    let mut graph = IncidenceGraph::new();
    graph.add("a", [("e", 2), ("c", 2), ("d", 4)])?;
    graph.add("b", [("c", 1)])?;
    graph.add("c", [("d", 1), ("c", 1)])?;

    println!("{}", graph);
    println!();

    let reactions = graph.lookup("a")?;
    println!(
        "Reactions to 'a': {}",
        serde_json::to_string(&reactions).unwrap_or_default()
    );
    let incentives = graph.lookup_reverse("d")?;
    println!(
        "Incentives for 'd': {}",
        serde_json::to_string(&incentives).unwrap_or_default()
    );
    println!(
        "Fingerprint: {}",
        assoc_graph::hashing::fingerprint(&graph)
    );

    match graph.lookup("d") {
        Err(err) => println!("Lookup of 'd': {}", err),
        Ok(found) => println!("Lookup of 'd': {:?}", found),
    }
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("[FAIL] {}", err);
        process::exit(1);
    }
}
