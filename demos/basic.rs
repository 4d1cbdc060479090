//! Basic example of using the word-chain engine

use wordchain_core::{
    build_connections, derive_path, extract_restrictions, Alphabet, ChainSolver, Coordinate,
    GridModel, SolverConfig, WordList,
};

fn main() {
    // A snake that crosses itself at (2,2)
    let grid_text = "..###\n..#.#\n#####\n..#..\n..#..\n";
    let grid = GridModel::from_text(grid_text).expect("valid grid");

    println!("Grid:");
    println!("{}", grid);

    // Walk the marked cells
    let start = Coordinate::new(0, 2);
    let path = match derive_path(&grid, start) {
        Ok(path) => path,
        Err(e) => {
            println!("Could not derive path: {}", e);
            return;
        }
    };
    println!("Path has {} cells:", path.len());
    let cells: Vec<String> = path.iter().map(|c| c.to_string()).collect();
    println!("{}\n", cells.join(" -> "));

    // Build the word graph
    let words = WordList::parse("also\nnaval\nsolar\narena", &Alphabet::latin())
        .expect("valid word list");
    let graph = build_connections(words.words()).expect("distinct words");
    println!("Connections: {}", graph.edge_count());
    for word in graph.words() {
        if let Some(next) = graph.successors(word) {
            println!("  {} -> {:?}", word, next);
        }
    }

    // Solve
    let restrictions = extract_restrictions(&path, &grid);
    let solver = ChainSolver::with_config(SolverConfig::default());
    let (result, stats) = solver.solve_with_stats(&graph, words.words(), &restrictions);
    println!("\nSearched {} nodes in {:?}", stats.nodes, stats.elapsed);
    match result {
        Ok(solution) => {
            println!("Words: {}", solution.words.join(", "));
            println!("Chain: {}", solution.chain);
        }
        Err(e) => println!("No solution: {}", e),
    }
}
