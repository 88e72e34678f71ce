use steno_core::key_combo::parse_key_combinations;
use steno_core::types::KeyEdge;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let combos: Vec<String> = std::env::args().skip(1).collect();
    if combos.is_empty() {
        anyhow::bail!("usage: combo_dump <combination>...  e.g. 'Control_L(Alt_L(Delete))'");
    }

    for combo in &combos {
        println!("{}", combo);
        for event in parse_key_combinations(combo) {
            let edge = match event.edge {
                KeyEdge::Press => "down",
                KeyEdge::Release => "up",
            };
            println!("  {:<12} {:#06x} {}", event.key, event.keysym, edge);
        }
    }

    Ok(())
}
