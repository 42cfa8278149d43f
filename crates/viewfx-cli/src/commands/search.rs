use std::io::BufRead;

use anyhow::Result;
use tracing::debug;

use viewfx_core::search::filter_items;

/// Filter `items` (or stdin lines when none are given) by `term`
pub fn run(term: &str, items: Vec<String>) -> Result<()> {
    let items = if items.is_empty() {
        std::io::stdin()
            .lock()
            .lines()
            .collect::<std::io::Result<Vec<_>>>()?
    } else {
        items
    };

    let shown = filter_items(term, &items);
    let count = shown.iter().filter(|&&visible| visible).count();
    debug!(term, total = items.len(), shown = count, "Items filtered");

    for (item, visible) in items.iter().zip(shown) {
        if visible {
            println!("{}", item);
        }
    }
    eprintln!("{} of {} items shown", count, items.len());

    Ok(())
}
