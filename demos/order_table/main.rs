//! Order table demo
//!
//! Seeds the store from `orders.json`, replays a few user actions and prints
//! the visible page after each one.
//!
//! ```sh
//! RUST_LOG=order_view=debug cargo run --example order_table
//! cargo run --example order_table -- path/to/orders.json path/to/view.yaml
//! ```

use anyhow::{Context, Result};
use order_view::prelude::*;
use tracing_subscriber::EnvFilter;

const DEFAULT_SEED: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/order_table/orders.json");
const DEFAULT_CONFIG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/order_table/view.yaml");

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let seed_path = args.next().unwrap_or_else(|| DEFAULT_SEED.to_string());
    let config_path = args.next().unwrap_or_else(|| DEFAULT_CONFIG.to_string());

    let config = ViewConfig::from_yaml_file(&config_path)
        .with_context(|| format!("loading view config from {}", config_path))?;
    let store = SeedData::load_store(&seed_path)
        .with_context(|| format!("loading orders from {}", seed_path))?;

    let bus = config.event_bus();
    let mut events = bus.subscribe();
    let mut view = OrderView::new(store, config).with_event_bus(bus);

    println!("Order Management\n");
    print_snapshot("Initial view", &view.snapshot());

    let script = [
        ViewAction::NextClicked,
        ViewAction::ColumnHeaderClicked { key: SortKey::Price },
        ViewAction::ColumnHeaderClicked { key: SortKey::Price },
        ViewAction::StatusSelected {
            status: StatusFilter::Only(OrderStatus::Pending),
        },
        ViewAction::SearchChanged {
            text: "an".to_string(),
        },
        ViewAction::SearchChanged {
            text: String::new(),
        },
        ViewAction::DateRangeChanged {
            start: "2024-02-01".to_string(),
            end: "2024-02-29".to_string(),
        },
    ];

    for action in script {
        let title = format!("{:?}", action);
        let snapshot = view.dispatch(action);
        print_snapshot(&title, &snapshot);
    }

    if let Some(first) = view.snapshot().visible().first().map(|o| o.id.clone()) {
        let prompt = |message: &str| {
            println!("? {} [y/N] y", message);
            true
        };
        let outcome = view.request_removal(&first, &prompt);
        print_snapshot(&format!("Remove {} -> {:?}", first, outcome), &view.snapshot());
    }

    let mut published = 0;
    while events.try_recv().is_ok() {
        published += 1;
    }
    tracing::info!(published, "Events published during the demo");

    Ok(())
}

fn print_snapshot(title: &str, snapshot: &ViewSnapshot) {
    println!("== {}", title);
    let tabs: Vec<String> = snapshot
        .status_tabs()
        .iter()
        .map(|tab| {
            if tab.active {
                format!("[{}]", tab.label)
            } else {
                tab.label.to_string()
            }
        })
        .collect();
    println!("   {}   ({})", tabs.join("  "), snapshot.result_label());

    if snapshot.pagination.is_empty() {
        println!("   No orders match.\n");
        return;
    }

    for key in SortKey::ALL {
        let arrow = match snapshot.sort_indicator(key) {
            Some(SortDirection::Asc) => "▲",
            Some(SortDirection::Desc) => "▼",
            None => " ",
        };
        print!("   {}{:<10}", arrow, key);
    }
    println!();

    for order in snapshot.visible() {
        println!(
            "    {:<10} {:<18} {:<22} {:<11} {:>10}  {}",
            order.id, order.name, order.address, order.date, order.price, order.status
        );
    }

    if snapshot.pagination.shows_controls() {
        let pages: Vec<String> = snapshot
            .pagination
            .page_numbers()
            .map(|page| {
                if page == snapshot.page_index() {
                    format!("[{}]", page)
                } else {
                    page.to_string()
                }
            })
            .collect();
        println!("   < {} >", pages.join(" "));
    }
    println!();
}
