//! List cafes command handler

use crate::config::Config;
use crate::db::Store;

fn yes_no(flag: bool) -> &'static str {
    if flag { "✓" } else { "✗" }
}

pub async fn cmd_list_cafes(config: &Config, location: Option<&str>) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let cafes = match location {
        Some(location) => store.find_cafes_by_location(location).await?,
        None => store.list_cafes().await?,
    };

    if cafes.is_empty() {
        match location {
            Some(location) => println!("No cafes at '{}'.", location),
            None => println!("No cafes yet. Add one from the web UI at /add."),
        }
        return Ok(());
    }

    println!("Cafes ({} total)", cafes.len());
    println!("{:-<70}", "");

    for cafe in cafes {
        let price = cafe.coffee_price.as_deref().unwrap_or("?");
        println!("[{}] {} ({}) {}", cafe.id, cafe.name, cafe.location, price);
        println!(
            "  Seats: {} | Sockets: {} | Toilet: {} | Wifi: {} | Calls: {}",
            cafe.seats,
            yes_no(cafe.has_sockets),
            yes_no(cafe.has_toilet),
            yes_no(cafe.has_wifi),
            yes_no(cafe.can_take_calls)
        );
    }

    Ok(())
}
