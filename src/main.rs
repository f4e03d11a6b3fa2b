//! `anime-inventory`: terminal front end for the anime purchase table.
//!
//! Reads `anime_inventory.toml` from the working directory if it exists,
//! then shows the purchase list and form and reads commands from stdin.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anime_inventory::config::CONFIG_FILE;
use anime_inventory::ui::{self, Input};
use anime_inventory::{Controller, InventoryConfig, PurchaseStore};
use tracing::info;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr and stay quiet unless RUST_LOG asks for more.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let config = InventoryConfig::load(Path::new(CONFIG_FILE))?;
    info!("using database {}", config.db_path.display());

    let mut controller = Controller::new(PurchaseStore::new(config.sqlite()));
    controller.start();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    write!(stdout, "{}", ui::render(&controller))?;

    for line in stdin.lock().lines() {
        let line = line?;
        match ui::parse_input(&line) {
            Ok(Input::Quit) => break,
            Ok(Input::Help) => {
                writeln!(stdout, "{}", ui::HELP)?;
                continue;
            }
            Ok(Input::SetField(field, value)) => {
                ui::set_field(controller.form_mut(), field, value);
            }
            Ok(Input::ClearForm) => controller.form_mut().clear(),
            Ok(Input::Gesture(gesture)) => {
                if !controller.handle(gesture) {
                    writeln!(stdout, "No such row.")?;
                    continue;
                }
            }
            Err(hint) => {
                writeln!(stdout, "{}", hint)?;
                continue;
            }
        }
        write!(stdout, "\n{}", ui::render(&controller))?;
        stdout.flush()?;
    }

    info!("bye");
    Ok(())
}
