use log::info;
use std::sync::Arc;
use times_tables::cli::Args;
use times_tables::database_factory::DatabaseFactory;
use times_tables::gui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse_args();
    let defaults = args.game_defaults()?;
    let db_config = args.database_config()?;

    info!(
        "Opening {} (tables {}, focus {})",
        db_config.get_path(),
        defaults.select,
        defaults.focus.as_str()
    );
    let db = Arc::new(DatabaseFactory::create(db_config)?);

    gui::run_app(db, defaults)?;

    Ok(())
}
