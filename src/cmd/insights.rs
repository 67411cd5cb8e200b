use anyhow::Result;

use cyclepredict::core::report;
use cyclepredict::db::Database;
use cyclepredict::models::config::Config;
use cyclepredict::output;
use cyclepredict::output::human;

pub fn run(human_flag: bool) -> Result<()> {
    let db = Database::open(&Config::db_path())?;
    let report = report::generate(&db)?;

    if human_flag {
        println!("{}", human::format_report(&report));
    } else {
        output::print_success("insights", &report)?;
    }
    Ok(())
}
