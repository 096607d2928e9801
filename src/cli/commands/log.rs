use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { print } = cmd
        && *print
    {
        let pool = DbPool::open(&cfg.database)?;
        let rows = load_log(&pool.conn)?;

        let mut table = Table::new(vec![
            "Timestamp".to_string(),
            "Operation".to_string(),
            "Message".to_string(),
        ]);
        for (ts, op, msg) in rows {
            table.add_row(vec![ts, op, msg]);
        }

        println!("{}", table.render());
    }

    Ok(())
}
