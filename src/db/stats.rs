use crate::db::migrate::table_exists;
use crate::db::pool::DbPool;
use crate::db::queries::record_span;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use chrono::NaiveDate;
use std::fs;

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    if !table_exists(&pool.conn, "attendance")? {
        println!("{}• Schema:{} {}not initialized{}", CYAN, RESET, GREY, RESET);
        println!();
        return Ok(());
    }

    //
    // 2) TOTAL RECORDS + DATE RANGE
    //
    let (count, first_date, last_date) = record_span(&pool.conn)?;
    println!(
        "{}• Saved marks:{} {}{}{}",
        CYAN, RESET, GREEN, count, RESET
    );

    let fmt_first = first_date
        .clone()
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last_date
        .clone()
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 3) AVERAGE MARKS/DAY
    //
    if let (Some(f), Some(l)) = (first_date, last_date)
        && let (Ok(d1), Ok(d2)) = (
            NaiveDate::parse_from_str(&f, "%Y-%m-%d"),
            NaiveDate::parse_from_str(&l, "%Y-%m-%d"),
        )
    {
        let days = (d2 - d1).num_days() + 1;
        let avg = count as f64 / days as f64;
        println!("{}• Average marks/day:{} {:.2}", CYAN, RESET, avg);
    }

    println!();
    Ok(())
}
