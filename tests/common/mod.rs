#![allow(dead_code)]

use assert_cmd::Command;
use chrono::{Duration, Local, NaiveDate};
use std::path::Path;

pub fn pregtrack_cmd(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("pregtrack").unwrap();
    cmd.env("PREGTRACK_HOME", home);
    cmd.env_remove("PREGTRACK_DEVICE");
    cmd.env_remove("PREGTRACK_LOG");
    cmd
}

pub fn init_home(home: &Path) {
    pregtrack_cmd(home).arg("init").assert().success();
}

pub fn days_from_today(days: i64) -> NaiveDate {
    Local::now().date_naive() + Duration::days(days)
}

pub fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
