use chrono::{Local, NaiveDate};

use super::RealRuntime;

impl RealRuntime {
    pub(crate) fn today_impl(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
