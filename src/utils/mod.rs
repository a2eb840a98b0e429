mod perf;
mod time_utils;

pub use time_utils::{
    AppInstant, TimeUtils, epoch_sec_to_date_string, epoch_to_date_string, normalize_day,
};
