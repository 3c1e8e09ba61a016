//! Reading the operating system clock.

/// The system clock's idea of now, in epoch milliseconds.
#[cfg(unix)]
pub fn sys_time_millis() -> i64 {
    let mut tv = libc::timespec { tv_sec: 0, tv_nsec: 0 };
    unsafe {
        let _ = libc::clock_gettime(libc::CLOCK_REALTIME, &mut tv);
    }
    tv.tv_sec as i64 * 1_000 + tv.tv_nsec as i64 / 1_000_000
}

/// The system clock's idea of now, in epoch milliseconds.
#[cfg(not(unix))]
pub fn sys_time_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_millis() as i64,
        Err(before_epoch) => -(before_epoch.duration().as_millis() as i64),
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn clock_is_past_2020() {
        // a loose sanity bound rather than a flaky equality
        assert!(sys_time_millis() > 1_577_836_800_000);
    }
}
