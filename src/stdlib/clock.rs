// SPDX-License-Identifier: MIT

//! `time` module: UTC wall-clock helpers for time-of-day gating

use rhai::plugin::*;
use rhai::Module;

#[export_module]
mod time_functions {
    use chrono::{Datelike, Timelike, Utc};
    use rhai::INT;

    /// Seconds since the unix epoch
    pub fn now() -> INT {
        Utc::now().timestamp()
    }

    /// Current hour of the day, 0-23
    pub fn hour() -> INT {
        Utc::now().hour() as INT
    }

    /// Current day of the week, `Mon` through `Sun`
    pub fn weekday() -> String {
        Utc::now().weekday().to_string()
    }
}

pub fn module() -> Module {
    exported_module!(time_functions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rhai::Engine;

    fn engine() -> Engine {
        let mut engine = Engine::new();
        engine.register_static_module("time", module().into());
        engine
    }

    #[test]
    fn test_now_is_recent() {
        let now = engine().eval::<rhai::INT>("time::now()").unwrap();
        // 2023-11-14
        assert!(now > 1_700_000_000);
    }

    #[test]
    fn test_hour_and_weekday() {
        let engine = engine();
        let hour = engine.eval::<rhai::INT>("time::hour()").unwrap();
        assert!((0..24).contains(&hour));

        let day = engine.eval::<String>("time::weekday()").unwrap();
        assert!(["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"].contains(&day.as_str()));
    }
}
