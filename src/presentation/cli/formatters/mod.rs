pub mod alert_fmt;
