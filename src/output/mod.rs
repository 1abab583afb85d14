pub mod formatter;

pub use formatter::{
    format_events_summary, format_group_detail, format_standings_csv, format_standings_table,
    format_stat, should_use_colors,
};
